//! Filesystem side of the watcher: finding history files, noticing when
//! they change, and turning their contents into observations.

mod change_detector;
mod discovery;
mod record_source;

pub use change_detector::ChangeDetector;
pub use discovery::{discover_history_files, parse_history_file_name, HistoryFile};
pub use record_source::{epoch_to_datetime, parse_history, JsonRecordSource, RecordSource};
