//! Watcher for the CommanderHistory directory.
//!
//! Seeds one [`LogState`] per history file at startup, then polls for
//! modified files, feeds fresh observations to the matching state and hands
//! notification-worthy changes to the alert [`Dispatcher`](crate::alert::Dispatcher).

mod aggregator;
mod config;
pub mod core;
mod events;
mod registry;
mod state;


pub use aggregator::ChangeAggregator;
pub use config::WatcherConfig;
pub use self::core::Watcher;
pub use events::PollSummary;
pub use registry::StateRegistry;
pub use state::LogState;
