//! Alerting: tone sequences, the sinks that render them, and the
//! cooldown-gated dispatcher that decides when to fire.

mod desktop;
mod dispatcher;
mod friendly;
mod sink;

pub use desktop::DesktopAlert;
pub use dispatcher::{Dispatch, Dispatcher};
pub use friendly::FriendlySet;
pub use sink::{AlertBackend, AlertKind, AlertSink, LogAlert, TerminalBell, Tone};
