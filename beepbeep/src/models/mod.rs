pub mod constants;
pub mod observation;
pub mod presence;

pub use observation::{EntityId, LogId, Observation};
pub use presence::PresenceChange;
