// Library root: roster management, pairing generation, and the private
// reveal flow for a two-group gift exchange.

pub mod config;
pub mod error;
pub mod pairing;
pub mod reveal;
pub mod roster;
pub mod session;

pub use error::ValidationError;
pub use pairing::{Assignment, PairingEngine, PairingSet};
pub use reveal::{RevealSession, RevealState};
pub use roster::{Group, Participant, ParticipantId, Roster, RosterSnapshot};
pub use session::{Screen, Session};
