pub mod audio;
pub mod controller;
pub mod lookup;
pub mod query;

pub use audio::AudioPlayer;
pub use controller::{LookupController, LookupTicket};
pub use lookup::{LookupOutcome, perform_lookup, settle};
pub use query::{Query, ValidationError};

#[cfg(test)]
pub(crate) mod testing;
