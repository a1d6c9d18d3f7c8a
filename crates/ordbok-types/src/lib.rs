pub mod messages;
mod types;

pub use types::*;
