//! Gateway wire protocol.

mod messages;

pub use messages::*;
