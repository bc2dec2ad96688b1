//! Device module - radio devices placed in a scene
//!
//! Transmitters, receivers and RIS share a position, an orientation and a
//! velocity, kept in a `RadioDevice` and accessed through the `Device` trait.

mod core;
mod receiver;
mod transmitter;

pub use self::core::{Device, RadioDevice};
pub use receiver::Receiver;
pub use transmitter::Transmitter;
