//! Service Ports

mod clock;

pub use clock::Clock;
