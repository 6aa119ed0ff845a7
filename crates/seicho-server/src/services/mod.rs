//! Server-side service implementations

pub mod clock;

pub use clock::SystemClock;
