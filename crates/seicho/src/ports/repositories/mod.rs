//! Repository Ports

mod state_repository;

pub use state_repository::StateRepository;
