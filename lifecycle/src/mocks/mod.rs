//! Mock registration subsystem for testing.
//!
//! Records what the tracker asks of it and lets tests fire any hook by hand.

pub mod registrar;

pub use registrar::MockRegistrar;
