//! Pure computational algorithms, free of I/O and service concerns.

pub mod ranging;

pub use ranging::*;
