//! Concrete game implementations.

pub mod loveletter;
