//! Row models for the store boundary.

pub mod room;
