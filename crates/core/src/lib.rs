//! Sharepad domain logic.
//!
//! Everything in this crate is pure: no I/O, no store handles, no clocks.
//! Operations take the current time as a parameter and transform plain
//! room data, so the persistence layer (`sharepad-db`) and the HTTP
//! gateway (`sharepad-api`) can both drive them, and tests can pin time.

pub mod error;
pub mod ident;
pub mod notebook;
pub mod palette;
pub mod presence;
pub mod room;
pub mod types;
pub mod username;
