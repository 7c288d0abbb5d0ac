//! Adapters the domain drives through its ports.
//!
//! Each adapter translates between domain types and one piece of external
//! infrastructure; business rules never live here.

pub mod persistence;
