//! colonnade-core
//!
//! Pure domain types, partition keys and clustering order for the Colonnade
//! wide-column data model. No storage SDK dependency. Every engine and the
//! REST layer speak this vocabulary.

pub mod clustering;
pub mod error;
pub mod ids;
pub mod keys;
pub mod models;
pub mod predicate;
pub mod row;
