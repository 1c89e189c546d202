//! Row structs for the tourism entity tables.
//!
//! Inserts go through the `New*` records from `batohi_core::entities`;
//! these structs are what list queries read back.

pub mod entity;
