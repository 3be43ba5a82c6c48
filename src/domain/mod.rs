//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types and the operations on them
//! - `wire.rs`: Raw serde structs matching backend responses
//! - `convert.rs`: `From` conversions from wire to domain types
//! - `client.rs`: Sub-client with HTTP methods

pub mod dataset;
