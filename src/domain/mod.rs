//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `wire.rs`: Raw serde structs matching the API's JSON
//! - `client.rs`: Sub-client with the endpoint methods
//! - `mod.rs`: Re-exports

pub mod wallet;
