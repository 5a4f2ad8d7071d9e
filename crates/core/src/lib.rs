//! Domain types and pure helpers shared by the database and API crates.
//!
//! Nothing in here touches the network or the database, so every module
//! can be unit tested in isolation.

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod media;
pub mod pagination;
pub mod recipes;
pub mod search;
pub mod types;
