//! Row models and form DTOs.
//!
//! Row structs derive `FromRow` + `Serialize`; form structs derive
//! `Deserialize` + `Validate` and are checked before any write.

pub mod author;
pub mod book;
pub mod chef;
pub mod genre;
pub mod ingredient;
pub mod movie;
pub mod publisher;
pub mod recipe;
pub mod reference;
pub mod review;
pub mod session;
pub mod stats;
pub mod tag;
pub mod user;
