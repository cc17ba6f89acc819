//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod activity;
pub mod attachment;
pub mod comment;
pub mod goal;
pub mod invitation;
pub mod meeting;
pub mod project;
pub mod role;
pub mod session;
pub mod task;
pub mod user;
pub mod workspace;
