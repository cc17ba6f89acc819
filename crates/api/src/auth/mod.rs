//! Token generation/validation and password hashing.

pub mod jwt;
pub mod password;
