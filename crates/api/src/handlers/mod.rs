//! Request handlers, one submodule per resource.
//!
//! Handlers delegate to the repositories in `moim_db` and map errors via
//! [`AppError`](crate::error::AppError). Cross-cutting pieces live in
//! [`rollup`] (parent status recomputation) and [`activities`] (audit feed
//! recording).

pub mod activities;
pub mod admin;
pub mod archive;
pub mod auth;
pub mod comments;
pub mod diagnostics;
pub mod goals;
pub mod invitations;
pub mod meetings;
pub mod projects;
pub mod rollup;
pub mod tasks;
pub mod users;
pub mod workspaces;
