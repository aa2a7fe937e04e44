//! Data Transfer Objects for the GitHub REST API
//!
//! Wire shapes of the few GitHub resources the tool reads and writes. Only
//! the fields that are used are declared; serde ignores the rest.

pub mod comment;
pub mod event;
pub mod pull;
pub mod run;
