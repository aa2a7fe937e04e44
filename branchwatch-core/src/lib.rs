//! Branchwatch Core
//!
//! Core types and logic for the Branchwatch main-branch status tracker.
//!
//! This crate contains:
//! - Domain: the reconciliation engine for the PR status report
//! - DTOs: GitHub API wire types

pub mod domain;
pub mod dto;
