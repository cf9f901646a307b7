//! Shared types for livery.
//!
//! This crate contains the vocabulary shared by all livery crates: the error
//! type, theme categories and style modes, the raw selection snapshot, and the
//! optional tool configuration.

pub mod config;
pub mod error;
pub mod kinds;
