//! Core types, input tables, configuration and errors for the Solvere
//! animation pipeline.
//!
//! This crate provides the foundational types used across the other solvere crates:
//! - Value types (axis-angle orientations, direction colors)
//! - Rectangular numeric tables and the typed frame records read from them
//! - Pipeline and scene configuration
//! - Error types

pub mod config;
pub mod errors;
pub mod frames;
pub mod table;
pub mod types;

pub use config::*;
pub use errors::*;
pub use frames::*;
pub use table::*;
pub use types::*;
