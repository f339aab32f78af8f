//! Shared test fixtures for ChromaForge crates.
//!
//! This crate provides graph builders and constraint scenarios for testing.
//! It depends only on `chromaforge-core` so every crate can use it.
//!
//! - [`graphs`] - classic graph families and seeded random graphs
//! - [`scenario`] - graphs paired with constraint sets
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! chromaforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use chromaforge_test::graphs::{complete, random};
//! use chromaforge_test::scenario::fixed_and_excluded_path;
//! ```

pub mod graphs;
pub mod scenario;

pub use scenario::Scenario;
