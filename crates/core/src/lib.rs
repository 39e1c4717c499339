//! Wholesome Wellness Way Core - Shared types library.
//!
//! This crate provides the record types used across all components:
//! - `storefront` - Public-facing site (home page and ads listing)
//! - `admin` - Administration panel for the `ads` and `web_results` tables
//! - `store` - Record store client that reads and writes these types
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, the `Ad` and `WebResult` records, and
//!   required-field validation
//! - [`text`] - Display helpers for record text

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod text;
pub mod types;

pub use text::split_sentences;
pub use types::*;
