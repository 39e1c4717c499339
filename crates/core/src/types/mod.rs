//! Core types for Wholesome Wellness Way.
//!
//! This module provides type-safe wrappers and the two record shapes stored
//! in the remote tables.

pub mod ad;
pub mod id;
pub mod validation;
pub mod web_result;

pub use ad::{Ad, AdFields};
pub use id::*;
pub use validation::{RequiredField, ValidationError, validate_required};
pub use web_result::{WebResult, WebResultFields};
