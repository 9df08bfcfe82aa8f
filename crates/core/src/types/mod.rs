//! Core types for the category cart controller.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod line_item;

pub use id::*;
pub use line_item::LineItem;
