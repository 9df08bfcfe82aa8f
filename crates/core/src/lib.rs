//! Category Cart Core - Shared domain types.
//!
//! This crate provides the common types used by the category-page cart
//! component:
//! - `category-page` - the bulk add/remove cart controller and its API client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and the cart line item

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
