//! Category page cart controller.
//!
//! This crate provides the "add all to cart" / "remove all items" component
//! of a category page, as a library: configuration, a typed storefront API
//! client, and the [`controller::CartBulkOperationsController`] that wires
//! the two workflows to an injected page surface.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bigcommerce;
pub mod config;
pub mod controller;
pub mod ui;
