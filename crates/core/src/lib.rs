//! `ShopEasy` Core - Shared types library.
//!
//! This crate provides common types used across all `ShopEasy` components:
//! - `storefront` - Cart ledger, profile lifecycle and reveal sequencing
//! - `cli` - Command-line front end over the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no timers. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and emails
//! - [`text`] - Whitespace rules shared by form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod text;
pub mod types;

pub use types::*;
