//! `ShopEasy` storefront library.
//!
//! The state behind the mobile storefront screens: the user profile and its
//! view/edit lifecycle, the cart ledger, the home screen's reveal animation
//! and the screen stack. Rendering is left to the front end.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod navigation;
pub mod profile;
pub mod reveal;
pub mod storage;
