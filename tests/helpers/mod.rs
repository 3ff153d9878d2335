//! Test helpers module
//!
//! This module provides utilities and helpers for testing the Pereirinha API.
//! It includes database helpers, test data builders and an in-process app.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_app;
pub mod test_data;

pub use database_helper::*;
pub use test_app::*;
pub use test_data::*;
