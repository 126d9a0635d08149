//! Core types and trait definitions for the Rostrum talk review service.
//!
//! This crate is deliberately free of HTTP, credential, and database
//! dependencies. All other crates depend on it; it depends on nothing
//! proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod authority;
pub mod error;
pub mod identity;
pub mod store;
pub mod talk;

pub use error::{Error, Result};
