//! Core types and trait definitions for the Roster contact directory.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend (`roster-store-sqlite`) and the REST binding (`roster-api`)
//! both depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod query;
pub mod service;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use service::ContactService;
