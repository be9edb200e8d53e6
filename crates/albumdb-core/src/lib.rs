//! Core domain for albumdb.
//!
//! This crate defines the album model, the SQLite-backed record store that
//! enforces one album per artist, and the plain-text table renderer.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod render;
pub mod schema;

pub use error::{Error, Result};
