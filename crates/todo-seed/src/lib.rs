//! Client for the sample todo seed endpoint.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use todo_seed::prelude::*;
//! ```
//!
//! This re-exports [`SeedClient`](client::SeedClient), the error types and
//! the [`SeedTodo`](models::SeedTodo) wire model.

pub mod client;
pub mod error;
pub mod models;
pub mod prelude;

pub use client::SeedClient;
pub use error::{ApiError, Error, Result};
pub use models::SeedTodo;
