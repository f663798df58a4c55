//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```
//! use todo_seed::prelude::*;
//!
//! // Now you have access to:
//! // - SeedClient (HTTP client)
//! // - Error, ApiError, Result (error handling)
//! // - SeedTodo (wire model)
//! ```

pub use crate::client::SeedClient;
pub use crate::error::{ApiError, Error, Result};
pub use crate::models::SeedTodo;
