//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod analyze;
mod comments;
mod ideas;
mod prompts;

pub use analyze::*;
pub use comments::*;
pub use ideas::*;
pub use prompts::*;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Response type for JSON handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Query parameters for session-scoped listing.
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session: String,
}

/// Body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
