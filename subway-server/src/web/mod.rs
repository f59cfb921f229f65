//! Web layer for the subway network.
//!
//! Thin JSON adapter over [`SubwayService`](crate::subway::SubwayService):
//! it parses requests, calls one service operation, and maps the outcome to
//! a status code.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
