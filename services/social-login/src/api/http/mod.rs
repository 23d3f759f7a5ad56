//! HTTP 接口（axum）

mod error;
mod routes;
mod state;

pub use error::*;
pub use routes::*;
pub use state::*;
