//! # LaptopBay Core
//!
//! Foundational types shared by every LaptopBay crate:
//!
//! - [`errors`]: [`AppError`], the single error type handlers return
//! - [`response`]: [`ApiResponse`], the `{ data, success, message }` envelope
//!
//! # Example
//!
//! ```ignore
//! use laptopbay_core::{ApiResponse, AppError};
//!
//! async fn handler() -> Result<ApiResponse<Vec<String>>, AppError> {
//!     Ok(ApiResponse::ok(vec![], "Successfully find the all data"))
//! }
//! ```

pub mod errors;
pub mod response;

pub use errors::AppError;
pub use response::ApiResponse;
