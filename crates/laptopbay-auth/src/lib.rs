//! # LaptopBay Auth
//!
//! Identity claims and the signed-token codec for the LaptopBay API.
//!
//! - [`claims`]: [`Claims`], the caller-supplied attribute bag carried in a token
//! - [`jwt`]: [`create_token`] and [`verify_token`]
//! - [`error`]: [`AuthError`], the failure taxonomy of the token gate
//!
//! Tokens establish identity only. Roles are never read from a token; the
//! admin policy resolves them from the user store on every request.

pub mod claims;
pub mod error;
pub mod jwt;

pub use claims::Claims;
pub use error::AuthError;
pub use jwt::{create_token, verify_token};
