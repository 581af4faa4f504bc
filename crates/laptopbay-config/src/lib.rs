//! # LaptopBay Config
//!
//! Configuration types for the LaptopBay API, each loaded from environment
//! variables through a `from_env()` constructor:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`server`]: listen address
//! - [`store`]: document store connection and call budget
//! - [`cors`]: allowed origins
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ACCESS_TOKEN_SECRET` (or `JWT_SECRET`) | development placeholder |
//! | `JWT_EXPIRY` | `2592000` (30 days) |
//! | `HOST` / `PORT` | `0.0.0.0` / `5000` |
//! | `DATABASE_URL` (or `URI`) | unset, in-memory store |
//! | `DB_MAX_CONNECTIONS` | `5` |
//! | `STORE_TIMEOUT_MS` | `5000` |
//! | `ALLOWED_ORIGINS` | any origin |

pub mod cors;
pub mod jwt;
pub mod server;
pub mod store;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use store::StoreConfig;
