//! # LaptopBay DB
//!
//! The document store behind the LaptopBay API.
//!
//! [`DocumentStore`] is the store-access capability: it is built once at
//! startup and handed to the gate, the admin policy and every handler through
//! application state. Backends:
//!
//! - [`PgDocumentStore`]: PostgreSQL, one JSONB `documents` table
//! - [`MemoryStore`]: in-process, used by tests and database-less runs
//!
//! Either can be wrapped in [`TimeoutStore`] to bound every call.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use laptopbay_db::{Collection, Filter, MemoryStore, SharedStore};
//!
//! let store: SharedStore = Arc::new(MemoryStore::new());
//! let users = store.find(Collection::Users, &Filter::eq("role", "admin")).await?;
//! ```

pub mod collection;
pub mod document;
pub mod error;
pub mod filter;
pub mod memory;
pub mod postgres;
pub mod store;
pub mod timeout;

pub use collection::Collection;
pub use document::{DeleteOutcome, Document, ID_FIELD, InsertOutcome, UpdateOutcome};
pub use error::StoreError;
pub use filter::Filter;
pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;
pub use store::{DocumentStore, SharedStore};
pub use timeout::TimeoutStore;
