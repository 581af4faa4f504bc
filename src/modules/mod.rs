pub mod auth;
pub mod blogs;
pub mod categories;
pub mod documents;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;
