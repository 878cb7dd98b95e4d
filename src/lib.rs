pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod seed;
pub mod services;
pub mod store;

pub use error::Error;
