pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod prices;
pub mod provider;
pub mod ranking;
pub mod service;

pub use error::{Error, Result};
