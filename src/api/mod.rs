//! Streaming backend API client module

pub mod client;
pub mod models;

pub use client::*;
pub use models::*;
