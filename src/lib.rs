// src/lib.rs

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod sync;
pub mod utils;

pub use routes::create_router;
