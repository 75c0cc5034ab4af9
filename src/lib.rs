//! A small poll site: list published questions, vote on their choices and
//! look at the results.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod store;
pub mod views;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::AppState;
pub use routes::create_routes;
