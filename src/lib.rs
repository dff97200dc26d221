pub mod console;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use error::GameError;
pub use models::*;
