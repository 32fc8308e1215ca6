pub mod catalog;
pub mod config;
pub mod diagram;
pub mod error;
pub mod models;
pub mod schema;

pub use catalog::Catalog;
pub use config::DiagramConfig;
pub use diagram::render_er;
pub use error::{AppError, AppResult};
