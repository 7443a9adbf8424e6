mod app;
mod config;
mod frontend;
mod http;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use frontend::FrontendError;
pub use http::HttpError;
pub use validation::ValidationError;
