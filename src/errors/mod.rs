pub mod app_error;
pub mod startup_error;

pub use app_error::AppError;
pub use startup_error::StartupError;
