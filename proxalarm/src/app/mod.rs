//! Application bootstrap.
//!
//! [`AlarmApp`] builds the store and dispatcher once from configuration and
//! hands out engines bound to them.

mod bootstrap;
mod error;

pub use bootstrap::AlarmApp;
pub use error::AppError;
