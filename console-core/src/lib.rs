pub mod checker;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;

pub use checker::{AvailabilityCheck, AvailabilityClient};
pub use config::Config;
pub use error::{Error, Result};
pub use models::Availability;
