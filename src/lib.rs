pub mod config;
pub mod error;
pub mod fusionsolar;
pub mod query;
pub mod range;

pub use error::{Error, Result};
pub use fusionsolar::EnergyBalanceClient;
pub use query::QueryInstant;
pub use range::{download_range, DayFetcher};
