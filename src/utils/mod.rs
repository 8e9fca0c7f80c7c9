pub mod error;
pub mod logging;

pub use error::{AppError, ConfigError, FetchError, NotifyError, ParseError, PersistError};
