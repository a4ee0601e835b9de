/// Shared error type used across the auxi crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config: {0}")]
    Config(String),

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// The calendar could not produce a value for the requested operation.
    #[error("unresolved: {0}")]
    Unresolved(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
