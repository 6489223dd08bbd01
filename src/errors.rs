//!
//! Common Errors.
//!
use std::fmt;

pub type Result<T> = std::result::Result<T, ShibaError>;

#[derive(Debug)]
pub enum ShibaError {
    UrlParseError(String),
    UnsupportedDriver(String),
    DatabaseError(String),
    PoolError(String),
    ConnectionValidError,
    Closed,
}

impl fmt::Display for ShibaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShibaError::UrlParseError(ref err) => err.fmt(f),
            ShibaError::UnsupportedDriver(ref scheme) => {
                write!(f, "No compiled driver for `{}`", scheme)
            }
            ShibaError::DatabaseError(ref err) => err.fmt(f),
            ShibaError::PoolError(ref err) => err.fmt(f),
            ShibaError::ConnectionValidError => write!(f, "Connection failed validation"),
            ShibaError::Closed => write!(f, "Datasource is closed"),
        }
    }
}

impl std::error::Error for ShibaError {}

impl From<url::ParseError> for ShibaError {
    fn from(err: url::ParseError) -> Self {
        ShibaError::UrlParseError(err.to_string())
    }
}

#[cfg(feature = "mysql-sync")]
impl From<mysql::Error> for ShibaError {
    fn from(err: mysql::Error) -> Self {
        ShibaError::DatabaseError(err.to_string())
    }
}

#[cfg(feature = "mysql-sync")]
impl From<r2d2::Error> for ShibaError {
    fn from(err: r2d2::Error) -> Self {
        ShibaError::PoolError(err.to_string())
    }
}
