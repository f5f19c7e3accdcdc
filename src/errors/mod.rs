use std::fmt;

use crate::utils::validation::FormErrors;

#[derive(Debug)]
pub enum AppError {
    Validation(FormErrors),
    Auth(String),
    Input(String),
    NotFound(String),
    Storage(String),
    Print(String),
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation Error: {}", errors),
            AppError::Auth(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Input(msg) => write!(f, "Invalid Input: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
            AppError::Print(msg) => write!(f, "Print Error: {}", msg),
            AppError::Config(msg) => write!(f, "Config Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}
