use thiserror::Error;

use crate::config::{API_KEY_ENV, SIGNUP_URL};

/// Every way a forecast fetch can fail. Each variant has its own exit code.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "Please set your API key!\n    \
         Option 1: Set environment variable: export {env}='your_key'\n    \
         Option 2: Add `api_key = \"your_key\"` to the wwo config file\n    \
         Get a free key at: {url}",
        env = API_KEY_ENV,
        url = SIGNUP_URL
    )]
    MissingApiKey,

    #[error("No internet connection. Please check your network. ({0})")]
    Connection(String),

    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("HTTP Error: {status}")]
    Http { status: u16 },

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("API Error: {0}")]
    Api(String),

    #[error("The provider returned no forecast days for this location.")]
    EmptyForecast,
}

impl WeatherError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            WeatherError::MissingApiKey => 3,
            WeatherError::Connection(_) => 4,
            WeatherError::Timeout => 5,
            WeatherError::Http { .. } => 6,
            WeatherError::Unexpected(_) => 7,
            WeatherError::Api(_) => 8,
            WeatherError::EmptyForecast => 9,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout
        } else if err.is_connect() {
            WeatherError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            WeatherError::Http { status: status.as_u16() }
        } else {
            WeatherError::Unexpected(err.to_string())
        }
    }
}
