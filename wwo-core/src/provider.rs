use crate::{Config, ForecastRequest, WeatherError, WeatherReport, provider::wwo::WorldWeatherOnline};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod wwo;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_forecast(&self, request: &ForecastRequest) -> Result<WeatherReport, WeatherError>;
}

/// Construct the World Weather Online provider from config and the environment.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let provider =
        WorldWeatherOnline::with_options(config.resolve_api_key(), config.base_url(), config.timeout())?;
    Ok(Box::new(provider))
}
