use std::{io, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use wwo_core::{Config, ForecastDays, ForecastRequest, WeatherProvider, provider_from_config};

use crate::render::{Presenter, RenderStyle};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wwo", version, about = "World Weather Online — terminal dashboard")]
pub struct Cli {
    /// City name or "lat,lon" coordinates [default: London]
    #[arg(short, long)]
    pub location: Option<String>,

    /// Number of forecast days (1-7) [default: 5]
    #[arg(short, long)]
    pub days: Option<ForecastDays>,

    /// Plain text output, even on a color terminal.
    #[arg(long)]
    pub plain: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;

        let request = ForecastRequest {
            location: self.location.unwrap_or_else(|| config.default_location().to_string()),
            days: self.days.unwrap_or_else(|| config.default_days()),
        };

        let style = RenderStyle::detect(self.plain || config.plain);
        debug!(?style, ?request, "Starting");
        let mut presenter = style.presenter(io::stdout());

        let code = match provider_from_config(&config) {
            Ok(provider) => show(provider.as_ref(), presenter.as_mut(), &request).await,
            Err(err) => {
                presenter.diagnostic(&err)?;
                Ok(ExitCode::from(err.exit_code()))
            }
        };

        code.context("Failed to write to stdout")
    }
}

/// Announce, fetch once, then render either the dashboard or one diagnostic.
pub async fn show(
    provider: &dyn WeatherProvider,
    presenter: &mut dyn Presenter,
    request: &ForecastRequest,
) -> io::Result<ExitCode> {
    presenter.announce(&request.location)?;

    match provider.get_forecast(request).await {
        Ok(report) => {
            presenter.report(&report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            presenter.diagnostic(&err)?;
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
