//! Terminal output. One `Presenter` interface, two styles.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;
use wwo_core::{CurrentConditions, ForecastDay, LocationLabel, WeatherError, WeatherReport};

pub mod plain;
pub mod rich;

pub use plain::PlainPresenter;
pub use rich::RichPresenter;

pub const ATTRIBUTION: &str =
    "Data provided by World Weather Online — https://www.worldweatheronline.com";

/// Rendered in place of a value the provider left out.
pub const MISSING: &str = "N/A";

pub trait Presenter {
    fn announce(&mut self, location: &str) -> io::Result<()>;

    fn current(&mut self, label: &LocationLabel, current: &CurrentConditions) -> io::Result<()>;

    fn forecast(&mut self, days: &[ForecastDay]) -> io::Result<()>;

    fn footer(&mut self) -> io::Result<()>;

    fn diagnostic(&mut self, err: &WeatherError) -> io::Result<()>;

    fn report(&mut self, report: &WeatherReport) -> io::Result<()> {
        self.current(&report.location, &report.current)?;
        self.forecast(&report.days)?;
        self.footer()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    Rich,
    Plain,
}

impl RenderStyle {
    /// Rich output needs an attended terminal with colors on.
    pub fn detect(force_plain: bool) -> Self {
        if !force_plain && console::user_attended() && console::colors_enabled() {
            RenderStyle::Rich
        } else {
            RenderStyle::Plain
        }
    }

    pub fn presenter<W: Write + 'static>(self, out: W) -> Box<dyn Presenter> {
        match self {
            RenderStyle::Rich => Box::new(RichPresenter::new(out)),
            RenderStyle::Plain => Box::new(PlainPresenter::new(out)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Right,
    Center,
}

/// Pad `text` to `width` terminal columns. Never truncates.
pub(crate) fn pad(text: &str, width: usize, align: Align) -> String {
    let gap = width.saturating_sub(text.width());
    match align {
        Align::Left => format!("{text}{}", " ".repeat(gap)),
        Align::Right => format!("{}{text}", " ".repeat(gap)),
        Align::Center => {
            let left = gap / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}

pub(crate) fn rain_text(day: &ForecastDay) -> String {
    match day.chance_of_rain.as_deref() {
        Some(chance) => format!("{chance}%"),
        None => MISSING.to_string(),
    }
}
