use std::io::{self, Write};

use wwo_core::{CurrentConditions, ForecastDay, LocationLabel, WeatherError};

use super::{ATTRIBUTION, Align, Presenter, pad, rain_text};

const CURRENT_RULE: usize = 40;
const FORECAST_RULE: usize = 80;

/// Column widths: Date, Conditions, High, Low, Rain%, Wind, Humid.
const WIDTHS: [usize; 7] = [14, 25, 6, 6, 6, 6, 6];

/// Uncolored, fixed-width output for pipes and dumb terminals.
pub struct PlainPresenter<W: Write> {
    out: W,
}

impl<W: Write> PlainPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn row(&mut self, cells: [&str; 7]) -> io::Result<()> {
        let line = cells
            .iter()
            .zip(WIDTHS)
            .enumerate()
            .map(|(i, (cell, width))| {
                let align = if i < 2 { Align::Left } else { Align::Right };
                pad(cell, width, align)
            })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(self.out, "{}", line.trim_end())
    }
}

impl<W: Write> Presenter for PlainPresenter<W> {
    fn announce(&mut self, location: &str) -> io::Result<()> {
        writeln!(self.out, "\n🌍 Fetching weather for {location}...")
    }

    fn current(&mut self, label: &LocationLabel, current: &CurrentConditions) -> io::Result<()> {
        writeln!(self.out, "\n📍 {label} — Current Conditions")?;
        writeln!(self.out, "{}", "─".repeat(CURRENT_RULE))?;
        writeln!(self.out, "{}  {}", current.icon(), current.description)?;
        writeln!(
            self.out,
            "Temperature : {}°C / {}°F (Feels like {}°C)",
            current.temp_c, current.temp_f, current.feels_like_c
        )?;
        writeln!(self.out, "Humidity    : {}%", current.humidity)?;
        writeln!(self.out, "Wind        : {} mph {}", current.wind_mph, current.wind_dir_16pt)?;
        writeln!(self.out, "Visibility  : {} km", current.visibility_km)?;
        writeln!(self.out, "UV Index    : {}", current.uv_index)
    }

    fn forecast(&mut self, days: &[ForecastDay]) -> io::Result<()> {
        writeln!(self.out, "\n📅 Forecast")?;
        writeln!(self.out, "{}", "─".repeat(FORECAST_RULE))?;
        self.row(["Date", "Conditions", "High", "Low", "Rain%", "Wind", "Humid"])?;
        writeln!(self.out, "{}", "─".repeat(FORECAST_RULE))?;

        for day in days {
            self.row([
                &day.formatted_date(),
                &format!("{} {}", day.icon(), day.description),
                &format!("{}°C", day.max_temp_c),
                &format!("{}°C", day.min_temp_c),
                &rain_text(day),
                &day.wind_mph,
                &format!("{}%", day.humidity),
            ])?;
        }

        Ok(())
    }

    fn footer(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{ATTRIBUTION}\n")
    }

    fn diagnostic(&mut self, err: &WeatherError) -> io::Result<()> {
        writeln!(self.out, "❌  {err}")
    }
}
