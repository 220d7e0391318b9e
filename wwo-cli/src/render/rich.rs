use std::io::{self, Write};

use console::Style;
use unicode_width::UnicodeWidthStr;
use wwo_core::{CurrentConditions, ForecastDay, LocationLabel, WeatherError};

use super::{ATTRIBUTION, Align, Presenter, pad, rain_text};

struct Column {
    header: &'static str,
    align: Align,
    min_width: usize,
}

const COLUMNS: [Column; 7] = [
    Column { header: "Date", align: Align::Left, min_width: 0 },
    Column { header: "Conditions", align: Align::Left, min_width: 20 },
    Column { header: "High", align: Align::Center, min_width: 0 },
    Column { header: "Low", align: Align::Center, min_width: 0 },
    Column { header: "Rain %", align: Align::Center, min_width: 0 },
    Column { header: "Wind (mph)", align: Align::Center, min_width: 0 },
    Column { header: "Humidity", align: Align::Center, min_width: 0 },
];

/// A run of text sharing one style.
struct Span {
    text: String,
    style: Style,
}

fn span(text: impl Into<String>, style: Style) -> Span {
    Span { text: text.into(), style }
}

fn raw(text: impl Into<String>) -> Span {
    span(text, Style::new())
}

fn width(line: &[Span]) -> usize {
    line.iter().map(|s| s.text.width()).sum()
}

fn paint(line: &[Span]) -> String {
    line.iter().map(|s| s.style.apply_to(&s.text).to_string()).collect()
}

/// Colored output with rounded box borders.
pub struct RichPresenter<W: Write> {
    out: W,
    border: Style,
}

impl<W: Write> RichPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, border: Style::new().blue() }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn panel(&mut self, title: Span, lines: &[Vec<Span>]) -> io::Result<()> {
        let title_width = title.text.width();
        let inner = lines.iter().map(|l| width(l)).max().unwrap_or(0).max(title_width + 1);
        let b = self.border.clone();

        writeln!(
            self.out,
            "{}{}{}",
            b.apply_to("╭─ "),
            paint(&[title]),
            b.apply_to(format!(" {}╮", "─".repeat(inner - title_width - 1)))
        )?;
        for line in lines {
            let fill = " ".repeat(inner - width(line));
            writeln!(self.out, "{} {}{} {}", b.apply_to("│"), paint(line), fill, b.apply_to("│"))?;
        }
        writeln!(self.out, "{}", b.apply_to(format!("╰{}╯", "─".repeat(inner + 2))))
    }

    fn rule(&mut self, widths: &[usize], left: &str, mid: &str, right: &str) -> io::Result<()> {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        writeln!(self.out, "{}", self.border.apply_to(format!("{left}{}{right}", segments.join(mid))))
    }

    fn table_row(&mut self, widths: &[usize], cells: &[Span]) -> io::Result<()> {
        let bar = self.border.apply_to("│").to_string();
        let body: Vec<String> = cells
            .iter()
            .zip(COLUMNS.iter().zip(widths))
            .map(|(cell, (col, w))| format!(" {} ", cell.style.apply_to(pad(&cell.text, *w, col.align))))
            .collect();
        writeln!(self.out, "{bar}{}{bar}", body.join(bar.as_str()))
    }
}

impl<W: Write> Presenter for RichPresenter<W> {
    fn announce(&mut self, location: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "\n{} — fetching weather for {}...\n",
            Style::new().bold().blue().apply_to("🌍 World Weather Online"),
            Style::new().bold().apply_to(location)
        )
    }

    fn current(&mut self, label: &LocationLabel, current: &CurrentConditions) -> io::Result<()> {
        let lines = vec![
            vec![span(format!("{}  {}", current.icon(), current.description), Style::new().bold())],
            vec![],
            vec![
                raw("🌡️  Temperature:   "),
                span(format!("{}°C", current.temp_c), Style::new().bold().cyan()),
                raw(format!(" / {}°F   (Feels like {}°C)", current.temp_f, current.feels_like_c)),
            ],
            vec![raw(format!("💧  Humidity:      {}%", current.humidity))],
            vec![raw(format!("💨  Wind:          {} mph {}", current.wind_mph, current.wind_dir_16pt))],
            vec![raw(format!("👁️  Visibility:    {} km", current.visibility_km))],
            vec![raw(format!("☀️  UV Index:      {}", current.uv_index))],
        ];

        let title = span(format!("📍 {label} — Right Now"), Style::new().bold().yellow());
        self.panel(title, &lines)
    }

    fn forecast(&mut self, days: &[ForecastDay]) -> io::Result<()> {
        let rows: Vec<[Span; 7]> = days
            .iter()
            .map(|day| {
                [
                    span(day.formatted_date(), Style::new().bold()),
                    raw(format!("{}  {}", day.icon(), day.description)),
                    span(format!("{}°C", day.max_temp_c), Style::new().red()),
                    span(format!("{}°C", day.min_temp_c), Style::new().blue()),
                    raw(rain_text(day)),
                    raw(day.wind_mph.clone()),
                    raw(format!("{}%", day.humidity)),
                ]
            })
            .collect();

        let widths: Vec<usize> = COLUMNS
            .iter()
            .enumerate()
            .map(|(i, col)| {
                rows.iter()
                    .map(|row| row[i].text.width())
                    .chain([col.header.width(), col.min_width])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let total: usize = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
        let title = format!("📅 {}-Day Forecast", days.len());
        writeln!(self.out)?;
        writeln!(self.out, "{}", Style::new().italic().apply_to(pad(&title, total, Align::Center).trim_end()))?;

        let header: Vec<Span> =
            COLUMNS.iter().map(|c| span(c.header, Style::new().bold().cyan())).collect();

        self.rule(&widths, "╭", "┬", "╮")?;
        self.table_row(&widths, &header)?;
        self.rule(&widths, "├", "┼", "┤")?;
        for row in &rows {
            self.table_row(&widths, row)?;
        }
        self.rule(&widths, "╰", "┴", "╯")
    }

    fn footer(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{}\n", Style::new().dim().apply_to(ATTRIBUTION))
    }

    fn diagnostic(&mut self, err: &WeatherError) -> io::Result<()> {
        writeln!(self.out, "{}", Style::new().bold().red().apply_to(format!("❌  {err}")))
    }
}
