//! Plain-text rendering of the view state.

use std::fmt::Write;

use weathervane_app::ViewState;
use weathervane_core::DisplayConfig;
use weathervane_weather::{
    format_pressure, format_temperature, format_wind_speed, pressure_description,
    wind_description, ConditionLabel, ForecastEntry, HourlyEntry, WeatherReport,
    DEFAULT_MAP_ZOOM,
};

pub fn render(state: &ViewState, display: &DisplayConfig) -> String {
    let mut out = String::new();

    if let Some(error) = &state.location_error {
        let _ = writeln!(out, "! {}", error);
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {}", error);
    }
    if state.loading {
        out.push_str("Loading...\n");
    }

    if let Some(city) = &state.city {
        let _ = writeln!(out, "{}", city.display_name());
    }

    if let Some(report) = &state.report {
        render_report(&mut out, report, display);
    }

    if let Some(position) = &state.position {
        let _ = writeln!(out, "\nMap: {}", position.map_url(DEFAULT_MAP_ZOOM));
    }

    out
}

/// Terminal glyph for a condition's icon.
fn icon(condition: ConditionLabel) -> &'static str {
    match condition.icon_name() {
        "snowflake" => "❄",
        "cloud" => "☁",
        "cloud_sun" => "⛅",
        "sun" => "☀",
        _ => "?",
    }
}

fn render_report(out: &mut String, report: &WeatherReport, display: &DisplayConfig) {
    let now = &report.snapshot;

    let _ = writeln!(
        out,
        "{}  {} {} ({})",
        format_temperature(now.temperature),
        icon(now.condition),
        now.condition.description(),
        now.precipitation_description
    );
    let _ = writeln!(out, "  Feels like  {}", format_temperature(now.feels_like));
    let _ = writeln!(
        out,
        "  Pressure    {} ({})",
        format_pressure(now.pressure),
        pressure_description(now.pressure).label()
    );
    let _ = writeln!(
        out,
        "  Wind        {} {}, {}",
        format_wind_speed(now.wind_speed),
        now.wind_direction.abbreviation(),
        wind_description(now.wind_speed).label()
    );

    if !report.forecast.is_empty() {
        out.push_str("\nForecast\n");
        for day in &report.forecast {
            out.push_str(&forecast_line(day));
        }
    }

    if display.show_hourly && display.hourly_limit > 0 && !report.hourly.is_empty() {
        out.push_str("\nNext hours\n");
        for sample in report.hourly.iter().take(display.hourly_limit) {
            out.push_str(&hourly_line(sample));
        }
    }
}

fn forecast_line(day: &ForecastEntry) -> String {
    format!(
        "  {:<12} {}  {:>5} / {:<5} {} {}\n",
        day.day_name,
        day.date.format("%d.%m"),
        format_temperature(day.temperature),
        format_temperature(day.min_temp),
        icon(day.condition),
        day.condition.description()
    )
}

fn hourly_line(sample: &HourlyEntry) -> String {
    format!(
        "  {}  {:>5}  {} {}\n",
        sample.time.format("%a %H:%M"),
        format_temperature(sample.temperature),
        icon(sample.condition),
        sample.condition.description()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};
    use weathervane_weather::{
        classify, CityRef, Coordinates, WeatherSnapshot, WindDirection,
    };

    fn report() -> WeatherReport {
        WeatherReport {
            snapshot: WeatherSnapshot {
                temperature: 20.5,
                feels_like: -0.3,
                pressure: 1013.25,
                precipitation_description: "ясно".into(),
                wind_speed: 3.0,
                wind_direction: WindDirection::East,
                condition: classify(20.5),
            },
            forecast: vec![ForecastEntry {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                day_name: "пятница".into(),
                temperature: 12.0,
                min_temp: 7.4,
                condition: classify(12.0),
            }],
            hourly: (0..3)
                .map(|i| HourlyEntry {
                    time: DateTime::parse_from_rfc3339(&format!(
                        "2024-03-01T0{}:00:00+03:00",
                        i * 3
                    ))
                    .unwrap(),
                    temperature: 5.0,
                    condition: classify(5.0),
                })
                .collect(),
        }
    }

    fn loaded_state() -> ViewState {
        ViewState {
            city: Some(CityRef::new("Москва", "Россия")),
            position: Some(Coordinates::new(55.75, 37.62)),
            report: Some(report()),
            ..Default::default()
        }
    }

    #[test]
    fn renders_current_conditions() {
        let text = render(&loaded_state(), &DisplayConfig::default());

        assert!(text.starts_with("Москва, Россия\n"));
        assert!(text.contains("21°  ⛅ Warm (ясно)"));
        assert!(text.contains("12° / 7°    ☁ Cool"));
        assert!(text.contains("Feels like  0°"));
        assert!(text.contains("760 mm Hg (normal)"));
        assert!(text.contains("3.0 m/s E, light"));
        assert!(text.contains("пятница"));
        assert!(text.contains("01.03"));
        assert!(text.contains("#map=13/55.75000/37.62000"));
    }

    #[test]
    fn hourly_respects_limit_and_toggle() {
        let state = loaded_state();
        let limited = DisplayConfig {
            show_hourly: true,
            hourly_limit: 2,
        };
        let text = render(&state, &limited);
        assert!(text.contains("Fri 00:00"));
        assert!(text.contains("Fri 03:00"));
        assert!(!text.contains("Fri 06:00"));

        let hidden = DisplayConfig {
            show_hourly: false,
            hourly_limit: 8,
        };
        assert!(!render(&state, &hidden).contains("Next hours"));
    }

    #[test]
    fn renders_error_banner_without_report() {
        let state = ViewState {
            city: Some(CityRef::named("Kazan")),
            error: Some("City not found. Check the name and try again.".into()),
            ..Default::default()
        };
        let text = render(&state, &DisplayConfig::default());

        assert!(text.starts_with("! City not found."));
        assert!(text.contains("Kazan"));
        assert!(!text.contains("Forecast"));
        assert!(!text.contains("Map:"));
    }

    #[test]
    fn every_condition_has_a_glyph() {
        let glyphs: Vec<_> = ConditionLabel::ALL.iter().map(|c| icon(*c)).collect();
        assert_eq!(glyphs, ["❄", "☁", "⛅", "☀"]);
    }

    #[test]
    fn location_banner_stays_above_default_city_weather() {
        let state = ViewState {
            location_error: Some("Your location is unavailable.".into()),
            ..loaded_state()
        };
        let text = render(&state, &DisplayConfig::default());

        assert!(text.starts_with("! Your location is unavailable."));
        assert!(text.contains("Москва, Россия"));
        assert!(text.contains("Forecast"));
    }

    #[test]
    fn renders_loading() {
        let state = ViewState {
            loading: true,
            ..Default::default()
        };
        assert_eq!(render(&state, &DisplayConfig::default()), "Loading...\n");
    }
}
