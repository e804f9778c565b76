//! Normalizing decoded payloads into the view model.

use chrono::{DateTime, Datelike, FixedOffset};

use crate::classify::classify;
use crate::format::{weekday_name, wind_direction};
use crate::types::{ForecastEntry, HourlyEntry, WeatherError, WeatherSnapshot};
use crate::wire::{CurrentResponse, ForecastResponse};

/// The forecast list is 3-hourly, so every 8th sample starts a new day.
pub const SAMPLES_PER_DAY: usize = 8;

pub fn snapshot_from(current: &CurrentResponse) -> Result<WeatherSnapshot, WeatherError> {
    Ok(WeatherSnapshot {
        temperature: current.main.temp,
        feels_like: current.main.feels_like,
        pressure: current.main.pressure,
        precipitation_description: current.description()?.to_string(),
        wind_speed: current.wind.speed,
        wind_direction: wind_direction(current.wind.deg),
        condition: classify(current.main.temp),
    })
}

fn local_time(
    epoch_seconds: i64,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, WeatherError> {
    DateTime::from_timestamp(epoch_seconds, 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| WeatherError::Decode(format!("timestamp out of range: {}", epoch_seconds)))
}

fn city_offset(forecast: &ForecastResponse) -> Result<FixedOffset, WeatherError> {
    let seconds = forecast.utc_offset_seconds();
    FixedOffset::east_opt(seconds)
        .ok_or_else(|| WeatherError::Decode(format!("invalid UTC offset: {}", seconds)))
}

/// One entry per day, taken from samples 0, 8, 16, ...
///
/// This is the sample nearest each 24-hour boundary, not a daily
/// aggregate: `min_temp` is that sample's own `temp_min`.
pub fn daily_forecast(
    forecast: &ForecastResponse,
    lang: &str,
) -> Result<Vec<ForecastEntry>, WeatherError> {
    let offset = city_offset(forecast)?;

    forecast
        .list
        .iter()
        .step_by(SAMPLES_PER_DAY)
        .map(|sample| {
            let time = local_time(sample.dt, offset)?;
            let min_temp = sample.main.temp_min.ok_or_else(|| {
                WeatherError::Decode(format!("forecast sample {} has no temp_min", sample.dt))
            })?;
            Ok(ForecastEntry {
                date: time.date_naive(),
                day_name: weekday_name(time.weekday(), lang).to_string(),
                temperature: sample.main.temp,
                min_temp,
                condition: classify(sample.main.temp),
            })
        })
        .collect()
}

/// Every sample, in order.
pub fn hourly_forecast(forecast: &ForecastResponse) -> Result<Vec<HourlyEntry>, WeatherError> {
    let offset = city_offset(forecast)?;

    forecast
        .list
        .iter()
        .map(|sample| {
            Ok(HourlyEntry {
                time: local_time(sample.dt, offset)?,
                temperature: sample.main.temp,
                condition: classify(sample.main.temp),
            })
        })
        .collect()
}
