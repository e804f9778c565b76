use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;
use std::path::PathBuf;

const ABOUT: &str = "Current weather and a five-day forecast";

const LONG_ABOUT: &str = "
Current conditions, a five-day forecast and the 3-hourly outlook from OpenWeatherMap.

Pass a city name to look it up directly. Without one, the position from --lat/--lon (or the
[location] section of the config file) is turned into a city through OpenCage reverse
geocoding. If no position is available, location.default_city is used.

API keys are read from the config file or from WEATHERVANE_WEATHER__API_KEY and
WEATHERVANE_GEOCODING__API_KEY.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(name = "weathervane", version, styles = STYLES, about = ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "City to look up (e.g. Moscow, Казань)")]
    pub city: Option<String>,

    #[arg(long, requires = "lon", allow_hyphen_values = true, help = "Latitude in degrees")]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_hyphen_values = true, help = "Longitude in degrees")]
    pub lon: Option<f64>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Config file (default: <config dir>/weathervane/config.toml)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Language for descriptions and weekday names (e.g. ru, en)")]
    pub lang: Option<String>,

    #[arg(short, long, help = "Keep reading city names from stdin")]
    pub interactive: bool,

    #[arg(long, help = "Hide the 3-hourly forecast")]
    pub no_hourly: bool,
}

impl Args {
    /// Position given on the command line, if both halves are present.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}
