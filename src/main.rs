mod cli;
mod render;
mod startup;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use weathervane_app::{
    user_message, RequestId, ViewEvent, ViewState, WeatherService, WeatherServiceMessage,
};
use weathervane_core::Config;

use crate::cli::Args;
use crate::startup::Lookup;

const LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }?;
    if args.no_hourly {
        config.display.show_hourly = false;
    }
    if let Some(lang) = &args.lang {
        config.weather.lang = lang.clone();
    }

    weathervane_core::init(&config.logging.level)?;
    config.validated()?;

    let (service, mut rx) = WeatherService::from_config(&config)
        .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;

    let startup = startup::plan(
        args.city.as_deref(),
        args.position(),
        &config.location,
        LOCATION_TIMEOUT,
    )
    .await;

    let mut state = ViewState::default();
    if let Some(e) = startup.location_error {
        state = state.apply(ViewEvent::LocationFailed {
            message: user_message(e).to_string(),
        });
    }
    let first = match startup.lookup {
        Some(Lookup::City(city)) => service.request_city(&city),
        Some(Lookup::Position(position)) => service.request_position(position),
        None => {
            print!("{}", render::render(&state, &config.display));
            anyhow::bail!("No city given and no location available");
        }
    };

    state = wait_for(&mut rx, state, first, &config).await;

    let code = if args.interactive {
        run_interactive(&service, &mut rx, state, &config).await?;
        ExitCode::SUCCESS
    } else if state.report.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    service.cancel();
    tracing::debug!("Weathervane exiting");
    Ok(code)
}

/// Apply service messages until `request` completes, then print the view.
async fn wait_for(
    rx: &mut UnboundedReceiver<WeatherServiceMessage>,
    mut state: ViewState,
    request: RequestId,
    config: &Config,
) -> ViewState {
    while let Some(message) = rx.recv().await {
        let event = ViewEvent::from(message);
        let finished = state.is_active(request) && state.completes(&event);
        state = state.apply(event);
        if finished {
            print!("{}", render::render(&state, &config.display));
            break;
        }
    }
    state
}

/// Each stdin line is a new city; results print as they land, newest wins.
async fn run_interactive(
    service: &WeatherService,
    rx: &mut UnboundedReceiver<WeatherServiceMessage>,
    mut state: ViewState,
    config: &Config,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("Enter a city name (Ctrl-D to quit)");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(city) if city.trim().is_empty() => continue,
                    Some(city) => {
                        service.request_city(&city);
                    }
                    None => break,
                }
            }
            Some(message) = rx.recv() => {
                let event = ViewEvent::from(message);
                let completes = state.completes(&event);
                state = state.apply(event);
                if completes {
                    println!();
                    print!("{}", render::render(&state, &config.display));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Interrupted");
                break;
            }
        }
    }

    Ok(())
}
