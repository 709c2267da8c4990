//! Terminal UI and command line for collecto: commune collection days, nearest-zone
//! lookups, sorting advice, and recycling tips.

mod app;
mod cli;
mod commands;
mod config;
mod input;
mod logging;
mod ui;

use std::{io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use clap::Parser;
use collecto_core::{CollectoService, FixedPosition, LocationService, ZoneDataset, ZoneResolver};
use collecto_provider_nominatim as nominatim;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use tracing::info;

use crate::app::{App, parse_coordinates};
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::input::Action;
use crate::logging::LogTarget;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command();
    let config = Config::load_from(cli.config.as_deref())?;

    let log_target = match (&command, &config.log_file) {
        (Command::Tui, Some(path)) => LogTarget::File(path.clone()),
        (Command::Tui, None) => LogTarget::Off,
        _ => LogTarget::Stderr,
    };
    logging::init_logging(cli.verbosity(), &log_target)?;

    let service = Arc::new(build_service(&cli, &config)?);

    if command == Command::Tui {
        return run_tui(service).await;
    }

    let ctx = commands::Context {
        service: &service,
        stats_path: config.stats_path.clone(),
        today: App::today(),
    };
    let mut stdout = io::stdout().lock();
    commands::run(&command, &ctx, &mut stdout).await
}

fn build_service(cli: &Cli, config: &Config) -> Result<CollectoService> {
    let dataset = match cli.dataset.as_ref().or(config.dataset_path.as_ref()) {
        Some(path) => ZoneDataset::from_path(path)?,
        None => ZoneDataset::bundled()?,
    };
    let resolver = Arc::new(ZoneResolver::new(dataset));
    info!(communes = resolver.available_communes().len(), "resolver ready");

    // HTTP + location setup
    let client = Client::builder()
        .user_agent(config.geocoder.user_agent.as_str())
        .timeout(config.timeout())
        .build()?;
    let geocoder = nominatim::geocoder(client, &config.geocoder.base_url);
    let position = Arc::new(FixedPosition::new(config.position()));
    let location = LocationService::new(position, geocoder)
        .with_timeout(config.timeout())
        .with_fallback_city(config.location.fallback_city.clone());

    Ok(CollectoService::new(resolver)
        .with_location(Arc::new(location))
        .with_locale(config.locale))
}

async fn run_tui(service: Arc<CollectoService>) -> Result<()> {
    let app = App::new(service);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::Locate => {
                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let res = app.service.schedule_here(App::today()).await;

                    app.is_loading = false;
                    match res {
                        Some(located) => match located.summary {
                            Some(summary) => {
                                let origin = format!(
                                    "you are in {} at {}",
                                    located.reading.city, located.reading.point
                                );
                                app.show_schedule(summary, Some(origin));
                            }
                            None => {
                                app.error_message = Some("No collection zone is loaded".into());
                            }
                        },
                        None => {
                            app.error_message = Some(
                                "Location unavailable: configure location.latitude/longitude"
                                    .into(),
                            );
                        }
                    }
                }
                Action::SearchCoordinates => {
                    let Some(point) = parse_coordinates(&app.coordinate_input) else {
                        app.error_message =
                            Some("Type a latitude and a longitude, e.g. 44.8378 -0.5792".into());
                        continue;
                    };

                    let nearest = app
                        .service
                        .nearest_zone(point)
                        .map(|(zone, distance)| (zone.commune.clone(), distance));
                    match (nearest, app.service.schedule_near(point, App::today())) {
                        (Some((commune, distance)), Some(summary)) => {
                            let origin = format!("{commune} zone is {distance:.1} km from {point}");
                            app.show_schedule(summary, Some(origin));
                        }
                        _ => {
                            app.error_message = Some("No collection zone is loaded".into());
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
