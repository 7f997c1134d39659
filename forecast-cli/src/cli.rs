use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use forecast_core::{
    BodyView, Config, DashboardView, Event, ForecastSource, HttpForecastFetcher, QueryController,
    controller::validate_location, view::PLACEHOLDER,
};
use inquire::{InquireError, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Daily weather forecast dashboard")]
pub struct Cli {
    /// Weather service base URL. Overrides the configured one, or sets it for `configure`.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the weather service endpoint and the default location.
    Configure {
        /// Default location; prompts for both values when neither is given.
        #[arg(long)]
        location: Option<String>,
    },

    /// Show the forecast for a location once.
    Show {
        /// Location name; the configured default if absent.
        location: Option<String>,

        /// Print the forecast results as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Load the default location, then keep prompting for new searches.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        tracing::debug!(
            endpoint = config.endpoint(),
            default_location = config.default_location(),
            "configuration loaded"
        );

        match self.command {
            Command::Configure { location } => {
                configure(&mut config, self.endpoint, location)?;
                let path = config.save()?;
                println!("Saved configuration to {}", path.display());
            }
            Command::Show { location, json } => {
                override_endpoint(&mut config, self.endpoint.as_deref())?;
                let fetcher = HttpForecastFetcher::from_config(&config);
                show(&fetcher, &config, location, json).await?;
            }
            Command::Interactive => {
                override_endpoint(&mut config, self.endpoint.as_deref())?;
                let fetcher = HttpForecastFetcher::from_config(&config);
                interactive(&fetcher, &config).await?;
            }
        }

        Ok(())
    }
}

/// Apply `--endpoint` for this invocation only.
fn override_endpoint(config: &mut Config, endpoint: Option<&str>) -> Result<()> {
    if let Some(endpoint) = endpoint {
        config.set_endpoint(endpoint)?;
        tracing::debug!(
            endpoint = config.endpoint(),
            "endpoint overridden from command line"
        );
    }
    Ok(())
}

fn configure(
    config: &mut Config,
    endpoint: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let interactive = endpoint.is_none() && location.is_none();

    let endpoint = match endpoint {
        Some(e) => Some(e),
        None if interactive => Some(
            Text::new("Weather service endpoint:")
                .with_initial_value(config.endpoint())
                .prompt()
                .context("Failed to read endpoint")?,
        ),
        None => None,
    };

    let location = match location {
        Some(l) => Some(l),
        None if interactive => Some(
            Text::new("Default location:")
                .with_initial_value(config.default_location())
                .with_placeholder(PLACEHOLDER)
                .prompt()
                .context("Failed to read default location")?,
        ),
        None => None,
    };

    if let Some(endpoint) = endpoint {
        config.set_endpoint(&endpoint)?;
    }
    if let Some(location) = location {
        config.set_default_location(&location)?;
    }

    Ok(())
}

async fn show(
    source: &dyn ForecastSource,
    config: &Config,
    location: Option<String>,
    json: bool,
) -> Result<()> {
    let mut controller = QueryController::new(show_location(config, location));

    let ticket = controller.dispatch(Event::Initialize);
    if !json {
        print!("{}", render::dashboard(&DashboardView::render(&controller, &Local::now())));
    }
    if let Some(ticket) = ticket {
        let outcome = ticket.execute(source).await;
        controller.dispatch(outcome);
    }

    let view = DashboardView::render(&controller, &Local::now());
    if !json {
        print!("{}", render::body(&view.body));
    } else if let Some(results) = results_json(&view.body)? {
        println!("{results}");
    }

    if matches!(view.body, BodyView::Error { .. }) {
        bail!("No forecast available for '{}'", controller.location());
    }
    Ok(())
}

/// The argument when it has text, otherwise the configured default.
fn show_location(config: &Config, location: Option<String>) -> String {
    match location.as_deref().map(validate_location) {
        Some(Ok(text)) => text.to_string(),
        Some(Err(err)) => {
            tracing::warn!(
                %err,
                fallback = config.default_location(),
                "blank location argument, using the default"
            );
            config.default_location().to_string()
        }
        None => config.default_location().to_string(),
    }
}

/// Pretty JSON of the results; `None` for any other body.
fn results_json(body: &BodyView) -> Result<Option<String>> {
    match body {
        BodyView::Results(results) => Ok(Some(serde_json::to_string_pretty(results)?)),
        _ => Ok(None),
    }
}

async fn interactive(source: &dyn ForecastSource, config: &Config) -> Result<()> {
    let mut controller = QueryController::new(config.default_location());
    let mut next = Some(Event::Initialize);

    while let Some(event) = next.take() {
        if let Some(ticket) = controller.dispatch(event) {
            print!("{}", render::dashboard(&DashboardView::render(&controller, &Local::now())));
            let outcome = ticket.execute(source).await;
            controller.dispatch(outcome);
            print!("{}", render::body(&DashboardView::render(&controller, &Local::now()).body));
        }

        next = prompt_location(controller.location().to_string())
            .await?
            .map(Event::Submit);
    }

    Ok(())
}

/// `None` once the user leaves with Esc or Ctrl-C.
async fn prompt_location(current: String) -> Result<Option<String>> {
    tokio::task::spawn_blocking(move || {
        let answer = Text::new("Location:")
            .with_initial_value(&current)
            .with_placeholder(PLACEHOLDER)
            .with_help_message("Enter to search, Esc to quit")
            .prompt();

        match answer {
            Ok(text) => Ok(Some(text)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                tracing::debug!("location prompt closed");
                Ok(None)
            }
            Err(err) => {
                tracing::error!(error = %err, "location prompt failed");
                Err(anyhow::Error::from(err).context("Failed to read location"))
            }
        }
    })
    .await?
}
