use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Text};
use tracing::debug;
use weatherism_core::{Config, LookupState, WeatherLookup, service_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherism", version, about = "Current, hourly and daily weather by city name")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default city and display preferences.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name; falls back to the configured default city.
        city: Vec<String>,

        /// Print the location and forecast as JSON.
        #[arg(long)]
        json: bool,

        /// Refresh once after the first lookup succeeds.
        #[arg(long)]
        refresh: bool,
    },

    /// Search repeatedly from a prompt.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        debug!(?config, "loaded configuration");

        match self.command {
            Command::Configure => configure(&mut config),
            Command::Show { city, json, refresh } => show(&config, &city, json, refresh).await,
            Command::Interactive => interactive(&config).await,
        }
    }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let mut city_prompt = Text::new("Default city:")
        .with_help_message("Used by `weatherism show` when no city is given. Leave blank to clear.");
    if let Some(current) = config.default_city() {
        city_prompt = city_prompt.with_default(current);
    }
    let city = city_prompt.prompt().context("Failed to read default city")?;
    config.set_default_city(&city);

    config.hourly_limit = CustomType::<usize>::new("Hourly entries to show:")
        .with_default(config.hourly_limit)
        .with_error_message("Please enter a whole number")
        .prompt()
        .context("Failed to read hourly entry count")?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

/// Pick the query for `show`: explicit words first, then the configured default.
fn resolve_query(words: &[String], config: &Config) -> anyhow::Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }

    config.default_city().map(str::to_owned).ok_or_else(|| {
        anyhow!(
            "No city given and no default city configured.\n\
             Hint: run `weatherism show <city>` or `weatherism configure`."
        )
    })
}

async fn show(config: &Config, words: &[String], json: bool, refresh: bool) -> anyhow::Result<()> {
    let query = resolve_query(words, config)?;
    let lookup = WeatherLookup::new(service_from_config(config));

    if let Some(handle) = lookup.search(&query) {
        handle.await.context("Weather lookup task failed")?;
    }

    if refresh {
        if let Some(handle) = lookup.refresh() {
            handle.await.context("Weather refresh task failed")?;
        }
    }

    match lookup.state() {
        LookupState::Success { location, bundle } if json => {
            let out = serde_json::json!({ "location": location, "forecast": bundle });
            println!("{}", serde_json::to_string_pretty(&out).context("Failed to serialize forecast")?);
        }
        LookupState::Success { location, bundle } => {
            println!("{}", render::render_weather(&location, &bundle, config.hourly_limit));
        }
        LookupState::Failed(message) => bail!(message),
        other => bail!("Lookup ended in unexpected state: {other:?}"),
    }

    Ok(())
}

/// What a line typed at the interactive prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum PromptAction<'a> {
    Quit,
    Refresh,
    Search(&'a str),
}

impl<'a> PromptAction<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "/quit" => Self::Quit,
            cmd if cmd.starts_with("/refresh") => Self::Refresh,
            _ => Self::Search(line),
        }
    }
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let lookup = WeatherLookup::new(service_from_config(config));
    let mut updates = lookup.subscribe();

    println!("Type a city name. /refresh reloads the current city, /quit exits.");

    loop {
        let line = match Text::new("City:").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city"),
        };

        match PromptAction::parse(&line) {
            PromptAction::Quit => break,
            PromptAction::Refresh => {
                if lookup.refresh().is_none() {
                    println!("Nothing to refresh yet. Search for a city first.");
                    continue;
                }
            }
            PromptAction::Search(query) => {
                lookup.search(query);
            }
        }

        if lookup.state().is_loading() {
            println!("{}", render::render_state(&LookupState::Loading, config.hourly_limit));
        }

        let settled = updates
            .wait_for(|state| !state.is_loading())
            .await
            .context("Lookup state channel closed")?
            .clone();

        println!("{}\n", render::render_state(&settled, config.hourly_limit));
    }

    Ok(())
}
