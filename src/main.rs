use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pageshell::config::{Config, ConfigStore};
use pageshell::gateway::ContactDraft;
use pageshell::logging::init_tracing;
use pageshell::router::NavigationOutcome;
use pageshell::App;

#[derive(Parser, Debug)]
#[command(name = "pageshell", version, about = "Drive the single-page shell from the command line")]
struct Cli {
    /// Config file (default: <config dir>/pageshell/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Swap views without transitions
    #[arg(long)]
    no_animation: bool,

    /// Print document snapshots as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Visit locations in order, e.g. `/dashboard/alice` or `#/about`
    Navigate { routes: Vec<String> },
    /// Save a contact through the contacts page
    AddContact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    if cli.no_animation {
        config.animation.enabled = false;
    }

    let mut app = App::new(ConfigStore::new(config, path))?;

    match cli.command {
        None => {
            let outcome = app.start();
            app.settle().await;
            print_state(&app, &outcome, cli.json)?;
        }
        Some(Command::Navigate { routes }) => {
            if routes.is_empty() {
                let outcome = app.start();
                app.settle().await;
                print_state(&app, &outcome, cli.json)?;
            }
            for route in routes {
                let outcome = app.navigate(&route);
                app.settle().await;
                print_state(&app, &outcome, cli.json)?;
            }
        }
        Some(Command::AddContact { name, email }) => {
            let saved = app.add_contact(ContactDraft::new(name, email)).await?;
            app.settle().await;
            let current = app.dispatcher().current().cloned();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                println!(
                    "saved contact id={} name={} email={}",
                    saved.id.unwrap_or_default(),
                    saved.name,
                    saved.email
                );
            }
            if let Some(route) = current {
                let outcome = NavigationOutcome {
                    requested: route.path.clone(),
                    route: Some(route),
                    animated: app.dispatcher().animator().is_animated(),
                };
                print_state(&app, &outcome, cli.json)?;
            }
        }
    }

    let stats = app.dispatcher().animator().stats();
    tracing::info!(
        completed = stats.completed,
        interrupted = stats.interrupted,
        timed_out = stats.timed_out,
        cancelled = stats.cancelled,
        "Transitions settled"
    );
    Ok(())
}

fn print_state(app: &App, outcome: &NavigationOutcome, json: bool) -> Result<()> {
    let snapshot = app.snapshot();
    if json {
        let value = serde_json::json!({
            "navigation": outcome,
            "document": snapshot,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match &outcome.route {
        Some(route) if route.fell_back => println!(
            "{} -> {} (fallback, page {})",
            outcome.requested, route.path, route.name
        ),
        Some(route) => println!("{} -> page {}", route.path, route.name),
        None => println!("{} -> nothing rendered", outcome.requested),
    }
    for view in &snapshot.views {
        println!("  <{} class=\"{}\">", view.tag, view.classes.join(" "));
        for line in &view.text {
            println!("    {line}");
        }
    }
    Ok(())
}
