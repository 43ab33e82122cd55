//! Cortex Engine - Main entry point.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cortex_engine::cartography::Cartography;
use cortex_engine::infrastructure::{
    clock::SystemClock, config::EngineConfig, portal_store::SqlitePortalRepo,
};
use cortex_engine::use_cases::portals::PortalSubmission;
use cortex_engine::use_cases::route::RouteOutcome;
use cortex_engine::App;

const USAGE: &str = "Usage: cortex-engine <command>

Commands:
  build                                      Rebuild every artifact from world data
  guess <query> [home]                       List zones matching a query
  route <from> <to> [home]                   Plan a route through open portals
  travel <zone> [home]                       Estimate travel time on foot
  portal-add <from> <to> <minutes> [who]     Record a portal
  portals                                    List open portals";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root so the binary behaves the same from any crate dir.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cortex_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let Some((&command, rest)) = args.split_first() else {
        anyhow::bail!(USAGE);
    };

    if command == "build" {
        let cartography = Cartography::rebuild(&config.artifact_store(), &config.world_source())
            .context("building artifacts")?;
        tracing::info!(
            zones = cartography.catalog().len(),
            dir = %config.artifact_dir.display(),
            "Artifacts rebuilt"
        );
        return Ok(());
    }

    let cartography = Cartography::load_or_build(&config.artifact_store(), &config.world_source())
        .context("loading artifacts")?;
    let portal_repo = SqlitePortalRepo::new(&config.portal_db_path)
        .await
        .context("opening portal store")?;
    let app = App::new(
        Arc::new(cartography),
        Arc::new(portal_repo),
        Arc::new(SystemClock::new()),
        config.seconds_per_map,
    );

    let default_home = config.home_zone.as_deref();
    let home_at = |idx: usize| rest.get(idx).copied().or(default_home);

    match (command, rest) {
        ("guess", [query, ..]) => {
            let guesses = app.use_cases.location.guess.execute(query, home_at(1));
            if guesses.is_empty() {
                println!("No zone matches '{query}'");
            }
            for guess in guesses {
                println!("{guess}");
            }
        }
        ("route", [from, to, ..]) => {
            match app.use_cases.route.plan.execute(from, to, home_at(2)).await? {
                RouteOutcome::Found(route) => println!("{route}"),
                RouteOutcome::Unresolved { query } => println!("No zone matches '{query}'"),
                RouteOutcome::Unreachable { from, to } => {
                    println!("No known route from {from} to {to}")
                }
            }
        }
        ("travel", [zone, ..]) => {
            let home = home_at(1);
            let Some(zone) = app.use_cases.location.guess.best(zone, home) else {
                println!("No zone matches '{zone}'");
                return Ok(());
            };
            match app.use_cases.location.travel_time.execute(&zone, home) {
                Some(duration) => println!("{zone}: about {} min", duration.as_secs().div_ceil(60)),
                None => println!("{zone} cannot be reached on foot"),
            }
        }
        ("portal-add", [from, to, minutes, ..]) => {
            let lifetime = minutes
                .parse::<i64>()
                .ok()
                .and_then(chrono::Duration::try_minutes)
                .with_context(|| format!("invalid minutes: {minutes}"))?;
            let submission = PortalSubmission {
                from: from.to_string(),
                to: to.to_string(),
                lifetime,
                submitter: rest.get(3).copied().unwrap_or("anonymous").to_string(),
                home: default_home.map(str::to_string),
            };
            let portal = app.use_cases.portals.submit.execute(submission).await?;
            println!("Recorded {portal}");
        }
        ("portals", _) => {
            let portals = app.use_cases.portals.list.execute().await?;
            if portals.is_empty() {
                println!("No open portals");
            }
            for portal in portals {
                println!("{portal}");
            }
        }
        ("guess" | "route" | "travel" | "portal-add", _) => {
            anyhow::bail!("Missing arguments for {command}\n\n{USAGE}")
        }
        (other, _) => anyhow::bail!("Unknown command: {other}\n\n{USAGE}"),
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
