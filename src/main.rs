use anyhow::{Context, Result};
use lead_desk::config::Config;
use lead_desk::crm::{auth::CrmAuth, demo::DemoCrm, rest::CrmRest};
use lead_desk::dashboard::ActionDispatcher;
use lead_desk::feed::query::LeadQuery;
use lead_desk::feed::{AssignAction, LeadSource};
use lead_desk::notify::{ChannelNotifier, Notifier};
use lead_desk::tui::{self, state::AppState, TuiContext};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct Args {
    demo: bool,
    config_path: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        demo: false,
        config_path: PathBuf::from("config.toml"),
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--demo" => args.demo = true,
            "--config" => {
                let path = it.next().context("--config needs a path")?;
                args.config_path = PathBuf::from(path);
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;
    let config = Config::load(&args.config_path)?;

    let log_file = std::fs::File::create(&config.logging.file)
        .with_context(|| format!("Failed to create log file: {}", config.logging.file))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .context("invalid logging.filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    // Load saved token from .env (real env vars take precedence)
    Config::load_env_file();

    println!();
    println!("  Lead Desk v{}", env!("CARGO_PKG_VERSION"));
    println!("  ==============");
    println!();

    let (source, action): (Arc<dyn LeadSource>, Arc<dyn AssignAction>) = if args.demo {
        println!("  ** DEMO MODE ** (in-memory CRM)");
        let demo = Arc::new(DemoCrm::sample());
        let source: Arc<dyn LeadSource> = demo.clone();
        let action: Arc<dyn AssignAction> = demo;
        (source, action)
    } else {
        println!("  Loading CRM credentials (.env / env vars / interactive prompt):");
        let auth = CrmAuth::new(Config::access_token()?);
        if !auth.has_token() {
            tracing::warn!("no CRM access token, requests will be sent unauthenticated");
        }
        let rest = Arc::new(
            CrmRest::new(auth, &config.crm)
                .context("Failed to build CRM client")?,
        );
        let source: Arc<dyn LeadSource> = rest.clone();
        let action: Arc<dyn AssignAction> = rest;
        (source, action)
    };
    println!();

    tracing::info!(demo = args.demo, api_base = %config.crm.api_base, "starting lead desk");

    let (query, results) = LeadQuery::new(source);
    let (channel_notifier, toasts) = ChannelNotifier::new();
    let notifier: Arc<dyn Notifier> = Arc::new(channel_notifier);
    let dispatcher = ActionDispatcher::new(action, notifier.clone(), query.clone());

    let initial = query.clone();
    tokio::spawn(async move { initial.load().await });

    let state = AppState::new(&config.dashboard, args.demo);
    let ctx = TuiContext {
        query,
        results,
        toasts,
        dispatcher,
        notifier,
    };

    tui::run_tui(state, ctx).await?;

    tracing::info!("shutting down");
    Ok(())
}
