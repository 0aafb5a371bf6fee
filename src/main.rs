//! Wiring & DI. Entry point: resolve inputs, bootstrap adapters, run recon, present.
//! No business logic here; collection is delegated to ReconService.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tosint::adapters::persistence::JsonFileStore;
use tosint::adapters::telegram::HttpBotApi;
use tosint::adapters::ui::{SilentProgress, SpinnerProgress, TuiInputPort};
use tosint::cli::{CliArgs, normalize_chat_id, normalize_token, resolve};
use tosint::domain::ReportInput;
use tosint::ports::{InputPort, ProgressPort};
use tosint::shared::config::AppConfig;
use tosint::usecases::{OutputSinks, ReconService, ReportPresenter};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv::dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    // Failures never change the exit status.
    if let Err(e) = run(CliArgs::parse()).await {
        error!(error = %e, "run aborted");
        eprintln!("ATTENTION {e}");
    }
}

async fn run(args: CliArgs) -> anyhow::Result<()> {
    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    let sinks = OutputSinks::new(args.json, args.json_file.or_else(|| cfg.json_file.clone()));
    tosint::adapters::ui::init_ui(sinks.text);

    let input_port = TuiInputPort::new();
    let token = match resolve(args.token, cfg.token.clone(), normalize_token) {
        Some(token) => token,
        None => normalize_token(&input_port.prompt_token().await?),
    };
    let chat_id = match resolve(args.chat_id, cfg.chat_id.clone(), normalize_chat_id) {
        Some(chat_id) => chat_id,
        None => normalize_chat_id(&input_port.prompt_chat_id().await?),
    };

    let api_base = args.api_base.unwrap_or_else(|| cfg.api_base_or_default());
    info!(api_base = %api_base, json = sinks.json_stdout, "starting recon");

    let api = Arc::new(HttpBotApi::new(api_base, token.clone()));
    let progress: Arc<dyn ProgressPort> = if sinks.text {
        Arc::new(SpinnerProgress::new())
    } else {
        Arc::new(SilentProgress)
    };
    let report = ReconService::new(api, progress)
        .run(ReportInput { token, chat_id })
        .await;

    let presenter = ReportPresenter::new(sinks, Arc::new(JsonFileStore::new()));
    let mut stdout = std::io::stdout();
    presenter
        .present(&report, &mut stdout)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(())
}
