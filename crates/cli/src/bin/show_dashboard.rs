use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use api_client::{ClientConfig, FinanceBackend, HttpBackend};
use dashboard::DashboardController;
use session_store::SessionStore;

#[derive(Parser, Debug)]
#[command(
    name = "show-dashboard",
    about = "Run a full dashboard load against the finance backend and print the assembled state."
)]
struct Args {
    /// Backend base URL; overrides PAISA_API_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Where the session (token, user, cached pulse) is kept
    #[arg(long, default_value = "session.json")]
    session_file: PathBuf,

    /// Log in first with this email (requires --password)
    #[arg(long, requires = "password")]
    email: Option<String>,

    #[arg(long)]
    password: Option<String>,

    /// How long to wait for the slower sources before printing partial state
    #[arg(long, default_value_t = 3)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "show_dashboard=info,dashboard=info,api_client=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let session = Arc::new(
        SessionStore::open(&args.session_file)
            .with_context(|| format!("opening session file {}", args.session_file.display()))?,
    );
    let backend = Arc::new(HttpBackend::new(config, session.clone())?);

    if let (Some(email), Some(password)) = (&args.email, &args.password) {
        let auth = backend
            .login(email, password)
            .await
            .context("login failed")?;
        session.login(auth.token, auth.user)?;
        tracing::info!(email, "signed in");
    }

    let controller = DashboardController::new(backend, session)
        .with_load_timeout(Duration::from_secs(args.timeout_secs));
    let state = controller.refresh().await;

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
