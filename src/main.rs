use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::Employee;
use payroll_engine::store::{InMemoryAttendanceStore, InMemoryEmployeeDirectory};

/// Serves the payroll engine over HTTP.
#[derive(Debug, Parser)]
#[command(name = "payroll-engine", version, about)]
struct Args {
    /// Contribution tables (JSON, or YAML by extension).
    #[arg(long, env = "PAYROLL_CONTRIBUTIONS", default_value = "./config/contributions.json")]
    contributions: PathBuf,

    /// JSON array of employees to serve.
    #[arg(long, env = "PAYROLL_EMPLOYEES")]
    employees: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long, env = "PAYROLL_BIND", default_value = "127.0.0.1:3000")]
    bind: String,
}

fn load_employees(path: &Path) -> anyhow::Result<Vec<Employee>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading employees from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing employees from {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let tables = ConfigLoader::load(&args.contributions)
        .context("loading contribution tables")?
        .into_tables();

    let employees: InMemoryEmployeeDirectory = match &args.employees {
        Some(path) => {
            let employees = load_employees(path)?;
            info!(path = %path.display(), count = employees.len(), "Loaded employees");
            employees.into_iter().collect()
        }
        None => InMemoryEmployeeDirectory::new(),
    };

    let state = AppState::new(
        tables,
        Arc::new(InMemoryAttendanceStore::new()),
        Arc::new(employees),
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    info!("Listening on http://{}", args.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
