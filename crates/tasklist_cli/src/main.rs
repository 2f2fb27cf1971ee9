//! `tasklist` server entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and `TASKLIST_*` environment variables.
//! - Bootstrap logging and storage before accepting requests.
//! - Serve the task list until the process is stopped.

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tasklist_core::{
    core_version, default_log_level, init_logging, init_stderr_logging, JsonFileTaskStore,
    TaskStore,
};
use tasklist_web::AppState;
use tokio::net::TcpListener;

#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about = "Minimal task list web application")]
struct Args {
    /// JSON file holding the task collection (created when missing)
    #[arg(long, env = "TASKLIST_DATA_FILE", default_value = "data/tasks.json")]
    data_file: PathBuf,

    /// Address to listen on
    #[arg(long, env = "TASKLIST_BIND", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "TASKLIST_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logs go to stderr when unset
    #[arg(long, env = "TASKLIST_LOG_DIR")]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let logging = match &args.log_dir {
        Some(dir) => init_logging(&level, dir),
        None => init_stderr_logging(&level),
    };
    logging.map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;

    let store = JsonFileTaskStore::new(&args.data_file);
    store
        .ensure_storage()
        .with_context(|| format!("failed to prepare `{}`", args.data_file.display()))?;
    log::info!(
        "event=cli_start module=cli status=ok version={} data_file={}",
        core_version(),
        args.data_file.display()
    );

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    tasklist_web::serve(listener, AppState::new(store)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "tasklist",
            "--data-file",
            "/tmp/tasks.json",
            "--bind",
            "0.0.0.0:8080",
            "--log-level",
            "warn",
        ])
        .unwrap();

        assert_eq!(args.data_file.to_str(), Some("/tmp/tasks.json"));
        assert_eq!(args.bind.port(), 8080);
        assert_eq!(args.log_level.as_deref(), Some("warn"));
        assert!(args.log_dir.is_none());
    }

    #[test]
    fn invalid_bind_address_is_rejected() {
        assert!(Args::try_parse_from(["tasklist", "--bind", "not-an-address"]).is_err());
    }
}
