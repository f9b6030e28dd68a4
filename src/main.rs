//! Storefront gateway
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────────┐    ┌──────────┐
//! │  Config  │───▶│ Gateway  │───▶│ Orders/Users │───▶│ Notifier │──▶ chat
//! │  (YAML)  │    │  (axum)  │    │  + Catalog   │    │ (worker) │
//! └──────────┘    └──────────┘    └──────────────┘    └──────────┘
//! ```
//!
//! Flags: `--env/-e <name>` selects `config/<name>.yaml` (default `dev`, or
//! `STOREFRONT_ENV`), `--port/-p <n>` overrides the configured port.

use std::sync::Arc;

use storefront::catalog::CatalogService;
use storefront::config::{AppConfig, ENV_PROFILE};
use storefront::gateway::{self, state::AppState};
use storefront::logging::init_logging;
use storefront::notifier::Notifier;
use storefront::orders::{InMemoryOrderStore, OrderService};
use storefront::users::{InMemoryUserStore, UserService};

const DEFAULT_PROFILE: &str = "dev";

#[derive(Debug, PartialEq)]
struct CliArgs {
    /// Config profile, i.e. `config/<env>.yaml`
    env: String,
    port: Option<u16>,
}

impl CliArgs {
    /// Parse `args` (program name first). Unknown flags are ignored.
    fn parse(args: &[String], profile_from_env: Option<String>) -> Result<Self, String> {
        let mut env = None;
        let mut port = None;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--env" | "-e" => {
                    env = Some(iter.next().ok_or("--env needs a value")?.clone());
                }
                "--port" | "-p" => {
                    let raw = iter.next().ok_or("--port needs a value")?;
                    port = Some(raw.parse().map_err(|_| format!("invalid port '{}'", raw))?);
                }
                _ => {}
            }
        }

        Ok(Self {
            env: env
                .or(profile_from_env)
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            port,
        })
    }
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let cli = match CliArgs::parse(&args, std::env::var(ENV_PROFILE).ok()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("FATAL: {}", e);
            std::process::exit(2);
        }
    };

    let mut app_config = match AppConfig::load(&cli.env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: cannot load config for env '{}': {}", cli.env, e);
            std::process::exit(1);
        }
    };
    if let Some(port) = cli.port {
        app_config.gateway.port = port;
    }

    let _log_guard = init_logging(&app_config);
    tracing::info!(
        env = %cli.env,
        port = app_config.gateway.port,
        notifier = app_config.notifier.is_enabled(),
        "Starting storefront"
    );

    let notifier = Notifier::from_config(&app_config.notifier);
    let orders = OrderService::new(Arc::new(InMemoryOrderStore::new()), notifier.clone());
    let users = UserService::new(Arc::new(InMemoryUserStore::new()), notifier);
    let state = Arc::new(AppState::new(orders, users, CatalogService::default()));

    if let Err(e) = gateway::run_server(&app_config.gateway, state).await {
        tracing::error!(error = %e, "Gateway failed");
        eprintln!("FATAL: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("storefront")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_defaults_to_dev_profile() {
        let cli = CliArgs::parse(&args(&[]), None).unwrap();
        assert_eq!(
            cli,
            CliArgs {
                env: "dev".to_string(),
                port: None
            }
        );
    }

    #[test]
    fn test_flag_beats_environment_profile() {
        let cli = CliArgs::parse(&args(&[]), Some("prod".to_string())).unwrap();
        assert_eq!(cli.env, "prod");

        let cli = CliArgs::parse(&args(&["-e", "staging", "--port", "8081"]), Some("prod".to_string()))
            .unwrap();
        assert_eq!(cli.env, "staging");
        assert_eq!(cli.port, Some(8081));
    }

    #[test]
    fn test_bad_port_is_reported() {
        let err = CliArgs::parse(&args(&["-p", "eighty"]), None).unwrap_err();
        assert_eq!(err, "invalid port 'eighty'");
        assert!(CliArgs::parse(&args(&["--env"]), None).is_err());
    }
}
