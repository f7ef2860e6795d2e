//! bora - diagnostic CLI for the session core.
//!
//! Runs the same bootstrap/login/logout flows the mobile shell drives,
//! against the real store and auth server, and prints the resolved state.

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bora_core::store::FileStore;
use bora_core::{AuthClient, Config, LoginRequest, SessionBootstrapper, SessionState};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_state(state: &SessionState) {
    match state {
        SessionState::Authenticated(user) => {
            println!("authenticated as {} <{}>", user.name, user.email);
        }
        SessionState::Unauthenticated => println!("not authenticated"),
        SessionState::Unknown => println!("session state unknown"),
    }
}

fn usage() {
    eprintln!("usage: bora [status | login <email> <password> | logout]");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let mut config = Config::load()?;
    let store = FileStore::new(Config::store_dir()?)?;
    let store_dir = store.dir().to_path_buf();
    let client = AuthClient::new(&config.api_url)?;
    let bootstrapper = SessionBootstrapper::new(store, client);

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None | Some("status") => {
            info!(api_url = %config.api_url, "running bootstrap cycle");
            println!("session store: {}", store_dir.display());
            let state = bootstrapper.bootstrap().await;
            print_state(&state);
        }
        Some("login") => {
            let (Some(email), Some(password)) = (args.get(2), args.get(3)) else {
                usage();
                std::process::exit(2);
            };
            let request = LoginRequest::Password {
                email: email.clone(),
                password: password.clone(),
            };
            match bootstrapper.login(&request).await {
                Ok(state) => {
                    config.last_email = Some(email.clone());
                    config.save()?;
                    print_state(&state);
                }
                Err(e) => {
                    eprintln!("login failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some("logout") => {
            let state = bootstrapper.logout().await;
            print_state(&state);
        }
        Some(other) => {
            eprintln!("unknown command: {other}");
            usage();
            std::process::exit(2);
        }
    }

    Ok(())
}
