use std::sync::Arc;

use log::{error, info, warn};

use opsgate::config::ClientConfig;
use opsgate::http::backend::{Credentials, HttpAuthBackend};
use opsgate::routing::LogNavigator;
use opsgate::security_logger::init_security_logger;
use opsgate::session::{ChannelActivitySource, SessionManager, SessionStore};
use opsgate::storage::FileCredentialStore;

#[tokio::main]
async fn main() {
    // Initialize env before logging so RUST_LOG from .env applies
    let dotenv_result = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();

    match dotenv_result {
        Ok(_) => info!("Environment variables loaded from .env file"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    init_security_logger();

    // Load config from the environment
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Configuration: api={}, inactivity={}s, storage={}",
        config.api_base_url,
        config.inactivity_window.as_secs(),
        config.storage_path.display()
    );

    let mirror = Arc::new(FileCredentialStore::new(config.storage_path.clone()));
    let store = Arc::new(SessionStore::new(mirror));
    let backend = Arc::new(HttpAuthBackend::new(
        reqwest::Client::new(),
        config.api_base_url.clone(),
    ));
    let navigator = Arc::new(LogNavigator);
    let source = Arc::new(ChannelActivitySource::new());

    let manager = SessionManager::new(
        Arc::clone(&store),
        backend,
        navigator,
        source,
        config.inactivity_window,
        config.login_route.clone(),
        config.home_route.clone(),
    );

    // Rehydrate any persisted session before deciding what to do
    match store.restore().await {
        Some(session) => info!(
            "Restored session for {} ({})",
            session.user.full_name(),
            session.user.role
        ),
        None => info!("No persisted session"),
    }

    if std::env::var("OPSGATE_LOGOUT").map(|v| v == "1").unwrap_or(false) {
        match manager.logout().await {
            Ok(_) => info!("Logged out"),
            Err(e) => error!("Logout reported a backend failure (session cleared locally): {}", e),
        }
        return;
    }

    if store.is_authenticated() {
        if let Some(user) = store.current_user() {
            info!(
                "Authenticated as {} <{}> role={}",
                user.full_name(),
                user.email,
                user.role
            );
        }
        return;
    }

    let credentials = match credentials_from_env() {
        Some(credentials) => credentials,
        None => {
            info!("Not authenticated; set OPSGATE_EMAIL or OPSGATE_IDENTIFICATION plus OPSGATE_PASSWORD to log in");
            return;
        }
    };

    match manager.login(&credentials).await {
        Ok(_) if store.is_authenticated() => {
            if let Some(user) = store.current_user() {
                info!("Logged in as {} role={}", user.full_name(), user.role);
            }
            manager.redirect_by_role();
        }
        Ok(response) => {
            warn!(
                "Login rejected: {}",
                response.message.unwrap_or_else(|| "no message".to_string())
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("Login failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn credentials_from_env() -> Option<Credentials> {
    let password = std::env::var("OPSGATE_PASSWORD").ok()?;
    if let Ok(email) = std::env::var("OPSGATE_EMAIL") {
        return Some(Credentials::with_email(email, password));
    }
    if let Ok(identification) = std::env::var("OPSGATE_IDENTIFICATION") {
        return Some(Credentials::with_identification(identification, password));
    }
    None
}
