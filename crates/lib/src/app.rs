//! Initialization entry points.
//!
//! These mirror the bootstrap calls of a document-database SDK. Nothing here
//! touches the network: [`initialize_app`] only records configuration and
//! [`get_firestore`] builds an HTTP client from it.
//!
//! ```rust
//! use docshim::{ClientConfig, get_firestore, initialize_app};
//!
//! let app = initialize_app(ClientConfig::new("http://localhost:3001"));
//! let db = get_firestore(&app)?;
//! assert_eq!(db.transport().transport_type(), "http");
//! # Ok::<(), docshim::Error>(())
//! ```

use tracing::info;

use crate::{Result, config::ClientConfig, firestore::Firestore};

/// An initialized application: the configuration clients are built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct App {
    config: ClientConfig,
}

impl App {
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Record the configuration for later [`get_firestore`] calls.
pub fn initialize_app(config: ClientConfig) -> App {
    info!(base_url = %config.base_url, "Initialized app");
    App { config }
}

/// Build a client for `app`.
pub fn get_firestore(app: &App) -> Result<Firestore> {
    Firestore::from_config(app.config())
}

/// Build an HTTP client against `base_url` with default options.
pub fn init(base_url: &str) -> Result<Firestore> {
    Firestore::from_config(&ClientConfig::new(base_url))
}
