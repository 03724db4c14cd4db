//! Eventboard: a Zellij plugin for browsing, creating and deleting events held
//! by a remote CRUD API.
//!
//! The plugin lists the events of one collection, lets the user add an event
//! through a form and delete the highlighted one. Every create or delete is
//! followed by a fresh fetch of the whole list, which then replaces what is on
//! screen.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Host calls
//! │  - key mapping, web_request, WebRequestResult       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, operation chains                 │
//! │  - Event store, form, pending chains                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ API Layer (api/)          │   │ UI Layer (ui/)            │
//! │ - request builders        │   │ - components              │
//! │ - response decoding       │   │ - theming                 │
//! │ - request context         │   │ - ANSI frame              │
//! └───────────────────────────┘   └───────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Event records and drafts (domain/event)          │
//! │  - Error types (domain/error)                       │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing + OpenTelemetry, OTLP JSON file export   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing below the shim calls the host, so the whole library runs (and is
//! tested) on any target.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/eventboard.wasm" {
//!         cohort "2408-Bertha-Wang"
//!         // or: api_url "https://example.com/api/my-team/events/"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use eventboard::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//!
//! let Some(Action::Send(request)) = actions.first() else { unreachable!() };
//! assert_eq!(request.url, Config::default().api_base_url());
//! # Ok::<(), eventboard::EventboardError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use api::{ApiRequest, ApiResponse, EventsApi, HttpMethod, RequestContext};
pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{EventDraft, EventId, EventRecord, EventboardError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Host and path prefix of the public events API.
pub const DEFAULT_API_ROOT: &str = "https://fsa-crud-2aa9294fe819.herokuapp.com/api";
/// Collection used when neither `api_url` nor `cohort` is configured.
pub const DEFAULT_COHORT: &str = "2408-Bertha-Wang";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Full collection URL. Takes precedence over `cohort`.
    pub api_url: Option<String>,

    /// Cohort segment of the default API path
    /// (`<DEFAULT_API_ROOT>/<cohort>/events/`). Default: [`DEFAULT_COHORT`].
    pub cohort: Option<String>,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file (`~` maps to `/host`).
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Config {
    /// Reads the known keys; blank values count as unset.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use eventboard::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("cohort".to_string(), "2501-demo".to_string());
    /// map.insert("theme".to_string(), "catppuccin-latte".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(
    ///     config.api_base_url(),
    ///     "https://fsa-crud-2aa9294fe819.herokuapp.com/api/2501-demo/events/"
    /// );
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            api_url: value("api_url"),
            cohort: value("cohort"),
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
        }
    }

    /// The collection URL requests are sent to, always ending in `/`.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        let url = self.api_url.clone().unwrap_or_else(|| {
            let cohort = self.cohort.as_deref().unwrap_or(DEFAULT_COHORT);
            format!("{DEFAULT_API_ROOT}/{cohort}/events/")
        });
        EventsApi::new(url).base_url().to_string()
    }

    /// Checks the API settings.
    ///
    /// # Errors
    ///
    /// Returns [`EventboardError::Config`] if `api_url` is not an http(s) URL or
    /// `cohort` contains a path separator.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.api_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(EventboardError::Config(format!(
                    "api_url must start with http:// or https://, got {url:?}"
                )));
            }
        }
        if let Some(cohort) = &self.cohort {
            if cohort.contains('/') {
                return Err(EventboardError::Config(format!(
                    "cohort must be a single path segment, got {cohort:?}"
                )));
            }
        }
        Ok(())
    }

    fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial state: theme, API client, empty store.
///
/// An invalid configuration is reported on the status line; the state still
/// uses the configured URL so the failure stays visible rather than silently
/// switching collections.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let base_url = config.api_base_url();
    tracing::debug!(api = %base_url, "initializing eventboard plugin");

    let mut state = AppState::new(EventsApi::new(base_url), config.load_theme());

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid plugin configuration");
        state.status = Some(app::StatusMessage::error(e.to_string()));
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_point_at_default_cohort() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(
            config.api_base_url(),
            "https://fsa-crud-2aa9294fe819.herokuapp.com/api/2408-Bertha-Wang/events/"
        );
    }

    #[test]
    fn api_url_wins_over_cohort() {
        let config = Config::from_zellij(&map(&[
            ("api_url", "http://localhost:3000/api/events"),
            ("cohort", "ignored"),
        ]));
        assert_eq!(config.api_base_url(), "http://localhost:3000/api/events/");
    }

    #[test]
    fn blank_values_are_unset() {
        let config = Config::from_zellij(&map(&[("theme", "  "), ("trace_level", "")]));
        assert!(config.theme_name.is_none());
        assert!(config.trace_level.is_none());
    }

    #[test]
    fn validation() {
        assert!(Config::default().validate().is_ok());
        let bad_url = Config::from_zellij(&map(&[("api_url", "ftp://x")]));
        assert!(matches!(bad_url.validate(), Err(EventboardError::Config(_))));
        let bad_cohort = Config::from_zellij(&map(&[("cohort", "a/b")]));
        assert!(matches!(bad_cohort.validate(), Err(EventboardError::Config(_))));
    }

    #[test]
    fn initialize_reports_bad_config() {
        let state = initialize(&Config::from_zellij(&map(&[("api_url", "localhost")])));
        assert!(state.status.as_ref().is_some_and(app::StatusMessage::is_error));
    }

    #[test]
    fn initialize_picks_theme() {
        let state = initialize(&Config::from_zellij(&map(&[("theme", "catppuccin-frappe")])));
        assert_eq!(state.theme.name, "catppuccin-frappe");

        let state = initialize(&Config::from_zellij(&map(&[("theme", "nope")])));
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }
}
