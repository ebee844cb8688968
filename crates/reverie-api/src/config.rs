//! Server settings read from the environment.

use std::path::PathBuf;

use reverie_core::viewport::Viewport;
use reverie_stage::application::stage::DEFAULT_VIEWPORT;

use crate::error::AppError;

/// Everything `main` needs to start serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// YAML script to load; the bundled demo when `None`.
    pub script: Option<PathBuf>,
    /// Motion preference handed to the stage.
    pub reduced_motion: bool,
    /// Viewport the transition grid is derived from.
    pub viewport: Viewport,
}

impl Settings {
    /// Reads `HOST`, `PORT`, `REVERIE_SCRIPT`, `REVERIE_REDUCED_MOTION` and
    /// `REVERIE_VIEWPORT`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but malformed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] over an arbitrary lookup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let script = lookup("REVERIE_SCRIPT")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let reduced_motion = lookup("REVERIE_REDUCED_MOTION").is_some_and(|v| {
            matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
        });
        let viewport = match lookup("REVERIE_VIEWPORT") {
            Some(raw) => Viewport::parse(&raw).ok_or_else(|| {
                AppError::Config(format!(
                    "REVERIE_VIEWPORT must look like 1120x800, got {raw:?}"
                ))
            })?,
            None => DEFAULT_VIEWPORT,
        };
        Ok(Self {
            host,
            port,
            script,
            reduced_motion,
            viewport,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        // Act
        let settings = settings(&[]).unwrap();

        // Assert
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.script, None);
        assert!(!settings.reduced_motion);
        assert_eq!(settings.viewport, DEFAULT_VIEWPORT);
    }

    #[test]
    fn test_reads_every_variable() {
        let settings = settings(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("REVERIE_SCRIPT", "/tmp/story.yaml"),
            ("REVERIE_REDUCED_MOTION", "TRUE"),
            ("REVERIE_VIEWPORT", "390x844"),
        ])
        .unwrap();

        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.script, Some(PathBuf::from("/tmp/story.yaml")));
        assert!(settings.reduced_motion);
        assert_eq!(settings.viewport, Viewport::new(390, 844));
    }

    #[test]
    fn test_rejects_bad_port() {
        let result = settings(&[("PORT", "lots")]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_viewport() {
        let result = settings(&[("REVERIE_VIEWPORT", "wide")]);

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("wide")));
    }
}
