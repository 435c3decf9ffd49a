//! # Service Config Module
//!
//! ## Purpose
//! Centralized management of the kinetics service endpoint. The base URL of
//! the remote calculator lives in one place, persists across runs and can be
//! switched without touching code anywhere else in the crate.
//!
//! ## Architecture
//! - **ServiceConfig**: serializable configuration structure
//! - **ServiceConfigManager**: load/save with URL validation before updates
//! - **Global Access**: thread-safe singleton (OnceLock + Mutex) with closure
//!   accessors and test isolation
//! - **Configuration File**: JSON persistent storage (service_config.json)
//!
//! ## Configuration Format
//! ```json
//! {
//!   "base_url": "http://127.0.0.1:5000"
//! }
//! ```
//!
//! ## Usage Patterns
//! ```rust
//! use KinWeb::service_config::with_service_config;
//!
//! let url = with_service_config(|cfg| cfg.base_url().to_string());
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use url::Url;

/// where the calculator answers when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Loads, validates and persists the service configuration. Keeps the path of
/// the config file so saves land where the load came from.
#[derive(Debug, Clone)]
pub struct ServiceConfigManager {
    config: ServiceConfig,
    config_file: String,
}

impl ServiceConfigManager {
    /// Reads "service_config.json" from the current directory; a missing or
    /// invalid file falls back to the default configuration.
    pub fn new() -> Self {
        let config_file = "service_config.json".to_string();
        let config = Self::load_config(&config_file).unwrap_or_default();

        Self {
            config,
            config_file,
        }
    }

    /// Non-standard config location, primarily for testing.
    pub fn with_config_file(config_file: &str) -> Self {
        let config = Self::load_config(config_file).unwrap_or_default();

        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    fn load_config(config_file: &str) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: ServiceConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(ServiceConfig::default())
        }
    }

    /// Saves the current configuration. During tests this does nothing so the
    /// real config file never gets polluted.
    pub fn save_config(&self) -> Result<(), Box<dyn std::error::Error>> {
        #[cfg(test)]
        {
            return Ok(());
        }

        #[cfg(not(test))]
        {
            let content = serde_json::to_string_pretty(&self.config)?;
            fs::write(&self.config_file, content)?;
            Ok(())
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Updates the service endpoint. The candidate must parse as a URL before
    /// it replaces the stored one; the change is saved immediately.
    pub fn set_base_url(&mut self, url: &str) -> Result<(), Box<dyn std::error::Error>> {
        Url::parse(url)?;
        self.config.base_url = url.trim_end_matches('/').to_string();
        self.save_config()?;
        Ok(())
    }

    pub fn get_config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.config = ServiceConfig::default();
        self.save_config()?;
        Ok(())
    }
}

/// Global singleton instance using the thread-safe OnceLock pattern
static GLOBAL_SERVICE_CONFIG: OnceLock<Mutex<ServiceConfigManager>> = OnceLock::new();

/// Test-specific manager instance to isolate tests from global state
#[cfg(test)]
static TEST_MANAGER: Mutex<Option<ServiceConfigManager>> = Mutex::new(None);

#[cfg(test)]
pub fn set_test_manager(manager: ServiceConfigManager) {
    *TEST_MANAGER.lock().unwrap() = Some(manager);
}

#[cfg(test)]
pub fn clear_test_manager() {
    *TEST_MANAGER.lock().unwrap() = None;
}

/// Thread-safe access to the singleton manager. During tests the
/// test-specific manager takes precedence when one has been set.
pub fn get_service_config_manager() -> std::sync::MutexGuard<'static, ServiceConfigManager> {
    #[cfg(test)]
    {
        if let Some(ref manager) = *TEST_MANAGER.lock().unwrap() {
            let _ = GLOBAL_SERVICE_CONFIG.set(Mutex::new(manager.clone()));
        }
    }

    GLOBAL_SERVICE_CONFIG
        .get_or_init(|| Mutex::new(ServiceConfigManager::new()))
        .lock()
        .unwrap()
}

/// read-only access without managing the mutex guard directly
pub fn with_service_config<F, R>(f: F) -> R
where
    F: FnOnce(&ServiceConfigManager) -> R,
{
    let manager = get_service_config_manager();
    f(&*manager)
}

/// mutable access without managing the mutex guard directly
pub fn with_service_config_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut ServiceConfigManager) -> R,
{
    let mut manager = get_service_config_manager();
    f(&mut *manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_service_config_defaults() {
        let manager = ServiceConfigManager::with_config_file("no_such_config.json");
        assert_eq!(manager.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_service_config_from_file() {
        let mut temp_config = NamedTempFile::new().unwrap();
        let config = ServiceConfig {
            base_url: "http://kinetics.example.org:8080".to_string(),
        };
        let config_json = serde_json::to_string_pretty(&config).unwrap();
        temp_config.write_all(config_json.as_bytes()).unwrap();

        let manager = ServiceConfigManager::with_config_file(temp_config.path().to_str().unwrap());
        assert_eq!(manager.base_url(), "http://kinetics.example.org:8080");
    }

    #[test]
    fn test_set_base_url_validates() {
        let mut manager = ServiceConfigManager::with_config_file("no_such_config.json");
        assert!(manager.set_base_url("http://10.0.0.7:5000/").is_ok());
        // trailing slash is normalized away
        assert_eq!(manager.base_url(), "http://10.0.0.7:5000");

        assert!(manager.set_base_url("not a url").is_err());
        assert_eq!(manager.base_url(), "http://10.0.0.7:5000");
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut manager = ServiceConfigManager::with_config_file("no_such_config.json");
        manager.set_base_url("http://10.0.0.7:5000").unwrap();
        manager.reset_to_defaults().unwrap();
        assert_eq!(manager.base_url(), DEFAULT_BASE_URL);
    }
}
