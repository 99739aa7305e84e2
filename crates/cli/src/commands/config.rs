use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use storefront_core::config::{AppConfig, LoadOptions};
use toml::Value;

use crate::commands::{CommandResult, EXIT_CONFIG_FAILURE};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                error.to_string(),
                EXIT_CONFIG_FAILURE,
            )
        }
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let catalog_path = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<demo catalog>".to_string());

    let entries = [
        ("catalog.path", catalog_path, source("catalog.path", &["STOREFRONT_CATALOG_PATH"])),
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            source("server.bind_address", &["STOREFRONT_SERVER_BIND_ADDRESS"]),
        ),
        (
            "server.port",
            config.server.port.to_string(),
            source("server.port", &["STOREFRONT_SERVER_PORT"]),
        ),
        (
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            source(
                "server.graceful_shutdown_secs",
                &["STOREFRONT_SERVER_GRACEFUL_SHUTDOWN_SECS"],
            ),
        ),
        (
            "cache.enabled",
            config.cache.enabled.to_string(),
            source("cache.enabled", &["STOREFRONT_CACHE_ENABLED"]),
        ),
        (
            "cache.max_entries",
            config.cache.max_entries.to_string(),
            source("cache.max_entries", &["STOREFRONT_CACHE_MAX_ENTRIES"]),
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            source("logging.level", &["STOREFRONT_LOGGING_LEVEL", "STOREFRONT_LOG_LEVEL"]),
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            source("logging.format", &["STOREFRONT_LOGGING_FORMAT", "STOREFRONT_LOG_FORMAT"]),
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.extend(entries.into_iter().map(|(key, value, source)| render_line(key, &value, source)));
    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("storefront.toml"), PathBuf::from("config/storefront.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env_value_present(key)) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

/// Blank values are ignored by config loading, so they do not count as set.
fn env_value_present(key: &str) -> bool {
    env::var(key).is_ok_and(|value| !value.trim().is_empty())
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::{contains_path, field_source};

    #[test]
    fn nested_keys_are_found_in_file_doc() {
        let doc: Value = "[server]\nport = 9000\n".parse().expect("toml");

        assert!(contains_path(&doc, "server.port"));
        assert!(!contains_path(&doc, "server.bind_address"));
        assert!(!contains_path(&doc, "cache.enabled"));
    }

    #[test]
    fn file_source_is_attributed_when_env_is_unset() {
        let doc: Value = "[cache]\nmax_entries = 12\n".parse().expect("toml");

        let source = field_source(
            "cache.max_entries",
            &["STOREFRONT_TEST_UNSET_CACHE_KEY"],
            Some(&doc),
            Some(std::path::Path::new("storefront.toml")),
        );

        assert_eq!(source, "file (storefront.toml)");
        assert_eq!(field_source("cache.enabled", &[], Some(&doc), None), "default");
    }

    #[test]
    fn blank_env_value_does_not_claim_the_source() {
        std::env::set_var("STOREFRONT_TEST_BLANK_PORT_KEY", "   ");
        let source =
            field_source("server.port", &["STOREFRONT_TEST_BLANK_PORT_KEY"], None, None);
        std::env::remove_var("STOREFRONT_TEST_BLANK_PORT_KEY");

        assert_eq!(source, "default");
    }
}
