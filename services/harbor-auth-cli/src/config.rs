//! Configuration types and loading
//!
//! Precedence: env vars > config file > defaults. The password and token
//! are never read from the TOML itself; they come from HARBOR_PASSWORD /
//! HARBOR_TOKEN or, for the password, `credentials.password_file`.

use common::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "harbor-auth.toml";

/// Root configuration
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub harbor: HarborConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// Auth service location
#[derive(Debug, Default, Deserialize)]
pub struct HarborConfig {
    #[serde(default)]
    pub url: String,
    /// Per-request deadline; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub username: String,
    #[serde(skip)]
    pub password: Option<Secret<String>>,
    /// File holding the password (alternative to HARBOR_PASSWORD)
    #[serde(default)]
    pub password_file: Option<PathBuf>,
    #[serde(skip)]
    pub token: Option<Secret<String>>,
}

impl Config {
    /// Load the file (if any), overlay the process environment, validate.
    pub fn load(path: Option<&Path>) -> common::Result<Self> {
        let mut config = match path {
            Some(path) => Self::parse(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse(contents: &str) -> common::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Overlay HARBOR_* variables. Empty values are ignored.
    ///
    /// Password resolution order:
    /// 1. HARBOR_PASSWORD
    /// 2. `credentials.password_file`
    pub fn apply_env<F>(&mut self, lookup: F) -> common::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = lookup("HARBOR_URL") {
            self.harbor.url = url;
        }
        if let Some(username) = lookup("HARBOR_USERNAME") {
            self.credentials.username = username;
        }
        if let Some(token) = lookup("HARBOR_TOKEN") {
            self.credentials.token = Some(Secret::new(token));
        }

        if let Some(password) = lookup("HARBOR_PASSWORD") {
            self.credentials.password = Some(Secret::new(password));
        } else if let Some(ref file) = self.credentials.password_file {
            let password = std::fs::read_to_string(file).map_err(|e| {
                common::Error::Config(format!(
                    "failed to read password_file {}: {e}",
                    file.display()
                ))
            })?;
            // Only the file's trailing newline; spaces can be part of the password.
            let password = password.trim_end_matches(['\n', '\r']).to_owned();
            if !password.is_empty() {
                self.credentials.password = Some(Secret::new(password));
            }
        }

        Ok(())
    }

    pub fn validate(&self) -> common::Result<()> {
        if self.harbor.url.is_empty() {
            return Err(common::Error::Config(
                "harbor.url is not set (config file or HARBOR_URL)".into(),
            ));
        }
        if !self.harbor.url.starts_with("http://") && !self.harbor.url.starts_with("https://") {
            return Err(common::Error::Config(format!(
                "harbor.url must start with http:// or https://, got: {}",
                self.harbor.url
            )));
        }
        if self.harbor.timeout_secs == Some(0) {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.harbor.timeout_secs.map(Duration::from_secs)
    }

    /// Resolve the config file from the CLI arg, then HARBOR_AUTH_CONFIG,
    /// then `harbor-auth.toml` in the working directory if present.
    pub fn resolve_path(cli_path: Option<&str>) -> Option<PathBuf> {
        if let Some(p) = cli_path {
            return Some(PathBuf::from(p));
        }
        if let Ok(p) = std::env::var("HARBOR_AUTH_CONFIG") {
            return Some(PathBuf::from(p));
        }
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn valid_toml() -> &'static str {
        r#"
[harbor]
url = "https://harbor-auth.example.com"
timeout_secs = 10

[credentials]
username = "jdoe"
"#
    }

    #[test]
    fn parses_valid_config() {
        let config = Config::parse(valid_toml()).unwrap();
        assert_eq!(config.harbor.url, "https://harbor-auth.example.com");
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.credentials.username, "jdoe");
        assert!(config.credentials.password.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.harbor.url.is_empty());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(matches!(
            Config::parse("not valid {{{{ toml"),
            Err(common::Error::Toml(_))
        ));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config::parse(valid_toml()).unwrap();
        config
            .apply_env(env(&[
                ("HARBOR_URL", "http://localhost:9000"),
                ("HARBOR_USERNAME", "alice"),
                ("HARBOR_PASSWORD", "correcthorse"),
                ("HARBOR_TOKEN", "abc"),
            ]))
            .unwrap();

        assert_eq!(config.harbor.url, "http://localhost:9000");
        assert_eq!(config.credentials.username, "alice");
        assert_eq!(
            config.credentials.password.as_ref().unwrap().expose(),
            "correcthorse"
        );
        assert_eq!(config.credentials.token.as_ref().unwrap().expose(), "abc");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = Config::parse(valid_toml()).unwrap();
        config
            .apply_env(env(&[("HARBOR_URL", ""), ("HARBOR_TOKEN", "")]))
            .unwrap();
        assert_eq!(config.harbor.url, "https://harbor-auth.example.com");
        assert!(config.credentials.token.is_none());
    }

    #[test]
    fn password_file_is_read_and_trimmed() {
        let dir = std::env::temp_dir().join(format!("harbor-auth-test-pw-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("password");
        std::fs::write(&file, "correcthorse\n").unwrap();

        let mut config = Config::parse(valid_toml()).unwrap();
        config.credentials.password_file = Some(file);
        config.apply_env(env(&[])).unwrap();
        assert_eq!(
            config.credentials.password.as_ref().unwrap().expose(),
            "correcthorse"
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn password_file_keeps_surrounding_spaces() {
        let dir =
            std::env::temp_dir().join(format!("harbor-auth-test-pw-spaces-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("password");
        std::fs::write(&file, " correct horse \r\n").unwrap();

        let mut config = Config::parse(valid_toml()).unwrap();
        config.credentials.password_file = Some(file);
        config.apply_env(env(&[])).unwrap();
        assert_eq!(
            config.credentials.password.as_ref().unwrap().expose(),
            " correct horse "
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn password_env_beats_password_file() {
        let mut config = Config::parse(valid_toml()).unwrap();
        // Never read: the env var wins first.
        config.credentials.password_file = Some(PathBuf::from("/nonexistent/password"));
        config
            .apply_env(env(&[("HARBOR_PASSWORD", "fromenvvar")]))
            .unwrap();
        assert_eq!(
            config.credentials.password.as_ref().unwrap().expose(),
            "fromenvvar"
        );
    }

    #[test]
    fn missing_password_file_is_a_config_error() {
        let mut config = Config::parse(valid_toml()).unwrap();
        config.credentials.password_file = Some(PathBuf::from("/nonexistent/password"));
        let err = config.apply_env(env(&[])).unwrap_err();
        assert!(matches!(err, common::Error::Config(_)));
        assert!(err.to_string().contains("password_file"), "got: {err}");
    }

    #[test]
    fn validate_requires_url_with_http_scheme() {
        let config = Config::default();
        assert!(config.validate().is_err());

        let config = Config::parse("[harbor]\nurl = \"ftp://harbor\"").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http://"), "got: {err}");
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config =
            Config::parse("[harbor]\nurl = \"http://harbor\"\ntimeout_secs = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn secrets_do_not_leak_through_debug() {
        let mut config = Config::parse(valid_toml()).unwrap();
        config
            .apply_env(env(&[
                ("HARBOR_PASSWORD", "correcthorse"),
                ("HARBOR_TOKEN", "tok-abc"),
            ]))
            .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("correcthorse"), "password leaked: {debug}");
        assert!(!debug.contains("tok-abc"), "token leaked: {debug}");
    }

    #[test]
    fn cli_path_wins() {
        assert_eq!(
            Config::resolve_path(Some("/etc/harbor-auth.toml")),
            Some(PathBuf::from("/etc/harbor-auth.toml"))
        );
    }
}
