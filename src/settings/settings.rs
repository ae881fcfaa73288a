use anyhow::{Result, anyhow};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub auth: Auth,
    pub affinity: Affinity,
    pub store: Store,
    pub http: Http,
    pub log: Log,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub backend: String, // "fake" or "jwt"
    pub audience: String,
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct Affinity {
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Store {
    pub backend: String, // "memory" or "mysql"
    pub dsn: String,
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub address: String,
    /// TLS is served only when both paths are non-empty.
    pub cert_path: String,
    pub key_path: String,
}

impl Http {
    pub fn tls_enabled(&self) -> bool {
        !self.cert_path.is_empty() && !self.key_path.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

/// Reads the TOML file, then `VARANDA__<SECTION>__<KEY>` overrides.
pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .add_source(Environment::with_prefix("VARANDA").separator("__"))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_dev_settings() {
        let settings = parse_settings(Some("settings/dev.toml")).unwrap();
        assert_eq!(settings.store.backend, "memory");
        assert_eq!(settings.auth.backend, "fake");
        assert!(settings.affinity.timeout_ms > 0);
        assert!(!settings.http.tls_enabled());
    }

    #[test]
    fn release_settings_serve_tls() {
        let settings = parse_settings(Some("settings/release.toml")).unwrap();
        assert_eq!(settings.store.backend, "mysql");
        assert!(settings.http.tls_enabled());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(parse_settings(Some("")).is_err());
        assert!(parse_settings(Some("settings/nope.toml")).is_err());
    }
}
