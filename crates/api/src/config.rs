use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default upper bound for a single uploaded file: 5 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Where uploads are written and how large they may be.
    pub media: MediaConfig,
    /// Details shown on the portfolio home page.
    pub site: SiteConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            media: MediaConfig::from_env(),
            site: SiteConfig::from_env(),
        }
    }
}

/// Upload storage settings.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory uploads are written under; stored paths are relative to it.
    pub root: PathBuf,
    /// Largest accepted size of a single uploaded file, in bytes.
    pub max_upload_bytes: usize,
}

impl MediaConfig {
    /// | Env Var            | Default   |
    /// |--------------------|-----------|
    /// | `MEDIA_ROOT`       | `media`   |
    /// | `MAX_UPLOAD_BYTES` | `5242880` |
    pub fn from_env() -> Self {
        let root = std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".into());

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            root: PathBuf::from(root),
            max_upload_bytes,
        }
    }

    /// Request body limit for upload requests: room for every file a single
    /// upload may carry plus multipart framing.
    pub fn request_body_limit(&self) -> usize {
        let files = pantry_core::recipes::MAX_GALLERY_IMAGES_PER_UPLOAD + 1;
        self.max_upload_bytes.saturating_mul(files) + 64 * 1024
    }
}

/// Portfolio page details.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub owner_name: String,
    pub interests: Vec<String>,
}

impl SiteConfig {
    /// | Env Var           | Default                            |
    /// |-------------------|------------------------------------|
    /// | `SITE_OWNER_NAME` | `Kash`                             |
    /// | `SITE_INTERESTS`  | `Coding,Fitness,Gaming,Teaching`   |
    pub fn from_env() -> Self {
        let owner_name = std::env::var("SITE_OWNER_NAME").unwrap_or_else(|_| "Kash".into());
        let interests = split_list(
            &std::env::var("SITE_INTERESTS")
                .unwrap_or_else(|_| "Coding,Fitness,Gaming,Teaching".into()),
        );
        Self {
            owner_name,
            interests,
        }
    }
}

/// Split a comma-separated setting, dropping blank entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_settings_skip_blanks() {
        assert_eq!(
            split_list(" Coding, ,Gaming,"),
            vec!["Coding".to_string(), "Gaming".to_string()]
        );
    }

    #[test]
    fn body_limit_covers_every_file() {
        let media = MediaConfig {
            root: PathBuf::from("media"),
            max_upload_bytes: 1000,
        };
        assert!(media.request_body_limit() >= 4000);
    }
}
