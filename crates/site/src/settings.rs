// crates/site/src/settings.rs

//! `settings.toml` shape for a site directory.
//!
//! Only `[site] title` is required; every other table falls back to defaults
//! so a minimal settings file stays minimal. The deployment identity pair can
//! be overridden per-environment via `VELLUM_PROJECT_ID` / `VELLUM_DATASET`.

use serde::{Deserialize, Serialize};
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub site: SiteSettings,
    #[serde(default)]
    pub cms: CmsSettings,
    pub theme: Option<ThemeSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_ip")]
    pub ip: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    pub title: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmsSettings {
    #[serde(default = "default_project_id")]
    pub project_id: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    /// Relative to the site directory.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeSettings {
    /// Relative to the site directory. Holds `*.hbs` overrides and an
    /// optional `static/` subdirectory.
    pub dir: PathBuf,
}

fn default_ip() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

fn default_project_id() -> String {
    "local".to_owned()
}

fn default_dataset() -> String {
    "production".to_owned()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("./content/")
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            port: default_port(),
        }
    }
}

impl Default for CmsSettings {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            dataset: default_dataset(),
            content_dir: default_content_dir(),
        }
    }
}

impl Settings {
    /// Fold environment overrides into the parsed file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("VELLUM_PROJECT_ID") {
            if !v.is_empty() {
                self.cms.project_id = v;
            }
        }
        if let Ok(v) = std::env::var("VELLUM_DATASET") {
            if !v.is_empty() {
                self.cms.dataset = v;
            }
        }
    }

    pub fn addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.server.ip, self.server.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_gets_defaults() {
        let s: Settings = toml::from_str(
            r#"
            [site]
            title = "My Site"
            "#,
        )
        .unwrap();

        assert_eq!(s.server.ip, "127.0.0.1");
        assert_eq!(s.server.port, 8080);
        assert_eq!(s.cms.project_id, "local");
        assert_eq!(s.cms.dataset, "production");
        assert_eq!(s.cms.content_dir, PathBuf::from("./content/"));
        assert!(s.theme.is_none());
        assert!(s.site.base_url.is_none());
    }

    #[test]
    fn full_file_parses() {
        let s: Settings = toml::from_str(
            r#"
            [server]
            ip = "0.0.0.0"
            port = 3000

            [site]
            title = "Robin's Corner"
            base_url = "https://example.com"

            [cms]
            project_id = "abc123"
            dataset = "staging"
            content_dir = "./data/"

            [theme]
            dir = "./theme/"
            "#,
        )
        .unwrap();

        assert_eq!(s.addr().unwrap().to_string(), "0.0.0.0:3000");
        assert_eq!(s.cms.dataset, "staging");
        assert_eq!(s.theme.unwrap().dir, PathBuf::from("./theme/"));
    }

    #[test]
    fn title_is_required() {
        assert!(toml::from_str::<Settings>("[site]\n").is_err());
    }
}
