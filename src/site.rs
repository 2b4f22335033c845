//! Site Configuration
//!
//! Static settings the build consumes once at start: site URL, base
//! path, output mode, enabled integrations. Parsed from TOML and
//! validated; nothing here acts on the values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SiteConfigError {
    #[error("Cannot read site config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid site config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Static,
    Server,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Canonical site URL, e.g. `https://solofolio.vercel.app`.
    pub site: String,
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default)]
    pub output: OutputMode,
    #[serde(default)]
    pub integrations: Vec<String>,
}

fn default_base() -> String {
    "/".to_string()
}

impl SiteConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, SiteConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SiteConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    fn validate(&self) -> Result<(), SiteConfigError> {
        match Url::parse(&self.site) {
            Ok(url) => match url.scheme() {
                "http" | "https" => {}
                scheme => {
                    return Err(SiteConfigError::InvalidValue {
                        field: "site".to_string(),
                        value: self.site.clone(),
                        reason: format!("unsupported URL scheme: {}", scheme),
                    })
                }
            },
            Err(e) => {
                return Err(SiteConfigError::InvalidValue {
                    field: "site".to_string(),
                    value: self.site.clone(),
                    reason: format!("invalid URL: {}", e),
                })
            }
        }

        if !self.base.starts_with('/') {
            return Err(SiteConfigError::InvalidValue {
                field: "base".to_string(),
                value: self.base.clone(),
                reason: "base path must start with '/'".to_string(),
            });
        }

        Ok(())
    }
}
