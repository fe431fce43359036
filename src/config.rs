use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::Result;
use regex::{Captures, Regex};
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub translate: TranslateConfig,
    pub speech: SpeechConfig,
    pub generative: GenerativeConfig,
    pub sign: SignConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Longest text fragment sent in a single synthesis request
    pub max_chunk_chars: usize,
    pub default_lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerativeConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignConfig {
    /// Empty, or an unresolved `${VAR}`, disables lookups; every word then comes back without a video
    pub base_url: String,
    pub timeout_secs: u64,
    /// Most lookups open against the provider at once for one request
    pub max_concurrent: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            frontend_dir: "static".to_string(),
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
            timeout_secs: 20,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com".to_string(),
            timeout_secs: 30,
            max_chunk_chars: 100,
            default_lang: "en".to_string(),
        }
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 30,
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 10,
            max_concurrent: 8,
        }
    }
}

impl TranslateConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SpeechConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl GenerativeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read the API key once. Unset or blank means the AI features are off.
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

impl SignConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_configured(&self) -> bool {
        let url = self.base_url.trim();
        !url.is_empty() && !url.contains("${")
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        let content = substitute_env_vars(&read_text_file(path)?);

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        let config = if extension == "json" {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Resolve the startup configuration.
    ///
    /// An explicitly named file must exist and parse. Otherwise the default
    /// locations are tried in order, and with none usable the built-in
    /// defaults apply. Returns the path the config came from, if any.
    pub fn discover(explicit: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let config = Self::load(&path)
                .map_err(|e| e.context(format!("Cannot use config {}", path.display())))?;
            return Ok((config, Some(path)));
        }

        for path in Self::default_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => return Ok((config, Some(path))),
                Err(e) => warn!("Failed to load config from {}: {}", path.display(), e),
            }
        }

        Ok((Self::default(), None))
    }

    /// Locations tried when no config file is named, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        vec![
            Some(PathBuf::from("conf.yaml")),
            Some(PathBuf::from("conf.json")),
            exe_dir.as_ref().map(|d| d.join("conf.yaml")),
            exe_dir.as_ref().map(|d| d.join("conf.json")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Read a config file as UTF-8, dropping a leading BOM if present
fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        anyhow::bail!("Configuration file is not valid UTF-8: {}", path.display());
    }
    Ok(text.into_owned())
}

/// Replace `${VAR_NAME}` with the environment value; unknown variables stay as written
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static regex");
    pattern
        .replace_all(content, |caps: &Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
