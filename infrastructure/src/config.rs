use anyhow::{anyhow, bail, Context};
use dotenvy::dotenv;
use serde::Deserialize;
use shared::types::Result;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// On-disk YAML layout. Every field is optional so a partial file works.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(rename = "OPENAI_KEY")]
    openai_key: Option<String>,
    base_url: Option<String>,
    chat_model: Option<String>,
    embedding_model: Option<String>,
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
    top_k: Option<usize>,
    summary_timeout_secs: Option<u64>,
    data_dir: Option<PathBuf>,
    cache_db: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub openai_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub summary_timeout: Duration,
    pub data_dir: PathBuf,
    pub cache_db: Option<PathBuf>,
}

impl Config {
    /// Load `.env`, then the YAML file, then environment overrides.
    ///
    /// `path == None` means the default `config.yml`, which may be absent as
    /// long as the credential is available from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();
        let file = match path {
            Some(path) => Self::read_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::read_file(default)?
                } else {
                    ConfigFile::default()
                }
            }
        };
        Self::resolve(file, |key| env::var(key).ok())
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {:?}", path))?;
        if raw.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file at {:?}", path))
    }

    fn resolve(file: ConfigFile, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let openai_key = var("OPENAI_API_KEY")
            .or(file.openai_key)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "Missing API credential: set OPENAI_KEY in the config file or OPENAI_API_KEY"
                )
            })?;

        let config = Self {
            openai_key,
            base_url: var("OPENAI_BASE_URL")
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            chat_model: var("PLAN_COMPARE_CHAT_MODEL")
                .or(file.chat_model)
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            embedding_model: var("PLAN_COMPARE_EMBEDDING_MODEL")
                .or(file.embedding_model)
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            chunk_size: file.chunk_size.unwrap_or(1000),
            chunk_overlap: file.chunk_overlap.unwrap_or(500),
            top_k: file.top_k.unwrap_or(4),
            summary_timeout: Duration::from_secs(file.summary_timeout_secs.unwrap_or(60)),
            data_dir: file.data_dir.unwrap_or_else(|| PathBuf::from("data")),
            cache_db: var("PLAN_COMPARE_CACHE_DB").map(PathBuf::from).or(file.cache_db),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            bail!("chunk_size must be greater than zero");
        }
        if self.chunk_overlap >= self.chunk_size {
            bail!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap,
                self.chunk_size
            );
        }
        if self.top_k == 0 {
            bail!("top_k must be greater than zero");
        }
        Ok(())
    }
}
