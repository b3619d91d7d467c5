use std::{fmt, path::PathBuf};

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;

const DEFAULT_DATABASE: &str = "testDB";
const DEFAULT_TABLE: &str = "users";
const DEFAULT_DEBUG_PAGE: &str = "debug_data_page.html";

/// The env vars needed to log in and scrape a table.
#[derive(Debug, Deserialize)]
pub struct PmaEnv {
    base_url: String,
    pma_path: String,
    pma_username: Option<String>,
    pma_password: Option<String>,
    pma_database: Option<String>,
    pma_table: Option<String>,
    pma_debug_page: Option<String>,
}

pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug)]
pub struct PmaConfig {
    pub login_url: Url,
    pub credentials: Credentials,
    pub database: String,
    pub table: String,
    pub debug_page_path: PathBuf,
}

impl PmaConfig {
    pub fn new() -> anyhow::Result<Self> {
        Self::from_env(PmaEnv::load_from_env()?)
    }

    /// Same as [`PmaConfig::new`] but reads from the given pairs instead of
    /// the process environment.
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::from_iter::<_, PmaEnv>(vars)
            .context("failed to load env variables into config struct")?;
        Self::from_env(env)
    }

    fn from_env(env: PmaEnv) -> anyhow::Result<Self> {
        let (Some(username), Some(password)) = (
            env.pma_username.filter(|s| !s.is_empty()),
            env.pma_password.filter(|s| !s.is_empty()),
        ) else {
            return Err(anyhow::anyhow!(
                "PMA_USERNAME or PMA_PASSWORD not set in .env file or environment"
            ));
        };

        let base_url = Url::parse(&env.base_url)
            .with_context(|| format!("BASE_URL is not a valid url: {}", env.base_url))?;
        let login_url = base_url
            .join(&env.pma_path)
            .with_context(|| format!("couldn't join PMA_PATH onto BASE_URL: {}", env.pma_path))?;

        Ok(Self {
            login_url,
            credentials: Credentials { username, password },
            database: env.pma_database.unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            table: env.pma_table.unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            debug_page_path: PathBuf::from(
                env.pma_debug_page
                    .unwrap_or_else(|| DEFAULT_DEBUG_PAGE.to_string()),
            ),
        })
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
