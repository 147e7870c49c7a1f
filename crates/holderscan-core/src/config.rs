use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, security::ALLOWED_CHAT_IDS, Result};

pub const DEFAULT_DUNE_API_URL: &str = "https://api.dune.com/api/v1";

/// Typed configuration, loaded once at startup and read-only afterwards.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub dune_api_key: String,
    /// Id of the pre-registered holder-overlap query.
    pub dune_query_id: u64,
    pub dune_api_url: String,
    pub dune_poll_interval: Duration,
    pub allowed_chats: Vec<i64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        // Required env vars
        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let dune_api_key = env_str("DUNE_API_KEY").unwrap_or_default();
        if dune_api_key.trim().is_empty() {
            return Err(Error::Config(
                "DUNE_API_KEY environment variable is required".to_string(),
            ));
        }

        let dune_query_id = env_str("DUNE_QUERY_ID")
            .ok_or_else(|| {
                Error::Config("DUNE_QUERY_ID environment variable is required".to_string())
            })?
            .trim()
            .parse::<u64>()
            .map_err(|_| {
                Error::Config("DUNE_QUERY_ID must be a numeric query id".to_string())
            })?;

        let dune_api_url = env_str("DUNE_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_DUNE_API_URL.to_string());

        let dune_poll_interval =
            Duration::from_millis(env_u64("DUNE_POLL_INTERVAL_MS").unwrap_or(1_000));

        Ok(Self {
            telegram_bot_token,
            dune_api_key,
            dune_query_id,
            dune_api_url,
            dune_poll_interval,
            allowed_chats: ALLOWED_CHAT_IDS.to_vec(),
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotenv_loads_without_overriding_existing_env() {
        let pid = std::process::id();
        let fresh_key = format!("HOLDERSCAN_TEST_FRESH_{pid}");
        let taken_key = format!("HOLDERSCAN_TEST_TAKEN_{pid}");
        env::set_var(&taken_key, "from-env");

        let path = std::path::PathBuf::from(format!("/tmp/holderscan-dotenv-{pid}"));
        fs::write(
            &path,
            format!(
                "# comment\n{fresh_key}=\"quoted value\"\n{taken_key}=from-file\nBROKEN LINE\n"
            ),
        )
        .unwrap();

        load_dotenv_if_present(&path);

        assert_eq!(env::var(&fresh_key).unwrap(), "quoted value");
        assert_eq!(env::var(&taken_key).unwrap(), "from-env");

        env::remove_var(&fresh_key);
        env::remove_var(&taken_key);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn env_u64_rejects_garbage() {
        let pid = std::process::id();
        let key = format!("HOLDERSCAN_TEST_U64_{pid}");

        env::set_var(&key, " 1500 ");
        assert_eq!(env_u64(&key), Some(1500));

        env::set_var(&key, "soon");
        assert_eq!(env_u64(&key), None);

        env::remove_var(&key);
    }
}
