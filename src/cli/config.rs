use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::cli::OutputFormat;
use crate::client::{ApiClient, LocalStorage};
use crate::desk::{Desk, DeskStore, LocalStore, RemoteStore, Session};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Everything a command needs: where the API is, local storage, output mode
pub struct CliContext {
    pub api_url: String,
    pub output: OutputFormat,
    storage: Arc<Mutex<LocalStorage>>,
}

impl CliContext {
    pub fn load(
        api_url: Option<String>,
        storage_dir: Option<PathBuf>,
        output: OutputFormat,
    ) -> anyhow::Result<Self> {
        let dir = match storage_dir {
            Some(dir) => dir,
            None => get_config_dir()?,
        };
        let storage = LocalStorage::open(&dir)?;
        tracing::debug!("Using local storage at {}", storage.path().display());

        Ok(Self {
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            output,
            storage: Arc::new(Mutex::new(storage)),
        })
    }

    pub fn storage(&self) -> anyhow::Result<MutexGuard<'_, LocalStorage>> {
        self.storage
            .lock()
            .map_err(|_| anyhow::anyhow!("local storage lock poisoned"))
    }

    pub fn session(&self) -> anyhow::Result<Session> {
        Ok(Session::load(&*self.storage()?)?)
    }

    pub fn client(&self) -> anyhow::Result<ApiClient> {
        Ok(ApiClient::new(&self.api_url)?)
    }

    /// Pick the backing store for the current session
    pub fn store(&self) -> anyhow::Result<Box<dyn DeskStore>> {
        match self.session()? {
            Session::Authenticated { token, .. } => {
                Ok(Box::new(RemoteStore::new(self.client()?.with_token(token))))
            }
            Session::Guest { .. } => Ok(Box::new(LocalStore::new(self.storage.clone()))),
            Session::Anonymous => Err(anyhow::anyhow!(
                "Not signed in. Run 'desk login', 'desk register' or 'desk guest' first"
            )),
        }
    }

    pub async fn desk(&self) -> anyhow::Result<Desk> {
        Ok(Desk::open(self.store()?).await?)
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
    Ok(PathBuf::from(home).join(".config").join("digital-desk"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_has_no_store() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = CliContext::load(None, Some(dir.path().to_path_buf()), OutputFormat::Text).unwrap();

        assert_eq!(ctx.api_url, DEFAULT_API_URL);
        assert!(ctx.store().is_err());
    }

    #[test]
    fn guest_session_uses_local_store() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = CliContext::load(None, Some(dir.path().to_path_buf()), OutputFormat::Json).unwrap();
        Session::start_guest(&mut *ctx.storage().unwrap()).unwrap();

        assert!(ctx.session().unwrap().is_guest());
        assert!(ctx.store().is_ok());
    }
}
