use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{ClientConfig, ClientState, RemoteConfig};

const STORE_DIR: &str = ".courtcart";

/// On-disk client configuration: `config.json` for settings and
/// `state.json` for the bearer credential.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn store_dir(root: &Path) -> PathBuf {
        root.join(STORE_DIR)
    }

    pub fn open(root: &Path) -> Result<Self> {
        let dir = Self::store_dir(root);
        if !dir.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `courtcart login`)",
                STORE_DIR,
                dir.display()
            ));
        }
        Ok(Self { root: dir })
    }

    /// Walks up from `start` to the nearest directory holding `.courtcart`.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("canonicalize {}", start.display()))?;
        for dir in start.ancestors() {
            if Self::store_dir(dir).is_dir() {
                return Self::open(dir);
            }
        }
        Err(anyhow!(
            "No {} directory found (run `courtcart login`)",
            STORE_DIR
        ))
    }

    pub fn init(root: &Path, force: bool) -> Result<Self> {
        let dir = Self::store_dir(root);
        if dir.exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                STORE_DIR,
                dir.display()
            ));
        }
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

        let store = Self { root: dir };
        store.write_config(&ClientConfig::default())?;
        store.write_state(&ClientState {
            version: 1,
            token: None,
        })?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<ClientConfig> {
        let bytes = fs::read(self.root.join("config.json")).context("read config.json")?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ClientConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<ClientState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(ClientState {
                version: 1,
                token: None,
            });
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let state: ClientState = serde_json::from_slice(&bytes).context("parse state.json")?;
        Ok(state)
    }

    pub fn write_state(&self, state: &ClientState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(state).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.read_state()?.token)
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        let mut state = self.read_state()?;
        state.version = state.version.max(1);
        state.token = Some(token.to_string());
        self.write_state(&state)
    }

    /// Remote settings and token, both required before talking to the backend.
    pub fn remote_and_token(&self) -> Result<(RemoteConfig, String)> {
        let cfg = self.read_config()?;
        let remote = cfg
            .remote
            .context("no remote configured (run `courtcart login --url ... --token ...`)")?;
        let token = self
            .token()?
            .context("no token configured (run `courtcart login --url ... --token ...`)")?;
        Ok((remote, token))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store/local_store_tests.rs"]
mod tests;
