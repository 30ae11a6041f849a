use super::*;

/// The backend's own explanation for a rejected request, surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ServerMessage(pub String);

pub(super) fn server_message(v: &serde_json::Value) -> Option<String> {
    v.get("message")
        .or_else(|| v.get("error"))
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

impl RemoteClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            anyhow::bail!(
                "unauthorized (token invalid/expired; run `courtcart login --url ... --token ...`)"
            );
        }
        if resp.status() == reqwest::StatusCode::FORBIDDEN {
            anyhow::bail!("forbidden (this account may not use the cart)");
        }
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    /// Like `ensure_ok`, but a JSON `message` in an error body wins over the
    /// generic status text so the user sees what the backend said.
    pub(super) fn ensure_mutation_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        if let Ok(v) = serde_json::from_str::<serde_json::Value>(&body)
            && let Some(msg) = server_message(&v)
        {
            return Err(anyhow::Error::new(ServerMessage(msg)).context(format!(
                "{} status {}",
                label,
                status.as_u16()
            )));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            anyhow::bail!(
                "unauthorized (token invalid/expired; run `courtcart login --url ... --token ...`)"
            );
        }
        anyhow::bail!("{} status {}", label, status)
    }

    pub(super) fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.remote.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
