use super::*;

impl RemoteClient {
    pub fn profile(&self) -> Result<Profile> {
        let resp = self
            .client
            .get(self.url("/api/auth/profile"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .context("get profile")?;
        let out: ProfileResponse = self
            .ensure_ok(resp, "get profile")?
            .json()
            .context("parse profile")?;
        Ok(Profile { name: out.name })
    }
}
