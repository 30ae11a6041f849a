use super::*;

pub(super) fn discover_store() -> Result<LocalStore> {
    LocalStore::discover(&std::env::current_dir().context("get current dir")?)
}

pub(super) fn with_client<F>(f: F) -> Result<()>
where
    F: FnOnce(&RemoteClient) -> Result<()>,
{
    let store = discover_store()?;
    let (remote, token) = store.remote_and_token()?;
    let client = RemoteClient::new(remote, token)?;
    f(&client)
}
