use courtcart::model::RemoteConfig;

use super::*;

pub(super) fn handle_login_command(url: String, token: String, force: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("get current dir")?;
    let store = if force {
        LocalStore::init(&cwd, true)?
    } else {
        match LocalStore::discover(&cwd) {
            Ok(store) => store,
            Err(_) => LocalStore::init(&cwd, false)?,
        }
    };

    let base_url = url.trim_end_matches('/').to_string();
    let mut cfg = store.read_config()?;
    cfg.remote = Some(RemoteConfig {
        base_url: base_url.clone(),
    });
    store.write_config(&cfg)?;
    store
        .set_token(&token)
        .context("store token in state.json")?;
    println!("Logged in to {} ({})", base_url, store.path().display());
    Ok(())
}

pub(super) fn handle_whoami_command(client: &RemoteClient, json: bool) -> Result<()> {
    let profile = client.profile()?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&profile).context("serialize profile json")?
        );
    } else {
        println!("name: {}", profile.name);
        println!("remote: {}", client.remote().base_url);
    }
    Ok(())
}
