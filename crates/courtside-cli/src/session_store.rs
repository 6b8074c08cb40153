//! Session persistence for the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use courtside::{ApiConfig, Session, UserId};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    user_id: String,
    access_token: String,
    refresh_token: Option<String>,
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "courtside").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save a session to disk.
pub async fn save(session: &Session) -> Result<()> {
    let Some(access_token) = session.export_access_token().await else {
        anyhow::bail!("session holds no tokens");
    };

    let stored = StoredSession {
        user_id: session.user_id().to_string(),
        access_token,
        refresh_token: session.export_refresh_token().await,
    };

    write_stored(&session_path()?, &stored)
}

fn write_stored(path: &Path, stored: &StoredSession) -> Result<()> {
    let json = serde_json::to_string_pretty(stored)?;

    fs::write(path, &json).context("Failed to write session file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

fn read_stored(path: &Path) -> Result<StoredSession> {
    let json = fs::read_to_string(path).context("Failed to read session file")?;
    serde_json::from_str(&json).context("Invalid session file")
}

/// Load a session from disk, refreshing the token pair best-effort.
pub async fn load(config: &ApiConfig) -> Result<Option<Session>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let StoredSession {
        user_id,
        access_token,
        refresh_token,
    } = read_stored(&path)?;

    let user_id = UserId::new(user_id).context("Invalid user id in session file")?;
    let session = Session::from_persisted(config, user_id, access_token, refresh_token);

    match session.refresh().await {
        Ok(_) => {
            // Persist the rotated pair so the next run starts fresh.
            let _ = save(&session).await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to refresh session, using existing tokens");
        }
    }

    Ok(Some(session))
}

/// Clear the stored session.
pub fn clear() -> Result<()> {
    let path = session_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
    }

    Ok(())
}
