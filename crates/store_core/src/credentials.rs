//! Saved-credential storage consumed by the session bootstrap step.
//!
//! Credentials live in a single JSON file inside the per-user data
//! directory. A missing file means the user never signed in on this
//! installation; an unreadable or malformed file is an initialization error
//! rather than a silent fallback to anonymous browsing.

use std::{fs, io, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared::domain::DeviceId;

use crate::StoreInitError;

pub const CREDENTIALS_FILE: &str = "credentials.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCredentials {
    pub refresh_token: String,
    pub device_id: DeviceId,
    pub saved_at: DateTime<Utc>,
}

impl SavedCredentials {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
            device_id: DeviceId::generate(),
            saved_at: Utc::now(),
        }
    }
}

pub fn load_saved_credentials(
    data_dir: &Path,
) -> Result<Option<SavedCredentials>, StoreInitError> {
    let path = data_dir.join(CREDENTIALS_FILE);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(StoreInitError::Credentials {
                reason: format!("could not read '{}': {err}", path.display()),
            })
        }
    };

    let saved = serde_json::from_str(&raw).map_err(|err| StoreInitError::Credentials {
        reason: format!("malformed credentials file '{}': {err}", path.display()),
    })?;
    Ok(Some(saved))
}

pub fn save_credentials(
    data_dir: &Path,
    credentials: &SavedCredentials,
) -> Result<(), StoreInitError> {
    fs::create_dir_all(data_dir).map_err(|err| StoreInitError::Credentials {
        reason: format!(
            "could not prepare data directory '{}': {err}",
            data_dir.display()
        ),
    })?;

    let path = data_dir.join(CREDENTIALS_FILE);
    let serialized =
        serde_json::to_string_pretty(credentials).map_err(|err| StoreInitError::Credentials {
            reason: format!("could not serialize credentials: {err}"),
        })?;
    fs::write(&path, serialized).map_err(|err| StoreInitError::Credentials {
        reason: format!("could not write '{}': {err}", path.display()),
    })
}
