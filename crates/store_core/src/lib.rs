//! Session/store bootstrap for Driftline clients.
//!
//! [`AppStore::initialize`] is the one entry point: it loads any saved
//! credentials, exchanges them for a live session, fetches the initial data
//! the UI needs on first paint, and returns the assembled store. Callers only
//! depend on the factory's success or failure; the individual steps are not
//! part of the contract.

use std::{path::PathBuf, sync::Arc};

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;
use url::Url;

use shared::{
    error::ApiError,
    protocol::{CommunitySummary, FeedPage, ProfilePayload, SessionRequest, SessionResponse},
};

mod credentials;

pub use credentials::{load_saved_credentials, save_credentials, SavedCredentials};

const INITIAL_FEED_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the Driftline server, without a trailing slash.
    pub server_url: String,
    /// Per-user directory holding the credentials file.
    pub data_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StoreInitError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    #[error("could not load saved credentials: {reason}")]
    Credentials { reason: String },
    #[error("session exchange failed: {reason}")]
    SessionExchange { reason: String },
    #[error("initial data load failed: {reason}")]
    DataLoad { reason: String },
}

/// Session established during bootstrap. Anonymous sessions can browse
/// public content; authenticated ones carry the bearer token for the rest of
/// the app's lifetime.
#[derive(Debug, Clone)]
pub enum Session {
    Anonymous,
    Authenticated {
        user_id: shared::domain::UserId,
        username: String,
        session_token: String,
    },
}

impl Session {
    pub fn bearer(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { session_token, .. } => Some(session_token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Fully initialized application state: the session plus the data fetched
/// during bootstrap. Built once by [`AppStore::initialize`] and shared by
/// reference for the rest of the run.
#[derive(Debug)]
pub struct AppStore {
    session: Session,
    profile: Option<ProfilePayload>,
    communities: Vec<CommunitySummary>,
    feed: FeedPage,
}

impl AppStore {
    pub fn new(
        session: Session,
        profile: Option<ProfilePayload>,
        communities: Vec<CommunitySummary>,
        feed: FeedPage,
    ) -> Self {
        Self {
            session,
            profile,
            communities,
            feed,
        }
    }

    /// Credential/session bootstrap plus initial data load.
    pub async fn initialize(config: StoreConfig) -> Result<Arc<Self>, StoreInitError> {
        let server_url = normalize_server_url(&config.server_url)?;
        let http = Client::new();

        let session = match load_saved_credentials(&config.data_dir)? {
            Some(saved) => {
                info!(device_id = %saved.device_id.0, "exchanging saved credentials for a session");
                exchange_session(&http, &server_url, &saved).await?
            }
            None => {
                info!("no saved credentials; starting an anonymous session");
                Session::Anonymous
            }
        };

        let store = fetch_initial_data(&http, &server_url, session).await?;
        info!(
            communities = store.communities.len(),
            posts = store.feed.posts.len(),
            authenticated = store.session.is_authenticated(),
            "store initialized"
        );
        Ok(Arc::new(store))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn profile(&self) -> Option<&ProfilePayload> {
        self.profile.as_ref()
    }

    pub fn communities(&self) -> &[CommunitySummary] {
        &self.communities
    }

    pub fn feed(&self) -> &FeedPage {
        &self.feed
    }
}

fn normalize_server_url(raw: &str) -> Result<String, StoreInitError> {
    let parsed = Url::parse(raw).map_err(|err| StoreInitError::InvalidServerUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(StoreInitError::InvalidServerUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}

async fn exchange_session(
    http: &Client,
    server_url: &str,
    saved: &SavedCredentials,
) -> Result<Session, StoreInitError> {
    let response = http
        .post(format!("{server_url}/session"))
        .json(&SessionRequest {
            refresh_token: saved.refresh_token.clone(),
            device_id: saved.device_id,
        })
        .send()
        .await
        .map_err(|err| StoreInitError::SessionExchange {
            reason: format!("failed to reach session endpoint: {err}"),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        // Prefer the server's own message when the body carries the standard
        // error envelope.
        let reason = ApiError::decode(&body)
            .map(|api_err| api_err.message)
            .unwrap_or_else(|| format!("session endpoint returned {status}"));
        return Err(StoreInitError::SessionExchange { reason });
    }

    let body: SessionResponse =
        response
            .json()
            .await
            .map_err(|err| StoreInitError::SessionExchange {
                reason: format!("invalid session response payload: {err}"),
            })?;

    Ok(Session::Authenticated {
        user_id: body.user_id,
        username: body.username,
        session_token: body.session_token,
    })
}

async fn fetch_initial_data(
    http: &Client,
    server_url: &str,
    session: Session,
) -> Result<AppStore, StoreInitError> {
    let communities_fut =
        get_json::<Vec<CommunitySummary>>(http, server_url, "communities", session.bearer(), &[]);
    let feed_fut = get_json::<FeedPage>(
        http,
        server_url,
        "feed",
        session.bearer(),
        &[("limit", INITIAL_FEED_LIMIT)],
    );
    let profile_fut = async {
        match session.bearer() {
            Some(bearer) => get_json::<ProfilePayload>(http, server_url, "me", Some(bearer), &[])
                .await
                .map(Some),
            None => Ok(None),
        }
    };

    let (communities, feed, profile) =
        futures::try_join!(communities_fut, feed_fut, profile_fut)?;

    Ok(AppStore::new(session, profile, communities, feed))
}

async fn get_json<T: DeserializeOwned>(
    http: &Client,
    server_url: &str,
    path: &str,
    bearer: Option<&str>,
    query: &[(&str, u32)],
) -> Result<T, StoreInitError> {
    let mut request = http.get(format!("{server_url}/{path}"));
    if !query.is_empty() {
        request = request.query(query);
    }
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .map_err(|err| StoreInitError::DataLoad {
            reason: format!("request to '/{path}' failed: {err}"),
        })?
        .error_for_status()
        .map_err(|err| StoreInitError::DataLoad {
            reason: format!("'/{path}' returned error: {err}"),
        })?;

    response.json().await.map_err(|err| StoreInitError::DataLoad {
        reason: format!("invalid '/{path}' payload: {err}"),
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
