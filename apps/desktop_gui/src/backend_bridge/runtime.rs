//! Bootstrap worker: launches the liveness probe and the store
//! initialization concurrently and reports each completion to the UI thread
//! exactly once.

use std::thread;

use crossbeam_channel::Sender;
use store_core::{AppStore, StoreConfig};

use crate::controller::events::{format_store_failure, BootstrapEvent, SERVER_DOWN_MESSAGE};
use crate::settings::Settings;

/// Spawns the worker thread owning the tokio runtime. If the runtime itself
/// cannot be built, that is reported through the same event channel so the
/// gate degrades instead of spinning forever.
pub fn spawn_bootstrap_thread(settings: Settings, events: Sender<BootstrapEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build bootstrap runtime: {err}");
                let _ = events.try_send(BootstrapEvent::StoreFailed(format_store_failure(
                    &format!("failed to build bootstrap runtime: {err}"),
                )));
                return;
            }
        };

        runtime.block_on(run_bootstrap(settings, events));
    });
}

/// Both tasks launch without ordering; each wrapper awaits its task's join
/// handle and posts the completion event on every path, panic included.
/// Posting to a disconnected channel (UI already torn down) is a no-op.
async fn run_bootstrap(settings: Settings, events: Sender<BootstrapEvent>) {
    let http = reqwest::Client::new();

    let liveness = {
        let events = events.clone();
        let http = http.clone();
        let server_url = settings.server_url.clone();
        async move {
            let handle = tokio::spawn(async move { probe_server(&http, &server_url).await });
            let event = match handle.await {
                Ok(Ok(())) => BootstrapEvent::LivenessPassed,
                Ok(Err(reason)) => {
                    tracing::warn!("liveness probe failed: {reason}");
                    BootstrapEvent::LivenessFailed(SERVER_DOWN_MESSAGE.to_string())
                }
                Err(err) => {
                    tracing::error!("liveness probe aborted: {err}");
                    BootstrapEvent::LivenessFailed(SERVER_DOWN_MESSAGE.to_string())
                }
            };
            let _ = events.try_send(event);
        }
    };

    let store_init = {
        let events = events.clone();
        let config = StoreConfig {
            server_url: settings.server_url.clone(),
            data_dir: settings.data_dir.clone(),
        };
        async move {
            let handle = tokio::spawn(AppStore::initialize(config));
            let event = match handle.await {
                Ok(Ok(store)) => BootstrapEvent::StoreReady(store),
                Ok(Err(err)) => {
                    tracing::error!("store initialization failed: {err}");
                    BootstrapEvent::StoreFailed(format_store_failure(&err))
                }
                Err(err) => {
                    tracing::error!("store initialization aborted: {err}");
                    BootstrapEvent::StoreFailed(format_store_failure(&err))
                }
            };
            let _ = events.try_send(event);
        }
    };

    tokio::join!(liveness, store_init);
}

/// One GET to the well-known health path. Any transport error or non-2xx
/// response is a failure; no retry and no timeout live here.
async fn probe_server(http: &reqwest::Client, server_url: &str) -> Result<(), String> {
    let response = http
        .get(format!("{server_url}/healthz"))
        .send()
        .await
        .map_err(|err| format!("failed to reach {server_url}/healthz: {err}"))?;
    response
        .error_for_status()
        .map(|_| ())
        .map_err(|err| format!("health endpoint returned error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::gate::{BootstrapGate, RenderDecision};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use crossbeam_channel::bounded;
    use std::{
        env, fs,
        path::PathBuf,
        time::{Duration, SystemTime, UNIX_EPOCH},
    };
    use tokio::net::TcpListener;

    async fn spawn_server(healthy: bool) -> String {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let app = Router::new()
            .route(
                "/healthz",
                get(move || async move {
                    if healthy {
                        Ok("ok")
                    } else {
                        Err(StatusCode::SERVICE_UNAVAILABLE)
                    }
                }),
            )
            .route(
                "/communities",
                get(|| async { Json(Vec::<shared::protocol::CommunitySummary>::new()) }),
            )
            .route(
                "/feed",
                get(|| async {
                    Json(shared::protocol::FeedPage {
                        posts: Vec::new(),
                        next_before: None,
                    })
                }),
            );
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn temp_data_dir(tag: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = env::temp_dir().join(format!("driftline_bootstrap_test_{tag}_{suffix}"));
        fs::create_dir_all(&dir).expect("temp dir");
        dir
    }

    #[tokio::test]
    async fn probe_succeeds_against_healthy_server() {
        let server_url = spawn_server(true).await;
        let http = reqwest::Client::new();
        assert!(probe_server(&http, &server_url).await.is_ok());
    }

    #[tokio::test]
    async fn probe_fails_on_non_success_status() {
        let server_url = spawn_server(false).await;
        let http = reqwest::Client::new();
        let reason = probe_server(&http, &server_url).await.expect_err("unhealthy");
        assert!(reason.contains("health endpoint returned error"));
    }

    #[tokio::test]
    async fn probe_fails_when_server_is_unreachable() {
        let http = reqwest::Client::new();
        // Bind-then-drop leaves a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        let reason = probe_server(&http, &format!("http://{addr}"))
            .await
            .expect_err("unreachable");
        assert!(reason.contains("failed to reach"));
    }

    #[tokio::test]
    async fn bootstrap_posts_both_completions_and_gate_reaches_ready() {
        let server_url = spawn_server(true).await;
        let data_dir = temp_data_dir("ready");
        let (event_tx, event_rx) = bounded(16);

        run_bootstrap(
            Settings {
                server_url,
                data_dir: data_dir.clone(),
            },
            event_tx,
        )
        .await;

        let mut gate = BootstrapGate::new();
        for _ in 0..2 {
            let event = event_rx
                .recv_timeout(Duration::from_secs(5))
                .expect("completion event");
            gate.apply(event);
        }
        assert!(matches!(gate.decision(), RenderDecision::Ready(_)));

        fs::remove_dir_all(data_dir).expect("cleanup");
    }

    #[tokio::test]
    async fn bootstrap_degrades_with_fixed_message_when_server_is_down() {
        // Unreachable address: both the probe and the store bootstrap fail.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        let data_dir = temp_data_dir("down");
        let (event_tx, event_rx) = bounded(16);

        run_bootstrap(
            Settings {
                server_url: format!("http://{addr}"),
                data_dir: data_dir.clone(),
            },
            event_tx,
        )
        .await;

        let mut gate = BootstrapGate::new();
        for _ in 0..2 {
            gate.apply(event_rx.recv_timeout(Duration::from_secs(5)).expect("event"));
        }
        match gate.decision() {
            RenderDecision::Error(message) => assert_eq!(message, SERVER_DOWN_MESSAGE),
            _ => panic!("expected degraded state"),
        }

        fs::remove_dir_all(data_dir).expect("cleanup");
    }

    #[tokio::test]
    async fn dropped_receiver_makes_completion_posts_a_no_op() {
        let server_url = spawn_server(true).await;
        let data_dir = temp_data_dir("teardown");
        let (event_tx, event_rx) = bounded(16);
        drop(event_rx);

        // Must finish without panicking even though nobody is listening.
        run_bootstrap(
            Settings {
                server_url,
                data_dir: data_dir.clone(),
            },
            event_tx,
        )
        .await;

        fs::remove_dir_all(data_dir).expect("cleanup");
    }
}
