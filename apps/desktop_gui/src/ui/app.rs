//! Gating app shell: applies bootstrap completion events to the gate and
//! renders whatever the current decision allows — the fallback screens
//! before readiness, the workspace plus the window-title side effect after.

use std::time::Duration;

use chrono::Local;
use crossbeam_channel::Receiver;
use eframe::egui;
use shared::protocol::PostSummary;
use store_core::{AppStore, Session};

use crate::controller::events::BootstrapEvent;
use crate::controller::gate::{BootstrapGate, RenderDecision};
use crate::ui::{doc_title, fallback};

const NAV_ENTRIES: [(&str, &str); 4] = [
    ("Dashboard", "/dashboard"),
    ("Communities", "/communities"),
    ("Your profile", "/profile"),
    ("Settings", "/settings"),
];

pub struct DesktopApp {
    gate: BootstrapGate,
    events: Receiver<BootstrapEvent>,
    route: String,
    applied_title: Option<String>,
}

impl DesktopApp {
    pub fn new(events: Receiver<BootstrapEvent>) -> Self {
        Self {
            gate: BootstrapGate::new(),
            events,
            route: "/dashboard".to_string(),
            applied_title: None,
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.gate.apply(event);
        }
    }

    /// Applies the route's title to the native window, skipping the viewport
    /// command entirely when the title is already current.
    fn sync_window_title(&mut self, ctx: &egui::Context) {
        if let Some(title) = next_title(&self.route, self.applied_title.as_deref()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.applied_title = Some(title);
        }
    }

    fn show_workspace(&mut self, ctx: &egui::Context, store: &AppStore) {
        egui::SidePanel::left("workspace_nav")
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading(doc_title::DEFAULT_TITLE);
                ui.separator();

                for (label, path) in NAV_ENTRIES {
                    if ui.selectable_label(self.route == path, label).clicked() {
                        self.route = path.to_string();
                    }
                }

                ui.separator();
                ui.small(session_caption(store.session()));
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.route.as_str() {
            "/dashboard" => show_dashboard(ui, store),
            "/communities" => show_communities(ui, store),
            "/profile" => show_profile(ui, store),
            "/settings" => {
                ui.heading("Settings");
                ui.weak("Nothing to configure yet.");
            }
            _ => {
                ui.weak("This page does not exist.");
            }
        });
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        match self.gate.decision() {
            RenderDecision::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| fallback::show_loading(ui));
                // Keep polling for completion events while undecided.
                ctx.request_repaint_after(Duration::from_millis(100));
            }
            RenderDecision::Error(message) => {
                egui::CentralPanel::default().show(ctx, |ui| fallback::show_error(ui, &message));
            }
            RenderDecision::Ready(store) => {
                self.show_workspace(ctx, &store);
                self.sync_window_title(ctx);
            }
        }
    }
}

fn next_title(route: &str, applied: Option<&str>) -> Option<String> {
    let title = doc_title::title_for_route(route);
    if applied == Some(title.as_str()) {
        None
    } else {
        Some(title)
    }
}

fn session_caption(session: &Session) -> String {
    match session {
        Session::Anonymous => "Browsing as guest".to_string(),
        Session::Authenticated { username, .. } => format!("Signed in as {username}"),
    }
}

fn post_header(post: &PostSummary) -> String {
    let author = post.author_username.as_deref().unwrap_or("someone");
    let posted_at = post.posted_at.with_timezone(&Local).format("%b %d, %H:%M");
    format!("{author} · {posted_at}")
}

fn show_dashboard(ui: &mut egui::Ui, store: &AppStore) {
    ui.heading("Dashboard");
    if store.feed().posts.is_empty() {
        ui.weak("Your feed is empty.");
        return;
    }
    egui::ScrollArea::vertical().show(ui, |ui| {
        for post in &store.feed().posts {
            ui.add_space(6.0);
            ui.small(egui::RichText::new(post_header(post)).weak());
            ui.label(&post.body);
            ui.separator();
        }
    });
}

fn show_communities(ui: &mut egui::Ui, store: &AppStore) {
    ui.heading("Communities");
    if store.communities().is_empty() {
        ui.weak("No communities yet.");
        return;
    }
    for community in store.communities() {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&community.name).strong());
            ui.weak(format!("{} members", community.member_count));
        });
    }
}

fn show_profile(ui: &mut egui::Ui, store: &AppStore) {
    ui.heading("Your profile");
    match store.profile() {
        Some(profile) => {
            let display_name = profile.display_name.as_deref().unwrap_or(&profile.username);
            ui.label(egui::RichText::new(display_name).strong());
            ui.weak(format!("@{}", profile.username));
        }
        None => {
            ui.weak("Sign in to see your profile.");
        }
    }
}
