//! Client settings: defaults, then an optional `driftline.toml`, then
//! environment overrides, then CLI flags. Later layers win.

use std::{collections::HashMap, env, fs, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8443".into(),
            data_dir: resolve_data_dir(),
        }
    }
}

pub fn load_settings(cli_server_url: Option<String>, cli_data_dir: Option<PathBuf>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("driftline.toml") {
        apply_file_overrides(&mut settings, &raw);
    }

    if let Ok(v) = env::var("DRIFTLINE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = env::var("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = env::var("DRIFTLINE_DATA_DIR") {
        settings.data_dir = PathBuf::from(v);
    }

    if let Some(v) = cli_server_url {
        settings.server_url = v;
    }
    if let Some(v) = cli_data_dir {
        settings.data_dir = v;
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
        if let Some(v) = file_cfg.get("data_dir") {
            settings.data_dir = PathBuf::from(v);
        }
    }
}

/// Per-user data directory holding the credentials file. Falls back to HOME
/// and finally the working directory so headless environments still start.
fn resolve_data_dir() -> PathBuf {
    if let Some(base) = dirs::data_local_dir() {
        return base.join("driftline");
    }
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return PathBuf::from(home).join(".driftline");
        }
    }
    PathBuf::from(".driftline")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_overrides_replace_defaults() {
        let mut settings = Settings::default();
        apply_file_overrides(
            &mut settings,
            "server_url = \"https://drift.example\"\ndata_dir = \"/tmp/drift\"\n",
        );
        assert_eq!(settings.server_url, "https://drift.example");
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/drift"));
    }

    #[test]
    fn malformed_file_is_ignored() {
        let mut settings = Settings::default();
        let default_url = settings.server_url.clone();
        apply_file_overrides(&mut settings, "server_url = [not toml");
        assert_eq!(settings.server_url, default_url);
    }

    #[test]
    fn cli_flags_win_over_defaults() {
        let settings = load_settings(
            Some("http://10.0.0.5:9000".to_string()),
            Some(PathBuf::from("/tmp/cli-drift")),
        );
        assert_eq!(settings.server_url, "http://10.0.0.5:9000");
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/cli-drift"));
    }
}
