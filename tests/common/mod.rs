//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;
use std::sync::Arc;

use pageshell::config::{AnimationConfig, Config, ConfigStore};
use pageshell::dom::{Document, Platform, ViewNode};
use pageshell::router::{Page, RouteContext};
use pageshell::App;
use parking_lot::Mutex;
use tempfile::TempDir;

/// Animation config with short transitions, so tests finish quickly while
/// still going through real completion events.
pub fn fast_animation() -> AnimationConfig {
    AnimationConfig {
        duration_ms: 20,
        settle_timeout_ms: 2_000,
        ..AnimationConfig::default()
    }
}

pub fn animated_config() -> Config {
    Config {
        animation: fast_animation(),
        ..Config::default()
    }
}

pub fn static_config() -> Config {
    let mut config = Config::default();
    config.animation.enabled = false;
    config
}

/// Build the demo app. Must run inside a tokio runtime.
pub fn app(config: Config) -> App {
    App::new(ConfigStore::new(config, PathBuf::from("pageshell-test.toml")))
        .expect("demo app builds")
}

/// Build the demo app on a host without transition events.
pub fn app_without_transitions(config: Config) -> App {
    App::with_platform(
        ConfigStore::new(config, PathBuf::from("pageshell-test.toml")),
        Platform::without_transitions(),
    )
    .expect("demo app builds")
}

/// Write `content` to a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Page whose view is a single text line; records every activation.
pub struct RecordingPage {
    pub label: &'static str,
    pub activations: Arc<Mutex<Vec<RouteContext>>>,
}

impl RecordingPage {
    pub fn new(label: &'static str) -> (Self, Arc<Mutex<Vec<RouteContext>>>) {
        let activations = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                label,
                activations: Arc::clone(&activations),
            },
            activations,
        )
    }
}

impl Page for RecordingPage {
    type Controller = ();

    fn view(&self, _controller: Option<&()>, context: &RouteContext) -> ViewNode {
        self.activations.lock().push(context.clone());
        ViewNode::new("div").with_class("m-page").with_text(self.label)
    }
}
