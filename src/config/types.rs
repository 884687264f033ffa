use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// How locations are read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Routes live in the fragment: `#/dashboard/alice`.
    #[default]
    Hash,
    /// Routes are plain paths: `/dashboard/alice`.
    Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub mode: NavigationMode,
    /// Path activated when nothing else matches (default: "/dashboard").
    #[serde(default = "default_route")]
    pub default_route: String,
    /// Name of the mount point views are rendered into (default: "m-view").
    #[serde(default = "default_mount")]
    pub mount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Master switch. When false the animator is a pass-through.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Transition-completion event exposed by the host. `None` means the
    /// host has no transition events and views swap without animation.
    #[serde(default = "default_transition_event")]
    pub transition_event: Option<String>,
    /// Class marking a view that is about to enter (default: "page-in").
    #[serde(default = "default_in_class")]
    pub in_class: String,
    /// Class marking a view that is leaving (default: "page-out").
    #[serde(default = "default_out_class")]
    pub out_class: String,
    /// Stylesheet transition duration for both state classes (default: 300).
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Upper bound on waiting for a completion event before a transition is
    /// force-settled and reported as degraded (default: 1000).
    #[serde(default = "default_settle_timeout_ms")]
    pub settle_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Simulated transport latency. 0 still resolves through a timer.
    #[serde(default)]
    pub latency_ms: u64,
}

fn default_route() -> String {
    "/dashboard".to_string()
}

fn default_mount() -> String {
    "m-view".to_string()
}

fn default_true() -> bool {
    true
}

fn default_transition_event() -> Option<String> {
    Some("transitionend".to_string())
}

fn default_in_class() -> String {
    "page-in".to_string()
}

fn default_out_class() -> String {
    "page-out".to_string()
}

fn default_duration_ms() -> u64 {
    300
}

fn default_settle_timeout_ms() -> u64 {
    1000
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settle_timeout_ms)
    }
}

impl GatewayConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            mode: NavigationMode::default(),
            default_route: default_route(),
            mount: default_mount(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            transition_event: default_transition_event(),
            in_class: default_in_class(),
            out_class: default_out_class(),
            duration_ms: default_duration_ms(),
            settle_timeout_ms: default_settle_timeout_ms(),
        }
    }
}
