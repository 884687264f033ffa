use std::collections::HashMap;
use std::time::Duration;

use crate::config::AnimationConfig;

/// Transition durations triggered by toggling a class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    durations: HashMap<String, Duration>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transition(mut self, class: impl Into<String>, duration: Duration) -> Self {
        self.durations.insert(class.into(), duration);
        self
    }

    /// Longest transition started by a change to any of `classes`. Zero
    /// when none of them carries a transition.
    pub fn duration_for<'a>(&self, classes: impl IntoIterator<Item = &'a str>) -> Duration {
        classes
            .into_iter()
            .filter_map(|class| self.durations.get(class))
            .copied()
            .max()
            .unwrap_or(Duration::ZERO)
    }
}

/// Host capabilities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Platform {
    transition_event: Option<String>,
    stylesheet: Stylesheet,
}

impl Platform {
    pub fn new(transition_event: Option<String>, stylesheet: Stylesheet) -> Self {
        Self {
            transition_event,
            stylesheet,
        }
    }

    /// A host without transition events.
    pub fn without_transitions() -> Self {
        Self::default()
    }

    /// Host described by the animation config: both state classes
    /// transition for `duration_ms`. A disabled animation config yields a
    /// host without transition events.
    pub fn from_config(config: &AnimationConfig) -> Self {
        if !config.enabled {
            return Self::without_transitions();
        }
        let stylesheet = Stylesheet::new()
            .with_transition(config.in_class.clone(), config.duration())
            .with_transition(config.out_class.clone(), config.duration());
        Self::new(config.transition_event.clone(), stylesheet)
    }

    /// Name of the transition-completion event, if the host has one.
    pub fn transition_event(&self) -> Option<&str> {
        self.transition_event.as_deref()
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_longest_matching_rule() {
        let sheet = Stylesheet::new()
            .with_transition("a", Duration::from_millis(10))
            .with_transition("b", Duration::from_millis(40));
        assert_eq!(sheet.duration_for(["a", "b", "c"]), Duration::from_millis(40));
        assert_eq!(sheet.duration_for(["c"]), Duration::ZERO);
    }

    #[test]
    fn disabled_config_has_no_transition_event() {
        let config = AnimationConfig {
            enabled: false,
            ..AnimationConfig::default()
        };
        assert_eq!(Platform::from_config(&config).transition_event(), None);
    }

    #[test]
    fn config_maps_both_classes() {
        let platform = Platform::from_config(&AnimationConfig::default());
        assert_eq!(platform.transition_event(), Some("transitionend"));
        assert_eq!(
            platform.stylesheet().duration_for(["page-out"]),
            Duration::from_millis(300)
        );
    }
}
