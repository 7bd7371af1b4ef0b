//! Keyboard triggers
//!
//! The input layer turns key presses into discrete `Trigger`s. Each press is
//! one edge-triggered event; the session processes them in arrival order.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A one-shot game action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// Throw the dart in hand (or pull it back if already thrown)
    ThrowDart,
    /// Pick up the next dart
    NextDart,
    /// Throw the basketball (or pull it back if already thrown)
    ThrowBasketball,
    /// Switch to the basketball toss
    BasketballMode,
    PowerUp,
    PowerDown,
}

/// Key bindings, by key name as the platform reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keymap {
    pub throw_dart: String,
    pub next_dart: String,
    pub throw_basketball: String,
    pub basketball_mode: String,
    pub power_up: String,
    pub power_down: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            throw_dart: "t".to_string(),
            next_dart: "x".to_string(),
            throw_basketball: "b".to_string(),
            basketball_mode: "n".to_string(),
            power_up: "=".to_string(),
            power_down: "-".to_string(),
        }
    }
}

impl Keymap {
    fn bindings(&self) -> [(&str, Trigger); 6] {
        [
            (self.throw_dart.as_str(), Trigger::ThrowDart),
            (self.next_dart.as_str(), Trigger::NextDart),
            (self.throw_basketball.as_str(), Trigger::ThrowBasketball),
            (self.basketball_mode.as_str(), Trigger::BasketballMode),
            (self.power_up.as_str(), Trigger::PowerUp),
            (self.power_down.as_str(), Trigger::PowerDown),
        ]
    }

    /// Trigger bound to `key` (case-insensitive), if any
    pub fn trigger_for(&self, key: &str) -> Option<Trigger> {
        self.bindings()
            .into_iter()
            .find(|(bound, _)| bound.eq_ignore_ascii_case(key))
            .map(|(_, trigger)| trigger)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            "throw_dart",
            "next_dart",
            "throw_basketball",
            "basketball_mode",
            "power_up",
            "power_down",
        ];
        for ((key, _), name) in self.bindings().into_iter().zip(names) {
            if key.trim().is_empty() {
                return Err(ConfigError::EmptyKey(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = Keymap::default();
        assert_eq!(keys.trigger_for("t"), Some(Trigger::ThrowDart));
        assert_eq!(keys.trigger_for("x"), Some(Trigger::NextDart));
        assert_eq!(keys.trigger_for("b"), Some(Trigger::ThrowBasketball));
        assert_eq!(keys.trigger_for("n"), Some(Trigger::BasketballMode));
        assert_eq!(keys.trigger_for("="), Some(Trigger::PowerUp));
        assert_eq!(keys.trigger_for("-"), Some(Trigger::PowerDown));
        assert_eq!(keys.trigger_for("q"), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(Keymap::default().trigger_for("T"), Some(Trigger::ThrowDart));
    }

    #[test]
    fn test_remap() {
        let keys = Keymap {
            throw_dart: "Space".to_string(),
            ..Default::default()
        };
        assert_eq!(keys.trigger_for("space"), Some(Trigger::ThrowDart));
        assert_eq!(keys.trigger_for("t"), None);
    }

    #[test]
    fn test_empty_binding_rejected() {
        let keys = Keymap {
            power_up: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(keys.validate(), Err(ConfigError::EmptyKey("power_up"))));
        assert!(Keymap::default().validate().is_ok());
    }
}
