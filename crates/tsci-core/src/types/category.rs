//! Component categories.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Electrical type of a component.
///
/// Variant order is significant: classification walks `ComponentCategory::ALL`
/// front to back and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    Resistor,
    Capacitor,
    Inductor,
    Diode,
    Transistor,
    Ic,
    Connector,
    Led,
    Switch,
    Sensor,
    Crystal,
    Relay,
    Transformer,
    Fuse,
    Battery,
    Motor,
    Display,
    Antenna,
    Other,
}

impl ComponentCategory {
    /// Every category in classification order, `Other` last
    pub const ALL: [ComponentCategory; 19] = [
        ComponentCategory::Resistor,
        ComponentCategory::Capacitor,
        ComponentCategory::Inductor,
        ComponentCategory::Diode,
        ComponentCategory::Transistor,
        ComponentCategory::Ic,
        ComponentCategory::Connector,
        ComponentCategory::Led,
        ComponentCategory::Switch,
        ComponentCategory::Sensor,
        ComponentCategory::Crystal,
        ComponentCategory::Relay,
        ComponentCategory::Transformer,
        ComponentCategory::Fuse,
        ComponentCategory::Battery,
        ComponentCategory::Motor,
        ComponentCategory::Display,
        ComponentCategory::Antenna,
        ComponentCategory::Other,
    ];

    /// Lower-case token used for matching and serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCategory::Resistor => "resistor",
            ComponentCategory::Capacitor => "capacitor",
            ComponentCategory::Inductor => "inductor",
            ComponentCategory::Diode => "diode",
            ComponentCategory::Transistor => "transistor",
            ComponentCategory::Ic => "ic",
            ComponentCategory::Connector => "connector",
            ComponentCategory::Led => "led",
            ComponentCategory::Switch => "switch",
            ComponentCategory::Sensor => "sensor",
            ComponentCategory::Crystal => "crystal",
            ComponentCategory::Relay => "relay",
            ComponentCategory::Transformer => "transformer",
            ComponentCategory::Fuse => "fuse",
            ComponentCategory::Battery => "battery",
            ComponentCategory::Motor => "motor",
            ComponentCategory::Display => "display",
            ComponentCategory::Antenna => "antenna",
            ComponentCategory::Other => "other",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown component category '{}'", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for ComponentCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
