use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::bar::BarConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BarKind {
    #[default]
    Men,
    Women,
}

impl BarKind {
    #[must_use]
    pub fn config(&self) -> &'static BarConfig {
        match self {
            BarKind::Men => &BarConfig::MEN,
            BarKind::Women => &BarConfig::WOMEN,
        }
    }
}

impl Display for BarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BarKind::Men => write!(f, "MEN"),
            BarKind::Women => write!(f, "WOMEN"),
        }
    }
}

impl FromStr for BarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" | "men" => Ok(BarKind::Men),
            "w" | "women" => Ok(BarKind::Women),
            _ => Err("Invalid bar kind.".to_string()),
        }
    }
}
