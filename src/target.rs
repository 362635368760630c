use std::{fmt::Display, str::FromStr};

use thiserror::Error;

use crate::{bar_kind::BarKind, sync_state::SyncState, weight::Weight};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("Target \"{0}\" must be a weight followed by m or w, e.g. 100m.")]
    Malformed(String),
    #[error(transparent)]
    Weight(#[from] crate::weight::WeightError),
    #[error("{0}")]
    BarKind(String),
}

/// A total weight on a given bar, written `100m` or `82.5w`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    pub weight: Weight,
    pub bar_kind: BarKind,
}

impl Target {
    pub fn new(weight: Weight, bar_kind: BarKind) -> Self {
        Target { weight, bar_kind }
    }
}

impl From<Target> for SyncState {
    fn from(target: Target) -> Self {
        SyncState::new(target.weight, target.bar_kind)
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}kg {}", self.weight, self.bar_kind)
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(split) = s.len().checked_sub(1).filter(|i| s.is_char_boundary(*i)) else {
            return Err(TargetError::Malformed(s.to_string()));
        };
        let (weight, bar_kind) = s.split_at(split);
        if weight.is_empty() {
            return Err(TargetError::Malformed(s.to_string()));
        }

        let bar_kind = BarKind::from_str(bar_kind).map_err(TargetError::BarKind)?;
        let weight = weight.parse::<Weight>()?;
        Ok(Target { weight, bar_kind })
    }
}
