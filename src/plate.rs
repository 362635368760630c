use std::fmt::Display;

use crate::weight::Weight;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub enum PlateCategory {
    Large,
    Training,
    Small,
}

impl Display for PlateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlateCategory::Large => write!(f, "large"),
            PlateCategory::Training => write!(f, "training"),
            PlateCategory::Small => write!(f, "small"),
        }
    }
}

/// One denomination in the catalog, with the hints a renderer needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlateSpec {
    pub weight: Weight,
    pub color_hint: &'static str,
    pub border_hint: Option<&'static str>,
    pub label: Option<&'static str>,
}

impl PlateSpec {
    #[must_use]
    pub const fn new(weight: Weight, color_hint: &'static str) -> Self {
        PlateSpec {
            weight,
            color_hint,
            border_hint: None,
            label: None,
        }
    }

    #[must_use]
    pub const fn bordered(self, border_hint: &'static str) -> Self {
        PlateSpec {
            border_hint: Some(border_hint),
            ..self
        }
    }

    #[must_use]
    pub const fn labelled(self, label: &'static str) -> Self {
        PlateSpec {
            label: Some(label),
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacedPlate {
    pub spec: PlateSpec,
    pub category: PlateCategory,
}

impl PlacedPlate {
    pub fn new(spec: PlateSpec, category: PlateCategory) -> Self {
        PlacedPlate { spec, category }
    }

    pub fn weight(&self) -> Weight {
        self.spec.weight
    }

    pub fn color_hint(&self) -> &'static str {
        self.spec.color_hint
    }

    pub fn border_hint(&self) -> Option<&'static str> {
        self.spec.border_hint
    }

    pub fn label(&self) -> Option<&'static str> {
        self.spec.label
    }
}

impl Display for PlacedPlate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.spec.label {
            Some(label) => write!(f, "{}{label}", self.spec.weight),
            None => write!(f, "{}", self.spec.weight),
        }
    }
}
