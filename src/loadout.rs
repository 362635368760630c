use std::fmt::Display;

use itertools::Itertools;
use tracing::debug;

use crate::{
    bar::BarConfig,
    bar_kind::BarKind,
    catalog,
    loadout_error::LoadoutError,
    plate::{PlacedPlate, PlateCategory, PlateSpec},
    weight::Weight,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculationResult {
    pub plates: Vec<PlacedPlate>,
    pub has_collars: bool,
    /// Total mass, across both sides, that no plate combination could cover.
    pub remainder: Weight,
    pub is_valid: bool,
    pub error: Option<LoadoutError>,
}

impl CalculationResult {
    fn rejected(has_collars: bool, error: LoadoutError) -> Self {
        CalculationResult {
            plates: Vec::new(),
            has_collars,
            remainder: Weight::ZERO,
            is_valid: false,
            error: Some(error),
        }
    }

    pub fn per_side(&self) -> Weight {
        self.plates.iter().map(PlacedPlate::weight).sum()
    }

    /// Bar, collars and plates on both sides.
    #[must_use]
    pub fn loaded_weight(&self, config: &BarConfig) -> Weight {
        config.bar_weight + config.collar_weight(self.has_collars) + self.per_side() * 2
    }

    pub fn training_plates(&self) -> usize {
        self.plates
            .iter()
            .filter(|plate| plate.category == PlateCategory::Training)
            .count()
    }
}

impl Display for CalculationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(error) = &self.error {
            return write!(f, "{error}");
        }

        write!(f, "[{}]", self.plates.iter().join(", "))?;
        if self.has_collars {
            write!(f, " + collars")?;
        }
        if !self.remainder.is_zero() {
            write!(f, " (remainder {}kg)", self.remainder)?;
        }
        Ok(())
    }
}

/// Works out the plates for one side of a `bar_kind` bar loaded to `target`.
///
/// Violations are reported inside the result; this never fails.
#[must_use]
pub fn compute(target: Weight, bar_kind: BarKind) -> CalculationResult {
    compute_with(target, bar_kind.config())
}

#[must_use]
pub fn compute_with(target: Weight, config: &BarConfig) -> CalculationResult {
    if target > config.max_total_weight {
        debug!(%target, max = %config.max_total_weight, "target above bar maximum");
        return CalculationResult::rejected(
            false,
            LoadoutError::ExceedsMaximum {
                max: config.max_total_weight,
            },
        );
    }

    let has_collars = config.uses_collars(target);

    if target < config.bar_weight {
        debug!(%target, min = %config.bar_weight, "target below bar weight");
        return CalculationResult::rejected(
            false,
            LoadoutError::BelowMinimum {
                min: config.bar_weight,
            },
        );
    }

    let Some(mut remaining) = target
        .checked_sub(config.bar_weight)
        .and_then(|rest| rest.checked_sub(config.collar_weight(has_collars)))
    else {
        debug!(%target, has_collars, "collars outweigh what is left after the bar");
        return CalculationResult::rejected(has_collars, LoadoutError::InfeasibleConfiguration);
    };

    let mut plates = Vec::new();

    if config.training_mode(target) {
        if let Some(spec) = catalog::TRAINING
            .iter()
            .find(|spec| fits(&remaining, spec))
        {
            remaining = place(&mut plates, remaining, *spec, PlateCategory::Training);
        }
    } else {
        remaining = fill(&mut plates, remaining, PlateCategory::Large);
    }
    remaining = fill(&mut plates, remaining, PlateCategory::Small);

    CalculationResult {
        plates,
        has_collars,
        remainder: remaining,
        is_valid: remaining.is_zero(),
        error: None,
    }
}

/// `remaining` spans both sides, so a plate fits when a pair of it does.
fn fits(remaining: &Weight, spec: &PlateSpec) -> bool {
    *remaining >= spec.weight * 2
}

fn place(
    plates: &mut Vec<PlacedPlate>,
    remaining: Weight,
    spec: PlateSpec,
    category: PlateCategory,
) -> Weight {
    plates.push(PlacedPlate::new(spec, category));
    remaining - spec.weight * 2
}

fn fill(plates: &mut Vec<PlacedPlate>, mut remaining: Weight, category: PlateCategory) -> Weight {
    for spec in catalog::plates(category) {
        while fits(&remaining, spec) {
            remaining = place(plates, remaining, *spec, category);
        }
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kg(s: &str) -> Weight {
        s.parse().unwrap()
    }

    fn weights(result: &CalculationResult) -> Vec<Weight> {
        result.plates.iter().map(PlacedPlate::weight).collect()
    }

    #[test]
    fn hundred_on_mens_bar() {
        let result = compute(kg("100"), BarKind::Men);
        assert!(result.has_collars);
        assert_eq!(weights(&result), vec![kg("25"), kg("10"), kg("2.5")]);
        assert_eq!(
            result.plates.iter().map(|p| p.category).collect::<Vec<_>>(),
            vec![PlateCategory::Large, PlateCategory::Large, PlateCategory::Small]
        );
        assert_eq!(result.remainder, Weight::ZERO);
        assert!(result.is_valid);
        assert_eq!(result.error, None);
    }

    #[test]
    fn light_mens_bar_skips_training_plate_when_none_fits() {
        let result = compute(kg("22"), BarKind::Men);
        assert!(!result.has_collars);
        assert_eq!(weights(&result), vec![kg("1")]);
        assert_eq!(result.plates[0].category, PlateCategory::Small);
        assert!(result.is_valid);
    }

    #[test]
    fn training_mode_uses_one_training_plate_then_small_plates() {
        // 40 - 20 bar - 5 collars = 15, so 7.5 a side.
        let result = compute(kg("40"), BarKind::Men);
        assert!(result.has_collars);
        assert_eq!(weights(&result), vec![kg("5"), kg("2.5")]);
        assert_eq!(result.plates[0].category, PlateCategory::Training);
        assert_eq!(result.plates[0].label(), Some("T"));
        assert_eq!(result.plates[1].category, PlateCategory::Small);
        assert!(result.is_valid);
    }

    #[test]
    fn womens_bar_uses_its_own_thresholds() {
        let result = compute(kg("25"), BarKind::Women);
        assert!(result.has_collars);
        assert_eq!(weights(&result), vec![kg("2.5")]);
        assert_eq!(result.training_plates(), 1);

        let result = compute(kg("40"), BarKind::Women);
        assert_eq!(result.training_plates(), 0);
        assert_eq!(weights(&result), vec![kg("10")]);
    }

    #[test]
    fn rejects_targets_outside_bar_limits() {
        let low = compute(kg("19"), BarKind::Men);
        assert!(!low.is_valid);
        assert!(low.plates.is_empty());
        assert_eq!(low.remainder, Weight::ZERO);
        assert_eq!(low.error.unwrap().to_string(), "Minimum weight is 20kg");

        let high = compute(kg("301"), BarKind::Men);
        assert!(!high.is_valid);
        assert!(high.plates.is_empty());
        assert_eq!(high.error.unwrap().to_string(), "Maximum weight is 300kg");

        assert!(compute(kg("225"), BarKind::Women).is_valid);
        assert_eq!(
            compute(kg("225.5"), BarKind::Women).error,
            Some(LoadoutError::ExceedsMaximum { max: kg("225") })
        );
    }

    #[test]
    fn reports_collars_outweighing_the_remaining_load() {
        let config = BarConfig::new(kg("20"), kg("300"), kg("21"), kg("45"));
        let result = compute_with(kg("22"), &config);
        assert!(result.has_collars);
        assert!(!result.is_valid);
        assert!(result.plates.is_empty());
        assert_eq!(result.error, Some(LoadoutError::InfeasibleConfiguration));
        assert_eq!(result.to_string(), "Weight too low for configuration");
    }

    #[test]
    fn partial_fill_keeps_plates_and_reports_remainder() {
        let result = compute(kg("100.3"), BarKind::Men);
        assert!(!result.is_valid);
        assert_eq!(result.error, None);
        assert_eq!(weights(&result), vec![kg("25"), kg("10"), kg("2.5")]);
        assert_eq!(result.remainder, kg("0.3"));
        assert_eq!(result.loaded_weight(BarKind::Men.config()) + result.remainder, kg("100.3"));
    }

    #[test]
    fn bar_alone_is_valid() {
        let result = compute(kg("20"), BarKind::Men);
        assert!(result.is_valid);
        assert!(result.plates.is_empty());
        assert!(!result.has_collars);
        assert_eq!(result.to_string(), "[]");
    }

    #[test]
    fn displays_plates_and_collars() {
        assert_eq!(compute(kg("100"), BarKind::Men).to_string(), "[25, 10, 2.5] + collars");
        assert_eq!(compute(kg("40"), BarKind::Men).to_string(), "[5T, 2.5] + collars");
    }
}
