use crate::weight::Weight;

/// Mass of one collar. Collars are never listed as plates.
pub const COLLAR_WEIGHT_PER_SIDE: Weight = Weight::from_grams(2_500);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BarConfig {
    pub bar_weight: Weight,
    pub max_total_weight: Weight,
    /// Totals at or above this are loaded with collars.
    pub collar_threshold_weight: Weight,
    /// Totals below this use at most one training plate per side.
    pub training_mode_threshold: Weight,
}

impl BarConfig {
    pub const MEN: BarConfig = BarConfig::new(Weight::kg(20), Weight::kg(300), Weight::kg(30), Weight::kg(45));

    pub const WOMEN: BarConfig = BarConfig::new(Weight::kg(15), Weight::kg(225), Weight::kg(25), Weight::kg(40));

    #[must_use]
    pub const fn new(
        bar_weight: Weight,
        max_total_weight: Weight,
        collar_threshold_weight: Weight,
        training_mode_threshold: Weight,
    ) -> Self {
        BarConfig {
            bar_weight,
            max_total_weight,
            collar_threshold_weight,
            training_mode_threshold,
        }
    }

    pub fn uses_collars(&self, target: Weight) -> bool {
        target >= self.collar_threshold_weight
    }

    pub fn training_mode(&self, target: Weight) -> bool {
        target < self.training_mode_threshold
    }

    pub fn collar_weight(&self, has_collars: bool) -> Weight {
        if has_collars {
            COLLAR_WEIGHT_PER_SIDE * 2
        } else {
            Weight::ZERO
        }
    }
}
