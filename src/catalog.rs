//! Competition plate tables, heaviest first within each category.

use crate::{
    plate::{PlateCategory, PlateSpec},
    weight::Weight,
};

const RED: &str = "#D93F2C";
const BLUE: &str = "#005BD4";
const YELLOW: &str = "#F2C94C";
const GREEN: &str = "#27AE60";
const WHITE: &str = "#F8F9FA";
const BLACK: &str = "#000000";

const TRAINING_LABEL: &str = "T";

pub static LARGE: [PlateSpec; 4] = [
    PlateSpec::new(Weight::kg(25), RED),
    PlateSpec::new(Weight::kg(20), BLUE),
    PlateSpec::new(Weight::kg(15), YELLOW),
    PlateSpec::new(Weight::kg(10), GREEN),
];

/// At most one of these goes on each side.
pub static TRAINING: [PlateSpec; 2] = [
    PlateSpec::new(Weight::kg(5), WHITE)
        .bordered(BLACK)
        .labelled(TRAINING_LABEL),
    PlateSpec::new(Weight::from_grams(2_500), RED).labelled(TRAINING_LABEL),
];

pub static SMALL: [PlateSpec; 6] = [
    PlateSpec::new(Weight::kg(5), WHITE).bordered(BLACK),
    PlateSpec::new(Weight::from_grams(2_500), RED),
    PlateSpec::new(Weight::kg(2), BLUE),
    PlateSpec::new(Weight::from_grams(1_500), YELLOW),
    PlateSpec::new(Weight::kg(1), GREEN),
    PlateSpec::new(Weight::from_grams(500), WHITE).bordered(BLACK),
];

#[must_use]
pub fn plates(category: PlateCategory) -> &'static [PlateSpec] {
    match category {
        PlateCategory::Large => &LARGE,
        PlateCategory::Training => &TRAINING,
        PlateCategory::Small => &SMALL,
    }
}
