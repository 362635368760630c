use thiserror::Error;

use crate::weight::Weight;

/// Hard constraint violations. A loadout that merely leaves a remainder is not
/// an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadoutError {
    #[error("Maximum weight is {max}kg")]
    ExceedsMaximum { max: Weight },
    #[error("Minimum weight is {min}kg")]
    BelowMinimum { min: Weight },
    #[error("Weight too low for configuration")]
    InfeasibleConfiguration,
}
