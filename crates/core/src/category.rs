//! Listing category labels.
//!
//! The store accepts any non-blank category; these are the labels the
//! creation form offers.

use crate::error::CoreError;

/// Small signal tubes.
pub const CATEGORY_TUBE: &str = "Röhre";

/// Power tubes.
pub const CATEGORY_POWER_TUBE: &str = "Endröhre";

/// Tube amplifiers.
pub const CATEGORY_AMPLIFIER: &str = "Verstärker";

/// Measurement and test equipment.
pub const CATEGORY_MEASUREMENT_DEVICE: &str = "Messgerät";

/// All known categories, in the order the form presents them.
pub const KNOWN_CATEGORIES: &[&str] = &[
    CATEGORY_TUBE,
    CATEGORY_POWER_TUBE,
    CATEGORY_AMPLIFIER,
    CATEGORY_MEASUREMENT_DEVICE,
];

/// Category preselected for a fresh creation form.
pub const DEFAULT_CATEGORY: &str = CATEGORY_TUBE;

/// Check whether a category is one of the known labels (exact match).
pub fn is_known_category(category: &str) -> bool {
    KNOWN_CATEGORIES.contains(&category)
}

/// Reject anything that is not one of [`KNOWN_CATEGORIES`].
pub fn require_known_category(category: &str) -> Result<(), CoreError> {
    if is_known_category(category) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "category must be one of {}, got '{category}'",
        KNOWN_CATEGORIES.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_known() {
        assert!(is_known_category(DEFAULT_CATEGORY));
    }

    #[test]
    fn matching_is_exact() {
        assert!(is_known_category("Verstärker"));
        assert!(!is_known_category("verstärker"));
        assert!(!is_known_category(" Röhre"));
    }

    #[test]
    fn unknown_category_names_the_choices() {
        assert!(require_known_category("Messgerät").is_ok());
        assert_eq!(
            require_known_category("Kaffeemaschine"),
            Err(CoreError::Validation(
                "category must be one of Röhre, Endröhre, Verstärker, Messgerät, got 'Kaffeemaschine'"
                    .into()
            ))
        );
    }
}
