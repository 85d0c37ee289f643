#![forbid(unsafe_code)]

//! Option lists backing the prototype's dropdowns and pickers.

/// Stores selectable from the OTC card detail screen.
pub const WALLET_STORES: &[&str] = &["Acme Markets", "Giant Food", "Safeway", "Kroger"];

/// Stores selectable in the report-missing-product form.
pub const REPORT_STORES: &[&str] = &[
    "Walmart",
    "Target",
    "Kroger",
    "CVS",
    "Walgreens",
    "Safeway",
    "Whole Foods",
    "Other",
];

/// Issue categories in the report-missing-product form.
pub const REPORT_TYPES: &[&str] = &["Missing Product", "Product Not Scanning"];

/// Program options in the eligibility wizard.
pub const WIZARD_PROGRAMS: &[&str] = &["OTC Network", "Transportation", "Healthy Foods"];

/// Immunization types in the eligibility wizard.
pub const IMMUNIZATION_TYPES: &[&str] = &[
    "Influenza",
    "COVID-19",
    "Pneumococcal",
    "Hepatitis B",
    "Shingles",
];

/// Where an immunization was received.
pub const IMMUNIZATION_LOCATIONS: &[&str] = &[
    "Retail Pharmacy",
    "Clinic",
    "Doctor's Office",
    "Community Event",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unique(list: &[&str]) {
        for (i, a) in list.iter().enumerate() {
            for b in &list[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn option_lists_are_nonempty_and_unique() {
        for list in [
            WALLET_STORES,
            REPORT_STORES,
            REPORT_TYPES,
            WIZARD_PROGRAMS,
            IMMUNIZATION_TYPES,
            IMMUNIZATION_LOCATIONS,
        ] {
            assert!(!list.is_empty());
            assert_unique(list);
        }
    }
}
