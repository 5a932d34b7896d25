// ********* Normalization tables ***********

use std::collections::{HashMap, HashSet};

/// The lookup tables that bring raw office and candidate labels into their
/// canonical statewide form.
///
/// The tables are built once at startup and shared read-only by every county
/// conversion in a run.
#[derive(Debug, Clone)]
pub struct NormalizeRules {
    /// Raw office label (in title-cased spelling) to canonical office name.
    pub office_map: HashMap<String, String>,
    /// Pseudo-candidate labels to their canonical spelling.
    pub candidate_map: HashMap<String, String>,
    /// The statewide offices kept in the final table. Rows for any other
    /// office are dropped.
    pub valid_offices: HashSet<String>,
}

impl NormalizeRules {
    /// The statewide tables, with the office spellings observed across the
    /// county source files.
    pub fn statewide() -> NormalizeRules {
        let office_map: HashMap<String, String> = [
            (
                "President And Vice President Of The United States",
                "President",
            ),
            ("President Of The United States", "President"),
            ("United States Representative", "U.S. House"),
            ("US Rep", "U.S. House"),
            ("United States Senator", "U.S. Senate"),
            ("State Senator", "State Senate"),
            ("State Sen", "State Senate"),
            ("State Representative", "State House"),
            ("State Rep", "State House"),
        ]
        .iter()
        .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
        .collect();

        let candidate_map: HashMap<String, String> = [("Write-In", "Write-ins")]
            .iter()
            .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
            .collect();

        let valid_offices: HashSet<String> = [
            "President",
            "U.S. Senate",
            "U.S. House",
            "Governor",
            "Lieutenant Governor",
            "State Senate",
            "State House",
            "Attorney General",
            "Secretary of State",
            "State Treasurer",
        ]
        .iter()
        .map(|office| office.to_string())
        .collect();

        NormalizeRules {
            office_map,
            candidate_map,
            valid_offices,
        }
    }
}

impl Default for NormalizeRules {
    fn default() -> Self {
        NormalizeRules::statewide()
    }
}
