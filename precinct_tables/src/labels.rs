//! Label splitting.
//!
//! The source files embed sub-fields in free text: contest labels may carry a
//! trailing district number and candidate labels may carry a parenthesized
//! party code. The functions here pull those apart.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::NormalizeRules;

// Trailing district qualifiers come in several spellings:
// "UNITED STATES REPRESENTATIVE, DISTRICT NO. 3", "State Senate, District 15".
static TRAILING_DISTRICT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ ,] (?i:DISTRICT(?: NO\.)? )?(\d+)$").unwrap());

// The merged-header files abbreviate instead: "State Sen Dist 15".
static DIST_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+(?i:dist)\W+").unwrap());

// A single-letter party code such as "(R)" or "( D )".
static PARTY_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\s*(\w)\s*\)\s*").unwrap());

/// Splits a trailing district number off a contest label.
///
/// `"State Senate, District 15"` becomes `("State Senate", Some("15"))`. A
/// label without a trailing district qualifier is returned untouched.
pub fn split_trailing_district(label: &str) -> (String, Option<String>) {
    match TRAILING_DISTRICT.captures(label) {
        Some(caps) => {
            let matched = caps.get(0).unwrap();
            let district = caps.get(1).unwrap().as_str().to_string();
            (label[..matched.start()].to_string(), Some(district))
        }
        None => (label.to_string(), None),
    }
}

/// Splits a merged-header contest label on its "Dist" separator and maps the
/// office half through the office table when it is a known raw spelling.
///
/// A label without a separator passes through silently. A label that breaks
/// into more than two parts also passes through whole, with a diagnostic:
/// the layout gives no hint which part would be the district.
pub fn split_office_district(label: &str, rules: &NormalizeRules) -> (String, Option<String>) {
    let parts: Vec<&str> = DIST_SEPARATOR.split(label).collect();
    match parts.as_slice() {
        [office, district] => {
            let office = match rules.office_map.get(*office) {
                Some(canonical) => canonical.clone(),
                None => office.to_string(),
            };
            (office, Some(district.to_string()))
        }
        [_] => (label.to_string(), None),
        _ => {
            warn!("Couldn't split contest '{}'", label);
            (label.to_string(), None)
        }
    }
}

/// Splits a parenthesized party code off a candidate label.
///
/// `"John Smith (R)"` becomes `("John Smith", Some("R"))`; a label without a
/// party code is returned untouched.
pub fn split_candidate_party(label: &str) -> (String, Option<String>) {
    match PARTY_CODE.captures(label) {
        Some(caps) => {
            let matched = caps.get(0).unwrap();
            let party = caps.get(1).unwrap().as_str().to_string();
            let mut candidate = String::with_capacity(label.len());
            candidate.push_str(&label[..matched.start()]);
            candidate.push_str(&label[matched.end()..]);
            (candidate, Some(party))
        }
        None => (label.to_string(), None),
    }
}
