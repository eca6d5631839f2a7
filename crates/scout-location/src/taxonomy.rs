//! Location taxonomy loading and option derivation.
//!
//! The taxonomy ships with the app as a JSON asset and is parsed once. The
//! option builders here are pure: they turn the taxonomy plus an upstream
//! selection into the list of choices for the next tier down.
//!
//! The bundled asset is a small sample (four states with a handful of
//! counties each, including same-named counties across states). A full
//! state/county/zipcode dataset has the same shape and is loaded with
//! [`from_file`].

use std::{collections::HashSet, path::Path};

use tracing::{debug, warn};

use scout_contracts::{
    error::{ScoutError, ScoutResult},
    location::{CountyOptionKey, LocationTaxonomy, OptionItem},
};

/// The sample taxonomy bundled with the app.
pub const BUNDLED_TAXONOMY: &str = include_str!("../assets/us_locations.json");

/// Parse the bundled taxonomy asset.
pub fn bundled() -> ScoutResult<LocationTaxonomy> {
    from_json_str(BUNDLED_TAXONOMY)
}

/// Parse a taxonomy from its JSON text.
///
/// Key order in the text is preserved in every derived option list.
pub fn from_json_str(s: &str) -> ScoutResult<LocationTaxonomy> {
    let taxonomy: LocationTaxonomy =
        serde_json::from_str(s).map_err(|e| ScoutError::TaxonomyError {
            reason: format!("failed to parse taxonomy JSON: {}", e),
        })?;
    debug!(states = taxonomy.states().len(), "location taxonomy loaded");
    Ok(taxonomy)
}

/// Read and parse a taxonomy file.
pub fn from_file(path: &Path) -> ScoutResult<LocationTaxonomy> {
    let contents = std::fs::read_to_string(path).map_err(|e| ScoutError::TaxonomyError {
        reason: format!("failed to read taxonomy file '{}': {}", path.display(), e),
    })?;
    from_json_str(&contents)
}

/// One option per state, in the taxonomy's native order.
pub fn state_options(taxonomy: &LocationTaxonomy) -> Vec<OptionItem> {
    taxonomy
        .states()
        .iter()
        .map(|state| OptionItem::new(&state.name, &state.name))
        .collect()
}

/// The union of counties across `states`, each keyed as `<county>-<state>`.
///
/// States are visited in the given order; unknown states contribute nothing.
pub fn county_options(taxonomy: &LocationTaxonomy, states: &[String]) -> Vec<OptionItem> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for state_name in states {
        let Some(state) = taxonomy.state(state_name) else {
            warn!(state = %state_name, "state not present in taxonomy");
            continue;
        };
        for county in &state.counties {
            let key = CountyOptionKey::new(&county.name, &state.name).to_string();
            if seen.insert(key.clone()) {
                options.push(OptionItem::new(&county.name, key));
            }
        }
    }
    options
}

/// The union of zipcodes across `counties`, resolved through each composite key.
pub fn zipcode_options(taxonomy: &LocationTaxonomy, counties: &[CountyOptionKey]) -> Vec<OptionItem> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for key in counties {
        let Some(county) = taxonomy.county(key) else {
            warn!(county = %key, "county not present in taxonomy");
            continue;
        };
        for zipcode in &county.zipcodes {
            if seen.insert(zipcode.as_str()) {
                options.push(OptionItem::new(zipcode, zipcode));
            }
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use scout_contracts::{
        error::ScoutError,
        location::{CountyOptionKey, OptionItem},
    };

    use super::*;

    const TEXAS: &str = r#"{
        "states": {
            "Texas": { "counties": {
                "Travis": { "zipcodes": ["78701"] },
                "Harris": { "zipcodes": ["77001"] }
            } }
        }
    }"#;

    #[test]
    fn texas_example_cascades_to_travis_zipcodes() {
        let taxonomy = from_json_str(TEXAS).unwrap();

        let counties = county_options(&taxonomy, &["Texas".to_string()]);
        let values: Vec<&str> = counties.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Travis-Texas", "Harris-Texas"]);

        let zips = zipcode_options(&taxonomy, &[CountyOptionKey::parse("Travis-Texas").unwrap()]);
        assert_eq!(zips, vec![OptionItem::new("78701", "78701")]);
    }

    #[test]
    fn bundled_asset_parses_and_keeps_order() {
        let taxonomy = bundled().unwrap();
        let options = state_options(&taxonomy);
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Texas", "California", "Florida", "Washington"]);
        assert!(options.iter().all(|o| o.label == o.value));
    }

    #[test]
    fn colliding_county_names_stay_distinct() {
        let taxonomy = bundled().unwrap();
        let states = vec!["Texas".to_string(), "California".to_string(), "Florida".to_string()];
        let options = county_options(&taxonomy, &states);

        let oranges: Vec<&str> = options
            .iter()
            .filter(|o| o.label == "Orange")
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(oranges, vec!["Orange-Texas", "Orange-California", "Orange-Florida"]);

        let mut values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        let total = values.len();
        values.sort();
        values.dedup();
        assert_eq!(values.len(), total, "county options must not contain duplicates");
    }

    #[test]
    fn zipcodes_resolve_per_state_for_same_county_name() {
        let taxonomy = bundled().unwrap();
        let ca = zipcode_options(&taxonomy, &[CountyOptionKey::new("Orange", "California")]);
        let fl = zipcode_options(&taxonomy, &[CountyOptionKey::new("Orange", "Florida")]);
        assert!(ca.iter().all(|o| o.value.starts_with("92")));
        assert!(fl.iter().all(|o| o.value.starts_with("32")));
    }

    #[test]
    fn hyphenated_county_resolves() {
        let taxonomy = bundled().unwrap();
        let key = CountyOptionKey::parse("Miami-Dade-Florida").unwrap();
        let zips = zipcode_options(&taxonomy, &[key]);
        assert_eq!(zips.len(), 3);
    }

    #[test]
    fn unknown_entries_contribute_nothing() {
        let taxonomy = from_json_str(TEXAS).unwrap();
        assert!(county_options(&taxonomy, &["Atlantis".to_string()]).is_empty());
        assert!(zipcode_options(&taxonomy, &[CountyOptionKey::new("Travis", "Ohio")]).is_empty());
    }

    #[test]
    fn malformed_json_is_taxonomy_error() {
        match from_json_str("{ not json") {
            Err(ScoutError::TaxonomyError { reason }) => {
                assert!(reason.contains("failed to parse taxonomy JSON"));
            }
            other => panic!("expected TaxonomyError, got {:?}", other),
        }
    }
}
