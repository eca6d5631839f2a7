//! Location taxonomy and selection types.
//!
//! The taxonomy is the static state → county → zipcode hierarchy bundled with
//! the app. A `LocationSelection` is the per-agent coverage preference built
//! from it. Counties are addressed by `CountyOptionKey` because county names
//! repeat across states.

use std::{fmt, marker::PhantomData, str::FromStr};

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::{ScoutError, ScoutResult};

// ── Ordered JSON object ──────────────────────────────────────────────────────

/// A JSON object read as a list of entries in document order.
///
/// The taxonomy's option lists follow the asset's native key order, which a
/// sorted map would lose. Duplicate keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object keyed by name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, V)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    if entries.iter().any(|(existing, _)| *existing == key) {
                        return Err(de::Error::custom(format!("duplicate key '{key}'")));
                    }
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ── Taxonomy ─────────────────────────────────────────────────────────────────

/// On-disk shape: `{ "states": { <state>: { "counties": { <county>: { "zipcodes": [..] } } } } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTaxonomy {
    states: OrderedMap<RawState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawState {
    #[serde(default)]
    counties: OrderedMap<RawCounty>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCounty {
    #[serde(default)]
    zipcodes: Vec<String>,
}

/// One county and its zipcodes, in asset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyEntry {
    pub name: String,
    pub zipcodes: Vec<String>,
}

/// One state and its counties, in asset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub name: String,
    pub counties: Vec<CountyEntry>,
}

/// The static, read-only state → county → zipcode hierarchy.
///
/// Within one taxonomy every zipcode belongs to exactly one county and every
/// county to exactly one state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawTaxonomy", into = "RawTaxonomy")]
pub struct LocationTaxonomy {
    states: Vec<StateEntry>,
}

impl From<RawTaxonomy> for LocationTaxonomy {
    fn from(raw: RawTaxonomy) -> Self {
        let states = raw
            .states
            .0
            .into_iter()
            .map(|(name, state)| StateEntry {
                name,
                counties: state
                    .counties
                    .0
                    .into_iter()
                    .map(|(name, county)| CountyEntry { name, zipcodes: county.zipcodes })
                    .collect(),
            })
            .collect();
        Self { states }
    }
}

impl From<LocationTaxonomy> for RawTaxonomy {
    fn from(taxonomy: LocationTaxonomy) -> Self {
        let states = taxonomy
            .states
            .into_iter()
            .map(|state| {
                let counties = state
                    .counties
                    .into_iter()
                    .map(|county| (county.name, RawCounty { zipcodes: county.zipcodes }))
                    .collect();
                (state.name, RawState { counties: OrderedMap(counties) })
            })
            .collect();
        Self { states: OrderedMap(states) }
    }
}

impl LocationTaxonomy {
    /// Build a taxonomy from already-ordered entries.
    pub fn new(states: Vec<StateEntry>) -> Self {
        Self { states }
    }

    /// All states in asset order.
    pub fn states(&self) -> &[StateEntry] {
        &self.states
    }

    /// Look up a state by exact name.
    pub fn state(&self, name: &str) -> Option<&StateEntry> {
        self.states.iter().find(|s| s.name == name)
    }

    /// Look up the county a composite key points at.
    pub fn county(&self, key: &CountyOptionKey) -> Option<&CountyEntry> {
        self.state(key.state())?
            .counties
            .iter()
            .find(|c| c.name == key.county())
    }
}

// ── County option key ────────────────────────────────────────────────────────

/// Composite `<county>-<state>` identifier for a county option.
///
/// Parsing splits on the last separator, so hyphenated county names such as
/// "Miami-Dade" survive the round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountyOptionKey {
    county: String,
    state: String,
}

impl CountyOptionKey {
    /// The separator placed between county and state.
    pub const SEPARATOR: char = '-';

    pub fn new(county: impl Into<String>, state: impl Into<String>) -> Self {
        Self { county: county.into(), state: state.into() }
    }

    pub fn county(&self) -> &str {
        &self.county
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// Parse a `<county>-<state>` string.
    pub fn parse(raw: &str) -> ScoutResult<Self> {
        match raw.rsplit_once(Self::SEPARATOR) {
            Some((county, state)) if !county.is_empty() && !state.is_empty() => {
                Ok(Self::new(county, state))
            }
            _ => Err(ScoutError::MalformedCountyKey { key: raw.to_string() }),
        }
    }
}

impl fmt::Display for CountyOptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.county, Self::SEPARATOR, self.state)
    }
}

impl FromStr for CountyOptionKey {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CountyOptionKey {
    type Error = ScoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountyOptionKey> for String {
    fn from(key: CountyOptionKey) -> Self {
        key.to_string()
    }
}

// ── Options and selection ────────────────────────────────────────────────────

/// One entry in a picker: what the user sees and the id that gets stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub label: String,
    pub value: String,
}

impl OptionItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// The three levels of the location hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    States,
    Counties,
    Zipcodes,
}

impl Tier {
    /// All tiers, top-down.
    pub const ALL: [Tier; 3] = [Tier::States, Tier::Counties, Tier::Zipcodes];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::States => "states",
            Tier::Counties => "counties",
            Tier::Zipcodes => "zipcodes",
        };
        f.write_str(name)
    }
}

/// An agent's coverage preferences, persisted wholesale on save.
///
/// Every county references a selected state and every zipcode belongs to a
/// selected county. Entries are unique and keep the order they were chosen in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationSelection {
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub counties: Vec<CountyOptionKey>,
    #[serde(default)]
    pub zipcodes: Vec<String>,
}

impl LocationSelection {
    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.counties.is_empty() && self.zipcodes.is_empty()
    }
}
