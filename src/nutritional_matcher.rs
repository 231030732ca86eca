use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::reference_data::BUILTIN_PROFILES;

/// Macro-nutrient profile. For reference entries the values are per 100g;
/// the resolver reuses the same shape for a concrete quantity.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct NutritionProfile {
    pub calories: u32,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl NutritionProfile {
    pub fn new(calories: u32, protein: f64, fat: f64, carbs: f64) -> Self {
        Self { calories, protein, fat, carbs }
    }
}

/// Normalizes an ingredient name into the form used as a table key.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Read-only lookup from canonical ingredient name to its per-100g profile.
///
/// Entries keep their insertion order, which is also the lookup priority:
/// an exact key match wins, otherwise the first entry whose key contains the
/// query (or is contained in it) is returned. No ranking is applied beyond
/// that, so callers wanting "chicken breast" to beat "chicken" must insert
/// the more specific key first.
///
/// The table is built once and then shared (typically behind an `Arc`);
/// nothing mutates it after construction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: Vec<(String, NutritionProfile)>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shipped with the crate.
    pub fn builtin() -> Self {
        let table = Self::from_entries(BUILTIN_PROFILES.iter().map(
            |&(name, calories, protein, fat, carbs)| {
                (name, NutritionProfile::new(calories, protein, fat, carbs))
            },
        ));
        info!("Built-in reference table ready: {} entries", table.len());
        table
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, NutritionProfile)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (name, profile) in entries {
            table.insert(name.as_ref(), profile);
        }
        table
    }

    /// Adds an entry while the table is being built. Returns `false` when
    /// the name is blank or already present; the first definition is kept.
    pub fn insert(&mut self, name: &str, profile: NutritionProfile) -> bool {
        let key = normalize_name(name);
        if key.is_empty() {
            warn!("Ignoring reference entry with a blank name");
            return false;
        }
        if self.entries.iter().any(|(existing, _)| *existing == key) {
            warn!("Duplicate reference entry '{}' ignored; keeping the first one", key);
            return false;
        }
        self.entries.push((key, profile));
        true
    }

    /// Finds the entry matching `name`, returning the matched key with it.
    pub fn lookup_entry(&self, name: &str) -> Option<(&str, &NutritionProfile)> {
        let query = normalize_name(name);
        if query.is_empty() {
            return None;
        }

        if let Some((key, profile)) = self.entries.iter().find(|(key, _)| *key == query) {
            debug!("Exact reference match for '{}'", query);
            return Some((key.as_str(), profile));
        }

        let partial = self
            .entries
            .iter()
            .find(|(key, _)| key.contains(query.as_str()) || query.contains(key.as_str()));
        match partial {
            Some((key, profile)) => {
                debug!("Partial reference match for '{}': '{}'", query, key);
                Some((key.as_str(), profile))
            }
            None => {
                debug!("No reference match for '{}'", query);
                None
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&NutritionProfile> {
        self.lookup_entry(name).map(|(_, profile)| profile)
    }

    pub fn has_nutrition_data(&self, name: &str) -> bool {
        self.lookup_entry(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NutritionProfile)> {
        self.entries.iter().map(|(key, profile)| (key.as_str(), profile))
    }
}
