//! Billing details collected by the extra-info form.
//!
//! [`FormFields`] is the flat name → value map serialized from the form at
//! submit time; [`missing_required_fields`] holds the required-field rules the
//! widget enforces before anything is posted.

use crate::subdivisions::requires_subdivision;

pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const ADDRESS_LINE1: &str = "address_line1";
pub const CITY: &str = "city";
pub const COUNTRY: &str = "country";
pub const STATE: &str = "state";
pub const POSTAL_CODE: &str = "postal_code";

/// Fields that must be filled in whatever the country.
pub const ALWAYS_REQUIRED: [&str; 5] = [FIRST_NAME, LAST_NAME, ADDRESS_LINE1, CITY, COUNTRY];

/// Extra fields required for countries with a subdivision table.
pub const SUBDIVISION_REQUIRED: [&str; 2] = [STATE, POSTAL_CODE];

/// Ordered name → value pairs, as the browser would submit them.
///
/// Inserting a name that is already present replaces its value in place, so
/// the last occurrence wins while the first occurrence keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The selected country code, empty when none is selected.
    pub fn country(&self) -> &str {
        self.get(COUNTRY).unwrap_or_default()
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

/// Names of the fields that must be non-empty for `country`, in the order the
/// form presents them.
pub fn required_fields(country: &str) -> Vec<&'static str> {
    let mut required = ALWAYS_REQUIRED.to_vec();
    if requires_subdivision(country) {
        required.extend(SUBDIVISION_REQUIRED);
    }
    required
}

/// Required fields that are absent or empty.
///
/// Values are compared as submitted: whitespace is not trimmed, the server
/// decides what it accepts beyond presence.
pub fn missing_required_fields(fields: &FormFields) -> Vec<&'static str> {
    required_fields(fields.country())
        .into_iter()
        .filter(|name| fields.get(name).map_or(true, str::is_empty))
        .collect()
}
