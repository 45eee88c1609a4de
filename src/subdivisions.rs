//! Country → subdivision table used to populate the state/province dropdown.
//!
//! Only the United States and Canada are listed; for those two countries the
//! state/province and postal code become required. Entries keep the order in
//! which they appear in the dropdown.

/// One selectable state, territory or province.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subdivision {
    /// Text shown to the customer.
    pub name: &'static str,
    /// Two-letter code submitted to the server.
    pub code: &'static str,
}

const fn sub(name: &'static str, code: &'static str) -> Subdivision {
    Subdivision { name, code }
}

/// US states, territories and armed-forces regions.
pub static US_STATES: &[Subdivision] = &[
    sub("Alabama", "AL"),
    sub("Alaska", "AK"),
    sub("American Samoa", "AS"),
    sub("Arizona", "AZ"),
    sub("Arkansas", "AR"),
    sub("Armed Forces Americas", "AA"),
    sub("Armed Forces Europe", "AE"),
    sub("Armed Forces Pacific", "AP"),
    sub("California", "CA"),
    sub("Colorado", "CO"),
    sub("Connecticut", "CT"),
    sub("Delaware", "DE"),
    sub("Dist. of Columbia", "DC"),
    sub("Florida", "FL"),
    sub("Georgia", "GA"),
    sub("Guam", "GU"),
    sub("Hawaii", "HI"),
    sub("Idaho", "ID"),
    sub("Illinois", "IL"),
    sub("Indiana", "IN"),
    sub("Iowa", "IA"),
    sub("Kansas", "KS"),
    sub("Kentucky", "KY"),
    sub("Louisiana", "LA"),
    sub("Maine", "ME"),
    sub("Maryland", "MD"),
    sub("Marshall Islands", "MH"),
    sub("Massachusetts", "MA"),
    sub("Michigan", "MI"),
    sub("Micronesia", "FM"),
    sub("Minnesota", "MN"),
    sub("Mississippi", "MS"),
    sub("Missouri", "MO"),
    sub("Montana", "MT"),
    sub("Nebraska", "NE"),
    sub("Nevada", "NV"),
    sub("New Hampshire", "NH"),
    sub("New Jersey", "NJ"),
    sub("New Mexico", "NM"),
    sub("New York", "NY"),
    sub("North Carolina", "NC"),
    sub("North Dakota", "ND"),
    sub("Northern Marianas", "MP"),
    sub("Ohio", "OH"),
    sub("Oklahoma", "OK"),
    sub("Oregon", "OR"),
    sub("Palau", "PW"),
    sub("Pennsylvania", "PA"),
    sub("Puerto Rico", "PR"),
    sub("Rhode Island", "RI"),
    sub("South Carolina", "SC"),
    sub("South Dakota", "SD"),
    sub("Tennessee", "TN"),
    sub("Texas", "TX"),
    sub("Utah", "UT"),
    sub("Vermont", "VT"),
    sub("Virginia", "VA"),
    sub("Virgin Islands", "VI"),
    sub("Washington", "WA"),
    sub("West Virginia", "WV"),
    sub("Wisconsin", "WI"),
    sub("Wyoming", "WY"),
];

/// Canadian provinces and territories.
pub static CA_PROVINCES: &[Subdivision] = &[
    sub("Alberta", "AB"),
    sub("British Columbia", "BC"),
    sub("Manitoba", "MB"),
    sub("New Brunswick", "NB"),
    sub("Newfoundland and Labrador", "NL"),
    sub("Northwest Territories", "NT"),
    sub("Nova Scotia", "NS"),
    sub("Nunavut", "NU"),
    sub("Ontario", "ON"),
    sub("Prince Edward Island", "PE"),
    sub("Quebec", "QC"),
    sub("Saskatchewan", "SK"),
    sub("Yukon", "YT"),
];

/// Subdivisions offered for `country` (an ISO 3166-1 alpha-2 code), if any.
///
/// Matching is exact: `"us"` is not `"US"`, the same way the country select
/// submits its values.
pub fn subdivisions_for(country: &str) -> Option<&'static [Subdivision]> {
    match country {
        "US" => Some(US_STATES),
        "CA" => Some(CA_PROVINCES),
        _ => None,
    }
}

/// Whether state/province and postal code are mandatory for `country`.
pub fn requires_subdivision(country: &str) -> bool {
    subdivisions_for(country).is_some()
}
