use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::empty_string_as_none;

pub const GEONAME_ID: &str = "geoname_id";
pub const REGISTERED_COUNTRY_GEONAME_ID: &str = "registered_country_geoname_id";
pub const NETWORK: &str = "network";

/// One row of a `*-Locations-*.csv` table.
///
/// Every field is optional: the City and Country locations tables carry
/// different subsets of the name columns, and blank cells read as `None`.
/// Names are trimmed; the identifier is kept as written.
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct LocationRecord {
    #[serde(default)]
    pub geoname_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub city_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub country_iso_code: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub country_name: Option<String>,
}

impl LocationRecord {
    /// Lowercased name keys this row should be indexed under.
    pub fn name_keys(&self) -> impl Iterator<Item = String> + '_ {
        NameField::ALL
            .into_iter()
            .filter_map(move |field| field.value(self))
            .map(str::to_lowercase)
    }
}

/// One row of a `*-Blocks-IPv4.csv` / `*-Blocks-IPv6.csv` table.
///
/// Cells are kept verbatim; only empty cells read as `None`.
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct BlockRecord {
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub geoname_id: Option<String>,
    #[serde(default)]
    pub registered_country_geoname_id: Option<String>,
}

/// Name columns of a locations table that feed the name index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    CityName,
    CountryIsoCode,
    CountryName,
}

impl NameField {
    pub const ALL: [NameField; 3] = [
        NameField::CityName,
        NameField::CountryIsoCode,
        NameField::CountryName,
    ];

    pub fn column(self) -> &'static str {
        match self {
            NameField::CityName => "city_name",
            NameField::CountryIsoCode => "country_iso_code",
            NameField::CountryName => "country_name",
        }
    }

    fn value(self, record: &LocationRecord) -> Option<&str> {
        match self {
            NameField::CityName => record.city_name.as_deref(),
            NameField::CountryIsoCode => record.country_iso_code.as_deref(),
            NameField::CountryName => record.country_name.as_deref(),
        }
    }
}

/// Which identifier column of a blocks table is matched against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinColumn {
    /// Direct per-entry identifier, used by the City blocks tables.
    GeonameId,
    /// Used by the Country blocks tables.
    RegisteredCountry,
    /// `geoname_id` when the header has it, else `registered_country_geoname_id`.
    Auto,
}

impl JoinColumn {
    /// Pins `Auto` down to a concrete column given a table header.
    /// Returns `None` when the header has no usable identifier column.
    pub fn resolve<'h, I>(self, headers: I) -> Option<JoinColumn>
    where
        I: IntoIterator<Item = &'h str>,
    {
        let headers: Vec<&str> = headers.into_iter().collect();
        let has = |name: &str| headers.iter().any(|h| *h == name);
        match self {
            JoinColumn::GeonameId if has(GEONAME_ID) => Some(self),
            JoinColumn::RegisteredCountry if has(REGISTERED_COUNTRY_GEONAME_ID) => Some(self),
            JoinColumn::Auto if has(GEONAME_ID) => Some(JoinColumn::GeonameId),
            JoinColumn::Auto if has(REGISTERED_COUNTRY_GEONAME_ID) => {
                Some(JoinColumn::RegisteredCountry)
            }
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            JoinColumn::GeonameId => GEONAME_ID,
            JoinColumn::RegisteredCountry => REGISTERED_COUNTRY_GEONAME_ID,
            JoinColumn::Auto => "geoname_id|registered_country_geoname_id",
        }
    }

    pub fn value(self, record: &BlockRecord) -> Option<&str> {
        match self {
            JoinColumn::GeonameId => record.geoname_id.as_deref(),
            JoinColumn::RegisteredCountry => record.registered_country_geoname_id.as_deref(),
            JoinColumn::Auto => record
                .geoname_id
                .as_deref()
                .or(record.registered_country_geoname_id.as_deref()),
        }
    }
}

/// The two GeoLite2 datasets a lookup can run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    City,
    Country,
}

impl Dataset {
    pub fn join_column(self) -> JoinColumn {
        match self {
            Dataset::City => JoinColumn::GeonameId,
            Dataset::Country => JoinColumn::RegisteredCountry,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dataset::City => "City",
            Dataset::Country => "Country",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::City => f.write_str("city"),
            Dataset::Country => f.write_str("country"),
        }
    }
}
