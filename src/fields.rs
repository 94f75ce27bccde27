//! Fixed fields: the structured scalar attributes every photo record carries,
//! addressable from a query alongside the user-defined taxonomy.

use std::fmt;

use crate::taxonomy::ValueKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedField {
    Favorite,
    ToDelete,
    Reviewed,
    AutoTagErrors,
    Datetime,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Latitude,
    Longitude,
    HasLatLon,
    City,
    Town,
    State,
    Width,
    Height,
}

impl FixedField {
    pub const ALL: [FixedField; 19] = [
        FixedField::Favorite,
        FixedField::ToDelete,
        FixedField::Reviewed,
        FixedField::AutoTagErrors,
        FixedField::Datetime,
        FixedField::Year,
        FixedField::Month,
        FixedField::Day,
        FixedField::Hour,
        FixedField::Minute,
        FixedField::Second,
        FixedField::Latitude,
        FixedField::Longitude,
        FixedField::HasLatLon,
        FixedField::City,
        FixedField::Town,
        FixedField::State,
        FixedField::Width,
        FixedField::Height,
    ];

    /// Look up a field by its dotted query path, ignoring ASCII case.
    pub fn from_path(path: &str) -> Option<Self> {
        let lower = path.to_ascii_lowercase();
        FixedField::ALL.into_iter().find(|f| f.path() == lower)
    }

    /// The dotted path used to reference the field in a query (without `tag.`).
    pub fn path(self) -> &'static str {
        match self {
            FixedField::Favorite => "favorite",
            FixedField::ToDelete => "to_delete",
            FixedField::Reviewed => "reviewed",
            FixedField::AutoTagErrors => "auto_tag_errors",
            FixedField::Datetime => "datetime",
            FixedField::Year => "datetime.year",
            FixedField::Month => "datetime.month",
            FixedField::Day => "datetime.day",
            FixedField::Hour => "datetime.hr",
            FixedField::Minute => "datetime.min",
            FixedField::Second => "datetime.sec",
            FixedField::Latitude => "location.latitude",
            FixedField::Longitude => "location.longitude",
            FixedField::HasLatLon => "location.has_lat_lon",
            FixedField::City => "location.city",
            FixedField::Town => "location.town",
            FixedField::State => "location.state",
            FixedField::Width => "image_size.width",
            FixedField::Height => "image_size.height",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            FixedField::Favorite
            | FixedField::ToDelete
            | FixedField::Reviewed
            | FixedField::AutoTagErrors
            | FixedField::HasLatLon => ValueKind::Boolean,
            FixedField::Datetime => ValueKind::Datetime,
            FixedField::Year
            | FixedField::Month
            | FixedField::Day
            | FixedField::Hour
            | FixedField::Minute
            | FixedField::Second
            | FixedField::Width
            | FixedField::Height => ValueKind::Integer,
            FixedField::Latitude
            | FixedField::Longitude
            | FixedField::City
            | FixedField::Town
            | FixedField::State => ValueKind::String,
        }
    }
}

impl fmt::Display for FixedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
