//! Item attribute views: what the evaluator can see of one photo.

use std::collections::HashSet;

use serde::Deserialize;

use crate::fields::FixedField;
use crate::taxonomy::TagId;
use crate::value::Value;

/// Set of taxonomy node ids.
pub type TagSet = HashSet<TagId>;

/// Read interface over one item's tag memberships and fixed fields.
pub trait ItemView {
    /// Whether the exact tag is applied to the item.
    fn has_tag(&self, id: TagId) -> bool;

    /// Whether any tag in `ids` is applied to the item.
    fn has_any_tag(&self, ids: &TagSet) -> bool {
        ids.iter().any(|id| self.has_tag(*id))
    }

    /// Value of a fixed field, [`Value::None`] when unset.
    fn field(&self, field: FixedField) -> Value;
}

impl<T: ItemView + ?Sized> ItemView for &T {
    fn has_tag(&self, id: TagId) -> bool {
        (**self).has_tag(id)
    }

    fn has_any_tag(&self, ids: &TagSet) -> bool {
        (**self).has_any_tag(ids)
    }

    fn field(&self, field: FixedField) -> Value {
        (**self).field(field)
    }
}

/// A photo record with its applied tags and fixed fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemRecord {
    pub id: String,
    #[serde(skip)]
    pub tags: TagSet,
    pub favorite: Option<bool>,
    pub to_delete: Option<bool>,
    pub reviewed: Option<bool>,
    pub auto_tag_errors: Option<bool>,
    /// ISO-8601 timestamp
    pub datetime: Option<String>,
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub day: Option<i64>,
    pub hour: Option<i64>,
    pub minute: Option<i64>,
    pub second: Option<i64>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub has_lat_lon: Option<bool>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub state: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl ItemRecord {
    pub fn new(id: impl Into<String>) -> Self {
        ItemRecord {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, id: TagId) -> Self {
        self.tags.insert(id);
        self
    }

    /// Set the timestamp and all of its date parts together.
    ///
    /// `datetime` is `YYYY-MM-DDTHH:MM:SS`; parts that do not parse are left unset.
    pub fn set_datetime(&mut self, datetime: &str) {
        let parts = date_parts(datetime);
        self.datetime = Some(datetime.to_string());
        self.year = parts[0];
        self.month = parts[1];
        self.day = parts[2];
        self.hour = parts[3];
        self.minute = parts[4];
        self.second = parts[5];
    }

    /// Fill date parts that are still unset from the stored `datetime`.
    ///
    /// Parts already set are kept even when they disagree with the timestamp.
    pub fn fill_datetime_parts(&mut self) {
        let Some(datetime) = self.datetime.as_deref() else {
            return;
        };
        let parts = date_parts(datetime);
        let slots = [
            &mut self.year,
            &mut self.month,
            &mut self.day,
            &mut self.hour,
            &mut self.minute,
            &mut self.second,
        ];
        for (slot, part) in slots.into_iter().zip(parts) {
            if slot.is_none() {
                *slot = part;
            }
        }
    }
}

/// Year through second of a `YYYY-MM-DDTHH:MM:SS` prefix.
fn date_parts(datetime: &str) -> [Option<i64>; 6] {
    let part = |range: std::ops::Range<usize>| -> Option<i64> {
        datetime.get(range).and_then(|s| s.parse().ok())
    };
    [
        part(0..4),
        part(5..7),
        part(8..10),
        part(11..13),
        part(14..16),
        part(17..19),
    ]
}
