//! JSON catalog -> taxonomy and items

use serde::Deserialize;

use super::CliError;
use crate::item::ItemRecord;
use crate::taxonomy::{Taxonomy, ValueKind};

/// A JSON catalog: tag declarations plus item records.
///
/// ```json
/// {
///   "default_tags": true,
///   "tags": ["person.carol", {"path": "camera.iso", "kind": "int"}],
///   "items": [
///     {"id": "a.jpg", "tags": ["person.carol"], "datetime": "2020-05-01T10:00:00"}
///   ]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Seed the default photo tag tree before the declared tags
    pub default_tags: bool,
    pub tags: Vec<TagDecl>,
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TagDecl {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        kind: ValueKind,
    },
}

#[derive(Debug, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub record: ItemRecord,
}

/// Parse a catalog document.
pub fn parse_catalog(json: &str) -> Result<Catalog, CliError> {
    Ok(serde_json::from_str(json)?)
}

/// Build the taxonomy and item records a catalog describes.
///
/// Item tags must be declared (or part of the default tree). A `datetime`
/// fills in the date parts the item leaves unset.
pub fn load_catalog(catalog: Catalog) -> Result<(Taxonomy, Vec<ItemRecord>), CliError> {
    let mut taxonomy = if catalog.default_tags {
        Taxonomy::with_default_tags()
    } else {
        Taxonomy::new()
    };

    for decl in &catalog.tags {
        let (path, kind) = match decl {
            TagDecl::Path(path) => (path.as_str(), ValueKind::String),
            TagDecl::Detailed { path, kind } => (path.as_str(), *kind),
        };
        taxonomy.ensure_path(path, kind)?;
    }

    let mut items = Vec::with_capacity(catalog.items.len());
    for entry in catalog.items {
        let mut record = entry.record;
        record.fill_datetime_parts();
        for path in &entry.tags {
            let id = taxonomy
                .resolve_path(path)
                .ok_or_else(|| CliError::UnknownTag {
                    item: record.id.clone(),
                    path: path.clone(),
                })?;
            record.tags.insert(id);
        }
        items.push(record);
    }

    log::debug!(
        "loaded catalog: {} tags, {} items",
        taxonomy.len(),
        items.len()
    );
    Ok((taxonomy, items))
}
