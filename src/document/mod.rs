//! Document identity and metadata catalog
//!
//! The catalog maps document ids to optional descriptors. It is parsed
//! leniently: a payload that is not a JSON object is an empty catalog,
//! and an entry that is not an object has no descriptor.

use std::collections::HashMap;

use crate::error::Result;

mod types;

pub use types::*;

/// Parsed metadata document
#[derive(Debug, Clone, Default)]
pub struct MetadataCatalog {
    entries: HashMap<String, DocumentDescriptor>,
}

impl MetadataCatalog {
    /// Parse the raw metadata body
    pub fn from_json(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: serde_json::Value) -> Self {
        let entries = match value {
            serde_json::Value::Object(map) => map
                .into_iter()
                .filter_map(|(id, entry)| {
                    if !entry.is_object() {
                        return None;
                    }
                    serde_json::from_value::<DocumentDescriptor>(entry)
                        .ok()
                        .map(|desc| (id, desc))
                })
                .collect(),
            _ => HashMap::new(),
        };
        Self { entries }
    }

    pub fn get(&self, id: &DocumentId) -> Option<&DocumentDescriptor> {
        self.entries.get(id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
