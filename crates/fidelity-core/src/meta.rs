//! Resource identity and the metadata side channel

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered string map persisted alongside every record
///
/// The host copies it verbatim between schema versions; the engine keeps its
/// fingerprints here.
pub type Annotations = BTreeMap<String, String>;

/// `apiVersion` / `kind` header of a serialized record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    /// `group/version` string
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    /// Resource kind
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

impl TypeMeta {
    /// Create a header
    #[must_use]
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
        }
    }
}

/// Identity shared by every version of the same logical resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name
    #[serde(default)]
    pub name: String,
    /// Namespace, if namespaced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Free-form labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Side channel
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

impl ObjectMeta {
    /// Metadata with just a name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// With namespace
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// With one annotation
    #[must_use]
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

/// Metadata of a list of records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    /// Opaque version of the collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    /// Continuation token for paged reads
    #[serde(default, rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,
}

/// A record in one schema version
///
/// Only the metadata is visible to the engine; field-groups are reached
/// through [`FieldRestorer`](crate::restorer::FieldRestorer)s.
pub trait Resource {
    /// Shared identity and side channel
    fn meta(&self) -> &ObjectMeta;

    /// Mutable access to identity and side channel
    fn meta_mut(&mut self) -> &mut ObjectMeta;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_annotations_are_not_serialized() {
        let meta = ObjectMeta::named("capi-quickstart");
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "capi-quickstart" }));
    }

    #[test]
    fn list_meta_uses_continue_key() {
        let meta: ListMeta = serde_json::from_str(r#"{"continue":"abc"}"#).unwrap();
        assert_eq!(meta.continue_token.as_deref(), Some("abc"));
        assert_eq!(meta.resource_version, None);
    }

    #[test]
    fn builder_sets_fields() {
        let meta = ObjectMeta::named("m")
            .with_namespace("default")
            .with_annotation("owner", "team-a");
        assert_eq!(meta.namespace.as_deref(), Some("default"));
        assert_eq!(meta.annotations.get("owner").map(String::as_str), Some("team-a"));
    }
}
