//! Field restorers
//!
//! A field restorer knows how to pull one field-group out of a record, how to
//! normalize it so that benign mutations do not register as changes, and how
//! to put a previously captured value back.
//!
//! [`HashedFieldRestorer`] is the typed building block. It is erased behind
//! [`FieldRestorer`] so one [`RestorationSpec`](crate::spec::RestorationSpec)
//! can hold groups of different value types.

use crate::hash::{Fingerprint, HashError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{self, Debug, Formatter};

/// Named, pure transform masking sub-fields that are expected to differ
///
/// `strip` blanks the masked sub-fields and must be deterministic and
/// idempotent. `retain` copies the masked sub-fields from a live value onto a
/// restored one, so restoring never rolls back what `strip` hides.
pub struct Normalizer<F> {
    name: &'static str,
    strip: fn(&F) -> F,
    retain: fn(&mut F, &F),
}

impl<F> Normalizer<F> {
    /// Create a normalizer
    #[must_use]
    pub const fn new(name: &'static str, strip: fn(&F) -> F, retain: fn(&mut F, &F)) -> Self {
        Self {
            name,
            strip,
            retain,
        }
    }

    /// Normalizer name, for logs
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Blank the masked sub-fields
    #[inline]
    #[must_use]
    pub fn apply(&self, value: &F) -> F {
        (self.strip)(value)
    }

    /// Copy masked sub-fields from `live` onto `restored`
    #[inline]
    pub fn retain(&self, restored: &mut F, live: &F) {
        (self.retain)(restored, live);
    }
}

impl<F> Clone for Normalizer<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for Normalizer<F> {}

impl<F> Debug for Normalizer<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer").field("name", &self.name).finish()
    }
}

/// Restorer for one typed field-group of record type `T`
///
/// # Type Parameters
/// - `T`: the record type
/// - `F`: the field-group value type
pub struct HashedFieldRestorer<T, F> {
    get: fn(&T) -> &F,
    get_mut: fn(&mut T) -> &mut F,
    normalizer: Option<Normalizer<F>>,
}

impl<T, F> HashedFieldRestorer<T, F>
where
    F: Clone + PartialEq,
{
    /// Create a restorer from a pair of accessors
    #[must_use]
    pub const fn new(get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self {
        Self {
            get,
            get_mut,
            normalizer: None,
        }
    }

    /// Attach a normalizer
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer<F>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Copy of the field-group
    #[inline]
    #[must_use]
    pub fn extract(&self, record: &T) -> F {
        (self.get)(record).clone()
    }

    /// Normalized copy of a field-group value (identity without a normalizer)
    #[inline]
    #[must_use]
    pub fn normalize(&self, value: &F) -> F {
        match &self.normalizer {
            Some(n) => n.apply(value),
            None => value.clone(),
        }
    }

    /// Replace the field-group of `record` with `value`
    #[inline]
    pub fn splice(&self, record: &mut T, value: F) {
        *(self.get_mut)(record) = value;
    }
}

impl<T, F> Debug for HashedFieldRestorer<T, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedFieldRestorer")
            .field("normalizer", &self.normalizer.map(|n| n.name()))
            .finish_non_exhaustive()
    }
}

/// Type-erased view of a field restorer
pub trait FieldRestorer<T>: Send + Sync + Debug {
    /// Fingerprint of the normalized field-group
    ///
    /// # Errors
    /// Returns error if the group cannot be encoded
    fn fingerprint(&self, record: &T) -> Result<Fingerprint, HashError>;

    /// Whether the normalized field-groups of two records differ
    fn differs(&self, left: &T, right: &T) -> bool;

    /// Capture the raw field-group as a JSON payload
    ///
    /// # Errors
    /// Returns error if the group cannot be encoded
    fn capture(&self, record: &T) -> Result<String, HashError>;

    /// Splice a captured payload back into `record`
    ///
    /// Sub-fields masked by the normalizer keep their current value.
    ///
    /// # Errors
    /// Returns error if the payload does not decode into the group type
    fn restore(&self, record: &mut T, payload: &str) -> Result<(), serde_json::Error>;

    /// Name of the attached normalizer, if any
    fn normalizer_name(&self) -> Option<&'static str>;
}

impl<T, F> FieldRestorer<T> for HashedFieldRestorer<T, F>
where
    F: Clone + PartialEq + Serialize + DeserializeOwned,
{
    fn fingerprint(&self, record: &T) -> Result<Fingerprint, HashError> {
        Fingerprint::of(&self.normalize(&self.extract(record)))
    }

    fn differs(&self, left: &T, right: &T) -> bool {
        self.normalize(&self.extract(left)) != self.normalize(&self.extract(right))
    }

    fn capture(&self, record: &T) -> Result<String, HashError> {
        Ok(serde_json::to_string(&self.extract(record))?)
    }

    fn restore(&self, record: &mut T, payload: &str) -> Result<(), serde_json::Error> {
        let mut restored: F = serde_json::from_str(payload)?;
        if let Some(n) = &self.normalizer {
            n.retain(&mut restored, &self.extract(record));
        }
        self.splice(record, restored);
        Ok(())
    }

    fn normalizer_name(&self) -> Option<&'static str> {
        self.normalizer.map(|n| n.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Spec {
        name: String,
        provider_id: Option<String>,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Record {
        spec: Spec,
        ready: bool,
    }

    fn strip_provider(s: &Spec) -> Spec {
        Spec {
            provider_id: None,
            ..s.clone()
        }
    }

    fn retain_provider(restored: &mut Spec, live: &Spec) {
        restored.provider_id.clone_from(&live.provider_id);
    }

    fn restorer() -> HashedFieldRestorer<Record, Spec> {
        HashedFieldRestorer::new(|r: &Record| &r.spec, |r: &mut Record| &mut r.spec)
            .with_normalizer(Normalizer::new(
                "controller-owned",
                strip_provider,
                retain_provider,
            ))
    }

    fn record(name: &str, provider: Option<&str>) -> Record {
        Record {
            spec: Spec {
                name: name.to_string(),
                provider_id: provider.map(str::to_string),
            },
            ready: false,
        }
    }

    #[test]
    fn extract_copies_group() {
        let r = record("n", Some("abc"));
        assert_eq!(restorer().extract(&r), r.spec);
    }

    #[test]
    fn normalizer_is_named() {
        let n = Normalizer::new("controller-owned", strip_provider, retain_provider);
        assert_eq!(n.name(), "controller-owned");
    }

    proptest! {
        #[test]
        fn normalizer_is_idempotent(
            name in "[a-z0-9-]{0,24}",
            provider in proptest::option::of("[a-z:/0-9-]{1,40}"),
        ) {
            let n = Normalizer::new("controller-owned", strip_provider, retain_provider);
            let v = record(&name, provider.as_deref()).spec;
            let once = n.apply(&v);
            prop_assert_eq!(n.apply(&once), once.clone());
            prop_assert_eq!(once.name, name);
            prop_assert_eq!(once.provider_id, None);
        }
    }

    #[test]
    fn splice_leaves_other_groups_alone() {
        let mut r = record("old", None);
        r.ready = true;
        restorer().splice(&mut r, record("new", None).spec);
        assert_eq!(r.spec.name, "new");
        assert!(r.ready);
    }

    #[test]
    fn masked_fields_do_not_change_fingerprint() {
        let r = restorer();
        let a = record("n", None);
        let b = record("n", Some("abc"));
        assert_eq!(r.fingerprint(&a).unwrap(), r.fingerprint(&b).unwrap());
        assert!(!r.differs(&a, &b));
        assert!(r.differs(&a, &record("m", None)));
    }

    #[test]
    fn restore_keeps_masked_fields_from_live_value() {
        let r = restorer();
        let payload = r.capture(&record("original", None)).unwrap();
        let mut live = record("converted", Some("abc"));
        r.restore(&mut live, &payload).unwrap();
        assert_eq!(live.spec.name, "original");
        assert_eq!(live.spec.provider_id.as_deref(), Some("abc"));
    }

    #[test]
    fn restore_rejects_foreign_payload() {
        let mut live = record("n", None);
        assert!(restorer().restore(&mut live, "[1,2,3]").is_err());
        assert_eq!(live.spec.name, "n");
    }

    #[test]
    fn without_normalizer_normalize_is_identity() {
        let r: HashedFieldRestorer<Record, Spec> =
            HashedFieldRestorer::new(|r: &Record| &r.spec, |r: &mut Record| &mut r.spec);
        let v = record("n", Some("abc")).spec;
        assert_eq!(r.normalize(&v), v);
        assert_eq!(r.normalizer_name(), None);
    }
}
