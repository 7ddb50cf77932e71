//! Restoration specs
//!
//! Provides [`RestorationSpec`], the per-version list of field-groups that
//! take part in fidelity tracking.

use crate::error::SpecError;
use crate::name::{GroupName, VersionTag};
use crate::restorer::FieldRestorer;
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Formatter};

/// Field-groups tracked for one schema version of record type `T`
///
/// Built once at start-up and never mutated afterwards. Group names are
/// unique; the iteration order is the sorted name order, and no decision the
/// engine makes depends on it.
pub struct RestorationSpec<T> {
    version: VersionTag,
    groups: BTreeMap<GroupName, Box<dyn FieldRestorer<T>>>,
}

impl<T> RestorationSpec<T> {
    /// Create an empty spec for a version
    ///
    /// # Errors
    /// Returns error if the version tag is invalid
    pub fn new(version: &str) -> Result<Self, SpecError> {
        Ok(Self {
            version: VersionTag::new(version)?,
            groups: BTreeMap::new(),
        })
    }

    /// Add a field-group
    ///
    /// # Errors
    /// Returns error if the name is invalid or already registered
    pub fn with_group<R>(mut self, name: &str, restorer: R) -> Result<Self, SpecError>
    where
        R: FieldRestorer<T> + 'static,
    {
        let name = GroupName::new(name)?;
        if self.groups.contains_key(&name) {
            return Err(SpecError::DuplicateGroup(name));
        }
        self.groups.insert(name, Box::new(restorer));
        Ok(self)
    }

    /// Schema version this spec describes
    #[inline]
    #[must_use]
    pub fn version(&self) -> &VersionTag {
        &self.version
    }

    /// Look up a group
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn FieldRestorer<T>> {
        self.groups.get(name).map(|v| &**v)
    }

    /// Check if a group is tracked
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Tracked group names
    #[must_use]
    pub fn names(&self) -> Vec<&GroupName> {
        self.groups.keys().collect()
    }

    /// Number of tracked groups
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no group is tracked
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over groups
    pub fn iter(&self) -> impl Iterator<Item = (&GroupName, &dyn FieldRestorer<T>)> {
        self.groups.iter().map(|(k, v)| (k, &**v))
    }
}

impl<T> Debug for RestorationSpec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestorationSpec")
            .field("version", &self.version)
            .field("groups", &self.groups)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::NameError;
    use crate::restorer::HashedFieldRestorer;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Record {
        spec: String,
        status: u32,
    }

    fn spec_restorer() -> HashedFieldRestorer<Record, String> {
        HashedFieldRestorer::new(|r: &Record| &r.spec, |r: &mut Record| &mut r.spec)
    }

    fn status_restorer() -> HashedFieldRestorer<Record, u32> {
        HashedFieldRestorer::new(|r: &Record| &r.status, |r: &mut Record| &mut r.status)
    }

    #[test]
    fn empty_spec() {
        let spec = RestorationSpec::<Record>::new("v1alpha8").unwrap();
        assert!(spec.is_empty());
        assert_eq!(spec.version().as_str(), "v1alpha8");
    }

    #[test]
    fn groups_of_different_types() {
        let spec = RestorationSpec::new("v1alpha7")
            .unwrap()
            .with_group("status", status_restorer())
            .unwrap()
            .with_group("spec", spec_restorer())
            .unwrap();
        assert_eq!(spec.len(), 2);
        assert!(spec.contains("spec"));
        assert!(spec.contains("status"));
        assert!(!spec.contains("metadata"));
        let names: Vec<&str> = spec.names().into_iter().map(GroupName::as_str).collect();
        assert_eq!(names, vec!["spec", "status"]);
    }

    #[test]
    fn duplicate_group_rejected() {
        let result = RestorationSpec::new("v1alpha7")
            .unwrap()
            .with_group("spec", spec_restorer())
            .unwrap()
            .with_group("spec", spec_restorer());
        assert!(matches!(result, Err(SpecError::DuplicateGroup(name)) if name.as_str() == "spec"));
    }

    #[test]
    fn invalid_names_rejected() {
        assert!(matches!(
            RestorationSpec::<Record>::new("V1"),
            Err(SpecError::InvalidName(NameError::InvalidChar { .. }))
        ));
        let result = RestorationSpec::new("v1")
            .unwrap()
            .with_group("spec.template", spec_restorer());
        assert!(matches!(result, Err(SpecError::InvalidName(_))));
    }
}
