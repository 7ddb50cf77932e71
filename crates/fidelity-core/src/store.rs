//! Fidelity fingerprint store
//!
//! A thin view over a record's annotations. Entries are addressed by a
//! conversion [`Direction`] and a [`GroupName`]; each entry has a fingerprint
//! and, for groups that lost information, a restore payload.
//!
//! # Key layout
//!
//! ```text
//! {prefix}/v1.{from}.{to}.{group}.hash
//! {prefix}/v1.{from}.{to}.{group}.data
//! ```
//!
//! Version tags and group names never contain `.` or `/`, so the layout is
//! injective over `(direction, group, kind)`.

use crate::config::FidelityConfig;
use crate::hash::{Fingerprint, HashError};
use crate::meta::Annotations;
use crate::name::{GroupName, VersionTag};
use std::fmt::{self, Display, Formatter};

/// Version of the key layout, bumped if the layout ever changes
pub const KEY_SCHEME_VERSION: &str = "v1";

/// One direction of conversion between two schema versions
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Direction {
    from: VersionTag,
    to: VersionTag,
}

impl Direction {
    /// Create a direction
    #[inline]
    #[must_use]
    pub fn new(from: VersionTag, to: VersionTag) -> Self {
        Self { from, to }
    }

    /// Source version
    #[inline]
    #[must_use]
    pub fn from(&self) -> &VersionTag {
        &self.from
    }

    /// Destination version
    #[inline]
    #[must_use]
    pub fn to(&self) -> &VersionTag {
        &self.to
    }

    /// The opposite direction
    #[inline]
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Which half of an entry a key addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Hex fingerprint
    Hash,
    /// JSON restore payload
    Data,
}

impl EntryKind {
    fn suffix(self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::Data => "data",
        }
    }
}

/// Derives annotation keys for engine entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScheme {
    prefix: String,
}

impl KeyScheme {
    /// Scheme rooted at `prefix`
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Scheme for a configuration
    #[must_use]
    pub fn from_config(config: &FidelityConfig) -> Self {
        Self::new(config.annotation_prefix.clone())
    }

    /// Annotation key of one entry half
    #[must_use]
    pub fn key(&self, direction: &Direction, group: &GroupName, kind: EntryKind) -> String {
        format!(
            "{}/{}.{}.{}.{}.{}",
            self.prefix,
            KEY_SCHEME_VERSION,
            direction.from(),
            direction.to(),
            group,
            kind.suffix()
        )
    }

    /// Whether an annotation key belongs to the engine
    #[must_use]
    pub fn owns(&self, key: &str) -> bool {
        key.strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|rest| rest.strip_prefix(KEY_SCHEME_VERSION))
            .is_some_and(|rest| rest.starts_with('.'))
    }
}

impl Default for KeyScheme {
    fn default() -> Self {
        Self::from_config(&FidelityConfig::default())
    }
}

/// Fingerprint store over an annotation map
///
/// Reads and writes go straight to the borrowed map. The orchestrator points
/// it at a working copy and only attaches that copy to the output record once
/// the whole conversion has succeeded.
#[derive(Debug)]
pub struct FingerprintStore<'a> {
    channel: &'a mut Annotations,
    keys: &'a KeyScheme,
}

impl<'a> FingerprintStore<'a> {
    /// View over `channel`
    pub fn new(channel: &'a mut Annotations, keys: &'a KeyScheme) -> Self {
        Self { channel, keys }
    }

    /// Stored fingerprint, if any
    ///
    /// # Errors
    /// Returns error if the stored value is not a valid fingerprint
    pub fn get(
        &self,
        direction: &Direction,
        group: &GroupName,
    ) -> Result<Option<Fingerprint>, HashError> {
        self.raw(direction, group, EntryKind::Hash)
            .map(str::parse)
            .transpose()
    }

    /// Store a fingerprint
    pub fn set(&mut self, direction: &Direction, group: &GroupName, fingerprint: Fingerprint) {
        let key = self.keys.key(direction, group, EntryKind::Hash);
        self.channel.insert(key, fingerprint.to_string());
    }

    /// Remove the whole entry (fingerprint and payload)
    pub fn clear(&mut self, direction: &Direction, group: &GroupName) {
        self.channel
            .remove(&self.keys.key(direction, group, EntryKind::Hash));
        self.clear_payload(direction, group);
    }

    /// Stored restore payload, if any
    #[must_use]
    pub fn payload(&self, direction: &Direction, group: &GroupName) -> Option<&str> {
        self.raw(direction, group, EntryKind::Data)
    }

    /// Store a restore payload
    pub fn set_payload(&mut self, direction: &Direction, group: &GroupName, payload: String) {
        let key = self.keys.key(direction, group, EntryKind::Data);
        self.channel.insert(key, payload);
    }

    /// Remove a restore payload
    pub fn clear_payload(&mut self, direction: &Direction, group: &GroupName) {
        self.channel
            .remove(&self.keys.key(direction, group, EntryKind::Data));
    }

    /// Whether any half of the entry exists
    #[must_use]
    pub fn contains(&self, direction: &Direction, group: &GroupName) -> bool {
        self.raw(direction, group, EntryKind::Hash).is_some()
            || self.raw(direction, group, EntryKind::Data).is_some()
    }

    /// Key of one entry half, for diagnostics
    #[must_use]
    pub fn key(&self, direction: &Direction, group: &GroupName, kind: EntryKind) -> String {
        self.keys.key(direction, group, kind)
    }

    fn raw(&self, direction: &Direction, group: &GroupName, kind: EntryKind) -> Option<&str> {
        self.channel
            .get(&self.keys.key(direction, group, kind))
            .map(String::as_str)
    }
}
