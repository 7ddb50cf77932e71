//! Conversion orchestrator
//!
//! Drives one structural conversion between two schema versions and keeps
//! information that the target version cannot represent from being lost.
//!
//! # Algorithm
//! For a call converting `original: S` into `D` (direction `S -> D`):
//!
//! 1. `candidate = forward(original)`
//! 2. Restore pass over the destination spec: every group that a previous
//!    `D -> S` call recorded as lossy is spliced back into `candidate`, unless
//!    its fingerprint shows the group was edited on the `S` side since.
//! 3. `shadow = backward(candidate)`, the uninformed round trip.
//! 4. Record pass over the source spec: fingerprint each group as the
//!    round trip reproduces it, and keep the original value of every group
//!    the round trip did not reproduce.
//! 5. Attach the updated side channel to `candidate` and return it.
//!
//! Nothing is written to any record until every group has resolved, so a
//! failed call has no side effects.

use crate::config::{ConfigError, CorruptPolicy, FidelityConfig};
use crate::error::{ConversionError, StructuralError};
use crate::meta::{ObjectMeta, Resource};
use crate::name::GroupName;
use crate::spec::RestorationSpec;
use crate::store::{Direction, EntryKind, FingerprintStore, KeyScheme};
use std::collections::BTreeMap;

/// Outcome of the restore pass for one destination group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restoration {
    /// No payload recorded; the converted value stands
    Untracked,
    /// Fingerprint matched; payload spliced back
    Restored,
    /// Payload present but no fingerprint yet; payload spliced back
    RestoredUnobserved,
    /// Fingerprint differed; the source was edited and the converted value stands
    KeptEdit,
    /// Entry could not be decoded and was dropped
    Discarded,
}

impl Restoration {
    /// Whether a stored payload was spliced into the output
    #[inline]
    #[must_use]
    pub fn restored(self) -> bool {
        matches!(self, Self::Restored | Self::RestoredUnobserved)
    }
}

/// Outcome of the record pass for one source group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loss {
    /// Round trip reproduced the group
    None,
    /// Round trip lost information; original value stored for restoration
    Structural,
}

/// Per-group account of one conversion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Direction of the call
    pub direction: Direction,
    /// Restore pass result per destination group
    pub restored: BTreeMap<GroupName, Restoration>,
    /// Record pass result per source group
    pub recorded: BTreeMap<GroupName, Loss>,
}

impl ConversionReport {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            restored: BTreeMap::new(),
            recorded: BTreeMap::new(),
        }
    }

    /// Source groups the target version could not represent
    pub fn lossy_groups(&self) -> impl Iterator<Item = &GroupName> {
        self.recorded
            .iter()
            .filter(|(_, loss)| **loss == Loss::Structural)
            .map(|(name, _)| name)
    }

    /// Destination groups that received a stored value
    pub fn restored_groups(&self) -> impl Iterator<Item = &GroupName> {
        self.restored
            .iter()
            .filter(|(_, r)| r.restored())
            .map(|(name, _)| name)
    }
}

/// Runs fingerprint-guarded conversions
///
/// Holds only configuration; share one instance for the whole process.
#[derive(Debug, Clone)]
pub struct ConversionOrchestrator {
    config: FidelityConfig,
    keys: KeyScheme,
}

impl ConversionOrchestrator {
    /// Create an orchestrator
    ///
    /// # Errors
    /// Returns error if the configuration is invalid
    pub fn new(config: FidelityConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let keys = KeyScheme::from_config(&config);
        Ok(Self { config, keys })
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &FidelityConfig {
        &self.config
    }

    /// Key scheme in use
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &KeyScheme {
        &self.keys
    }

    /// Convert `original` and reconcile losses in both directions
    ///
    /// # Errors
    /// Returns error if either structural converter fails, or a stored entry
    /// is corrupt and the policy is [`CorruptPolicy::Fail`]
    pub fn convert_and_restore<S, D, Fw, Bw>(
        &self,
        original: &S,
        forward: Fw,
        backward: Bw,
        spec_src: &RestorationSpec<S>,
        spec_dst: &RestorationSpec<D>,
    ) -> Result<D, ConversionError>
    where
        S: Resource,
        D: Resource,
        Fw: Fn(&S) -> Result<D, StructuralError>,
        Bw: Fn(&D) -> Result<S, StructuralError>,
    {
        self.convert_with_report(original, forward, backward, spec_src, spec_dst)
            .map(|(converted, _)| converted)
    }

    /// Same as [`convert_and_restore`](Self::convert_and_restore), also
    /// returning the per-group decisions
    ///
    /// # Errors
    /// See [`convert_and_restore`](Self::convert_and_restore)
    pub fn convert_with_report<S, D, Fw, Bw>(
        &self,
        original: &S,
        forward: Fw,
        backward: Bw,
        spec_src: &RestorationSpec<S>,
        spec_dst: &RestorationSpec<D>,
    ) -> Result<(D, ConversionReport), ConversionError>
    where
        S: Resource,
        D: Resource,
        Fw: Fn(&S) -> Result<D, StructuralError>,
        Bw: Fn(&D) -> Result<S, StructuralError>,
    {
        let direction = Direction::new(spec_src.version().clone(), spec_dst.version().clone());
        let mut report = ConversionReport::new(direction.clone());

        let mut candidate = forward(original)?;

        let mut channel = original.meta().annotations.clone();
        let mut store = FingerprintStore::new(&mut channel, &self.keys);

        self.restore_pass(&mut candidate, &direction, spec_dst, &mut store, &mut report)?;

        let shadow = backward(&candidate)?;

        Self::record_pass(original, &shadow, &direction, spec_src, &mut store, &mut report)?;

        *candidate.meta_mut() = ObjectMeta {
            annotations: channel,
            ..original.meta().clone()
        };

        tracing::debug!(
            "Converted {} ({}): {} lossy, {} restored",
            original.meta().name,
            direction,
            report.lossy_groups().count(),
            report.restored_groups().count()
        );
        Ok((candidate, report))
    }

    fn restore_pass<D>(
        &self,
        candidate: &mut D,
        direction: &Direction,
        spec: &RestorationSpec<D>,
        store: &mut FingerprintStore<'_>,
        report: &mut ConversionReport,
    ) -> Result<(), ConversionError> {
        // Entries for the destination version were left by the last call that
        // converted this resource the other way.
        let recorded_by = direction.reverse();

        for (name, restorer) in spec.iter() {
            let outcome = match store.payload(&recorded_by, name).map(str::to_owned) {
                None => Restoration::Untracked,
                Some(payload) => {
                    let decision = match store.get(&recorded_by, name) {
                        Ok(None) => Restoration::RestoredUnobserved,
                        Ok(Some(previous)) => {
                            let current = restorer.fingerprint(candidate).map_err(|source| {
                                ConversionError::Encode {
                                    group: name.clone(),
                                    source,
                                }
                            })?;
                            if previous == current {
                                Restoration::Restored
                            } else {
                                Restoration::KeptEdit
                            }
                        }
                        Err(e) => {
                            let key = store.key(&recorded_by, name, EntryKind::Hash);
                            self.on_corrupt(name, key, e.to_string())?
                        }
                    };

                    if decision.restored() {
                        match restorer.restore(candidate, &payload) {
                            Ok(()) => decision,
                            Err(e) => {
                                let key = store.key(&recorded_by, name, EntryKind::Data);
                                self.on_corrupt(name, key, e.to_string())?
                            }
                        }
                    } else {
                        decision
                    }
                }
            };

            match outcome {
                Restoration::Restored => {
                    tracing::debug!("Restored group '{}' recorded by {}", name, recorded_by);
                }
                Restoration::RestoredUnobserved => {
                    tracing::debug!(
                        "Restored group '{}' recorded by {} without fingerprint",
                        name,
                        recorded_by
                    );
                }
                Restoration::KeptEdit => {
                    tracing::debug!(
                        "Group '{}' changed since {}, keeping converted value",
                        name,
                        recorded_by
                    );
                }
                Restoration::Untracked => {
                    if store.contains(&recorded_by, name) {
                        tracing::debug!("Group '{}' reproduced cleanly by {}", name, recorded_by);
                    }
                }
                Restoration::Discarded => {}
            }

            store.clear(&recorded_by, name);
            report.restored.insert(name.clone(), outcome);
        }
        Ok(())
    }

    fn record_pass<S>(
        original: &S,
        shadow: &S,
        direction: &Direction,
        spec: &RestorationSpec<S>,
        store: &mut FingerprintStore<'_>,
        report: &mut ConversionReport,
    ) -> Result<(), ConversionError> {
        for (name, restorer) in spec.iter() {
            let encode = |source| ConversionError::Encode {
                group: name.clone(),
                source,
            };

            let reproduced = restorer.fingerprint(shadow).map_err(encode)?;
            tracing::trace!(
                "Group '{}' fingerprint {} for {}",
                name,
                reproduced.short(),
                direction
            );
            store.set(direction, name, reproduced);

            let loss = if restorer.differs(original, shadow) {
                let payload = restorer.capture(original).map_err(encode)?;
                store.set_payload(direction, name, payload);
                Loss::Structural
            } else {
                store.clear_payload(direction, name);
                Loss::None
            };

            if loss == Loss::Structural {
                tracing::debug!("Group '{}' is lossy for {}, stored for restore", name, direction);
            }
            report.recorded.insert(name.clone(), loss);
        }
        Ok(())
    }

    fn on_corrupt(
        &self,
        group: &GroupName,
        key: String,
        reason: String,
    ) -> Result<Restoration, ConversionError> {
        match self.config.on_corrupt {
            CorruptPolicy::Fail => Err(ConversionError::CorruptRestoreData {
                group: group.clone(),
                key,
                reason,
            }),
            CorruptPolicy::Discard => {
                tracing::warn!("Discarding corrupt restore data at {}: {}", key, reason);
                Ok(Restoration::Discarded)
            }
        }
    }
}

impl Default for ConversionOrchestrator {
    fn default() -> Self {
        let config = FidelityConfig::default();
        let keys = KeyScheme::from_config(&config);
        Self { config, keys }
    }
}
