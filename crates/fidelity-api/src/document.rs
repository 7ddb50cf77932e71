//! Untyped document conversion
//!
//! Reads the `apiVersion`/`kind` header of a JSON value, decodes it into the
//! matching typed record, converts it and encodes the result back. Used by
//! the command-line tool and anything else that handles raw manifests.

use crate::v1alpha7::{self, convert};
use crate::v1alpha8;
use crate::Conversions;
use fidelity_core::{ConversionError, ConversionReport, StructuralError, TypeMeta};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// API group of every kind in this crate
pub const GROUP: &str = "infrastructure.cluster.x-k8s.io";

/// Served schema versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// Older, converts through the hub
    V1alpha7,
    /// Storage version
    V1alpha8,
}

impl ApiVersion {
    /// Version tag, e.g. `v1alpha8`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1alpha7 => v1alpha7::VERSION,
            Self::V1alpha8 => v1alpha8::VERSION,
        }
    }

    /// Full `apiVersion` string
    #[must_use]
    pub fn api_version(self) -> &'static str {
        match self {
            Self::V1alpha7 => v1alpha7::API_VERSION,
            Self::V1alpha8 => v1alpha8::API_VERSION,
        }
    }

    /// The other served version
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::V1alpha7 => Self::V1alpha8,
            Self::V1alpha8 => Self::V1alpha7,
        }
    }
}

impl Display for ApiVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = DocumentError;

    /// Accepts a bare tag (`v1alpha7`) or a full `group/version`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = match s.split_once('/') {
            Some((GROUP, version)) => version,
            Some(_) => return Err(DocumentError::UnknownVersion(s.to_string())),
            None => s,
        };
        match version {
            v1alpha7::VERSION => Ok(Self::V1alpha7),
            v1alpha8::VERSION => Ok(Self::V1alpha8),
            _ => Err(DocumentError::UnknownVersion(s.to_string())),
        }
    }
}

/// Served kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `OpenStackCluster`
    OpenStackCluster,
    /// `OpenStackClusterList`
    OpenStackClusterList,
    /// `OpenStackClusterTemplate`
    OpenStackClusterTemplate,
    /// `OpenStackClusterTemplateList`
    OpenStackClusterTemplateList,
    /// `OpenStackMachine`
    OpenStackMachine,
    /// `OpenStackMachineList`
    OpenStackMachineList,
    /// `OpenStackMachineTemplate`
    OpenStackMachineTemplate,
    /// `OpenStackMachineTemplateList`
    OpenStackMachineTemplateList,
}

impl Kind {
    /// All kinds
    pub const ALL: [Self; 8] = [
        Self::OpenStackCluster,
        Self::OpenStackClusterList,
        Self::OpenStackClusterTemplate,
        Self::OpenStackClusterTemplateList,
        Self::OpenStackMachine,
        Self::OpenStackMachineList,
        Self::OpenStackMachineTemplate,
        Self::OpenStackMachineTemplateList,
    ];

    /// Kind name as it appears in `kind:`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenStackCluster => "OpenStackCluster",
            Self::OpenStackClusterList => "OpenStackClusterList",
            Self::OpenStackClusterTemplate => "OpenStackClusterTemplate",
            Self::OpenStackClusterTemplateList => "OpenStackClusterTemplateList",
            Self::OpenStackMachine => "OpenStackMachine",
            Self::OpenStackMachineList => "OpenStackMachineList",
            Self::OpenStackMachineTemplate => "OpenStackMachineTemplate",
            Self::OpenStackMachineTemplateList => "OpenStackMachineTemplateList",
        }
    }

    /// Whether the kind is a list (converted without fidelity tracking)
    #[must_use]
    pub fn is_list(self) -> bool {
        self.as_str().ends_with("List")
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DocumentError::UnknownKind(s.to_string()))
    }
}

/// Errors from untyped conversion
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// `apiVersion` or `kind` missing
    #[error("document has no apiVersion/kind header")]
    MissingHeader,

    /// Not a served version
    #[error("unsupported apiVersion '{0}'")]
    UnknownVersion(String),

    /// Not a served kind
    #[error("unsupported kind '{0}'")]
    UnknownKind(String),

    /// Body does not match the kind's schema
    #[error("invalid {kind} document: {source}")]
    Decode {
        kind: Kind,
        #[source]
        source: serde_json::Error,
    },

    /// Converted record could not be encoded
    #[error("failed to encode {kind}: {source}")]
    Encode {
        kind: Kind,
        #[source]
        source: serde_json::Error,
    },

    /// Conversion failed
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Result of converting one document
#[derive(Debug, Clone)]
pub struct Converted {
    /// Kind of the document
    pub kind: Kind,
    /// Version converted from
    pub from: ApiVersion,
    /// Version converted to
    pub to: ApiVersion,
    /// Converted document
    pub value: Value,
    /// Per-group decisions; `None` for lists and same-version passthrough
    pub report: Option<ConversionReport>,
}

/// Both legs of a round trip through the other version
#[derive(Debug, Clone)]
pub struct RoundTrip {
    /// Original version to the other one
    pub there: Converted,
    /// And back
    pub back: Converted,
}

/// Parse the `apiVersion`/`kind` header of a document
///
/// # Errors
/// Returns error if the header is missing or names something not served here
pub fn header(value: &Value) -> Result<(ApiVersion, Kind), DocumentError> {
    let meta = TypeMeta::deserialize(value).map_err(|_| DocumentError::MissingHeader)?;
    if meta.api_version.is_empty() || meta.kind.is_empty() {
        return Err(DocumentError::MissingHeader);
    }
    Ok((meta.api_version.parse()?, meta.kind.parse()?))
}

/// Convert a document to version `to`
///
/// A document already at `to` is returned unchanged.
///
/// # Errors
/// Returns error if the document cannot be decoded or the conversion fails
pub fn convert(value: &Value, to: ApiVersion, ctx: &Conversions) -> Result<Converted, DocumentError> {
    let (from, kind) = header(value)?;
    if from == to {
        tracing::info!("{} is already {}, passing through", kind, to);
        return Ok(Converted {
            kind,
            from,
            to,
            value: value.clone(),
            report: None,
        });
    }

    let (value, report) = dispatch(value, kind, to, ctx)?;
    Ok(Converted {
        kind,
        from,
        to,
        value,
        report,
    })
}

/// Convert a document to the other version and back
///
/// # Errors
/// Returns error if either leg fails
pub fn round_trip(value: &Value, ctx: &Conversions) -> Result<RoundTrip, DocumentError> {
    let (from, _) = header(value)?;
    let there = convert(value, from.other(), ctx)?;
    let back = convert(&there.value, from, ctx)?;
    Ok(RoundTrip { there, back })
}

type Outcome = (Value, Option<ConversionReport>);

fn decode<S: DeserializeOwned>(value: &Value, kind: Kind) -> Result<S, DocumentError> {
    S::deserialize(value).map_err(|source| DocumentError::Decode { kind, source })
}

fn encode<D: Serialize>(record: &D, kind: Kind) -> Result<Value, DocumentError> {
    serde_json::to_value(record).map_err(|source| DocumentError::Encode { kind, source })
}

fn tracked<S, D, F>(value: &Value, kind: Kind, convert: F) -> Result<Outcome, DocumentError>
where
    S: DeserializeOwned,
    D: Serialize,
    F: FnOnce(&S) -> Result<(D, ConversionReport), ConversionError>,
{
    let src: S = decode(value, kind)?;
    let (dst, report) = convert(&src)?;
    Ok((encode(&dst, kind)?, Some(report)))
}

fn untracked<S, D, F>(value: &Value, kind: Kind, convert: F) -> Result<Outcome, DocumentError>
where
    S: DeserializeOwned,
    D: Serialize,
    F: FnOnce(&S) -> Result<D, StructuralError>,
{
    let src: S = decode(value, kind)?;
    let dst = convert(&src).map_err(ConversionError::from)?;
    Ok((encode(&dst, kind)?, None))
}

macro_rules! up {
    ($value:expr, $kind:expr, $ctx:expr, $ty:ident, $group:ident, $to_hub:path, $from_hub:path) => {
        tracked($value, $kind, |s: &v1alpha7::$ty| {
            $ctx.orchestrator().convert_with_report(
                s,
                $to_hub,
                $from_hub,
                &$ctx.spoke().$group,
                &$ctx.hub().$group,
            )
        })
    };
}

macro_rules! down {
    ($value:expr, $kind:expr, $ctx:expr, $ty:ident, $group:ident, $to_hub:path, $from_hub:path) => {
        tracked($value, $kind, |s: &v1alpha8::$ty| {
            $ctx.orchestrator().convert_with_report(
                s,
                $from_hub,
                $to_hub,
                &$ctx.hub().$group,
                &$ctx.spoke().$group,
            )
        })
    };
}

fn dispatch(
    value: &Value,
    kind: Kind,
    to: ApiVersion,
    ctx: &Conversions,
) -> Result<Outcome, DocumentError> {
    use ApiVersion::{V1alpha7 as V7, V1alpha8 as V8};

    match (kind, to) {
        (Kind::OpenStackCluster, V8) => up!(
            value, kind, ctx, OpenStackCluster, cluster,
            convert::cluster_to_hub, convert::cluster_from_hub
        ),
        (Kind::OpenStackCluster, V7) => down!(
            value, kind, ctx, OpenStackCluster, cluster,
            convert::cluster_to_hub, convert::cluster_from_hub
        ),
        (Kind::OpenStackClusterTemplate, V8) => up!(
            value, kind, ctx, OpenStackClusterTemplate, cluster_template,
            convert::cluster_template_to_hub, convert::cluster_template_from_hub
        ),
        (Kind::OpenStackClusterTemplate, V7) => down!(
            value, kind, ctx, OpenStackClusterTemplate, cluster_template,
            convert::cluster_template_to_hub, convert::cluster_template_from_hub
        ),
        (Kind::OpenStackMachine, V8) => up!(
            value, kind, ctx, OpenStackMachine, machine,
            convert::machine_to_hub, convert::machine_from_hub
        ),
        (Kind::OpenStackMachine, V7) => down!(
            value, kind, ctx, OpenStackMachine, machine,
            convert::machine_to_hub, convert::machine_from_hub
        ),
        (Kind::OpenStackMachineTemplate, V8) => up!(
            value, kind, ctx, OpenStackMachineTemplate, machine_template,
            convert::machine_template_to_hub, convert::machine_template_from_hub
        ),
        (Kind::OpenStackMachineTemplate, V7) => down!(
            value, kind, ctx, OpenStackMachineTemplate, machine_template,
            convert::machine_template_to_hub, convert::machine_template_from_hub
        ),
        (Kind::OpenStackClusterList, V8) => untracked(value, kind, convert::cluster_list_to_hub),
        (Kind::OpenStackClusterList, V7) => {
            untracked(value, kind, convert::cluster_list_from_hub)
        }
        (Kind::OpenStackClusterTemplateList, V8) => {
            untracked(value, kind, convert::cluster_template_list_to_hub)
        }
        (Kind::OpenStackClusterTemplateList, V7) => {
            untracked(value, kind, convert::cluster_template_list_from_hub)
        }
        (Kind::OpenStackMachineList, V8) => untracked(value, kind, convert::machine_list_to_hub),
        (Kind::OpenStackMachineList, V7) => {
            untracked(value, kind, convert::machine_list_from_hub)
        }
        (Kind::OpenStackMachineTemplateList, V8) => {
            untracked(value, kind, convert::machine_template_list_to_hub)
        }
        (Kind::OpenStackMachineTemplateList, V7) => {
            untracked(value, kind, convert::machine_template_list_from_hub)
        }
    }
}
