//! Building blocks of the `fidelity` binary
//!
//! Config and document loading, output rendering and the round-trip summary.
//! Kept out of `main.rs` so they can be tested without spawning a process.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use anyhow::{Context, Result};
use clap::ValueEnum;
use fidelity_api::RoundTrip;
use fidelity_core::{ConversionReport, FidelityConfig, Loss, Restoration};
use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// YAML document
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

/// Load engine configuration from an optional TOML file
///
/// Missing keys fall back to their defaults.
///
/// # Errors
/// Returns error if the file cannot be read, is not valid TOML, or holds an
/// invalid annotation prefix
pub fn load_config(path: Option<&Path>) -> Result<FidelityConfig> {
    let Some(path) = path else {
        tracing::debug!("no config file given, using defaults");
        return Ok(FidelityConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: FidelityConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;

    tracing::debug!(
        "loaded config from {}: prefix={} on_corrupt={:?}",
        path.display(),
        config.annotation_prefix,
        config.on_corrupt
    );
    Ok(config)
}

/// Read a manifest from disk
///
/// YAML is a superset of JSON, so both encodings are accepted.
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn read_document(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse a manifest from text
///
/// # Errors
/// Returns error if the text is neither YAML nor JSON
pub fn parse_document(text: &str) -> Result<Value> {
    Ok(serde_yaml::from_str(text)?)
}

/// Encode a document for output
///
/// # Errors
/// Returns error if the value cannot be encoded
pub fn render(value: &Value, format: Format) -> Result<String> {
    match format {
        Format::Yaml => Ok(serde_yaml::to_string(value)?),
        Format::Json => {
            let mut out = serde_json::to_string_pretty(value)?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Whether every group lost on the way out came back on the way home
#[must_use]
pub fn is_lossless(trip: &RoundTrip) -> bool {
    let (Some(there), Some(back)) = (&trip.there.report, &trip.back.report) else {
        return true;
    };
    there
        .lossy_groups()
        .all(|group| back.restored.get(group).is_some_and(|r| r.restored()))
}

/// Human-readable account of a round trip
#[must_use]
pub fn describe_round_trip(trip: &RoundTrip) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} -> {} -> {}",
        trip.there.kind, trip.there.from, trip.there.to, trip.back.to
    );

    if trip.there.kind.is_list() {
        let _ = writeln!(out, "lists carry no fidelity entries");
        return out;
    }

    if let (Some(there), Some(back)) = (&trip.there.report, &trip.back.report) {
        describe_recorded(&mut out, there);
        describe_restored(&mut out, back);
    }
    let verdict = if is_lossless(trip) { "yes" } else { "no" };
    let _ = writeln!(out, "lossless: {verdict}");
    out
}

fn describe_recorded(out: &mut String, report: &ConversionReport) {
    let _ = writeln!(out, "recorded {}:", report.direction);
    for (group, loss) in &report.recorded {
        let entry = match loss {
            Loss::None => "fingerprint",
            Loss::Structural => "fingerprint + payload",
        };
        let _ = writeln!(out, "  {:<16} {entry}", group.as_str());
    }
}

fn describe_restored(out: &mut String, report: &ConversionReport) {
    let _ = writeln!(out, "restored {}:", report.direction);
    for (group, restoration) in &report.restored {
        let outcome = match restoration {
            Restoration::Untracked => "untracked",
            Restoration::Restored => "restored",
            Restoration::RestoredUnobserved => "restored (no fingerprint)",
            Restoration::KeptEdit => "kept edit",
            Restoration::Discarded => "discarded",
        };
        let _ = writeln!(out, "  {:<16} {outcome}", group.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidelity_core::CorruptPolicy;

    #[test]
    fn no_config_means_defaults() {
        assert_eq!(load_config(None).unwrap(), FidelityConfig::default());
    }

    #[test]
    fn json_text_parses_as_document() {
        let value = parse_document(r#"{"apiVersion": "v1", "kind": "Thing"}"#).unwrap();
        assert_eq!(value["kind"], "Thing");
    }

    #[test]
    fn yaml_text_parses_as_document() {
        let value = parse_document("apiVersion: v1\nkind: Thing\nspec:\n  size: 3\n").unwrap();
        assert_eq!(value["spec"]["size"], 3);
    }

    #[test]
    fn json_output_ends_with_newline() {
        let value = serde_json::json!({"kind": "Thing"});
        let out = render(&value, Format::Json).unwrap();
        assert!(out.ends_with("}\n"));
        assert_eq!(parse_document(&out).unwrap(), value);
    }

    #[test]
    fn corrupt_policy_is_lowercase_in_toml() {
        let config: FidelityConfig = toml::from_str("on_corrupt = \"discard\"").unwrap();
        assert_eq!(config.on_corrupt, CorruptPolicy::Discard);
    }
}
