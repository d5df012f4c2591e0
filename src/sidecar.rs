//! Schema and codec for the per-folder sidecar file, `file_groups.yaml`.
//!
//! The on-disk layout is a `file_groups` mapping whose keys are section keys
//! and whose values are `{header, files}` bodies. The default section uses the
//! reserved key `top` (the legacy key `default` is accepted on load and
//! rewritten to `top` at the next save); every other key is a positive decimal
//! integer. Keys are display-order bookkeeping only: save renumbers them
//! contiguously from 1, so they are not stable identifiers across saves.
//!
//! Decoding is strict: anything that fails validation is a parse error and the
//! caller falls back to a synthesized document rather than guessing.

use crate::document::{GroupingDocument, DEFAULT_HEADER};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Name of the sidecar metadata file, one per managed folder.
pub const SIDECAR_FILE: &str = "file_groups.yaml";
/// Reserved serialization key for the default section.
pub const DEFAULT_KEY: &str = "top";
/// Legacy reserved key, migrated to [`DEFAULT_KEY`] at the next save.
pub const LEGACY_DEFAULT_KEY: &str = "default";

const ROOT_KEY: &str = "file_groups";

#[derive(Serialize, Deserialize)]
struct SectionBody {
    header: String,
    files: Vec<String>,
}

/// Decodes sidecar text into `(header, files)` pairs in display order: the
/// default section first, then the remaining sections ordered by the numeric
/// value of their keys ascending.
///
/// A document with no default-keyed entry yields an implicit empty default
/// section. Duplicate filenames across sections survive here and are dropped
/// keep-first when the [`GroupingDocument`] is built.
///
/// # Errors
///
/// [`AppError::Parse`] if the text is not valid YAML, the `file_groups`
/// mapping is missing, a key is neither reserved nor a positive decimal
/// integer, both reserved keys appear, a body does not match the
/// `{header, files}` schema, or a filename is empty or contains a path
/// separator.
pub fn decode(text: &str) -> Result<Vec<(String, Vec<String>)>> {
    let root: Value =
        serde_yaml::from_str(text).map_err(|e| AppError::parse(e.to_string()))?;
    let groups = root
        .get(ROOT_KEY)
        .and_then(Value::as_mapping)
        .ok_or_else(|| AppError::parse(format!("missing {ROOT_KEY} mapping")))?;

    let mut default: Option<SectionBody> = None;
    let mut numbered: Vec<(u64, SectionBody)> = Vec::new();
    for (key, value) in groups {
        let key = key_string(key)?;
        let body: SectionBody = serde_yaml::from_value(value.clone())
            .map_err(|e| AppError::parse(format!("section {key}: {e}")))?;
        validate_files(&key, &body.files)?;
        if key == DEFAULT_KEY || key == LEGACY_DEFAULT_KEY {
            if default.is_some() {
                return Err(AppError::parse("more than one default section key"));
            }
            default = Some(body);
        } else {
            let n: u64 = key
                .parse()
                .map_err(|_| AppError::parse(format!("unrecognized section key {key}")))?;
            if n == 0 {
                return Err(AppError::parse("section keys start at 1"));
            }
            numbered.push((n, body));
        }
    }
    numbered.sort_unstable_by_key(|(n, _)| *n);

    let default = default.unwrap_or(SectionBody {
        header: DEFAULT_HEADER.to_string(),
        files: Vec::new(),
    });
    let mut out = Vec::with_capacity(numbered.len() + 1);
    out.push((default.header, default.files));
    for (_, body) in numbered {
        out.push((body.header, body.files));
    }
    Ok(out)
}

/// Encodes a document deterministically: the default section first under
/// [`DEFAULT_KEY`], then each remaining section keyed by its display index,
/// contiguous from 1 regardless of any previously persisted keys.
///
/// # Errors
///
/// [`AppError::Parse`] if YAML serialization fails, which indicates a bug
/// rather than bad input.
pub fn encode(doc: &GroupingDocument) -> Result<String> {
    let mut groups = Mapping::new();
    for (index, section) in doc.sections().iter().enumerate() {
        let key = if index == 0 {
            DEFAULT_KEY.to_string()
        } else {
            index.to_string()
        };
        let body = SectionBody {
            header: section.header.clone(),
            files: section.files.clone(),
        };
        let value =
            serde_yaml::to_value(body).map_err(|e| AppError::parse(e.to_string()))?;
        groups.insert(Value::String(key), value);
    }
    let mut root = Mapping::new();
    root.insert(
        Value::String(ROOT_KEY.to_string()),
        Value::Mapping(groups),
    );
    serde_yaml::to_string(&Value::Mapping(root)).map_err(|e| AppError::parse(e.to_string()))
}

fn key_string(key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(AppError::parse("section keys must be strings or integers")),
    }
}

fn validate_files(key: &str, files: &[String]) -> Result<()> {
    for name in files {
        if name.is_empty() {
            return Err(AppError::parse(format!("section {key}: empty filename")));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(AppError::parse(format!(
                "section {key}: {name} contains a path separator"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/sidecar.rs"]
mod tests;
