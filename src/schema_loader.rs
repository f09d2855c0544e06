//! Shared JSON Schema loader with optional version enforcement.
//!
//! Callers hand in schema text (usually embedded), enforce the
//! allowed `schema_version` set, optionally patch the schema's
//! `schema_version` const, and compile a JSONSchema validator from the result.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Controls how schemas are normalized before compilation.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Override schema_version when provided (used to align consts).
    pub expected_version: Option<&'a str>,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
    /// Patch the schema_version const in the schema payload to match
    /// `expected_version` (or the extracted version when no override is set).
    pub patch_schema_version_const: bool,
}

impl<'a> Default for SchemaLoadOptions<'a> {
    fn default() -> Self {
        Self {
            schema_version_pointer: "/properties/schema_version/const",
            expected_version: None,
            allowed_versions: None,
            patch_schema_version_const: false,
        }
    }
}

/// Load a schema from text already in memory; `origin` only labels error
/// messages.
pub(crate) fn load_json_schema_str(
    raw: &str,
    origin: &str,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let schema_value: Value =
        serde_json::from_str(raw).with_context(|| format!("parsing schema {origin}"))?;

    let schema_version = if let Some(version) = options.expected_version {
        version.to_string()
    } else {
        extract_schema_version(&schema_value, options.schema_version_pointer)
            .ok_or_else(|| anyhow!("schema missing schema_version const"))?
    };

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let mut schema_for_compile = schema_value;
    if options.patch_schema_version_const {
        let target = schema_for_compile
            .pointer_mut(options.schema_version_pointer)
            .ok_or_else(|| {
                anyhow!(
                    "schema missing pointer {} for schema_version const",
                    options.schema_version_pointer
                )
            })?;
        *target = Value::String(schema_version.clone());
    }

    // Compilation errors borrow the schema, so flatten them to text here.
    let compiled = JSONSchema::compile(&schema_for_compile)
        .map_err(|err| anyhow!("compiling schema {origin}: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

/// Validate `instance`, joining every violation into one error message.
pub(crate) fn validate_instance(
    compiled: &JSONSchema,
    instance: &Value,
    origin: &str,
) -> Result<()> {
    if let Err(errors) = compiled.validate(instance) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("{origin} failed schema validation:\n{details}");
    }
    Ok(())
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
