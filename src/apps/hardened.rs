//! Route handlers with the fixes applied

use crate::error::{AchillesError, Result};
use crate::models::Variant;
use serde_yaml::Value;
use tera::{Context, Tera};

/// Maximum accepted size of a configuration body, in bytes
const MAX_CONFIG_BYTES: usize = 64 * 1024;

/// Maximum nesting depth of a configuration document
const MAX_DEPTH: usize = 16;

const SEARCH_TEMPLATE: &str = "<h1>Search Results for: {{ query }}</h1>";

/// Demo app exposing the same routes with the vulnerabilities closed
pub struct HardenedApp;

impl super::DemoApp for HardenedApp {
    fn variant(&self) -> Variant {
        Variant::Hardened
    }

    fn home(&self) -> String {
        Variant::Hardened.banner().to_string()
    }

    fn search(&self, query: &str) -> Result<String> {
        // Rendered with autoescape on, so the query arrives entity-escaped.
        let mut context = Context::new();
        context.insert("query", query);
        Ok(Tera::one_off(SEARCH_TEMPLATE, &context, true)?)
    }

    fn load_config(&self, body: &[u8]) -> Result<String> {
        if body.len() > MAX_CONFIG_BYTES {
            return Err(AchillesError::UnsafeYaml(format!(
                "configuration body exceeds {MAX_CONFIG_BYTES} bytes"
            )));
        }

        let value: Value = serde_yaml::from_slice(body)?;
        ensure_plain(&value, 0)?;
        Ok(serde_yaml::to_string(&value)?)
    }
}

/// Accepts only plain scalars, sequences, and mappings. Tagged nodes and
/// excessive nesting are rejected.
fn ensure_plain(value: &Value, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(AchillesError::UnsafeYaml(format!(
            "nesting deeper than {MAX_DEPTH} levels"
        )));
    }

    match value {
        Value::Tagged(tagged) => Err(AchillesError::UnsafeYaml(format!(
            "tagged node '{}' is not allowed",
            tagged.tag
        ))),
        Value::Sequence(items) => {
            for item in items {
                ensure_plain(item, depth + 1)?;
            }
            Ok(())
        }
        Value::Mapping(map) => {
            for (key, val) in map {
                ensure_plain(key, depth + 1)?;
                ensure_plain(val, depth + 1)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
