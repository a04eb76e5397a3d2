//! Script-embeddable serialization of the catalog and descriptions.
//!
//! Output has the form `const <binding> = <json>;` so the page can load
//! it with a plain `<script>` tag. JSON is pretty-printed with four-space
//! indentation and keys in the builder's (sorted) order, which keeps the
//! files diffable between rebuilds.

use serde::de::DeserializeOwned;
use serde::Serialize;

use gallery_common::{GalleryError, GalleryResult};

use crate::descriptions::VariableDescriptions;
use crate::types::Catalog;

/// Default bound name of the catalog in `data.js`.
pub const CATALOG_BINDING: &str = "simulationData";

/// Default bound name of the description table in the viewer page.
pub const DESCRIPTIONS_BINDING: &str = "variableDescriptions";

/// Serialize `value` as `const <binding> = <json>;\n`.
pub fn to_script<T: Serialize>(binding: &str, value: &T) -> GalleryResult<String> {
    validate_binding(binding)?;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    let json = String::from_utf8(buf).map_err(|e| GalleryError::Serialize(e.to_string()))?;

    Ok(format!("const {} = {};\n", binding, json))
}

/// Parse text produced by [`to_script`] back into a value.
pub fn from_script<T: DeserializeOwned>(binding: &str, text: &str) -> GalleryResult<T> {
    let prefix = format!("const {} = ", binding);
    let json = text
        .trim()
        .strip_prefix(prefix.as_str())
        .and_then(|rest| rest.strip_suffix(';'))
        .ok_or_else(|| {
            GalleryError::Serialize(format!("expected `{}<json>;` assignment", prefix))
        })?;

    Ok(serde_json::from_str(json)?)
}

pub fn catalog_script(binding: &str, catalog: &Catalog) -> GalleryResult<String> {
    to_script(binding, catalog)
}

pub fn descriptions_script(
    binding: &str,
    descriptions: &VariableDescriptions,
) -> GalleryResult<String> {
    to_script(binding, descriptions)
}

/// A binding must be a plain JavaScript identifier.
pub fn validate_binding(binding: &str) -> GalleryResult<()> {
    let mut chars = binding.chars();
    let valid_start = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(GalleryError::Config(format!(
            "invalid script binding name: {:?}",
            binding
        )))
    }
}
