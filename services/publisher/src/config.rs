//! Publisher configuration.
//!
//! Loads `publisher.yaml`:
//! - `layout`: naming conventions of the rendered tree
//! - `output`: artifact file names and script bindings
//! - `site`: page text and presentation
//! - `descriptions`: variable description table overrides
//!
//! Supports environment variable substitution using ${VAR} syntax.
//! Every section is optional; omitted values fall back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use catalog::serialize::validate_binding;
use catalog::{CatalogLayout, VariableDescriptions, CATALOG_BINDING, DESCRIPTIONS_BINDING};
use site::SiteSettings;

// ============================================================================
// Configuration Types
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    pub layout: CatalogLayout,
    pub output: OutputConfig,
    pub site: SiteSettings,
    pub descriptions: DescriptionsConfig,
}

/// Names of the generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Catalog script written into each run directory.
    pub data_file: String,
    /// Viewer page written into each run directory.
    pub viewer_file: String,
    /// Landing page written at the root.
    pub index_file: String,
    pub catalog_binding: String,
    pub descriptions_binding: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_file: "data.js".to_string(),
            viewer_file: "index.html".to_string(),
            index_file: "index.html".to_string(),
            catalog_binding: CATALOG_BINDING.to_string(),
            descriptions_binding: DESCRIPTIONS_BINDING.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionsConfig {
    /// Extra `key: "<html>"` table merged over the built-in one.
    /// Relative paths resolve against the config file's directory.
    pub path: Option<PathBuf>,
    /// Replace the built-in table instead of merging into it.
    pub replace_builtin: bool,
    /// Text shown for variables without a description.
    pub placeholder: Option<String>,
}

impl DescriptionsConfig {
    /// Build the effective description table.
    pub fn load(&self, base_dir: Option<&Path>) -> Result<VariableDescriptions> {
        let mut table = match (&self.path, self.replace_builtin) {
            (Some(_), true) => VariableDescriptions::default(),
            _ => VariableDescriptions::builtin().context("Built-in description table is invalid")?,
        };

        if let Some(path) = &self.path {
            let path = match base_dir {
                Some(base) if path.is_relative() => base.join(path),
                _ => path.clone(),
            };
            let extra = VariableDescriptions::load(&path)
                .with_context(|| format!("Failed to load descriptions from {:?}", path))?;
            table.merge(extra);
        }

        Ok(match &self.placeholder {
            Some(placeholder) => table.with_placeholder(placeholder.clone()),
            None => table,
        })
    }
}

// ============================================================================
// Loading Functions
// ============================================================================

/// Load and parse the publisher config with environment variable substitution
pub fn load_publisher_config<P: AsRef<Path>>(path: P) -> Result<PublisherConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read publisher config from {:?}", path.as_ref()))?;

    parse_publisher_config(&content)
        .with_context(|| format!("Invalid publisher config {:?}", path.as_ref()))
}

/// Parse and validate config text.
pub fn parse_publisher_config(content: &str) -> Result<PublisherConfig> {
    let expanded = expand_env_vars(content)?;

    // An empty document means "all defaults".
    let config: PublisherConfig = if expanded.trim().is_empty() {
        PublisherConfig::default()
    } else {
        serde_yaml::from_str(&expanded).with_context(|| "Failed to parse publisher config YAML")?
    };

    validate_publisher_config(&config)?;

    Ok(config)
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand `${VAR}` and `${VAR:-default}` in the YAML text.
///
/// Substitution is line by line and comments are copied untouched, so a
/// comment may show the syntax without naming a real variable.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());

    for (number, line) in content.split_inclusive('\n').enumerate() {
        let (code, comment) = split_comment(line);
        expand_line(code, &mut result).with_context(|| format!("line {}", number + 1))?;
        result.push_str(comment);
    }

    Ok(result)
}

/// Split a YAML line at the `#` that opens its comment, if any.
///
/// A comment starts at a `#` at the start of the line or after
/// whitespace, outside a quoted scalar.
fn split_comment(line: &str) -> (&str, &str) {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    for (i, ch) in line.char_indices() {
        let token_start = prev.map_or(true, |p| p.is_whitespace() || matches!(p, '[' | '{' | ','));
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if ch == '\\' => escaped = true,
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '#' && token_start => return line.split_at(i),
            None if (ch == '"' || ch == '\'') && token_start => quote = Some(ch),
            None => {}
        }
        prev = Some(ch);
    }

    (line, "")
}

/// Expand the substitutions of one comment-free line into `out`.
fn expand_line(code: &str, out: &mut String) -> Result<()> {
    let mut chars = code.chars();

    while let Some(ch) = chars.next() {
        if ch != '$' || !chars.as_str().starts_with('{') {
            out.push(ch);
            continue;
        }
        chars.next(); // '{'

        let rest = chars.as_str();
        let Some(close) = rest.find('}') else {
            anyhow::bail!("Unclosed variable substitution: ${{{}", rest.trim_end());
        };
        out.push_str(&resolve_var_expr(&rest[..close])?);
        chars = rest[close + 1..].chars();
    }

    Ok(())
}

/// Resolve variable expression (supports VAR and VAR:-default syntax)
fn resolve_var_expr(expr: &str) -> Result<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match std::env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim())
            .with_context(|| format!("Environment variable {} not set", expr))
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_publisher_config(config: &PublisherConfig) -> Result<()> {
    config.layout.validate()?;
    config.site.validate()?;

    let output = &config.output;
    for (field, name) in [
        ("data_file", &output.data_file),
        ("viewer_file", &output.viewer_file),
        ("index_file", &output.index_file),
    ] {
        anyhow::ensure!(!name.is_empty(), "output.{} cannot be empty", field);
        anyhow::ensure!(
            !name.contains(['/', '\\']) && name != "." && name != "..",
            "output.{} must be a plain file name, got {:?}",
            field,
            name
        );
    }
    anyhow::ensure!(
        output.data_file != output.viewer_file,
        "output.data_file and output.viewer_file must differ"
    );

    validate_binding(&output.catalog_binding)?;
    validate_binding(&output.descriptions_binding)?;
    anyhow::ensure!(
        output.catalog_binding != output.descriptions_binding,
        "output.catalog_binding and output.descriptions_binding must differ"
    );

    if let Some(placeholder) = &config.descriptions.placeholder {
        anyhow::ensure!(
            !placeholder.trim().is_empty(),
            "descriptions.placeholder cannot be blank"
        );
    }
    anyhow::ensure!(
        !config.descriptions.replace_builtin || config.descriptions.path.is_some(),
        "descriptions.replace_builtin requires descriptions.path"
    );

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
