//! Minimal `{{KEY}}` placeholder templates.

use std::collections::{BTreeMap, BTreeSet};

use gallery_common::{GalleryError, GalleryResult};

/// A page template with `{{KEY}}` placeholders.
///
/// Keys are upper-case ASCII letters, digits and underscores. Rendering
/// is strict: a placeholder without a value and a value that no
/// placeholder uses are both errors. Substituted values are never
/// rescanned.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    name: &'static str,
    source: &'static str,
}

impl Template {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn render(&self, values: &BTreeMap<&str, String>) -> GalleryResult<String> {
        let mut out = String::with_capacity(self.source.len());
        let mut used = BTreeSet::new();
        let mut rest = self.source;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                GalleryError::Template(format!("{}: unclosed placeholder", self.name))
            })?;

            let key = after[..end].trim();
            if key.is_empty()
                || !key
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
            {
                return Err(GalleryError::Template(format!(
                    "{}: malformed placeholder {{{{{}}}}}",
                    self.name, key
                )));
            }

            let value = values.get(key).ok_or_else(|| {
                GalleryError::Template(format!("{}: no value for {{{{{}}}}}", self.name, key))
            })?;
            out.push_str(value);
            used.insert(key);
            rest = &after[end + 2..];
        }
        out.push_str(rest);

        if let Some(unused) = values.keys().find(|k| !used.contains(*k)) {
            return Err(GalleryError::Template(format!(
                "{}: value {} is not used by the template",
                self.name, unused
            )));
        }

        Ok(out)
    }
}

/// Escape text for HTML element content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Make JSON safe to inline inside a `<script>` element.
pub(crate) fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&'static str, &str)]) -> BTreeMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_render_substitutes() {
        let t = Template::new("t", "<h1>{{TITLE}}</h1><p>{{ BODY }}</p>");
        let out = t.render(&values(&[("TITLE", "Oi"), ("BODY", "x")])).unwrap();
        assert_eq!(out, "<h1>Oi</h1><p>x</p>");
    }

    #[test]
    fn test_single_braces_untouched() {
        let t = Template::new("t", "body { margin: 0; } const a = `${b}`;");
        assert_eq!(t.render(&BTreeMap::new()).unwrap(), "body { margin: 0; } const a = `${b}`;");
    }

    #[test]
    fn test_values_not_rescanned() {
        let t = Template::new("t", "{{A}}");
        let out = t.render(&values(&[("A", "{{B}}")])).unwrap();
        assert_eq!(out, "{{B}}");
    }

    #[test]
    fn test_missing_value() {
        let t = Template::new("t", "{{A}}{{B}}");
        let err = t.render(&values(&[("A", "1")])).unwrap_err();
        assert!(err.to_string().contains("{{B}}"));
    }

    #[test]
    fn test_unused_value() {
        let t = Template::new("t", "{{A}}");
        assert!(t.render(&values(&[("A", "1"), ("B", "2")])).is_err());
    }

    #[test]
    fn test_malformed_and_unclosed() {
        assert!(Template::new("t", "{{lower}}").render(&BTreeMap::new()).is_err());
        assert!(Template::new("t", "{{A").render(&BTreeMap::new()).is_err());
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_script_safe() {
        assert_eq!(script_safe(r#"{"a":"<b>x</b></script>"}"#), r#"{"a":"<b>x<\/b><\/script>"}"#);
    }
}
