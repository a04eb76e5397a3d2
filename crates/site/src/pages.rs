//! Typed page renderers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use catalog::serialize::validate_binding;
use catalog::{
    descriptions_script, CatalogLayout, RunIndex, VariableDescriptions, CATALOG_BINDING,
    DESCRIPTIONS_BINDING,
};
use gallery_common::{GalleryError, GalleryResult, RunId};

use crate::calendar::CalendarMonth;
use crate::template::{html_escape, script_safe, Template};

const LANDING_TEMPLATE: Template =
    Template::new("landing.html", include_str!("../templates/landing.html"));
const VIEWER_TEMPLATE: Template =
    Template::new("viewer.html", include_str!("../templates/viewer.html"));

/// Default name of the catalog script next to each viewer page.
pub const DEFAULT_DATA_FILE: &str = "data.js";

/// Site-wide text and presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// `<title>` of the landing page.
    pub page_title: String,
    pub site_title: String,
    pub site_subtitle: String,
    pub institution: String,
    /// Extra lines under the institution name (faculty, department).
    pub institution_lines: Vec<String>,
    /// Logo path relative to the site root. Never fetched.
    pub logo_file: String,
    pub logo_alt: String,
    pub contact_name: String,
    pub contact_email: String,
    /// Heading and `<title>` of the run viewer.
    pub viewer_title: String,
    /// Animation step of the viewer, in milliseconds.
    pub frame_interval_ms: u64,
    /// Fixed "today" for reproducible builds; the local date otherwise.
    pub today: Option<NaiveDate>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            page_title: "Previsão do Tempo - UFSC".to_string(),
            site_title: "Previsão UFSC".to_string(),
            site_subtitle: "Curso FSC7115 - Modelagem Numérica da Atmosfera".to_string(),
            institution: "Universidade Federal de Santa Catarina".to_string(),
            institution_lines: vec![
                "Centro de Ciências Físicas e Matemáticas (CFM)".to_string(),
                "Departamento de Física".to_string(),
            ],
            logo_file: "Brasao_UFSC_vertical_extenso.svg".to_string(),
            logo_alt: "Brasão da UFSC".to_string(),
            contact_name: "Reinaldo Haas".to_string(),
            contact_email: "reinaldo.haas@ufsc.br".to_string(),
            viewer_title: "Visualizador de Rodadas do Modelo WRF".to_string(),
            frame_interval_ms: 500,
            today: None,
        }
    }
}

impl SiteSettings {
    pub fn validate(&self) -> GalleryResult<()> {
        if self.frame_interval_ms == 0 {
            return Err(GalleryError::Config(
                "site.frame_interval_ms must be positive".into(),
            ));
        }
        if self.logo_file.contains("..") {
            return Err(GalleryError::Config(format!(
                "site.logo_file must stay inside the site root: {}",
                self.logo_file
            )));
        }
        Ok(())
    }

    /// The configured date, or `fallback` when none is set.
    pub fn today_or(&self, fallback: NaiveDate) -> NaiveDate {
        self.today.unwrap_or(fallback)
    }

    fn contact_html(&self) -> String {
        let name = html_escape(&self.contact_name);
        if self.contact_email.is_empty() {
            return name;
        }
        let email = html_escape(&self.contact_email);
        format!(r#"{} | <a href="mailto:{}">{}</a>"#, name, email, email)
    }
}

/// Landing page: institutional header plus the calendar of the month
/// containing `today`.
pub struct LandingPage<'a> {
    settings: &'a SiteSettings,
    runs: &'a RunIndex,
    today: NaiveDate,
}

impl<'a> LandingPage<'a> {
    pub fn new(settings: &'a SiteSettings, runs: &'a RunIndex, today: NaiveDate) -> Self {
        Self {
            settings,
            runs,
            today,
        }
    }

    pub fn render(&self) -> GalleryResult<String> {
        let month = CalendarMonth::containing(self.today)?;
        let s = self.settings;

        let institution_lines = s
            .institution_lines
            .iter()
            .map(|line| format!("                <p>{}</p>", html_escape(line)))
            .collect::<Vec<_>>()
            .join("\n");

        let mut values = BTreeMap::new();
        values.insert("PAGE_TITLE", html_escape(&s.page_title));
        values.insert("LOGO_FILE", html_escape(&s.logo_file));
        values.insert("LOGO_ALT", html_escape(&s.logo_alt));
        values.insert("INSTITUTION", html_escape(&s.institution));
        values.insert("INSTITUTION_LINES", institution_lines);
        values.insert("SITE_TITLE", html_escape(&s.site_title));
        values.insert("SITE_SUBTITLE", html_escape(&s.site_subtitle));
        values.insert("CALENDAR", month.to_html(self.runs, self.today));
        values.insert("CONTACT", s.contact_html());

        LANDING_TEMPLATE.render(&values)
    }
}

/// Per-run viewer page.
///
/// The page loads the catalog from `data_file` and reads it through
/// `catalog_binding`; the description table is inlined.
pub struct ViewerPage<'a> {
    settings: &'a SiteSettings,
    descriptions: &'a VariableDescriptions,
    layout: &'a CatalogLayout,
    run: &'a RunId,
    data_file: &'a str,
    catalog_binding: &'a str,
    descriptions_binding: &'a str,
}

impl<'a> ViewerPage<'a> {
    pub fn new(
        settings: &'a SiteSettings,
        descriptions: &'a VariableDescriptions,
        layout: &'a CatalogLayout,
        run: &'a RunId,
    ) -> Self {
        Self {
            settings,
            descriptions,
            layout,
            run,
            data_file: DEFAULT_DATA_FILE,
            catalog_binding: CATALOG_BINDING,
            descriptions_binding: DESCRIPTIONS_BINDING,
        }
    }

    pub fn with_data_file(mut self, data_file: &'a str) -> Self {
        self.data_file = data_file;
        self
    }

    pub fn with_bindings(mut self, catalog: &'a str, descriptions: &'a str) -> Self {
        self.catalog_binding = catalog;
        self.descriptions_binding = descriptions;
        self
    }

    pub fn render(&self) -> GalleryResult<String> {
        validate_binding(self.catalog_binding)?;
        validate_binding(self.descriptions_binding)?;
        if self.catalog_binding == self.descriptions_binding {
            return Err(GalleryError::Config(format!(
                "catalog and description bindings must differ (both {})",
                self.catalog_binding
            )));
        }

        let descriptions = descriptions_script(self.descriptions_binding, self.descriptions)?;
        let placeholder = serde_json::to_string(self.descriptions.placeholder())?;
        let extension = serde_json::to_string(&self.layout.image_extension)?;

        let mut values = BTreeMap::new();
        values.insert("PAGE_TITLE", html_escape(&self.settings.viewer_title));
        values.insert("VIEWER_TITLE", html_escape(&self.settings.viewer_title));
        values.insert("RUN_LABEL", html_escape(&run_label(self.run)));
        values.insert("DATA_FILE", html_escape(self.data_file));
        values.insert("DESCRIPTIONS_SCRIPT", script_safe(descriptions.trim_end()));
        values.insert("DESCRIPTIONS_BINDING", self.descriptions_binding.to_string());
        values.insert("PLACEHOLDER_JSON", script_safe(&placeholder));
        values.insert("CATALOG_BINDING", self.catalog_binding.to_string());
        values.insert("EXTENSION_JSON", script_safe(&extension));
        values.insert(
            "TIME_TOKENS",
            self.layout.time_format.token_count().to_string(),
        );
        values.insert(
            "FRAME_INTERVAL_MS",
            self.settings.frame_interval_ms.to_string(),
        );

        VIEWER_TEMPLATE.render(&values)
    }
}

/// Human label for a run, e.g. `01/06/2025 00Z (2025060100)`.
pub fn run_label(run: &RunId) -> String {
    match run.init_time() {
        Some(t) => format!("{} ({})", t.format("%d/%m/%Y %HZ"), run),
        None => run.to_string(),
    }
}
