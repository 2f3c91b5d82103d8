pub mod context;

use std::path::Path;

use handlebars::Handlebars;

use crate::error::{AppError, Result};

/// Handlebars environment with one registered template per output page.
///
/// Every `*.hbs` file in the templates directory becomes a page named
/// after its file stem (`index.html.hbs` renders `index.html`). Pages are
/// kept sorted so a build writes them in a stable order.
pub struct Renderer {
    registry: Handlebars<'static>,
    pages: Vec<String>,
}

impl Renderer {
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut registry = Handlebars::new();
        let mut pages = Vec::new();

        for entry in std::fs::read_dir(dir).map_err(|e| {
            AppError::Template(format!("failed to read {}: {e}", dir.display()))
        })? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("hbs") {
                continue;
            }
            let Some(page) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            registry.register_template_file(page, &path)?;
            pages.push(page.to_string());
        }

        if pages.is_empty() {
            return Err(AppError::Template(format!(
                "no .hbs templates found in {}",
                dir.display()
            )));
        }
        pages.sort();

        Ok(Self { registry, pages })
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn render_page(&self, page: &str, data: &serde_json::Value) -> Result<String> {
        Ok(self.registry.render(page, data)?)
    }
}
