//! HTML rendering for the static pages via `minijinja`.
//!
//! Templates are compiled into the binary with `include_str!`, so the
//! server has no runtime template directory.

use minijinja::{Environment, context};
use serde::Serialize;

use quakescope_core::CatalogQuery;
use quakescope_core::config::DashboardConfig;
use quakescope_types::Page;

use crate::error::DashboardError;

/// Name of the `earthquakes` table as shown to users.
const TABLE_NAME: &str = "earthquakes";

/// One navigation link.
#[derive(Debug, Clone, Serialize)]
struct NavEntry {
    title: &'static str,
    href: &'static str,
    active: bool,
}

/// Where each page lives. Data pages are served as JSON.
pub const fn page_path(page: Page) -> &'static str {
    match page {
        Page::Introduction => "/",
        Page::Visualization => "/api/pages/visualization",
        Page::Analysis => "/api/pages/analysis",
        Page::About => "/about",
    }
}

/// Renders the Introduction and About pages.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// Load the compiled-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Template`] if a template fails to parse.
    pub fn new() -> Result<Self, DashboardError> {
        let mut env = Environment::new();
        env.add_template("layout.html", include_str!("../templates/layout.html"))?;
        env.add_template(
            "introduction.html",
            include_str!("../templates/introduction.html"),
        )?;
        env.add_template("about.html", include_str!("../templates/about.html"))?;
        Ok(Self { env })
    }

    /// Render a static page.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NotFound`] for data pages, which have no
    /// HTML template, and [`DashboardError::Template`] if rendering fails.
    pub fn render(&self, page: Page) -> Result<String, DashboardError> {
        let name = match page {
            Page::Introduction => "introduction.html",
            Page::About => "about.html",
            Page::Visualization | Page::Analysis => {
                return Err(DashboardError::NotFound(format!(
                    "{} has no HTML view",
                    page.title()
                )));
            }
        };

        let nav: Vec<NavEntry> = Page::ALL
            .into_iter()
            .map(|p| NavEntry {
                title: p.title(),
                href: page_path(p),
                active: p == page,
            })
            .collect();

        let html = self.env.get_template(name)?.render(context! {
            title => page.title(),
            nav => nav,
            table => TABLE_NAME,
            slider => DashboardConfig::slider_bounds(),
            catalog_size => CatalogQuery::ALL.len(),
            version => env!("CARGO_PKG_VERSION"),
        })?;
        Ok(html)
    }
}
