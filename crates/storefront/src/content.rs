//! Content management for markdown-based informational pages.
//!
//! Pages live under `content/<locale>/pages/*.md`, carry YAML frontmatter
//! (title, description, optional updated date), and are rendered to HTML
//! once at startup. A page missing from a locale falls back to the English
//! edition rather than 404ing the translated site.

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::i18n::Locale;

/// Metadata for informational pages (about, privacy, etc.)
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

/// A rendered page with metadata and HTML content
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub locale: Locale,
    pub meta: PageMeta,
    pub content_html: String,
}

/// Content store that holds all loaded pages in memory
#[derive(Debug, Clone)]
pub struct ContentStore {
    pages: Arc<HashMap<(Locale, String), Page>>,
}

impl ContentStore {
    /// Load all pages from the filesystem.
    ///
    /// A locale directory that does not exist is skipped with a warning so a
    /// partially translated site still boots.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing content directory cannot be read.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let mut pages = HashMap::new();

        for locale in Locale::ALL {
            let dir = content_dir.join(locale.as_str()).join("pages");
            for page in Self::load_locale(locale, &dir)? {
                pages.insert((locale, page.slug.clone()), page);
            }
        }

        Ok(Self {
            pages: Arc::new(pages),
        })
    }

    /// Load all pages for one locale
    fn load_locale(locale: Locale, dir: &Path) -> Result<Vec<Page>, ContentError> {
        let mut pages = Vec::new();

        if !dir.exists() {
            tracing::warn!("Pages directory does not exist: {:?}", dir);
            return Ok(pages);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                match Self::load_page(locale, &path) {
                    Ok(page) => {
                        tracing::info!("Loaded page: {}/{}", locale, page.slug);
                        pages.push(page);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load page {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(pages)
    }

    /// Load a single page from a markdown file
    fn load_page(locale: Locale, path: &Path) -> Result<Page, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?
            .to_string();

        let matter = Matter::<YAML>::new();
        let parsed: ParsedEntity<PageMeta> = matter
            .parse(&content)
            .map_err(|e| ContentError::Parse(format!("Failed to parse frontmatter: {e}")))?;
        let meta = parsed
            .data
            .ok_or_else(|| ContentError::Parse("Missing frontmatter".to_string()))?;

        let content_html = render_markdown(&parsed.content);

        Ok(Page {
            slug,
            locale,
            meta,
            content_html,
        })
    }

    /// Get a page by locale and slug, falling back to English.
    #[must_use]
    pub fn get_page(&self, locale: Locale, slug: &str) -> Option<&Page> {
        self.pages
            .get(&(locale, slug.to_owned()))
            .or_else(|| self.pages.get(&(Locale::En, slug.to_owned())))
    }

    /// All loaded pages, in no particular order.
    pub fn all_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }
}

/// Render markdown to HTML with GitHub Flavored Markdown support.
fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.header_ids = Some(String::new());
    options.extension.footnotes = true;

    // Render options
    options.render.r#unsafe = true; // Allow raw HTML in our own pages

    markdown_to_html(content, &options)
}

/// Content loading errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ContentStore {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("content");
        ContentStore::load(&dir).expect("content directory loads")
    }

    #[test]
    fn test_loads_pages_for_both_locales() {
        let store = store();
        let en = store.get_page(Locale::En, "about").expect("en about page");
        assert_eq!(en.meta.title, "About Solstice");

        let es = store.get_page(Locale::Es, "about").expect("es about page");
        assert_eq!(es.locale, Locale::Es);
        assert_eq!(es.meta.title, "Acerca de Solstice");
    }

    #[test]
    fn test_markdown_rendered_to_html() {
        let store = store();
        let page = store.get_page(Locale::En, "about").expect("about page");
        assert!(page.content_html.contains("<h1"));
        assert!(page.content_html.contains("<strong>"));
    }

    #[test]
    fn test_missing_translation_falls_back_to_english() {
        // privacy.md exists only in English.
        let store = store();
        let page = store
            .get_page(Locale::Es, "privacy")
            .expect("falls back to en");
        assert_eq!(page.locale, Locale::En);
    }

    #[test]
    fn test_unknown_slug_is_none() {
        assert!(store().get_page(Locale::En, "returns-policy").is_none());
    }

    #[test]
    fn test_frontmatter_metadata_parsed() {
        let store = store();
        let page = store.get_page(Locale::En, "privacy").expect("privacy page");
        assert!(page.meta.description.is_some());
        assert_eq!(
            page.meta.updated_at,
            NaiveDate::from_ymd_opt(2026, 7, 14)
        );
    }

    #[test]
    fn test_all_pages_iterates_everything() {
        // en/about, en/privacy, es/about
        assert_eq!(store().all_pages().count(), 3);
    }
}
