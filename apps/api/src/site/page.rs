//! HTML → text helpers for keyword suggestion and SEO review.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::site::SiteError;

pub const NO_TITLE: &str = "No title found";
pub const NO_META_DESCRIPTION: &str = "No meta description found";
pub const NO_META_KEYWORDS: &str = "No meta keywords found";
pub const NO_PAGE_COPY: &str = "No main content found on this page.";

/// The on-page SEO signals sent for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoPage {
    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub page_copy: String,
}

fn selector(css: &str) -> Result<Selector, SiteError> {
    Selector::parse(css).map_err(|e| SiteError::Extraction(format!("Invalid selector '{css}': {e:?}")))
}

/// All human-visible text in the document, text nodes joined by single spaces.
/// Script, style and noscript bodies are skipped.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|p| p.value().as_element().map(|el| el.name().to_string()))
            .is_some_and(|name| matches!(name.as_str(), "script" | "style" | "noscript"));
        let trimmed = text.trim();
        if !hidden && !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }

    parts.join(" ")
}

/// Title, description/keywords meta tags, and the heading/paragraph copy.
pub fn seo_snapshot(html: &str) -> Result<SeoPage, SiteError> {
    let document = Html::parse_document(html);

    let title = document
        .select(&selector("title")?)
        .next()
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let meta_description = meta_content(&document, "description")?
        .unwrap_or_else(|| NO_META_DESCRIPTION.to_string());
    let meta_keywords =
        meta_content(&document, "keywords")?.unwrap_or_else(|| NO_META_KEYWORDS.to_string());

    let copy: Vec<String> = document
        .select(&selector("p, h1, h2, h3")?)
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
        .collect();
    let page_copy = if copy.is_empty() {
        NO_PAGE_COPY.to_string()
    } else {
        copy.join("\n\n")
    };

    Ok(SeoPage {
        title,
        meta_description,
        meta_keywords,
        page_copy,
    })
}

fn meta_content(document: &Html, name: &str) -> Result<Option<String>, SiteError> {
    let sel = selector(&format!("meta[name=\"{name}\"]"))?;
    Ok(document
        .select(&sel)
        .filter_map(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .find(|c| !c.is_empty()))
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html>
<head>
  <title> Chelsea W Nutrition | Seattle Dietitian </title>
  <meta name="description" content="Registered dietitian offering meal plans.">
  <meta name="keywords" content="dietitian, meal plans">
  <style>body { color: red; }</style>
  <script>var tracking = "nutrition nutrition nutrition";</script>
</head>
<body>
  <h1>Nutrition Coaching</h1>
  <p>Personalized <b>meal plans</b> for athletes.</p>
  <p>   </p>
  <div>Book a call today</div>
  <noscript>Enable JavaScript</noscript>
</body>
</html>"#;

    #[test]
    fn test_visible_text_skips_script_and_style() {
        let text = visible_text(PAGE);
        assert!(text.contains("Nutrition Coaching"));
        assert!(text.contains("Personalized meal plans for athletes."));
        assert!(text.contains("Book a call today"));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Enable JavaScript"));
    }

    #[test]
    fn test_seo_snapshot_reads_head_and_copy() {
        let page = seo_snapshot(PAGE).unwrap();
        assert_eq!(page.title, "Chelsea W Nutrition | Seattle Dietitian");
        assert_eq!(page.meta_description, "Registered dietitian offering meal plans.");
        assert_eq!(page.meta_keywords, "dietitian, meal plans");
        assert_eq!(
            page.page_copy,
            "Nutrition Coaching\n\nPersonalized meal plans for athletes."
        );
    }

    #[test]
    fn test_seo_snapshot_fallbacks() {
        let page = seo_snapshot("<html><body><div>only a div</div></body></html>").unwrap();
        assert_eq!(page.title, NO_TITLE);
        assert_eq!(page.meta_description, NO_META_DESCRIPTION);
        assert_eq!(page.meta_keywords, NO_META_KEYWORDS);
        assert_eq!(page.page_copy, NO_PAGE_COPY);
    }

    #[test]
    fn test_visible_text_of_empty_document() {
        assert!(visible_text("").trim().is_empty());
    }
}
