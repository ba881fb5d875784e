//! The seven field extraction rules applied to every article page.
//!
//! Each rule is a pure function over the parsed document. Rules never fail:
//! when the markup they target is absent they return the field's sentinel
//! (or an empty tag list), and no rule depends on another's result.

use crate::models::{
    CONTENT_NOT_FOUND, IMAGE_CREDIT_NOT_FOUND, IMAGE_NOT_FOUND, PUBLISH_DATE_NOT_FOUND,
    SUMMARY_NOT_FOUND, TITLE_NOT_FOUND,
};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

static H1: Lazy<Selector> = Lazy::new(|| selector("h1"));
static H2: Lazy<Selector> = Lazy::new(|| selector("h2"));
static TIME: Lazy<Selector> = Lazy::new(|| selector("time"));
static META_DESCRIPTION: Lazy<Selector> = Lazy::new(|| selector(r#"meta[name="description"]"#));
static META_OG_IMAGE: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:image"]"#));
static MAIN_CONTENT: Lazy<Selector> = Lazy::new(|| selector("#main-content"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| selector("a"));

static IMAGE_CREDIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)image (source|credit)").expect("static regex is valid"));

const RELATED_TOPICS: &str = "Related Topics";

/// All descendant text of `element`, whitespace runs collapsed, trimmed.
pub fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(normalized_text)
}

fn first_content_attr(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::to_string)
}

/// Text of the first `<h1>`.
pub fn title(document: &Html) -> String {
    first_text(document, &H1).unwrap_or_else(|| TITLE_NOT_FOUND.to_string())
}

/// `content` of `<meta name="description">`.
pub fn summary(document: &Html) -> String {
    first_content_attr(document, &META_DESCRIPTION)
        .unwrap_or_else(|| SUMMARY_NOT_FOUND.to_string())
}

/// Text of the first `<time>` element, regardless of its attributes.
pub fn publish_date(document: &Html) -> String {
    first_text(document, &TIME).unwrap_or_else(|| PUBLISH_DATE_NOT_FOUND.to_string())
}

/// `content` of `<meta property="og:image">`.
pub fn article_image(document: &Html) -> String {
    first_content_attr(document, &META_OG_IMAGE).unwrap_or_else(|| IMAGE_NOT_FOUND.to_string())
}

/// Every non-empty paragraph under `#main-content`, one per line.
pub fn article_content(document: &Html) -> String {
    let Some(container) = document.select(&MAIN_CONTENT).next() else {
        return CONTENT_NOT_FOUND.to_string();
    };
    container
        .select(&PARAGRAPH)
        .map(normalized_text)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full text of the element enclosing the first "Image source"/"Image credit" text.
pub fn image_credit(document: &Html) -> String {
    document
        .root_element()
        .descendants()
        .filter(|node| {
            node.value()
                .as_text()
                .is_some_and(|text| IMAGE_CREDIT.is_match(text))
        })
        .filter_map(|node| node.parent().and_then(ElementRef::wrap))
        .find(|parent| !matches!(parent.value().name(), "script" | "style"))
        .map(normalized_text)
        .unwrap_or_else(|| IMAGE_CREDIT_NOT_FOUND.to_string())
}

/// Link texts in the list following the first "Related Topics" `<h2>`.
pub fn tags(document: &Html) -> Vec<String> {
    let Some(heading) = document
        .select(&H2)
        .find(|h2| normalized_text(*h2) == RELATED_TOPICS)
    else {
        return Vec::new();
    };

    let Some(list) = heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "ul")
    else {
        return Vec::new();
    };

    list.select(&ANCHOR)
        .map(normalized_text)
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><head></head><body>{body}</body></html>"))
    }

    #[test]
    fn test_title_first_h1_normalized() {
        let d = doc("<h1>  The <em>big</em>\n story </h1><h1>Second</h1>");
        assert_eq!(title(&d), "The big story");
    }

    #[test]
    fn test_title_missing() {
        assert_eq!(title(&doc("<h2>Not a title</h2>")), TITLE_NOT_FOUND);
    }

    #[test]
    fn test_summary_from_meta_description() {
        let d = Html::parse_document(
            r#"<html><head><meta name="description" content="A summary."></head></html>"#,
        );
        assert_eq!(summary(&d), "A summary.");
    }

    #[test]
    fn test_summary_meta_without_content() {
        let d = Html::parse_document(r#"<html><head><meta name="description"></head></html>"#);
        assert_eq!(summary(&d), SUMMARY_NOT_FOUND);
        assert_eq!(summary(&doc("")), SUMMARY_NOT_FOUND);
    }

    #[test]
    fn test_publish_date_ignores_attributes() {
        let d = doc(
            r#"<div><span>by staff</span><time datetime="2025-03-03">3 March 2025</time></div>"#,
        );
        assert_eq!(publish_date(&d), "3 March 2025");
        assert_eq!(publish_date(&doc("<p>undated</p>")), PUBLISH_DATE_NOT_FOUND);
    }

    #[test]
    fn test_article_image_from_og_meta() {
        let d = Html::parse_document(
            r#"<html><head>
              <meta property="og:image" content="https://cdn.example.com/a.jpg">
            </head></html>"#,
        );
        assert_eq!(article_image(&d), "https://cdn.example.com/a.jpg");
        assert_eq!(article_image(&doc("")), IMAGE_NOT_FOUND);
    }

    #[test]
    fn test_article_content_collects_nested_paragraphs() {
        let d = doc(
            r#"<p>Outside</p>
            <main id="main-content">
              <div><p> First   line </p></div>
              <section><div><p></p><p>Second</p></div></section>
            </main>"#,
        );
        assert_eq!(article_content(&d), "First line\nSecond");
    }

    #[test]
    fn test_article_content_container_without_paragraphs() {
        let d = doc(r#"<main id="main-content"><div>no paragraphs</div></main>"#);
        assert_eq!(article_content(&d), "");
    }

    #[test]
    fn test_article_content_missing_container() {
        assert_eq!(article_content(&doc("<p>Orphan</p>")), CONTENT_NOT_FOUND);
    }

    #[test]
    fn test_image_credit_takes_parent_text() {
        let d = doc(
            r#"<figure><figcaption><span>IMAGE SOURCE, Getty Images</span></figcaption></figure>"#,
        );
        assert_eq!(image_credit(&d), "IMAGE SOURCE, Getty Images");

        let d = doc(r#"<p>Image credit: <b>Jane Doe</b></p>"#);
        assert_eq!(image_credit(&d), "Image credit: Jane Doe");
    }

    #[test]
    fn test_image_credit_skips_scripts() {
        let d = doc(r#"<script>var label = "Image source";</script><p>nothing</p>"#);
        assert_eq!(image_credit(&d), IMAGE_CREDIT_NOT_FOUND);
    }

    #[test]
    fn test_tags_from_related_topics() {
        let d = doc(
            r#"<h2>Elsewhere</h2><ul><li><a>Ignore</a></li></ul>
            <h2>Related Topics</h2>
            <p>spacer</p>
            <ul><li><a href="/t/b">Business</a></li><li><a href="/t/m"> Markets </a></li></ul>"#,
        );
        assert_eq!(tags(&d), vec!["Business", "Markets"]);
    }

    #[test]
    fn test_tags_heading_without_list() {
        let d = doc("<h2>Related Topics</h2><p>none</p>");
        assert!(tags(&d).is_empty());
        assert!(tags(&doc("<ul><li><a>Loose</a></li></ul>")).is_empty());
    }
}
