//! Two-stage scraping of a news category.
//!
//! 1. **Collecting**: [`links::collect_links`] fetches one category page and
//!    returns the unique article URLs found on it
//! 2. **Extracting**: [`article::extract`] fetches one article and builds its
//!    [`crate::models::ArticleMetadata`] from the rules in [`rules`]
//!
//! # Extraction Rules
//!
//! | Field | Source | Fallback |
//! |-------|--------|----------|
//! | `title` | first `<h1>` | `Title not found` |
//! | `summary` | `<meta name="description">` | `Summary not found` |
//! | `publish_date` | first `<time>` | `Publish date not found` |
//! | `article_image` | `<meta property="og:image">` | `Image not found` |
//! | `article_content` | `<p>` under `#main-content` | `Article content not found.` |
//! | `image_credit` | element around "Image source"/"Image credit" | `Image credit not found` |
//! | `tags` | links in the `<ul>` after `<h2>Related Topics</h2>` | empty |

pub mod article;
pub mod links;
pub mod rules;
