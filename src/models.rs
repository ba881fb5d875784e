//! Data models for discovered links and extracted article metadata.
//!
//! - [`LinkRecord`]: one row of the CSV handoff file
//! - [`ArticleMetadata`]: the seven fields extracted from one article page
//!
//! Neither type is mutated after construction.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const TITLE_NOT_FOUND: &str = "Title not found";
pub const SUMMARY_NOT_FOUND: &str = "Summary not found";
pub const PUBLISH_DATE_NOT_FOUND: &str = "Publish date not found";
pub const IMAGE_NOT_FOUND: &str = "Image not found";
pub const CONTENT_NOT_FOUND: &str = "Article content not found.";
pub const IMAGE_CREDIT_NOT_FOUND: &str = "Image credit not found";

/// A single article link discovered on a category page.
///
/// `url` is absolute and unique within one collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// The site's base URL, as given on the command line.
    pub site: String,
    /// The category path segment the link was found under.
    pub category: String,
    /// Absolute article URL.
    pub url: String,
}

/// Metadata extracted from a single article page.
///
/// Every field is always present. When the markup a field is read from is
/// missing, the field holds a fixed sentinel string (e.g. [`TITLE_NOT_FOUND`])
/// so the persisted JSON keeps the same shape for every article. Tags are the
/// one collection field and are simply empty when absent.
///
/// On disk `tags` is flattened to a comma-joined string (`"Business, Markets"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleMetadata {
    pub title: String,
    pub summary: String,
    pub publish_date: String,
    pub article_image: String,
    pub article_content: String,
    pub image_credit: String,
    #[serde(serialize_with = "join_tags", deserialize_with = "split_tags")]
    pub tags: Vec<String>,
}

impl ArticleMetadata {
    /// Names of the fields that fell back to their "not found" value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("title", self.title == TITLE_NOT_FOUND),
            ("summary", self.summary == SUMMARY_NOT_FOUND),
            ("publish_date", self.publish_date == PUBLISH_DATE_NOT_FOUND),
            ("article_image", self.article_image == IMAGE_NOT_FOUND),
            ("article_content", self.article_content == CONTENT_NOT_FOUND),
            ("image_credit", self.image_credit == IMAGE_CREDIT_NOT_FOUND),
            ("tags", self.tags.is_empty()),
        ];
        checks
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect()
    }

    /// Tags in their persisted, comma-joined form.
    pub fn joined_tags(&self) -> String {
        self.tags.join(", ")
    }
}

fn join_tags<S>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&tags.join(", "))
}

fn split_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let joined = String::deserialize(deserializer)?;
    Ok(joined
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect())
}
