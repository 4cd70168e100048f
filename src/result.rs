//! Result types for extraction output.
//!
//! This module defines the structured output from content extraction,
//! including the article content and associated metadata.

use chrono::{DateTime, Utc};

use crate::dom::{NodeId, Tree};

/// The readable part of a document.
#[derive(Debug, Clone)]
pub struct Article {
    /// Self-contained tree whose root holds the cleaned article container.
    pub content: Tree,

    /// Serialized markup of the article, i.e. the inner HTML of the container.
    pub content_html: String,

    /// Plain text of the article, trimmed.
    pub text_content: String,

    /// Length of `text_content` in characters.
    pub length: usize,

    /// Metadata about the document.
    pub metadata: Metadata,
}

impl Article {
    /// The article container element inside `content`.
    #[must_use]
    pub fn container(&self) -> Option<NodeId> {
        self.content.first_element_child(self.content.root())
    }

    /// The first element inside the container, normally
    /// `<div id="readability-page-1" class="page">`.
    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        self.container()
            .and_then(|c| self.content.first_element_child(c))
    }
}

/// Metadata extracted from an HTML document.
///
/// All fields are optional as metadata may not be present in all documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Article title.
    pub title: Option<String>,

    /// Author line, from metadata or detected in the page.
    pub byline: Option<String>,

    /// Short description, one line.
    pub excerpt: Option<String>,

    /// Name of the publishing site.
    pub site_name: Option<String>,

    /// Lead image URL.
    pub image: Option<String>,

    /// Absolute URL of the largest PNG favicon.
    pub favicon: Option<String>,

    /// Value of `<html lang>`.
    pub language: Option<String>,

    /// Publication date.
    pub published_time: Option<DateTime<Utc>>,

    /// Last modification date.
    pub modified_time: Option<DateTime<Utc>>,
}
