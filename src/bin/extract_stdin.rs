//! Reads HTML from stdin and prints the extracted article as JSON.
//!
//! Usage: `extract_stdin [URL] < page.html`
//!
//! The optional URL is used to resolve relative links.

use std::io::{self, Read};
use std::process::ExitCode;

use rs_readability::{extract_bytes_with_options, Options};
use serde::Serialize;

#[derive(Serialize)]
struct Output {
    title: Option<String>,
    byline: Option<String>,
    excerpt: Option<String>,
    site_name: Option<String>,
    language: Option<String>,
    published_time: Option<String>,
    content: String,
    text_content: String,
    length: usize,
}

fn main() -> ExitCode {
    let mut html = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut html) {
        eprintln!("Failed to read from stdin: {err}");
        return ExitCode::FAILURE;
    }

    let options = Options {
        url: std::env::args().nth(1),
        ..Options::default()
    };

    let article = match extract_bytes_with_options(&html, &options) {
        Ok(article) => article,
        Err(err) => {
            eprintln!("Extraction failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let output = Output {
        title: article.metadata.title,
        byline: article.metadata.byline,
        excerpt: article.metadata.excerpt,
        site_name: article.metadata.site_name,
        language: article.metadata.language,
        published_time: article.metadata.published_time.map(|d| d.to_rfc3339()),
        content: article.content_html,
        text_content: article.text_content,
        length: article.length,
    };

    match serde_json::to_string(&output) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to serialize output: {err}");
            ExitCode::FAILURE
        }
    }
}
