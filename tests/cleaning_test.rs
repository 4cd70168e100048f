use rs_readability::dom::parse;
use rs_readability::extractor::cleaning::{is_data_table, row_and_column_count};
use rs_readability::{extract, Article, Error};

const PARAGRAPH: &str = "<p>The council met on Tuesday, and after a long debate, it approved the new \
    transport plan. Residents will see changes to bus routes, bike lanes and parking over the \
    next two years, officials said.</p>";

fn page(extra: &str) -> String {
    format!(
        r#"<html><head><title>Council approves the new transport plan</title></head><body>
           <div class="content">{paras}{extra}{paras}</div>
           </body></html>"#,
        paras = PARAGRAPH.repeat(3)
    )
}

fn extract_ok(html: &str) -> Article {
    match extract(html) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

fn first_table(html: &str) -> bool {
    let tree = parse(html);
    let table = tree.elements_by_tag_name(tree.root(), "table")[0];
    is_data_table(&tree, table)
}

#[test]
fn data_table_signals() {
    assert!(first_table("<table summary=\"x\"><tr><td>a</td></tr></table>"));
    assert!(first_table("<table><caption>Totals</caption><tr><td>a</td></tr></table>"));
    assert!(first_table("<table><tr><th>a</th><th>b</th></tr></table>"));
    assert!(!first_table("<table role=\"presentation\"><tr><th>a</th></tr></table>"));
    assert!(!first_table("<table datatable=\"0\"><thead></thead></table>"));
}

#[test]
fn data_table_size_rules() {
    let row = |cells: usize| format!("<tr>{}</tr>", "<td>x</td>".repeat(cells));

    // One row or one column is layout.
    assert!(!first_table(&format!("<table>{}</table>", row(6))));
    assert!(!first_table(&format!("<table>{}</table>", row(1).repeat(12))));
    // Ten rows, or more than four columns.
    assert!(first_table(&format!("<table>{}</table>", row(2).repeat(10))));
    assert!(first_table(&format!("<table>{}</table>", row(5).repeat(2))));
    // Otherwise more than ten cells.
    assert!(first_table(&format!("<table>{}</table>", row(3).repeat(4))));
    assert!(!first_table(&format!("<table>{}</table>", row(2).repeat(5))));
    // Nested tables mean layout.
    assert!(!first_table(&format!(
        "<table><tr><td><table>{}</table></td><td>x</td></tr>{}</table>",
        row(2),
        row(2).repeat(20)
    )));
}

#[test]
fn spans_count_toward_size() {
    let tree = parse(
        r#"<table><tr rowspan="2"><td colspan="3">a</td><td>b</td></tr><tr><td>c</td></tr></table>"#,
    );
    let table = tree.elements_by_tag_name(tree.root(), "table")[0];
    assert_eq!(row_and_column_count(&tree, table), (3, 4));
}

#[test]
fn data_table_survives_cleanup() {
    let table = "<table><thead><tr><th>Route</th><th>Change</th></tr></thead>\
                 <tbody><tr><td>12</td><td>More buses</td></tr></tbody></table>";
    let article = extract_ok(&page(table));
    assert!(article.text_content.contains("More buses"));
    assert!(article.content_html.contains("<th>Route</th>"));
}

#[test]
fn layout_table_of_links_is_removed() {
    let table = r#"<table><tr><td><a href="/a">Related story one</a></td>
                   <td><a href="/b">Related story two</a></td></tr></table>"#;
    let article = extract_ok(&page(table));
    assert!(!article.text_content.contains("Related story"));
    assert!(article.text_content.contains("transport plan"));
}

#[test]
fn link_farm_div_is_removed() {
    let farm = r#"<div class="more"><p><a href="/1">First other headline</a> <a href="/2">Second other headline</a></p>
                  <p><a href="/3">Third other headline</a></p></div>"#;
    let article = extract_ok(&page(farm));
    assert!(!article.text_content.contains("other headline"));
}

#[test]
fn forms_and_share_widgets_are_removed() {
    let extra = r#"<form><input type="text"><button>Subscribe</button></form>
                   <div class="share-buttons"><span>Share this</span></div>"#;
    let article = extract_ok(&page(extra));
    assert!(!article.content_html.contains("<form"));
    assert!(!article.content_html.contains("<button"));
    assert!(!article.text_content.contains("Share this"));
}

#[test]
fn video_embeds_are_kept() {
    let extra = r#"<iframe src="https://www.youtube.com/embed/abc"></iframe>
                   <iframe src="https://ads.example.com/frame"></iframe>"#;
    let article = extract_ok(&page(extra));
    assert!(article.content_html.contains("youtube.com/embed/abc"));
    assert!(!article.content_html.contains("ads.example.com"));
}

#[test]
fn styles_and_empty_paragraphs_are_dropped() {
    let extra = r#"<p style="color: red" align="left"></p><p>   </p>"#;
    let article = extract_ok(&page(extra));
    assert!(!article.content_html.contains("style="));
    assert!(!article.content_html.contains("<p>   </p>"));
    assert!(!article.content_html.contains("<p></p>"));
}

#[test]
fn classes_are_stripped_except_page() {
    let article = extract_ok(&page("<p class=\"lede fancy\">A short paragraph follows here.</p>"));
    assert!(article.text_content.contains("A short paragraph"));
    assert!(!article.content_html.contains("fancy"));
    assert!(article.content_html.contains(r#"class="page""#));
}

#[test]
fn empty_document_has_no_content() {
    assert!(matches!(extract(""), Err(Error::NoContent)));
}
