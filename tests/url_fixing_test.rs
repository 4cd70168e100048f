use rs_readability::{extract_with_options, Article, Options};

const PARAGRAPH: &str = "<p>The museum reopened on Saturday, and visitors queued for hours, some \
    since dawn, to see the restored galleries. Curators said the work took three years, and \
    cost more than planned.</p>";

fn extract_at(body: &str, url: Option<&str>) -> Article {
    let html = format!(
        r#"<html><body><div class="post">{paras}{body}{paras}</div></body></html>"#,
        paras = PARAGRAPH.repeat(2)
    );
    let options = Options {
        url: url.map(str::to_string),
        ..Options::default()
    };
    match extract_with_options(&html, &options) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn relative_links_become_absolute() {
    let article = extract_at(
        r#"<p>See <a href="../gallery/">the gallery</a> and <a href="/tickets">tickets</a> for more.</p>"#,
        Some("https://museum.example/news/reopening"),
    );
    assert!(article.content_html.contains(r#"href="https://museum.example/gallery/""#));
    assert!(article.content_html.contains(r#"href="https://museum.example/tickets""#));
}

#[test]
fn fragment_links_stay() {
    let article = extract_at(
        r##"<p>Jump to <a href="#notes">the notes</a> at the end of this story.</p>"##,
        Some("https://museum.example/news/reopening"),
    );
    assert!(article.content_html.contains(r##"href="#notes""##));
}

#[test]
fn javascript_links_become_text() {
    let article = extract_at(
        r#"<p>Please <a href="javascript:void(0)">click here</a> to open the map.</p>"#,
        Some("https://museum.example/news/reopening"),
    );
    assert!(!article.content_html.contains("javascript:"));
    assert!(article.text_content.contains("click here"));
}

#[test]
fn image_sources_and_srcset_are_resolved() {
    let article = extract_at(
        r#"<figure><img src="img/hall.jpg" srcset="img/hall-2x.jpg 2x, /img/hall-3x.jpg 3x"></figure>"#,
        Some("https://museum.example/news/"),
    );
    let html = &article.content_html;
    assert!(html.contains(r#"src="https://museum.example/news/img/hall.jpg""#));
    assert!(html.contains("https://museum.example/news/img/hall-2x.jpg 2x"));
    assert!(html.contains("https://museum.example/img/hall-3x.jpg 3x"));
}

#[test]
fn without_url_links_are_left_alone() {
    let article = extract_at(r#"<p>Read <a href="/about">about us</a> for the history.</p>"#, None);
    assert!(article.content_html.contains(r#"href="/about""#));
}
