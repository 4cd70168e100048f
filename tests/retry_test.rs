use rs_readability::dom::parse;
use rs_readability::extractor::{grab_article, Flags, PageFacts, RetryStage};
use rs_readability::patterns::{is_negative_class, is_unlikely_candidate};
use rs_readability::{extract, extract_with_options, Options};

const PARAGRAPH: &str = "<p>Rain fell across the region all week, and rivers rose, though \
    forecasters expect drier weather by Sunday. Farmers said the crops, mostly wheat and \
    barley, should recover.</p>";

const FERRY: &str = "<p>Ferry services resumed on Tuesday, and the harbour, closed since \
    Friday, reopened to small boats.</p>";

#[test]
fn ladder_relaxes_one_heuristic_at_a_time() {
    let mut stage = RetryStage::AllStrict;
    let mut seen = Vec::new();
    while let Some(flags) = stage.flags() {
        seen.push(flags);
        stage = stage.next();
    }

    let flag = |strip_unlikelys, use_weight_classes, clean_conditionally| Flags {
        strip_unlikelys,
        use_weight_classes,
        clean_conditionally,
    };
    assert_eq!(
        seen,
        vec![
            flag(true, true, true),
            flag(false, true, true),
            flag(false, false, true),
            flag(false, false, false),
        ]
    );
    assert_eq!(stage, RetryStage::Exhausted);
    assert_eq!(stage.next(), RetryStage::Exhausted);
}

#[test]
fn content_hidden_behind_unlikely_class_is_found_on_retry() {
    // The only real text sits in a "sidebar", which the strict passes remove.
    let html = format!(
        r#"<html><body><div class="sidebar">{}</div><div><p>Short teaser.</p></div></body></html>"#,
        PARAGRAPH.repeat(5)
    );
    let article = match extract(&html) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert!(article.length >= 500);
    assert!(article.text_content.contains("Rain fell across the region"));
}

#[test]
fn negative_class_content_is_found_once_weights_are_off() {
    // "widget" weighs negative but is not an unlikely candidate, so only the
    // pass without class weights keeps the container.
    assert!(is_negative_class("widget"));
    assert!(!is_unlikely_candidate("widget"));

    let html = format!(
        r#"<html><body><div class="widget">{}</div></body></html>"#,
        PARAGRAPH.repeat(5)
    );
    let article = match extract(&html) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert!(article.length >= 500);
    assert!(article.text_content.contains("Rain fell across the region"));
}

#[test]
fn image_heavy_content_is_found_once_conditional_cleaning_is_off() {
    // Thirteen images against at most six paragraphs makes the container
    // look like a gallery to the conditional cleaner.
    let images: String = (1..=13)
        .map(|n| format!(r#"<img src="https://news.example/photos/{n}.jpg">"#))
        .collect();
    let html = format!(
        "<html><body><div>{images}{}</div></body></html>",
        PARAGRAPH.repeat(5)
    );
    let article = match extract(&html) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert!(article.length >= 500);
    assert!(article.text_content.contains("Farmers said the crops"));
    assert_eq!(article.content_html.matches("<img").count(), 13);
}

#[test]
fn longest_short_attempt_wins_over_the_first() {
    // The strict pass drops the sidebar and keeps one paragraph. A later pass
    // also keeps the sidebar, which makes it longer though still short.
    let html = format!(
        r#"<html><body><div class="sidebar">{}</div><div>{PARAGRAPH}</div></body></html>"#,
        FERRY.repeat(2)
    );
    let tree = parse(&html);
    let mut facts = PageFacts::default();
    let attempt = grab_article(&tree, &Options::default(), "", &mut facts).expect("attempt");
    let text = attempt.tree.text_content(attempt.content);

    assert!(attempt.text_length < 500);
    assert!(text.contains("Ferry services resumed"));
    assert!(text.contains("Farmers said the crops"));
}

#[test]
fn short_page_returns_longest_attempt() {
    let html = format!("<html><body><div>{}</div></body></html>", PARAGRAPH);
    let article = match extract(&html) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert!(article.length < 500);
    assert!(article.text_content.contains("Farmers said the crops"));
}

#[test]
fn lower_threshold_accepts_first_pass() {
    let html = format!("<html><body><div>{}</div></body></html>", PARAGRAPH.repeat(2));
    let options = Options {
        char_threshold: 100,
        ..Options::default()
    };
    let tree = parse(&html);
    let mut facts = PageFacts::default();
    let attempt = grab_article(&tree, &options, "", &mut facts).expect("attempt");
    assert!(attempt.text_length >= 100);

    let article = match extract_with_options(&html, &options) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert_eq!(article.length, attempt.text_length);
}

#[test]
fn byline_is_recorded_and_removed() {
    let html = format!(
        r#"<html><body><div class="story"><p class="byline">By Jane Roe</p>{}</div></body></html>"#,
        PARAGRAPH.repeat(5)
    );
    let tree = parse(&html);
    let mut facts = PageFacts::default();
    let attempt = grab_article(&tree, &Options::default(), "", &mut facts).expect("attempt");

    assert_eq!(facts.byline.as_deref(), Some("By Jane Roe"));
    assert!(!attempt.tree.text_content(attempt.content).contains("Jane Roe"));
}

#[test]
fn byline_found_in_a_later_pass_is_kept() {
    // The strict pass drops the whole sidebar before reaching the byline.
    let html = format!(
        r#"<html><body><div class="sidebar"><p class="byline">By Jane Roe</p>{}</div></body></html>"#,
        PARAGRAPH.repeat(5)
    );
    let tree = parse(&html);
    let mut facts = PageFacts::default();
    let attempt = grab_article(&tree, &Options::default(), "", &mut facts).expect("attempt");

    assert_eq!(facts.byline.as_deref(), Some("By Jane Roe"));
    assert!(attempt.tree.text_content(attempt.content).contains("Rain fell"));
}

#[test]
fn debug_tracing_does_not_change_the_result() {
    let _ = env_logger::builder().is_test(true).try_init();

    let html = format!(
        r#"<html><body><div class="sidebar">{}</div></body></html>"#,
        PARAGRAPH.repeat(5)
    );
    let traced = Options {
        debug: true,
        ..Options::default()
    };
    match (extract(&html), extract_with_options(&html, &traced)) {
        (Ok(quiet), Ok(loud)) => assert_eq!(quiet.content_html, loud.content_html),
        (quiet, loud) => panic!("expected Ok(_) twice, got {quiet:?} and {loud:?}"),
    }
}
