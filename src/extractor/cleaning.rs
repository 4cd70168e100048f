//! Article cleanup.
//!
//! [`Cleaner::prep_article`] runs once per pass on the gathered article,
//! removing leftovers that scored well enough to be kept but are not content:
//! widgets, forms, share bars, link farms, layout tables and empty
//! paragraphs. [`post_process`] runs once on the final article.

use std::collections::HashSet;

use regex::Regex;
use url::Url;

use crate::dom::{NodeId, Tree};
use crate::extractor::state::Flags;
use crate::extractor::tags::{DEPRECATED_SIZE_ATTRIBUTE_ELEMS, PRESENTATIONAL_ATTRIBUTES};
use crate::link_density::link_density_coefficient;
use crate::options::Options;
use crate::patterns::{
    B64_DATA_URL, IMG_EXTENSIONS, LAZY_IMAGE_SRC, LAZY_IMAGE_SRCSET, SHARE_ELEMENTS, SRCSET_URL,
    VIDEOS,
};
use crate::scoring::class_weight;
use crate::text::{char_count, is_comma, CharCounter};
use crate::url_utils::{is_valid_url, to_absolute_uri};

/// Base64 payloads shorter than this are treated as placeholder pixels.
const MIN_B64_IMAGE_LENGTH: usize = 133;

/// Offsets the `<li>` count against paragraphs in the list-heavy check.
const LI_COUNT_OFFSET: i64 = 100;

/// Per-pass cleanup state.
#[derive(Debug)]
pub struct Cleaner<'a> {
    options: &'a Options,
    flags: Flags,
    data_tables: HashSet<NodeId>,
}

/// What a walk over a conditionally cleaned element found.
#[derive(Debug, Default)]
struct ContentStats {
    chars: CharCounter,
    list_chars: CharCounter,
    heading_chars: CharCounter,
    link_chars_weighted: f64,
    commas: usize,
    paragraphs: usize,
    images: usize,
    list_items: usize,
    inputs: usize,
    embeds: usize,
    has_video_embed: bool,
}

impl<'a> Cleaner<'a> {
    #[must_use]
    pub fn new(options: &'a Options, flags: Flags) -> Self {
        Self {
            options,
            flags,
            data_tables: HashSet::new(),
        }
    }

    /// Whether `id` was marked as a data table.
    #[must_use]
    pub fn is_data_table(&self, id: NodeId) -> bool {
        self.data_tables.contains(&id)
    }

    /// Cleans the article rooted at `article` in place.
    pub fn prep_article(&mut self, tree: &mut Tree, article: NodeId) {
        clean_styles(tree, article);

        // Before anything is removed: isolated data tables would look like junk.
        self.mark_data_tables(tree, article);

        fix_lazy_images(tree, article);

        self.clean_conditionally(tree, article, "form");
        self.clean_conditionally(tree, article, "fieldset");
        for tag in ["object", "embed", "footer", "link", "aside"] {
            self.clean(tree, article, tag);
        }

        // Only below the top-level children, so a top candidate named
        // "share" survives.
        let threshold = self.options.char_threshold;
        for child in tree.element_children(article).collect::<Vec<_>>() {
            clean_matched_nodes(tree, child, |tree, node| {
                SHARE_ELEMENTS.is_match(&tree.match_string(node))
                    && char_count(&tree.text_content(node)) < threshold
            });
        }

        for tag in ["iframe", "input", "textarea", "select", "button"] {
            self.clean(tree, article, tag);
        }
        self.clean_headers(tree, article);

        self.clean_conditionally(tree, article, "table");
        self.clean_conditionally(tree, article, "ul");
        self.clean_conditionally(tree, article, "div");

        for h1 in tree.elements_by_tag_name(article, "h1") {
            tree.set_tag_name(h1, "h2");
        }

        let paragraphs = tree.elements_by_tag_name(article, "p");
        remove_nodes(tree, paragraphs, |tree, p| !has_visible_content(tree, p));

        for br in tree.elements_by_tag_name(article, "br") {
            let next = tree.next_element(tree.next_sibling(br));
            if next.is_some_and(|n| tree.is_tag(n, "p")) {
                tree.detach(br);
            }
        }

        unwrap_single_cell_tables(tree, article);
    }

    /// Marks tables that hold data rather than layout.
    pub fn mark_data_tables(&mut self, tree: &Tree, root: NodeId) {
        for table in tree.elements_by_tag_name(root, "table") {
            if is_data_table(tree, table) {
                self.data_tables.insert(table);
            }
        }
    }

    /// Removes every `tag` element below `root` unless it is a video embed.
    fn clean(&self, tree: &mut Tree, root: NodeId, tag: &str) {
        let nodes = tree.elements_by_tag_name(root, tag);
        remove_nodes(tree, nodes, |tree, node| !self.is_video_embed(tree, node));
    }

    /// An `<object>`, `<embed>` or `<iframe>` pointing at a known video host.
    #[must_use]
    pub fn is_video_embed(&self, tree: &Tree, id: NodeId) -> bool {
        let tag = tree.tag_name(id);
        if !matches!(tag.as_str(), "object" | "embed" | "iframe") {
            return false;
        }

        let videos: &Regex = self.options.allowed_video_regex.as_ref().unwrap_or(&VIDEOS);
        if tree.attrs(id).iter().any(|a| videos.is_match(&a.value)) {
            return true;
        }
        tag == "object" && videos.is_match(&tree.inner_html(id))
    }

    /// Drops `<h1>`/`<h2>` whose class or id weighs negative.
    fn clean_headers(&self, tree: &mut Tree, root: NodeId) {
        let headings = tree.elements_by_tag_names(root, &["h1", "h2"]);
        let use_weight = self.flags.use_weight_classes;
        remove_nodes(tree, headings, |tree, node| {
            let remove = class_weight(tree, node, use_weight) < 0;
            if remove {
                debug_log!(self.options, "removing header with low class weight: {:?}", tree.match_string(node));
            }
            remove
        });
    }

    /// Removes `tag` elements below `root` that look like boilerplate judging
    /// by their text, links, images, inputs and embeds. Does nothing when
    /// conditional cleaning is switched off for this pass.
    pub fn clean_conditionally(&self, tree: &mut Tree, root: NodeId, tag: &str) {
        if !self.flags.clean_conditionally {
            return;
        }
        let nodes = tree.elements_by_tag_name(root, tag);
        remove_nodes(tree, nodes, |tree, node| {
            let remove = self.is_fishy(tree, node, tag);
            if remove {
                debug_log!(self.options, "cleaning conditionally: <{tag}> {:?}", tree.match_string(node));
            }
            remove
        });
    }

    fn is_fishy(&self, tree: &Tree, node: NodeId, tag: &str) -> bool {
        if tag == "table" && self.is_data_table(node) {
            return false;
        }

        let in_data_table = |a: NodeId| self.is_data_table(a);
        if tree.has_ancestor_tag(node, "table", 0, Some(&in_data_table)) {
            return false;
        }
        if tree.has_ancestor_tag(node, "code", 3, None) {
            return false;
        }

        let weight = class_weight(tree, node, self.flags.use_weight_classes);
        if weight < 0 {
            return true;
        }

        let mut stats = ContentStats::default();
        let mut links = Vec::new();
        self.walk_content(tree, node, WalkContext::default(), &mut links, &mut stats);
        stats.link_chars_weighted = links
            .iter()
            .map(|(counter, coefficient)| counter.total as f64 * coefficient)
            .sum();

        if stats.has_video_embed {
            return false;
        }

        let chars = stats.chars.total;
        let is_list = matches!(tag, "ul" | "ol")
            || (chars > 0 && stats.list_chars.total as f64 / chars as f64 > 0.9);

        if stats.commas >= 10 {
            return false;
        }

        let (heading_density, link_density) = if chars > 0 {
            (
                stats.heading_chars.total as f64 / chars as f64,
                stats.link_chars_weighted / chars as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let in_figure = tree.has_ancestor_tag(node, "figure", 3, None);
        let paragraphs = stats.paragraphs as f64;
        let images = stats.images;

        let have_to_remove = (images > 1 && paragraphs / (images as f64) < 0.5 && !in_figure)
            || (!is_list && stats.list_items as i64 - LI_COUNT_OFFSET > stats.paragraphs as i64)
            || (stats.inputs as f64 > (paragraphs / 3.0).floor())
            || (!is_list
                && heading_density < 0.9
                && chars < 25
                && (images == 0 || images > 2)
                && !in_figure)
            || (!is_list && weight < 25 && link_density > 0.2)
            || (weight >= 25 && link_density > 0.5)
            || ((stats.embeds == 1 && chars < 75) || stats.embeds > 1);

        // Simple lists of images stay.
        if is_list && have_to_remove {
            let nested = tree
                .element_children(node)
                .any(|child| tree.element_children(child).count() > 1);
            if !nested && images == stats.list_items {
                return false;
            }
        }

        have_to_remove
    }

    fn walk_content(
        &self,
        tree: &Tree,
        id: NodeId,
        mut ctx: WalkContext,
        links: &mut Vec<(CharCounter, f64)>,
        stats: &mut ContentStats,
    ) {
        if tree.is_text(id) {
            for c in tree.text(id).unwrap_or_default().chars() {
                stats.chars.count(c);
                if is_comma(c) {
                    stats.commas += 1;
                }
                if ctx.in_list {
                    stats.list_chars.count(c);
                }
                if ctx.in_heading {
                    stats.heading_chars.count(c);
                }
                if let Some(i) = ctx.link {
                    links[i].0.count(c);
                }
            }
            return;
        }
        if tree.is_element(id) {
            match tree.tag_name(id).as_str() {
                "ul" | "ol" => {
                    stats.list_chars.reset_context();
                    ctx.in_list = true;
                }
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    stats.heading_chars.reset_context();
                    ctx.in_heading = true;
                }
                "a" => {
                    links.push((CharCounter::default(), link_density_coefficient(tree, id)));
                    ctx.link = Some(links.len() - 1);
                }
                "p" => stats.paragraphs += 1,
                "img" => stats.images += 1,
                "li" => stats.list_items += 1,
                "input" => stats.inputs += 1,
                "object" | "embed" | "iframe" => {
                    stats.embeds += 1;
                    if self.is_video_embed(tree, id) {
                        stats.has_video_embed = true;
                    }
                }
                _ => {}
            }
        }

        for child in tree.children(id) {
            self.walk_content(tree, child, ctx, links, stats);
        }
    }
}

/// Where the content walk currently is. Text only counts toward the
/// innermost link around it.
#[derive(Debug, Default, Clone, Copy)]
struct WalkContext {
    in_list: bool,
    in_heading: bool,
    link: Option<usize>,
}

/// Removes each node that still has a parent and passes `filter`, last node
/// first so nested matches go before their ancestors.
fn remove_nodes<F>(tree: &mut Tree, nodes: Vec<NodeId>, mut filter: F)
where
    F: FnMut(&Tree, NodeId) -> bool,
{
    for node in nodes.into_iter().rev() {
        if tree.parent(node).is_some() && filter(tree, node) {
            tree.detach(node);
        }
    }
}

/// Removes matching nodes inside `root`, leaving `root` itself alone.
fn clean_matched_nodes<F>(tree: &mut Tree, root: NodeId, filter: F)
where
    F: Fn(&Tree, NodeId) -> bool,
{
    let end = tree.depth_first_next(root, true);
    let mut next = tree.depth_first_next(root, false);
    while let Some(node) = next {
        if Some(node) == end {
            break;
        }
        next = if filter(tree, node) {
            tree.remove_and_advance(node)
        } else {
            tree.depth_first_next(node, false)
        };
    }
}

/// Strips presentational attributes, and sizes from table-ish elements.
/// `<svg>` subtrees are left alone.
pub fn clean_styles(tree: &mut Tree, id: NodeId) {
    let tag = tree.tag_name(id);
    if tag == "svg" {
        return;
    }

    for attr in PRESENTATIONAL_ATTRIBUTES {
        tree.remove_attr(id, attr);
    }
    if DEPRECATED_SIZE_ATTRIBUTE_ELEMS.contains(&tag.as_str()) {
        tree.remove_attr(id, "width");
        tree.remove_attr(id, "height");
    }

    for child in tree.element_children(id).collect::<Vec<_>>() {
        clean_styles(tree, child);
    }
}

/// Rows are the sum of `rowspan`s, columns the widest `colspan` sum of a row.
#[must_use]
pub fn row_and_column_count(tree: &Tree, table: NodeId) -> (usize, usize) {
    let span = |id: NodeId, name: &str| {
        tree.attr(id, name)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(1)
    };

    let mut rows = 0;
    let mut columns = 0;
    for tr in tree.elements_by_tag_name(table, "tr") {
        rows += span(tr, "rowspan");
        let in_row: usize = tree
            .elements_by_tag_name(tr, "td")
            .into_iter()
            .map(|td| span(td, "colspan"))
            .sum();
        columns = columns.max(in_row);
    }
    (rows, columns)
}

/// Decides whether a table holds data, the way screen readers do.
#[must_use]
pub fn is_data_table(tree: &Tree, table: NodeId) -> bool {
    if tree.attr(table, "role").as_deref() == Some("presentation") {
        return false;
    }
    if tree.attr(table, "datatable").as_deref() == Some("0") {
        return false;
    }
    if tree.has_attr(table, "summary") {
        return true;
    }

    let caption = tree.elements_by_tag_name(table, "caption").into_iter().next();
    if caption.is_some_and(|c| tree.first_child(c).is_some()) {
        return true;
    }

    let data_descendant = ["col", "colgroup", "tfoot", "thead", "th"]
        .iter()
        .any(|tag| !tree.elements_by_tag_name(table, tag).is_empty());
    if data_descendant {
        return true;
    }

    // Nested tables mean layout.
    if !tree.elements_by_tag_name(table, "table").is_empty() {
        return false;
    }

    let (rows, columns) = row_and_column_count(tree, table);
    if rows == 1 || columns == 1 {
        return false;
    }
    if rows >= 10 || columns > 4 {
        return true;
    }
    rows * columns > 10
}

/// Makes lazy-loaded images load without scripts: drops tiny base64
/// placeholders and copies image URLs from `data-*` style attributes into
/// `src` or `srcset`.
pub fn fix_lazy_images(tree: &mut Tree, root: NodeId) {
    for elem in tree.elements_by_tag_names(root, &["img", "picture", "figure"]) {
        let mut src = tree.attr(elem, "src").unwrap_or_default();
        let srcset = tree.attr(elem, "srcset").unwrap_or_default();
        let tag = tree.tag_name(elem);

        if let Some(caps) = B64_DATA_URL.captures(&src) {
            // SVG can say a lot in under 133 bytes.
            if caps.get(1).is_some_and(|m| m.as_str() == "image/svg+xml") {
                continue;
            }

            let other_image = tree.attrs(elem).iter().any(|a| {
                a.name != "src" && IMG_EXTENSIONS.is_match(&a.value) && is_valid_url(&a.value)
            });

            if other_image {
                let payload_start = src.find("base64").map_or(0, |i| i + 7);
                if src.len().saturating_sub(payload_start) < MIN_B64_IMAGE_LENGTH {
                    src.clear();
                    tree.remove_attr(elem, "src");
                }
            }
        }

        let lazy = tree.class_name(elem).to_lowercase().contains("lazy");
        if (!src.is_empty() || !srcset.is_empty()) && !lazy {
            continue;
        }

        for attr in tree.attrs(elem) {
            if matches!(attr.name.as_str(), "src" | "srcset" | "alt") {
                continue;
            }

            let copy_to = if LAZY_IMAGE_SRCSET.is_match(&attr.value) {
                "srcset"
            } else if LAZY_IMAGE_SRC.is_match(&attr.value) {
                "src"
            } else {
                continue;
            };
            if !is_valid_url(&attr.value) {
                continue;
            }

            if tag == "img" || tag == "picture" {
                tree.set_attr(elem, copy_to, &attr.value);
            } else if tag == "figure"
                && tree.elements_by_tag_names(elem, &["img", "picture"]).is_empty()
            {
                let img = tree.create_element("img");
                tree.set_attr(img, copy_to, &attr.value);
                tree.append_child(elem, img);
            }
        }
    }
}

/// Text, or an image or embed somewhere below.
fn has_visible_content(tree: &Tree, p: NodeId) -> bool {
    tree.descendants(p).any(|n| {
        tree.has_text_content(n)
            || matches!(
                tree.tag_name(n).as_str(),
                "img" | "picture" | "embed" | "object" | "iframe"
            )
    })
}

/// Replaces tables with exactly one cell by the cell, as a `<p>` when it only
/// holds phrasing content and a `<div>` otherwise.
fn unwrap_single_cell_tables(tree: &mut Tree, root: NodeId) {
    for table in tree.elements_by_tag_name(root, "table") {
        if tree.parent(table).is_none() {
            continue;
        }

        let mut body = table;
        if tree.has_single_tag_inside(table, "tbody") {
            if let Some(tbody) = tree.first_element_child(table) {
                body = tbody;
            }
        }
        if !tree.has_single_tag_inside(body, "tr") {
            continue;
        }
        let Some(row) = tree.first_element_child(body) else {
            continue;
        };
        if !tree.has_single_tag_inside(row, "td") {
            continue;
        }
        let Some(cell) = tree.first_element_child(row) else {
            continue;
        };

        let phrasing = tree.children(cell).all(|c| tree.is_phrasing_content(c));
        tree.set_tag_name(cell, if phrasing { "p" } else { "div" });
        tree.replace_node(table, cell);
    }
}

/// Final touches on the chosen article: absolute URLs, flatter nesting and,
/// unless `keep_classes` is set, only the preserved classes.
pub fn post_process(tree: &mut Tree, article: NodeId, options: &Options, base: Option<&Url>) {
    fix_relative_uris(tree, article, base);
    simplify_nested_elements(tree, article);
    if !options.keep_classes {
        clean_classes(tree, article, &options.classes_to_preserve);
    }
}

/// Resolves link, media and `srcset` URLs against `base`, and defuses
/// `javascript:` links.
pub fn fix_relative_uris(tree: &mut Tree, article: NodeId, base: Option<&Url>) {
    for link in tree.elements_by_tag_name(article, "a") {
        let Some(href) = tree.attr(link, "href") else {
            continue;
        };
        if href.is_empty() {
            continue;
        }

        if href.starts_with("javascript:") {
            // Keep the text, lose the link.
            let replacement = match tree.first_child(link) {
                Some(only) if tree.is_text(only) && tree.next_sibling(only).is_none() => only,
                _ => {
                    let span = tree.create_element("span");
                    while let Some(child) = tree.first_child(link) {
                        tree.append_child(span, child);
                    }
                    span
                }
            };
            tree.replace_node(link, replacement);
            continue;
        }

        let absolute = to_absolute_uri(&href, base);
        if absolute.is_empty() {
            tree.remove_attr(link, "href");
        } else {
            tree.set_attr(link, "href", &absolute);
        }
    }

    let media = tree.elements_by_tag_names(
        article,
        &["img", "picture", "figure", "video", "audio", "source"],
    );
    for node in media {
        for name in ["src", "poster"] {
            if let Some(value) = tree.attr(node, name) {
                if !value.is_empty() {
                    tree.set_attr(node, name, &to_absolute_uri(&value, base));
                }
            }
        }

        if let Some(srcset) = tree.attr(node, "srcset") {
            if !srcset.is_empty() {
                let fixed = SRCSET_URL.replace_all(&srcset, |caps: &regex::Captures<'_>| {
                    let url = caps.get(1).map_or("", |m| m.as_str());
                    let size = caps.get(2).map_or("", |m| m.as_str());
                    let sep = caps.get(3).map_or("", |m| m.as_str());
                    format!("{}{size}{sep}", to_absolute_uri(url, base))
                });
                tree.set_attr(node, "srcset", &fixed);
            }
        }
    }
}

/// Removes empty `<div>`/`<section>` wrappers and collapses a wrapper around
/// a single `<div>`/`<section>` into its child. The page containers with
/// `readability` ids stay.
pub fn simplify_nested_elements(tree: &mut Tree, article: NodeId) {
    let mut node = Some(article);
    while let Some(id) = node {
        if tree.parent(id).is_some()
            && (tree.is_tag(id, "div") || tree.is_tag(id, "section"))
            && !tree.id_attr(id).starts_with("readability")
        {
            if tree.is_element_without_content(id) {
                node = tree.remove_and_advance(id);
                continue;
            }
            if tree.has_single_tag_inside(id, "div") || tree.has_single_tag_inside(id, "section") {
                if let Some(child) = tree.first_element_child(id) {
                    for attr in tree.attrs(id) {
                        tree.set_attr(child, &attr.name, &attr.value);
                    }
                    tree.replace_node(id, child);
                    node = Some(child);
                    continue;
                }
            }
        }
        node = tree.depth_first_next(id, false);
    }
}

/// Drops every class not listed in `preserve`, and empty class attributes.
pub fn clean_classes(tree: &mut Tree, id: NodeId, preserve: &[String]) {
    if let Some(class) = tree.attr(id, "class") {
        let kept = class
            .split_whitespace()
            .filter(|c| preserve.iter().any(|p| p == c))
            .collect::<Vec<_>>()
            .join(" ");
        if kept.is_empty() {
            tree.remove_attr(id, "class");
        } else {
            tree.set_attr(id, "class", &kept);
        }
    }

    for child in tree.element_children(id).collect::<Vec<_>>() {
        clean_classes(tree, child, preserve);
    }
}
