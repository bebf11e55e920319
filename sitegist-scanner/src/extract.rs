use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Sentinel title for pages without a usable `<title>`.
pub const NO_TITLE: &str = "No Title";

/// Script `src` attributes retained per page, in document order.
pub const SCRIPT_SRC_LIMIT: usize = 5;

/// Everything the scanner needs from one parsed page.
#[derive(Debug, Default)]
pub struct PageExtract {
    pub title: String,
    pub buttons: usize,
    pub anchors: usize,
    pub image_count: usize,
    pub inputs: usize,
    pub words: usize,
    pub text: String,
    pub scripts: Vec<String>,
    pub links: Vec<Url>,
    pub fonts: Vec<String>,
    pub icons: Vec<String>,
    pub image_assets: Vec<String>,
}

impl PageExtract {
    /// Parse a page body and pull out everything the scan accumulates.
    ///
    /// Relative URLs (links, assets) are resolved against `page_url`. The
    /// parsed document never leaves this function, so the surrounding crawl
    /// future stays Send.
    pub fn from_html(html: &str, page_url: &Url) -> Self {
        let doc = Html::parse_document(html);

        let title_selector = Selector::parse("title").unwrap();
        let button_selector = Selector::parse("button").unwrap();
        let anchor_selector = Selector::parse("a").unwrap();
        let image_selector = Selector::parse("img").unwrap();
        let input_selector = Selector::parse("input").unwrap();
        let script_selector = Selector::parse("script[src]").unwrap();
        let href_selector = Selector::parse("a[href]").unwrap();
        let link_tag_selector = Selector::parse("link[href]").unwrap();
        let img_src_selector = Selector::parse("img[src]").unwrap();

        let title = doc
            .select(&title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());

        let text = visible_text(&doc);
        let words = text.split_whitespace().count();

        let scripts: Vec<String> = doc
            .select(&script_selector)
            .filter_map(|el| el.value().attr("src"))
            .map(str::to_string)
            .take(SCRIPT_SRC_LIMIT)
            .collect();

        let links: Vec<Url> = doc
            .select(&href_selector)
            .filter_map(|el| el.value().attr("href"))
            .filter_map(|href| resolve_href(page_url, href))
            .collect();

        let mut fonts = Vec::new();
        let mut icons = Vec::new();
        let mut image_assets = Vec::new();

        for el in doc.select(&link_tag_selector) {
            let Some(href) = el.value().attr("href") else {
                continue;
            };
            let Some(resolved) = resolve_href(page_url, href) else {
                continue;
            };
            if href.contains("fonts.googleapis.com")
                || href.ends_with(".woff")
                || href.ends_with(".woff2")
            {
                fonts.push(resolved.to_string());
            }
            // rel is a space-separated token list; a tag can be both a font
            // and an icon source.
            if attr_tokens(el, "rel").any(|t| t.eq_ignore_ascii_case("icon")) {
                icons.push(resolved.to_string());
            }
        }

        for el in doc.select(&img_src_selector) {
            let Some(src) = el.value().attr("src") else {
                continue;
            };
            let Some(resolved) = resolve_href(page_url, src) else {
                continue;
            };
            if src.to_lowercase().contains("logo") || src.ends_with(".svg") {
                icons.push(resolved.to_string());
            } else {
                image_assets.push(resolved.to_string());
            }
        }

        Self {
            title,
            buttons: doc.select(&button_selector).count(),
            anchors: doc.select(&anchor_selector).count(),
            image_count: doc.select(&image_selector).count(),
            inputs: doc.select(&input_selector).count(),
            words,
            text,
            scripts,
            links,
            fonts,
            icons,
            image_assets,
        }
    }
}

/// Resolve an href against the page's own URL, dropping non-navigable
/// schemes and bare fragments. Fragments are stripped from the result.
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    if href.is_empty()
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with('#')
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    resolved.set_fragment(None);
    Some(resolved)
}

/// Attribute values HTML treats as space-separated lists (`rel`, `class`)
/// come back from the parser as flat strings; expose them uniformly as
/// tokens at this boundary.
fn attr_tokens<'a>(el: ElementRef<'a>, name: &str) -> impl Iterator<Item = &'a str> {
    el.value().attr(name).unwrap_or("").split_whitespace()
}

/// Text content of the page with script/style/noscript subtrees excluded,
/// whitespace-normalized into a single line of space-joined runs.
fn visible_text(doc: &Html) -> String {
    let mut out = String::new();
    for node in doc.root_element().descendants() {
        if let Node::Text(text) = node.value() {
            let parent_tag = node
                .parent()
                .and_then(ElementRef::wrap)
                .map(|el| el.value().name());
            if matches!(parent_tag, Some("script" | "style" | "noscript")) {
                continue;
            }
            let piece = text.text.trim();
            if !piece.is_empty() {
                out.push_str(piece);
                out.push(' ');
            }
        }
    }
    out.trim_end().to_string()
}
