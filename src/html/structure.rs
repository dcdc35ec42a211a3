use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, Serialize, Default)]
pub struct HeaderCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
    pub h6: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BasicStructure {
    pub title: String,
    pub links: Vec<String>,
    pub structure: HeaderCounts,
    pub images_count: usize,
    pub image_urls: Vec<String>,
}

fn absolutize(base: Option<&Url>, href: &str) -> String {
    match base {
        Some(base) => base
            .join(href)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string()),
        None => href.to_string(),
    }
}

fn collect_urls(document: &Html, selector: &Selector, attr: &str, base: Option<&Url>) -> Vec<String> {
    document
        .select(selector)
        .filter_map(|el| el.value().attr(attr))
        .map(|href| absolutize(base, href))
        .collect()
}

/// Equivalent of `parse_basic_structure(html, base_url)` in the original.
pub fn parse_basic_structure(html: &str, base_url: Option<&str>) -> BasicStructure {
    let document = Html::parse_document(html);
    let base = base_url.and_then(|u| Url::parse(u).ok());

    let title_sel = Selector::parse("title").unwrap();
    let title = document
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let a_sel = Selector::parse("a[href]").unwrap();
    let links = collect_urls(&document, &a_sel, "href", base.as_ref());

    let img_sel = Selector::parse("img").unwrap();
    let images_count = document.select(&img_sel).count();
    let img_src_sel = Selector::parse("img[src]").unwrap();
    let image_urls = collect_urls(&document, &img_src_sel, "src", base.as_ref());

    let count_tag = |tag: &str| {
        let sel = Selector::parse(tag).unwrap();
        document.select(&sel).count()
    };
    let structure = HeaderCounts {
        h1: count_tag("h1"),
        h2: count_tag("h2"),
        h3: count_tag("h3"),
        h4: count_tag("h4"),
        h5: count_tag("h5"),
        h6: count_tag("h6"),
    };

    BasicStructure {
        title,
        links,
        structure,
        images_count,
        image_urls,
    }
}
