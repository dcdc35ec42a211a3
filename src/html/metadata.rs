use std::collections::BTreeMap;

use scraper::{Html, Selector};

/// Extract a fixed meta-tag subset: `description`, `keywords`, `og:title`,
/// `og:description`. Only present keys are emitted.
pub fn extract_meta_tags(html: &str) -> BTreeMap<String, String> {
    let document = Html::parse_document(html);
    let mut meta = BTreeMap::new();

    let by_name = |name: &str| -> Option<String> {
        let selector = Selector::parse(&format!(r#"meta[name="{name}"]"#)).ok()?;
        document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.to_string())
    };
    let by_property = |prop: &str| -> Option<String> {
        let selector = Selector::parse(&format!(r#"meta[property="{prop}"]"#)).ok()?;
        document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.to_string())
    };

    if let Some(v) = by_name("description") {
        meta.insert("description".to_string(), v);
    }
    if let Some(v) = by_name("keywords") {
        meta.insert("keywords".to_string(), v);
    }
    if let Some(v) = by_property("og:title").or_else(|| by_name("og:title")) {
        meta.insert("og:title".to_string(), v);
    }
    if let Some(v) = by_property("og:description").or_else(|| by_name("og:description")) {
        meta.insert("og:description".to_string(), v);
    }
    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_present_keys_only() {
        let html = r#"
            <html><head>
              <meta name="description" content="desc" />
              <meta name="keywords" content="k1,k2" />
              <meta property="og:title" content="ogt" />
            </head></html>
        "#;
        let meta = extract_meta_tags(html);
        assert_eq!(meta.get("description").unwrap(), "desc");
        assert_eq!(meta.get("keywords").unwrap(), "k1,k2");
        assert_eq!(meta.get("og:title").unwrap(), "ogt");
        assert!(!meta.contains_key("og:description"));
    }
}
