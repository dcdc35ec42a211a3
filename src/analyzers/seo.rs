use scraper::{Html, Selector};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SeoReport {
    pub title_length: usize,
    pub meta_description_length: usize,
    pub h1_count: usize,
    pub has_canonical: bool,
    pub has_robots: bool,
    pub has_open_graph: bool,
    pub score: u32,
}

/// Deterministic SEO scoring oracle:
/// 0 + 15 (title non-empty) + 20 (10<=len(title)<=70) + 15 (description
/// non-empty) + 15 (50<=len(description)<=160) + 10 (exactly one h1) +
/// 10 (canonical link) + 5 (robots meta) + 10 (any og: meta), capped at 100.
pub fn evaluate_seo(html: &str, scraped_title: &str, description: &str) -> SeoReport {
    let document = Html::parse_document(html);

    let title = if !scraped_title.is_empty() {
        scraped_title.to_string()
    } else {
        let sel = Selector::parse("title").unwrap();
        document
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    };

    let h1_sel = Selector::parse("h1").unwrap();
    let h1_count = document.select(&h1_sel).count();

    let canonical_sel = Selector::parse(r#"link[rel="canonical"]"#).unwrap();
    let has_canonical = document.select(&canonical_sel).next().is_some();

    let robots_sel = Selector::parse(r#"meta[name="robots"]"#).unwrap();
    let has_robots = document.select(&robots_sel).next().is_some();

    let meta_sel = Selector::parse("meta").unwrap();
    let has_open_graph = document.select(&meta_sel).any(|el| {
        el.value()
            .attr("property")
            .map(|p| p.contains("og:"))
            .unwrap_or(false)
    });

    let mut score: u32 = 0;
    if !title.is_empty() {
        score += 15;
    }
    if (10..=70).contains(&title.chars().count()) {
        score += 20;
    }
    if !description.is_empty() {
        score += 15;
    }
    if (50..=160).contains(&description.chars().count()) {
        score += 15;
    }
    if h1_count == 1 {
        score += 10;
    }
    if has_canonical {
        score += 10;
    }
    if has_robots {
        score += 5;
    }
    if has_open_graph {
        score += 10;
    }

    SeoReport {
        title_length: title.chars().count(),
        meta_description_length: description.chars().count(),
        h1_count,
        has_canonical,
        has_robots,
        has_open_graph,
        score: score.min(100),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 15+20+15+15+10+10+10 = 95.
    #[test]
    fn oracle_scores_ninety_five() {
        let html = r#"
            <html>
              <head>
                <title>Example title for SEO</title>
                <meta name="description" content="A sixty character long meta description for SEO tests" />
                <link rel="canonical" href="https://example.com" />
                <meta property="og:title" content="Open Graph Title" />
              </head>
              <body><h1>Hola</h1></body>
            </html>
        "#;
        let description = "A sixty character long meta description for SEO tests";
        let report = evaluate_seo(html, "Example title for SEO", description);
        assert_eq!(report.h1_count, 1);
        assert_eq!(report.score, 95);
    }

    #[test]
    fn score_is_always_in_range() {
        let report = evaluate_seo("<html></html>", "", "");
        assert!(report.score <= 100);
    }
}
