use contrast::find_contrast_warnings;
use scraper::{Html, Selector};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AccessibilityReport {
    pub images_missing_alt: Vec<String>,
    pub links_without_text: Vec<String>,
    pub buttons_without_text: Vec<usize>,
    pub contrast_warnings: Vec<String>,
    pub score: u32,
}

/// Scoring: 100 minus 10 per issue, floored at 0.
pub fn analyze_accessibility(html: &str) -> AccessibilityReport {
    let document = Html::parse_document(html);

    let img_sel = Selector::parse("img").unwrap();
    let images_missing_alt: Vec<String> = document
        .select(&img_sel)
        .filter(|el| el.value().attr("alt").map(|a| a.trim().is_empty()).unwrap_or(true))
        .filter_map(|el| el.value().attr("src").map(|s| s.to_string()))
        .collect();

    let a_sel = Selector::parse("a").unwrap();
    let links_without_text: Vec<String> = document
        .select(&a_sel)
        .filter(|el| el.text().collect::<String>().trim().is_empty())
        .filter_map(|el| el.value().attr("href").map(|s| s.to_string()))
        .collect();

    let button_sel = Selector::parse("button").unwrap();
    let buttons_without_text: Vec<usize> = document
        .select(&button_sel)
        .enumerate()
        .filter(|(_, el)| el.text().collect::<String>().trim().is_empty())
        .map(|(idx, _)| idx)
        .collect();

    let contrast_warnings = find_contrast_warnings(&document);

    let total_issues = images_missing_alt.len()
        + links_without_text.len()
        + buttons_without_text.len()
        + contrast_warnings.len();
    let score = 100u32.saturating_sub((total_issues as u32) * 10);

    AccessibilityReport {
        images_missing_alt,
        links_without_text,
        buttons_without_text,
        contrast_warnings,
        score,
    }
}

/// Minimal inline-style contrast heuristic: flags elements whose
/// `color:` and `background-color:` hex values are identical, the same
/// check the original `_detect_basic_contrast_issues` performs.
mod contrast {
    use scraper::{Html, Selector};

    /// Split an inline `style` attribute into `(property, value)` pairs.
    fn declarations(style: &str) -> Vec<(&str, &str)> {
        style
            .split(';')
            .filter_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                Some((prop.trim(), value.trim()))
            })
            .collect()
    }

    fn hex_value(value: &str) -> Option<String> {
        let hash_idx = value.find('#')?;
        let hex_start = &value[hash_idx + 1..];
        let hex_len = hex_start
            .chars()
            .take_while(|c| c.is_ascii_hexdigit())
            .count();
        if hex_len == 3 || hex_len == 6 {
            Some(hex_start[..hex_len].to_lowercase())
        } else {
            None
        }
    }

    fn extract_hex(decls: &[(&str, &str)], prop: &str) -> Option<String> {
        decls
            .iter()
            .find(|(p, _)| *p == prop)
            .and_then(|(_, v)| hex_value(v))
    }

    pub fn find_contrast_warnings(document: &Html) -> Vec<String> {
        let sel = Selector::parse("[style]").unwrap();
        let mut warnings = Vec::new();
        for el in document.select(&sel) {
            let style = el.value().attr("style").unwrap_or("").to_lowercase();
            let decls = declarations(&style);
            let fg = extract_hex(&decls, "color");
            let bg = extract_hex(&decls, "background-color")
                .or_else(|| extract_hex(&decls, "background"));
            if let (Some(fg), Some(bg)) = (fg, bg) {
                if fg == bg {
                    warnings.push(format!(
                        "Posible poco contraste en elemento: {}",
                        el.value().name()
                    ));
                }
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_missing_alt_empty_links_buttons_and_contrast() {
        let html = r#"
            <html>
              <body>
                <img src="img.png" />
                <a href="/empty"></a>
                <button></button>
                <div style="color:#fff;background-color:#fff">Texto</div>
              </body>
            </html>
        "#;
        let report = analyze_accessibility(html);
        assert!(report.images_missing_alt.contains(&"img.png".to_string()));
        assert!(report.links_without_text.contains(&"/empty".to_string()));
        assert_eq!(report.buttons_without_text, vec![0]);
        assert_eq!(report.contrast_warnings.len(), 1);
        assert_eq!(report.score, 60);
    }

    #[test]
    fn score_never_goes_negative() {
        let html = (0..20)
            .map(|_| r#"<img src="x.png" />"#)
            .collect::<Vec<_>>()
            .join("");
        let report = analyze_accessibility(&html);
        assert_eq!(report.score, 0);
    }
}
