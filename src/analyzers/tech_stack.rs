use std::collections::BTreeSet;

use scraper::{Html, Selector};

const MARKERS: &[(&str, &[&str])] = &[
    ("React", &["data-reactroot", "react"]),
    ("Angular", &["ng-app", "ng-controller", "angular"]),
    ("Vue", &["v-bind:", "vuejs", "vue.js", "vue"]),
    ("Svelte", &["svelte"]),
    ("jQuery", &["jquery"]),
    ("Bootstrap", &["bootstrap"]),
    ("TailwindCSS", &["tailwind"]),
    ("WordPress", &["wp-content", "wp-json"]),
    ("Drupal", &["drupal"]),
    ("Django", &["django"]),
    ("Laravel", &["laravel"]),
    ("Next.js", &["__next", "next/dist"]),
    ("Nuxt.js", &["nuxt"]),
];

/// Scans lowercased HTML, script `src`s, and stylesheet `href`s for fixed
/// substring markers; returns sorted unique labels.
pub fn detect_technologies(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let text = html.to_lowercase();

    let script_sel = Selector::parse("script").unwrap();
    let scripts: String = document
        .select(&script_sel)
        .filter_map(|el| el.value().attr("src"))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let link_sel = Selector::parse("link").unwrap();
    let styles: String = document
        .select(&link_sel)
        .filter_map(|el| el.value().attr("href"))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let haystack = format!("{text} {scripts} {styles}");

    let mut technologies = BTreeSet::new();
    for (label, clues) in MARKERS {
        if clues.iter().any(|clue| haystack.contains(clue)) {
            technologies.insert(label.to_string());
        }
    }
    technologies.into_iter().collect()
}
