use scraper::{Html, Selector};
use serde_json::Value;

/// Extracts JSON from `<script type="application/ld+json">`; accepts an
/// object or an array of objects, silently skipping malformed entries.
/// Entries keep an arbitrary `Value` shape since structured data payloads
/// are schema-less by nature.
pub fn extract_structured_data(html: &str) -> Vec<Value> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();

    let mut entries = Vec::new();
    for script in document.select(&selector) {
        let text: String = script.text().collect();
        let parsed: Result<Value, _> = serde_json::from_str(text.trim());
        match parsed {
            Ok(Value::Object(obj)) => entries.push(Value::Object(obj)),
            Ok(Value::Array(items)) => {
                entries.extend(items.into_iter().filter(|v| v.is_object()));
            }
            _ => continue,
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_entry() {
        let html = r#"
            <html>
              <head>
                <script type="application/ld+json">
                {"@context": "https://schema.org", "@type": "Person", "name": "Ada"}
                </script>
              </head>
            </html>
        "#;
        let data = extract_structured_data(html);
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["@type"], "Person");
    }

    #[test]
    fn skips_malformed_json() {
        let html = r#"<script type="application/ld+json">{not valid json</script>"#;
        assert!(extract_structured_data(html).is_empty());
    }

    #[test]
    fn flattens_array_of_objects() {
        let html = r#"<script type="application/ld+json">[{"a":1},{"b":2}]</script>"#;
        let data = extract_structured_data(html);
        assert_eq!(data.len(), 2);
    }
}
