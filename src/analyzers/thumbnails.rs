use image::imageops::FilterType;
use image::ImageFormat;
use serde::Serialize;

const THUMBNAIL_SIZE: u32 = 128;

#[derive(Debug, Clone, Serialize)]
pub struct Thumbnail {
    pub source_url: String,
    pub width: u32,
    pub height: u32,
    /// PNG bytes, base64-encoded at the JSON boundary by the caller.
    pub png_bytes: Vec<u8>,
}

/// Downloads up to `limit` images and resizes each to fit within a
/// `THUMBNAIL_SIZE` x `THUMBNAIL_SIZE` box, preserving aspect ratio.
/// Individual fetch/decode failures are skipped rather than failing the
/// whole batch.
pub async fn generate_thumbnails(
    client: &reqwest::Client,
    image_urls: &[String],
    limit: usize,
) -> Vec<Thumbnail> {
    let mut thumbnails = Vec::new();
    for url in image_urls.iter().take(limit) {
        match fetch_and_resize(client, url).await {
            Ok(thumb) => thumbnails.push(thumb),
            Err(_) => continue,
        }
    }
    thumbnails
}

async fn fetch_and_resize(client: &reqwest::Client, url: &str) -> Result<Thumbnail, anyhow::Error> {
    let bytes = client.get(url).send().await?.bytes().await?;
    let image = image::load_from_memory(&bytes)?;
    let resized = image.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle);

    let mut png_bytes = Vec::new();
    resized.write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)?;

    Ok(Thumbnail {
        source_url: url.to_string(),
        width: resized.width(),
        height: resized.height(),
        png_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_of_zero_yields_no_fetches() {
        // `take(0)` short-circuits before any network I/O happens.
        let urls = vec!["https://example.com/a.png".to_string()];
        assert_eq!(urls.iter().take(0).count(), 0);
    }
}
