//! Sitemap XML rendering and output.
//!
//! Renders custom URL entries as a sitemap-protocol `<urlset>` document
//! and writes it plain or gzipped.

use crate::types::CustomUrl;
use chrono::SecondsFormat;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use std::path::Path;

/// Sitemap protocol namespace.
const URLSET_XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Escape the five XML-special characters in text content.
fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render the entries as a complete sitemap document.
pub fn render_sitemap(urls: &[CustomUrl]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", URLSET_XMLNS));
    for url in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&url.loc)));
        if let Some(last_mod) = url.last_mod {
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                last_mod.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            url.change_freq
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", url.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Write a rendered sitemap to `path`, gzipping when requested or when
/// the path ends in `.gz`.
pub fn write_sitemap_file(path: &Path, urls: &[CustomUrl], gzip: bool) -> std::io::Result<()> {
    let xml = render_sitemap(urls);
    let gzip = gzip
        || path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    if gzip {
        let file = std::fs::File::create(path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(xml.as_bytes())?;
        encoder.finish()?;
    } else {
        std::fs::write(path, xml)?;
    }
    Ok(())
}

/// Write a rendered sitemap to an arbitrary writer, uncompressed.
pub fn write_sitemap<W: Write>(writer: &mut W, urls: &[CustomUrl]) -> std::io::Result<()> {
    writer.write_all(render_sitemap(urls).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeFrequency;
    use chrono::{TimeZone, Utc};
    use std::io::Read;

    #[test]
    fn test_empty_urlset() {
        let xml = render_sitemap(&[]);
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.ends_with("</urlset>\n"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_entry_rendering() {
        let url = CustomUrl {
            loc: "https://shop.example.com/sale".to_string(),
            last_mod: Some(Utc.with_ymd_and_hms(2026, 5, 1, 10, 0, 0).unwrap()),
            change_freq: ChangeFrequency::Daily,
            priority: 0.9,
        };
        let xml = render_sitemap(&[url]);
        assert!(xml.contains("<loc>https://shop.example.com/sale</loc>"));
        assert!(xml.contains("<lastmod>2026-05-01T10:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.9</priority>"));
    }

    #[test]
    fn test_loc_is_escaped() {
        let url = CustomUrl::new("https://shop.example.com/search?q=socks&color=\"red\"");
        let xml = render_sitemap(&[url]);
        assert!(xml.contains("q=socks&amp;color=&quot;red&quot;"));
        assert!(!xml.contains("&color="));
    }

    #[test]
    fn test_lastmod_omitted_when_unknown() {
        let xml = render_sitemap(&[CustomUrl::new("https://x.example/a")]);
        assert!(!xml.contains("<lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.5</priority>"));
    }

    #[test]
    fn test_gzip_round_trip() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("sitemap.xml.gz");
        let urls = vec![CustomUrl::new("https://x.example/a")];
        write_sitemap_file(&path, &urls, false).unwrap();

        // .gz extension alone triggers compression
        let file = std::fs::File::open(&path).unwrap();
        let mut decoder = flate2::read::GzDecoder::new(file);
        let mut xml = String::new();
        decoder.read_to_string(&mut xml).unwrap();
        assert_eq!(xml, render_sitemap(&urls));
    }

    #[test]
    fn test_plain_write() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("sitemap.xml");
        let urls = vec![CustomUrl::new("https://x.example/a")];
        write_sitemap_file(&path, &urls, false).unwrap();
        let xml = std::fs::read_to_string(&path).unwrap();
        assert_eq!(xml, render_sitemap(&urls));
    }
}
