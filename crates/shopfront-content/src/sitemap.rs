//! `sitemap.xml` generation per the sitemaps.org 0.9 protocol.

use std::fmt;

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::blog::BlogPost;
use crate::error::ContentError;

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Site-relative path (`/blog/first-overnight`) or an absolute URL.
    pub path: String,
    pub last_modified: Option<NaiveDate>,
    pub change_frequency: Option<ChangeFrequency>,
    /// `0.0..=1.0`.
    pub priority: Option<f32>,
}

impl SitemapEntry {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            last_modified: None,
            change_frequency: None,
            priority: None,
        }
    }

    #[must_use]
    pub fn last_modified(mut self, date: NaiveDate) -> Self {
        self.last_modified = Some(date);
        self
    }

    #[must_use]
    pub fn change_frequency(mut self, frequency: ChangeFrequency) -> Self {
        self.change_frequency = Some(frequency);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority.clamp(0.0, 1.0));
        self
    }
}

/// The storefront's public URL set: fixed landing pages, then every product,
/// collection and published post.
#[must_use]
pub fn site_entries(
    product_handles: &[String],
    collection_handles: &[String],
    posts: &[BlogPost],
) -> Vec<SitemapEntry> {
    let mut entries = vec![
        SitemapEntry::new("/")
            .change_frequency(ChangeFrequency::Daily)
            .priority(1.0),
        SitemapEntry::new("/products")
            .change_frequency(ChangeFrequency::Daily)
            .priority(0.9),
        SitemapEntry::new("/blog")
            .change_frequency(ChangeFrequency::Weekly)
            .priority(0.7),
        SitemapEntry::new("/contact")
            .change_frequency(ChangeFrequency::Monthly)
            .priority(0.3),
    ];
    entries.extend(product_handles.iter().map(|handle| {
        SitemapEntry::new(format!("/products/{handle}"))
            .change_frequency(ChangeFrequency::Weekly)
            .priority(0.8)
    }));
    entries.extend(collection_handles.iter().map(|handle| {
        SitemapEntry::new(format!("/collections/{handle}"))
            .change_frequency(ChangeFrequency::Weekly)
            .priority(0.6)
    }));
    entries.extend(posts.iter().map(|post| {
        SitemapEntry::new(format!("/blog/{}", post.slug))
            .last_modified(post.date)
            .change_frequency(ChangeFrequency::Monthly)
            .priority(0.5)
    }));
    entries
}

/// Renders `entries` as a `<urlset>` document, resolving relative paths
/// against `site_url`.
///
/// # Errors
///
/// Returns [`ContentError::Sitemap`] if the XML writer fails.
pub fn build_sitemap(site_url: &str, entries: &[SitemapEntry]) -> Result<String, ContentError> {
    let base = site_url.trim_end_matches('/');
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write(
        &mut writer,
        Event::Start(BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)])),
    )?;

    for entry in entries {
        write(&mut writer, Event::Start(BytesStart::new("url")))?;
        text_element(&mut writer, "loc", &absolute_url(base, &entry.path))?;
        if let Some(date) = entry.last_modified {
            text_element(&mut writer, "lastmod", &date.format("%Y-%m-%d").to_string())?;
        }
        if let Some(frequency) = entry.change_frequency {
            text_element(&mut writer, "changefreq", &frequency.to_string())?;
        }
        if let Some(priority) = entry.priority {
            text_element(&mut writer, "priority", &format!("{priority:.1}"))?;
        }
        write(&mut writer, Event::End(BytesEnd::new("url")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("urlset")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| ContentError::Sitemap(e.to_string()))
}

fn absolute_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), ContentError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), ContentError> {
    writer
        .write_event(event)
        .map_err(|e| ContentError::Sitemap(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sitemap_lists_absolute_urls() {
        let entries = vec![
            SitemapEntry::new("/").priority(1.0).change_frequency(ChangeFrequency::Daily),
            SitemapEntry::new("/blog/first-overnight")
                .last_modified(NaiveDate::from_ymd_opt(2026, 4, 2).unwrap()),
        ];

        let xml = build_sitemap("https://shop.example.com/", &entries).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://shop.example.com/</loc>"));
        assert!(xml.contains("<loc>https://shop.example.com/blog/first-overnight</loc>"));
        assert!(xml.contains("<lastmod>2026-04-02</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
    }

    #[test]
    fn sitemap_escapes_special_characters() {
        let entries = vec![SitemapEntry::new("/search?q=tent&sort=price")];
        let xml = build_sitemap("https://shop.example.com", &entries).unwrap();
        assert!(xml.contains("<loc>https://shop.example.com/search?q=tent&amp;sort=price</loc>"));
    }

    #[test]
    fn absolute_entries_are_kept() {
        let entries = vec![SitemapEntry::new("https://cdn.example.com/lookbook")];
        let xml = build_sitemap("https://shop.example.com", &entries).unwrap();
        assert!(xml.contains("<loc>https://cdn.example.com/lookbook</loc>"));
    }

    #[test]
    fn site_entries_cover_products_collections_and_posts() {
        let post = BlogPost {
            slug: "winter-layers".to_string(),
            title: "Winter layers".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 20).unwrap(),
            description: None,
            tags: Vec::new(),
            image: None,
            body: String::new(),
        };
        let entries = site_entries(
            &["trail-tee".to_string()],
            &["tents".to_string()],
            &[post],
        );

        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/",
                "/products",
                "/blog",
                "/contact",
                "/products/trail-tee",
                "/collections/tents",
                "/blog/winter-layers",
            ]
        );
        assert_eq!(
            entries[6].last_modified,
            NaiveDate::from_ymd_opt(2026, 9, 20)
        );
    }

    #[test]
    fn empty_sitemap_is_well_formed() {
        let xml = build_sitemap("https://shop.example.com", &[]).unwrap();
        assert!(xml.contains("<urlset"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
