//! Blog posts stored as Markdown files with a YAML front matter block:
//!
//! ```text
//! ---
//! title: Packing for a first overnight
//! date: 2026-04-02
//! description: What goes in the pack, and what stays home.
//! tags: [camping, guides]
//! ---
//! Body text...
//! ```
//!
//! The slug is the file stem, so `first-overnight.md` is served at
//! `/blog/first-overnight`.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

const FRONT_MATTER_FENCE: &str = "---";
const EXCERPT_CHARS: usize = 160;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    /// Markdown source after the front matter.
    pub body: String,
}

impl BlogPost {
    /// The description, or the opening of the first body paragraph.
    #[must_use]
    pub fn excerpt(&self) -> String {
        if let Some(description) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            return description.to_string();
        }
        let paragraph = self
            .body
            .split("\n\n")
            .map(str::trim)
            .find(|p| !p.is_empty() && !p.starts_with('#'))
            .unwrap_or_default();
        let mut excerpt: String = paragraph.chars().take(EXCERPT_CHARS).collect();
        if paragraph.chars().count() > EXCERPT_CHARS {
            excerpt.push('…');
        }
        excerpt
    }
}

#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    date: NaiveDate,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    draft: bool,
}

/// Parses one post. Drafts parse successfully but yield `Ok(None)`.
///
/// # Errors
///
/// - [`ContentError::MissingFrontMatter`] when the file does not open with a
///   closed `---` block.
/// - [`ContentError::FrontMatter`] when the block is not valid YAML or lacks
///   `title`/`date`.
pub fn parse_post(slug: &str, raw: &str) -> Result<Option<BlogPost>, ContentError> {
    let (front, body) = split_front_matter(raw).ok_or_else(|| ContentError::MissingFrontMatter {
        path: slug.to_string(),
    })?;

    let meta: FrontMatter =
        serde_yaml::from_str(front).map_err(|source| ContentError::FrontMatter {
            path: slug.to_string(),
            source,
        })?;
    if meta.draft {
        return Ok(None);
    }

    Ok(Some(BlogPost {
        slug: slug.to_string(),
        title: meta.title,
        date: meta.date,
        description: meta.description,
        tags: meta.tags,
        image: meta.image,
        body: body.to_string(),
    }))
}

/// Returns `(front_matter, body)`, or `None` when the fence is missing.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let rest = raw
        .strip_prefix(FRONT_MATTER_FENCE)?
        .trim_start_matches([' ', '\t']);
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            let front = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Some((front, body));
        }
        offset += line.len();
    }
    None
}

/// Loads every published post under `dir`, newest first.
///
/// Files that fail to parse are skipped with a warning. A missing directory
/// yields an empty list.
///
/// # Errors
///
/// Returns [`ContentError::Io`] if `dir` exists but cannot be listed.
pub fn load_posts(dir: &Path) -> Result<Vec<BlogPost>, ContentError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "blog directory not found; no posts loaded");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ContentError::Io {
                path: dir.display().to_string(),
                source,
            })
        }
    };

    let mut posts = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        match read_post(&path, slug) {
            Ok(Some(post)) => posts.push(post),
            Ok(None) => tracing::debug!(slug, "skipping draft post"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping malformed post"),
        }
    }

    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
    Ok(posts)
}

/// Loads a single published post by slug.
///
/// # Errors
///
/// As for [`parse_post`], plus [`ContentError::Io`] when the file exists but
/// cannot be read.
pub fn find_post(dir: &Path, slug: &str) -> Result<Option<BlogPost>, ContentError> {
    if slug.is_empty() || slug.contains(['/', '\\']) || slug.starts_with('.') {
        return Ok(None);
    }
    let path = dir.join(format!("{slug}.md"));
    if !path.is_file() {
        return Ok(None);
    }
    read_post(&path, slug)
}

fn read_post(path: &Path, slug: &str) -> Result<Option<BlogPost>, ContentError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_post(slug, &raw)
}

#[cfg(test)]
#[path = "blog_test.rs"]
mod tests;
