//! Static site content: blog posts from front-matter files, the SEO
//! metadata map, and sitemap generation.

pub mod blog;
pub mod error;
pub mod seo;
pub mod sitemap;

pub use blog::{find_post, load_posts, parse_post, BlogPost};
pub use error::ContentError;
pub use seo::{SeoEntry, SeoMap};
pub use sitemap::{build_sitemap, site_entries, ChangeFrequency, SitemapEntry};
