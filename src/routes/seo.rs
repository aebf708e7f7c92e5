use axum::{extract::State, http::header, response::IntoResponse};
use chrono::Utc;

use crate::startup::SiteBaseUrl;

/// A statically rendered page of the website.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub path: &'static str,
    pub change_frequency: &'static str,
    pub priority: f32,
}

pub const PAGES: [Page; 5] = [
    Page {
        path: "/",
        change_frequency: "weekly",
        priority: 1.0,
    },
    Page {
        path: "/about",
        change_frequency: "monthly",
        priority: 0.8,
    },
    Page {
        path: "/services",
        change_frequency: "monthly",
        priority: 0.9,
    },
    Page {
        path: "/portfolio",
        change_frequency: "weekly",
        priority: 0.8,
    },
    Page {
        path: "/contact",
        change_frequency: "yearly",
        priority: 0.7,
    },
];

#[tracing::instrument(name = "Sitemap", skip(base_url))]
pub async fn sitemap_xml(State(base_url): State<SiteBaseUrl>) -> impl IntoResponse {
    let last_modified = Utc::now().format("%Y-%m-%d").to_string();
    (
        [(header::CONTENT_TYPE, "application/xml")],
        render_sitemap(&base_url.0, &last_modified),
    )
}

#[tracing::instrument(name = "Robots", skip(base_url))]
pub async fn robots_txt(State(base_url): State<SiteBaseUrl>) -> impl IntoResponse {
    let base_url = base_url.0.trim_end_matches('/');
    format!("User-agent: *\nAllow: /\n\nSitemap: {base_url}/sitemap.xml\n")
}

fn render_sitemap(base_url: &str, last_modified: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let urls: String = PAGES
        .iter()
        .map(|page| {
            let location = match page.path {
                "/" => base_url.to_owned(),
                path => format!("{base_url}{path}"),
            };
            format!(
                "  <url>\n    <loc>{location}</loc>\n    <lastmod>{last_modified}</lastmod>\n    \
                 <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
                page.change_frequency, page.priority
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{urls}</urlset>\n"
    )
}
