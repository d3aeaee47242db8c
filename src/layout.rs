//! The document shell shared by every page: head, header, navigation,
//! content region, footer.

use anyhow::Result;
use atree::{att, Flat, Html, Node};
use chrono::{Datelike, Utc};

use crate::config::SiteConfig;
use crate::nav::{Nav, ToHtml};

fn year_range(from: i32, to: i32) -> String {
    if from == to {
        from.to_string()
    } else {
        format!("{}–{}", from, to)
    }
}

pub trait LayoutInterface: Send + Sync {
    /// Wrap the routed content subtree into a full document for
    /// `current_path`.
    fn page(
        &self,
        site: &SiteConfig,
        html: &Html,
        current_path: &str,
        content: Node,
    ) -> Result<Node>;
}

pub struct PortfolioLayout {
    pub nav: &'static Nav<'static>,
    pub copyright_from: i32,
    pub header_contents: Box<dyn Fn(&Html) -> Result<Flat> + Send + Sync>,
}

impl LayoutInterface for PortfolioLayout {
    fn page(
        &self,
        site: &SiteConfig,
        html: &Html,
        current_path: &str,
        content: Node,
    ) -> Result<Node> {
        // Do not repeat the site name if the page has no title of its
        // own.
        let head_title = match self.nav.entry_for(current_path) {
            Some(entry) if entry.name != site.site_name => {
                html.string(format!("{} | {}", entry.name, site.site_name))
            }
            _ => html.str(&site.site_name),
        };

        let mut header_body = Vec::new();
        (self.header_contents)(html)?.push_onto(&mut header_body);

        Ok(html.html(
            [],
            [
                html.head([], [html.title([], [head_title])?])?,
                html.body(
                    [],
                    [html.div(
                        [att("class", "wrapper")],
                        [
                            html.header([att("class", "header")], header_body)?,
                            html.div(
                                [att("class", "navigation")],
                                [self.nav.to_html(html, current_path)?],
                            )?,
                            html.content_region("page-content", content)?,
                            html.footer(
                                [att("class", "footer")],
                                [html.string(format!(
                                    "Copyright © {} {}",
                                    year_range(self.copyright_from, Utc::now().year()),
                                    site.owner
                                ))],
                            )?,
                        ],
                    )?],
                )?,
            ],
        )?)
    }
}
