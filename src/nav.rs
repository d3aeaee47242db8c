use anyhow::Result;
use atree::{att, Html, Node, TryCollectBody};

use crate::path::normalize_path;

pub trait ToHtml {
    /// `current_path` is the route the shell is showing; entries
    /// pointing at it render as plain text instead of a link.
    fn to_html(&self, html: &Html, current_path: &str) -> Result<Node>;
}

pub struct NavEntry {
    pub name: &'static str,
    pub path: &'static str,
}

impl NavEntry {
    fn is_current(&self, current_path: &str) -> bool {
        normalize_path(self.path) == normalize_path(current_path)
    }
}

impl ToHtml for NavEntry {
    fn to_html(&self, html: &Html, current_path: &str) -> Result<Node> {
        let name = html.staticstr(self.name);
        Ok(html.li(
            [],
            [if self.is_current(current_path) {
                name
            } else {
                html.a([att("href", self.path)], [name])?
            }],
        )?)
    }
}

pub struct Nav<'t>(pub &'t [NavEntry]);

impl<'t> Nav<'t> {
    /// The entry registered for `current_path`, if any; used for page
    /// titles.
    pub fn entry_for(&self, current_path: &str) -> Option<&NavEntry> {
        self.0.iter().find(|e| e.is_current(current_path))
    }
}

impl<'t> ToHtml for Nav<'t> {
    fn to_html(&self, html: &Html, current_path: &str) -> Result<Node> {
        Ok(html.ul(
            [att("class", "nav")],
            self.0
                .iter()
                .map(|naventry| naventry.to_html(html, current_path))
                .try_collect_body()?,
        )?)
    }
}
