use std::path::PathBuf;

use anyhow::Result;
use atree::{att, Flat, Html, Print};
use clap::Parser;
use portfolio::config::SiteConfig;
use portfolio::layout::{LayoutInterface, PortfolioLayout};
use portfolio::nav::{Nav, NavEntry};
use portfolio::pages;
use portfolio::router::PathRouter;

static NAV: Nav = Nav(&[
    NavEntry {
        name: "Home",
        path: "/",
    },
    NavEntry {
        name: "Projects",
        path: "/projects",
    },
    NavEntry {
        name: "Skills",
        path: "/skills",
    },
    NavEntry {
        name: "Contact",
        path: "/contact",
    },
]);

#[derive(Parser, Debug)]
#[clap(
    name = "portfolio",
    about = "Render the portfolio site for one or more browser paths"
)]
struct Opts {
    /// JSON site configuration; the built-in sample records are used
    /// when omitted.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Print only the content subtree instead of the whole document.
    #[clap(long)]
    fragment: bool,

    /// Browser paths to visit, in order; defaults to "/".
    paths: Vec<String>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let site = match &opts.config {
        Some(path) => SiteConfig::from_json_file(path)?,
        None => SiteConfig::sample(),
    };

    let layout = PortfolioLayout {
        nav: &NAV,
        copyright_from: 2023,
        header_contents: Box::new(|html: &Html| {
            Ok(Flat::One(html.a(
                [att("href", "/")],
                [html.img(
                    [att("src", "/static/avatar.png"), att("alt", "avatar")],
                    [],
                )?],
            )?))
        }),
    };

    let router = PathRouter::new(pages::routes()?, "/", site.clone())?;

    let html = Html::new();
    let paths = if opts.paths.is_empty() {
        vec!["/".to_string()]
    } else {
        opts.paths
    };
    for path in &paths {
        let content = router.path_changed(path)?;
        if opts.fragment {
            println!("{}", content.to_html_fragment_string()?);
        } else {
            let doc = layout.page(&site, &html, path, (*content).clone())?;
            println!("{}", doc.to_html_document_string()?);
        }
    }
    Ok(())
}
