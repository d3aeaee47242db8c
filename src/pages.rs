//! The per-route content producers. Each builds its subtree fresh
//! from the injected [`SiteConfig`] on every call.

use std::sync::Arc;

use anyhow::Result;
use atree::{att, Html, Node, TryCollectBody};
use itertools::Itertools;

use crate::config::{Project, SiteConfig, SkillGroup};
use crate::router::{Producer, RouteTable, RouterError};

pub struct HomePage;

impl Producer<SiteConfig> for HomePage {
    fn produce(&self, site: &SiteConfig, html: &Html) -> Result<Node> {
        Ok(html.div(
            [att("class", "hero")],
            [
                html.h1([], format!("Welcome to {}", site.site_name))?,
                html.p([], html.str(&site.tagline))?,
                html.a([att("href", "/projects")], "View My Projects")?,
            ],
        )?)
    }
}

fn project_card(html: &Html, project: &Project) -> Result<Node> {
    Ok(html.div(
        [att("class", "card")],
        [
            html.h5([], html.str(&project.name))?,
            html.p([], html.str(&project.description))?,
            html.p(
                [att("class", "technologies")],
                html.string(format!(
                    "Technologies: {}",
                    project.technologies.iter().join(", ")
                )),
            )?,
            html.a([att("href", &project.link)], "View Project")?,
        ],
    )?)
}

pub struct ProjectsPage;

impl Producer<SiteConfig> for ProjectsPage {
    fn produce(&self, site: &SiteConfig, html: &Html) -> Result<Node> {
        Ok(html.section(
            [att("class", "projects")],
            [
                html.h2([], "My Projects")?,
                html.div(
                    [att("class", "cards")],
                    site.projects
                        .iter()
                        .map(|project| project_card(html, project))
                        .try_collect_body()?,
                )?,
            ],
        )?)
    }
}

fn skill_card(html: &Html, group: &SkillGroup) -> Result<Node> {
    Ok(html.div(
        [att("class", "card")],
        [
            html.h4([], html.str(&group.category))?,
            html.ul(
                [],
                group
                    .skills
                    .iter()
                    .map(|skill| -> Result<Node> { Ok(html.li([], html.str(skill))?) })
                    .try_collect_body()?,
            )?,
        ],
    )?)
}

pub struct SkillsPage;

impl Producer<SiteConfig> for SkillsPage {
    fn produce(&self, site: &SiteConfig, html: &Html) -> Result<Node> {
        Ok(html.section(
            [att("class", "skills")],
            [
                html.h2([], "My Skills")?,
                html.div(
                    [att("class", "cards")],
                    site.skill_groups
                        .iter()
                        .map(|group| skill_card(html, group))
                        .try_collect_body()?,
                )?,
            ],
        )?)
    }
}

fn form_field(html: &Html, name: &'static str, field: Node) -> Result<Node> {
    Ok(html.div(
        [att("class", "form-field")],
        [html.label([], name)?, field],
    )?)
}

pub struct ContactPage;

impl Producer<SiteConfig> for ContactPage {
    fn produce(&self, _site: &SiteConfig, html: &Html) -> Result<Node> {
        // Markup only; nothing processes a submission.
        Ok(html.section(
            [att("class", "contact")],
            [
                html.h2([], "Contact Me")?,
                html.form(
                    [],
                    [
                        form_field(
                            html,
                            "Name",
                            html.input(
                                [att("type", "text"), att("placeholder", "Your Name")],
                                [],
                            )?,
                        )?,
                        form_field(
                            html,
                            "Email",
                            html.input(
                                [att("type", "email"), att("placeholder", "Your Email")],
                                [],
                            )?,
                        )?,
                        form_field(
                            html,
                            "Message",
                            html.textarea([att("placeholder", "Your Message")], [])?,
                        )?,
                        html.button([], "Send Message")?,
                    ],
                )?,
            ],
        )?)
    }
}

/// The standard portfolio route table. `/home` is an alias kept from
/// the original navigation scheme; `/` doubles as the default entry.
pub fn routes() -> Result<RouteTable<SiteConfig>, RouterError> {
    let mut table = RouteTable::new();
    table
        .add("/", Arc::new(HomePage))?
        .add("/home", Arc::new(HomePage))?
        .add("/projects", Arc::new(ProjectsPage))?
        .add("/skills", Arc::new(SkillsPage))?
        .add("/contact", Arc::new(ContactPage))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use atree::Print;

    use super::*;
    use crate::router::PathRouter;

    fn router() -> PathRouter<SiteConfig> {
        PathRouter::new(routes().unwrap(), "/", SiteConfig::sample()).unwrap()
    }

    #[test]
    fn t_routes_register() {
        let table = routes().unwrap();
        let patterns: Vec<&str> = table.patterns().collect();
        assert_eq!(
            patterns,
            vec!["/", "/home", "/projects", "/skills", "/contact"]
        );
    }

    #[test]
    fn t_home_alias() -> Result<()> {
        let router = router();
        assert_eq!(router.resolve("/home")?, router.resolve("/")?);
        Ok(())
    }

    #[test]
    fn t_projects_render_config_records() -> Result<()> {
        let router = router();
        let markup = router.resolve("/projects")?.to_html_fragment_string()?;
        assert!(markup.contains("<h5>Project 1</h5>"));
        assert!(markup.contains("A web application for task management"));
        assert!(markup.contains("Technologies: Rust, SQLite, Bootstrap"));
        Ok(())
    }

    #[test]
    fn t_skills_render_config_records() -> Result<()> {
        let router = router();
        let markup = router.resolve("/skills")?.to_html_fragment_string()?;
        assert!(markup.contains("<h4>Programming Languages</h4>"));
        assert!(markup.contains("<li>Rust</li>"));
        Ok(())
    }

    #[test]
    fn t_contact_form_is_inert() -> Result<()> {
        let router = router();
        let markup = router.resolve("/contact")?.to_html_fragment_string()?;
        // no action/method: submissions go nowhere by design
        assert!(markup.contains("<form>"));
        assert!(markup.contains("<input type=\"text\" placeholder=\"Your Name\">"));
        assert!(markup.contains("<textarea placeholder=\"Your Message\"></textarea>"));
        Ok(())
    }

    #[test]
    fn t_unknown_path_is_home() -> Result<()> {
        let router = router();
        assert_eq!(router.resolve("/nonexistent")?, router.resolve("/")?);
        Ok(())
    }
}
