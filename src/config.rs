//! Static site configuration: the data records the page producers
//! render. Loaded once at startup and passed to producers explicitly;
//! nothing in here is reachable through globals.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site_name: String,
    pub owner: String,
    pub tagline: String,
    pub projects: Vec<Project>,
    pub skill_groups: Vec<SkillGroup>,
}

impl SiteConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<SiteConfig> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading site config {path:?}"))?;
        serde_json::from_str(&s).with_context(|| format!("parsing site config {path:?}"))
    }

    /// The built-in sample records, used when no config file is given.
    pub fn sample() -> SiteConfig {
        let owned = |v: &[&str]| -> Vec<String> { v.iter().map(|s| s.to_string()).collect() };
        SiteConfig {
            site_name: "My Developer Portfolio".into(),
            owner: "Your Name".into(),
            tagline: "I'm a passionate developer creating innovative solutions".into(),
            projects: vec![
                Project {
                    name: "Project 1".into(),
                    description: "A web application for task management".into(),
                    technologies: owned(&["Rust", "SQLite", "Bootstrap"]),
                    link: "#".into(),
                },
                Project {
                    name: "Project 2".into(),
                    description: "Machine learning recommendation system".into(),
                    technologies: owned(&["Python", "scikit-learn", "Pandas"]),
                    link: "#".into(),
                },
            ],
            skill_groups: vec![
                SkillGroup {
                    category: "Programming Languages".into(),
                    skills: owned(&["Rust", "Python", "JavaScript"]),
                },
                SkillGroup {
                    category: "Web Technologies".into(),
                    skills: owned(&["HTTP", "HTML", "CSS"]),
                },
                SkillGroup {
                    category: "Data Science".into(),
                    skills: owned(&["Pandas", "NumPy", "scikit-learn"]),
                },
            ],
        }
    }
}
