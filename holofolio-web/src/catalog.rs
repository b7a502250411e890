//! Site content: skill labels and project descriptors
//!
//! Content is configuration data supplied once as YAML. The page embeds
//! `content/site.yaml` at compile time; the CLI can load any file with the
//! same shape.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{PortfolioError, PortfolioResult};

/// The content file embedded into the page
pub const EMBEDDED_CONTENT: &str = include_str!("../content/site.yaml");

/// Default label of the external link button
pub const DEFAULT_LINK_LABEL: &str = "View Original on TikTok ↗";

/// One video path or a list of them
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Videos {
    One(String),
    Many(Vec<String>),
}

impl Videos {
    /// Video paths in display order
    pub fn paths(&self) -> &[String] {
        match self {
            Videos::One(path) => std::slice::from_ref(path),
            Videos::Many(paths) => paths,
        }
    }
}

/// Static metadata for one portfolio project
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectDescriptor {
    /// Display title
    pub title: String,

    /// Video asset path(s)
    pub video: Videos,

    /// Poster image shown before a video plays
    pub thumb: String,

    /// Gallery images, in display order
    #[serde(default)]
    pub gallery: Vec<String>,

    /// External (social media) link
    pub link: String,

    /// Optional label for the external link button
    #[serde(default)]
    pub link_label: Option<String>,

    /// Downloadable source file
    pub source: String,

    /// Markdown documentation file
    pub doc: String,
}

impl ProjectDescriptor {
    pub fn videos(&self) -> &[String] {
        self.video.paths()
    }

    pub fn link_label(&self) -> &str {
        self.link_label.as_deref().unwrap_or(DEFAULT_LINK_LABEL)
    }

    /// File name of the downloadable source, for the download button
    pub fn source_name(&self) -> &str {
        self.source
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.source)
    }

    /// Every local asset this project references, in display order
    pub fn asset_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.videos().iter().map(String::as_str).collect();
        paths.push(&self.thumb);
        paths.extend(self.gallery.iter().map(String::as_str));
        paths.push(&self.source);
        paths.push(&self.doc);
        paths
    }
}

/// All content driving the page
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SiteContent {
    /// Labels floating on the skills canvas
    #[serde(default)]
    pub skills: Vec<String>,

    /// Project descriptors keyed by the card's `data-project` value
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectDescriptor>,
}

impl SiteContent {
    /// Parse content from YAML
    pub fn from_yaml(yaml: &str) -> PortfolioResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The content compiled into the page
    pub fn embedded() -> PortfolioResult<Self> {
        Self::from_yaml(EMBEDDED_CONTENT)
    }

    /// Look up a project by identifier
    pub fn project(&self, id: &str) -> PortfolioResult<&ProjectDescriptor> {
        self.projects
            .get(id)
            .ok_or_else(|| PortfolioError::MissingProject(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses() {
        let content = SiteContent::embedded().unwrap();
        assert_eq!(content.skills.len(), 6);
        assert!(content.skills.contains(&"PCB Design".to_string()));
        assert_eq!(content.projects.len(), 2);
    }

    #[test]
    fn single_video_is_one_path() {
        let content = SiteContent::embedded().unwrap();
        let clock = content.project("clock").unwrap();
        assert_eq!(clock.videos(), ["assets/clockvideo.mp4"]);
    }

    #[test]
    fn video_list_keeps_order() {
        let content = SiteContent::embedded().unwrap();
        let snake = content.project("snake").unwrap();
        assert_eq!(
            snake.videos(),
            ["assets/snakevideo1.mp4", "assets/snakevideo2.mp4"]
        );
        assert_eq!(snake.gallery, ["assets/snake1.jpg", "assets/snake2.jpg"]);
    }

    #[test]
    fn each_project_owns_its_link() {
        let content = SiteContent::embedded().unwrap();
        let clock = content.project("clock").unwrap();
        let snake = content.project("snake").unwrap();
        assert_ne!(clock.link, snake.link);
        assert_eq!(clock.link, "https://vm.tiktok.com/ZMA3SXw5S/");
        assert_eq!(snake.link, "https://vm.tiktok.com/ZMA3SHtr2/");
    }

    #[test]
    fn unknown_project_is_an_error() {
        let content = SiteContent::embedded().unwrap();
        let err = content.project("drone").unwrap_err();
        assert!(matches!(err, PortfolioError::MissingProject(id) if id == "drone"));
    }

    #[test]
    fn source_name_strips_directories() {
        let content = SiteContent::embedded().unwrap();
        let clock = content.project("clock").unwrap();
        assert_eq!(clock.source_name(), "sketch9clockdisplay.ino");
    }

    #[test]
    fn link_label_defaults() {
        let yaml = r#"
projects:
  lamp:
    title: Lamp
    video: [a.mp4]
    thumb: a.jpg
    link: https://example.com/lamp
    link_label: Watch on YouTube
    source: lamp.ino
    doc: lamp.md
"#;
        let content = SiteContent::from_yaml(yaml).unwrap();
        let lamp = content.project("lamp").unwrap();
        assert_eq!(lamp.link_label(), "Watch on YouTube");
        assert!(lamp.gallery.is_empty());
        assert!(content.skills.is_empty());

        let clock = SiteContent::embedded().unwrap();
        assert_eq!(clock.project("clock").unwrap().link_label(), DEFAULT_LINK_LABEL);
    }

    #[test]
    fn asset_paths_cover_every_reference() {
        let content = SiteContent::embedded().unwrap();
        let snake = content.project("snake").unwrap();
        let paths = snake.asset_paths();
        assert_eq!(paths.len(), 2 + 1 + 2 + 1 + 1);
        assert_eq!(paths.last(), Some(&"assets/Sound Sensor Integrated Snake light.md"));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let err = SiteContent::from_yaml("projects: [not, a, map]").unwrap_err();
        assert!(matches!(err, PortfolioError::Content(_)));
    }
}
