//! Validation of site content against the files deployed with the page

use std::path::Path;

use holofolio_web::catalog::SiteContent;
use serde::Serialize;
use thiserror::Error;

/// A problem found while checking a project's content
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetIssue {
    /// A referenced asset is not present under the site directory
    #[error("{project}: missing asset '{path}'")]
    MissingAsset { project: String, path: String },

    /// The external link is not an absolute http(s) URL
    #[error("{project}: link '{link}' is not an http(s) URL")]
    InvalidLink { project: String, link: String },

    #[error("{project}: no video listed")]
    NoVideo { project: String },
}

/// Summary of a content check
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub projects: usize,
    pub skills: usize,
    pub issues: Vec<AssetIssue>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check every project in `content` against the files under `site`
pub fn check(content: &SiteContent, site: &Path) -> CheckReport {
    let mut issues = Vec::new();

    for (id, project) in &content.projects {
        tracing::debug!(project = %id, "checking project");

        if project.videos().is_empty() {
            issues.push(AssetIssue::NoVideo {
                project: id.clone(),
            });
        }

        if !is_http_url(&project.link) {
            issues.push(AssetIssue::InvalidLink {
                project: id.clone(),
                link: project.link.clone(),
            });
        }

        for path in project.asset_paths() {
            if !site.join(path).is_file() {
                issues.push(AssetIssue::MissingAsset {
                    project: id.clone(),
                    path: path.to_string(),
                });
            }
        }
    }

    CheckReport {
        projects: content.projects.len(),
        skills: content.skills.len(),
        issues,
    }
}

fn is_http_url(link: &str) -> bool {
    ["https://", "http://"]
        .iter()
        .any(|scheme| link.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CONTENT: &str = r#"
skills: [Rust, Arduino]
projects:
  lamp:
    title: Desk Lamp
    video: [assets/lamp1.mp4, assets/lamp2.mp4]
    thumb: assets/lamp.jpg
    gallery: [assets/lamp-side.jpg]
    link: https://example.com/lamp
    source: assets/lamp.ino
    doc: assets/Lamp Notes.md
"#;

    fn site_with(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"x").unwrap();
        }
        dir
    }

    const ALL_ASSETS: [&str; 6] = [
        "assets/lamp1.mp4",
        "assets/lamp2.mp4",
        "assets/lamp.jpg",
        "assets/lamp-side.jpg",
        "assets/lamp.ino",
        "assets/Lamp Notes.md",
    ];

    #[test]
    fn complete_site_is_clean() {
        let content = SiteContent::from_yaml(CONTENT).unwrap();
        let site = site_with(&ALL_ASSETS);

        let report = check(&content, site.path());
        assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
        assert_eq!(report.projects, 1);
        assert_eq!(report.skills, 2);
    }

    #[test]
    fn reports_each_missing_asset() {
        let content = SiteContent::from_yaml(CONTENT).unwrap();
        let site = site_with(&ALL_ASSETS[..4]);

        let report = check(&content, site.path());
        assert_eq!(
            report.issues,
            vec![
                AssetIssue::MissingAsset {
                    project: "lamp".to_string(),
                    path: "assets/lamp.ino".to_string(),
                },
                AssetIssue::MissingAsset {
                    project: "lamp".to_string(),
                    path: "assets/Lamp Notes.md".to_string(),
                },
            ]
        );
    }

    #[test]
    fn rejects_non_http_links() {
        let yaml = CONTENT.replace("https://example.com/lamp", "vm.tiktok.com/abc");
        let content = SiteContent::from_yaml(&yaml).unwrap();
        let site = site_with(&ALL_ASSETS);

        let report = check(&content, site.path());
        assert_eq!(
            report.issues,
            vec![AssetIssue::InvalidLink {
                project: "lamp".to_string(),
                link: "vm.tiktok.com/abc".to_string(),
            }]
        );
    }

    #[test]
    fn empty_video_list_is_reported() {
        let yaml = CONTENT.replace("[assets/lamp1.mp4, assets/lamp2.mp4]", "[]");
        let content = SiteContent::from_yaml(&yaml).unwrap();
        let site = site_with(&ALL_ASSETS);

        let report = check(&content, site.path());
        assert_eq!(
            report.issues,
            vec![AssetIssue::NoVideo {
                project: "lamp".to_string()
            }]
        );
    }

    #[test]
    fn issue_messages() {
        let issues = [
            AssetIssue::MissingAsset {
                project: "clock".to_string(),
                path: "assets/clock.ino".to_string(),
            },
            AssetIssue::InvalidLink {
                project: "clock".to_string(),
                link: "tiktok".to_string(),
            },
            AssetIssue::NoVideo {
                project: "snake".to_string(),
            },
        ];
        let text = issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(text, @r"
        clock: missing asset 'assets/clock.ino'
        clock: link 'tiktok' is not an http(s) URL
        snake: no video listed
        ");
    }

    #[test]
    fn http_url_detection() {
        assert!(is_http_url("https://vm.tiktok.com/ZMA3SXw5S/"));
        assert!(is_http_url("http://example.com"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url(""));
    }

    #[test]
    fn issues_serialize_with_kind_tag() {
        let issue = AssetIssue::NoVideo {
            project: "lamp".to_string(),
        };
        let json = serde_json::to_string(&issue).unwrap();
        assert_eq!(json, r#"{"kind":"no_video","project":"lamp"}"#);
    }
}
