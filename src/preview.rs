//! Offline rendering of a project modal to a standalone HTML file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use askama::Template;
use holofolio_web::catalog::SiteContent;
use holofolio_web::modal::{self, DocOutcome};

#[derive(Template)]
#[template(path = "preview.html")]
struct PreviewPage<'a> {
    title: &'a str,
    base: Option<String>,
    body: &'a str,
}

/// Read a documentation file from the site directory.
///
/// Mirrors the browser fetch: a missing file is a 404, any other read
/// failure is an error outcome.
pub fn load_documentation(site: &Path, doc: &str) -> DocOutcome {
    match fs::read_to_string(site.join(doc)) {
        Ok(text) => DocOutcome::Loaded(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(doc, "documentation file not found");
            DocOutcome::NotFound(404)
        }
        Err(err) => {
            tracing::error!(doc, %err, "failed to read documentation");
            DocOutcome::Failed(err.to_string())
        }
    }
}

/// Render project `id` into `<output>/<id>.html` and return the written path.
///
/// Asset references resolve against `site` through a `<base>` element, so the
/// preview shows the same media the deployed page would.
pub fn preview(content: &SiteContent, id: &str, site: &Path, output: &Path) -> anyhow::Result<PathBuf> {
    let project = content.project(id)?;
    let outcome = load_documentation(site, &project.doc);
    let body = modal::render_project(project, &outcome)?;

    let page = PreviewPage {
        title: &project.title,
        base: base_href(site),
        body: &body,
    };
    let html = page.render()?;

    fs::create_dir_all(output)?;
    let path = output.join(format!("{id}.html"));
    fs::write(&path, html)?;
    Ok(path)
}

fn base_href(site: &Path) -> Option<String> {
    let dir = site.canonicalize().ok()?;
    let dir = dir.to_string_lossy().replace('\\', "/");
    let dir = dir.trim_end_matches('/');
    if dir.starts_with('/') {
        Some(format!("file://{dir}/"))
    } else {
        Some(format!("file:///{dir}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONTENT: &str = r#"
projects:
  lamp:
    title: Desk Lamp
    video: assets/lamp.mp4
    thumb: assets/lamp.jpg
    link: https://example.com/lamp
    source: assets/lamp.ino
    doc: assets/lamp.md
"#;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        dir
    }

    #[test]
    fn load_documentation_reads_existing_file() {
        let site = site();
        fs::write(site.path().join("assets/lamp.md"), "# Lamp").unwrap();

        assert_eq!(
            load_documentation(site.path(), "assets/lamp.md"),
            DocOutcome::Loaded("# Lamp".to_string())
        );
    }

    #[test]
    fn load_documentation_missing_file_is_not_found() {
        let site = site();
        assert_eq!(
            load_documentation(site.path(), "assets/nope.md"),
            DocOutcome::NotFound(404)
        );
    }

    #[test]
    fn load_documentation_directory_is_failure() {
        let site = site();
        assert!(matches!(
            load_documentation(site.path(), "assets"),
            DocOutcome::Failed(_)
        ));
    }

    #[test]
    fn preview_writes_rendered_modal() {
        let site = site();
        fs::write(site.path().join("assets/lamp.md"), "## Wiring\n- relay").unwrap();
        let output = TempDir::new().unwrap();
        let content = SiteContent::from_yaml(CONTENT).unwrap();

        let path = preview(&content, "lamp", site.path(), output.path()).unwrap();
        assert_eq!(path, output.path().join("lamp.html"));

        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("<title>Desk Lamp · preview</title>"));
        assert!(html.contains(r#"<div id="modalBody""#));
        assert!(html.contains("Wiring</h3>"));
        assert!(html.contains("⬇ Download lamp.ino"));
        assert!(html.contains("<base href=\"file://"));
    }

    #[test]
    fn preview_without_doc_shows_not_found() {
        let site = site();
        let output = TempDir::new().unwrap();
        let content = SiteContent::from_yaml(CONTENT).unwrap();

        let path = preview(&content, "lamp", site.path(), output.path()).unwrap();
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("Documentation not found."));
    }

    #[test]
    fn preview_unknown_project_fails() {
        let site = site();
        let output = TempDir::new().unwrap();
        let content = SiteContent::from_yaml(CONTENT).unwrap();

        let err = preview(&content, "kettle", site.path(), output.path()).unwrap_err();
        assert!(err.to_string().contains("kettle"));
        assert!(!output.path().join("kettle.html").exists());
    }
}
