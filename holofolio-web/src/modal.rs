//! Project modal content and open/close state
//!
//! Opening a project renders the whole content block at once (with a loading
//! placeholder for the documentation) and renders it again when the
//! documentation fetch settles. Each open hands out a [`Ticket`]; a fetch
//! that settles after another project was opened no longer holds the
//! current ticket and its result is dropped.

use askama::Template;

use crate::catalog::{ProjectDescriptor, SiteContent};
use crate::error::{PortfolioError, PortfolioResult};
use crate::markdown;

/// Shown while the documentation is being fetched
pub const LOADING_HTML: &str = "<p>Loading documentation...</p>";

/// Shown when the documentation request returned a non-OK status
pub const NOT_FOUND_HTML: &str = "<p style='color:orange;'>Documentation not found.</p>";

/// Shown when the documentation request failed outright
pub const ERROR_HTML: &str = "<p style='color:red;'>Error loading documentation.</p>";

/// Result of fetching a project's documentation
#[derive(Debug, Clone, PartialEq)]
pub enum DocOutcome {
    /// Request still in flight
    Loading,
    /// Markdown text of the documentation
    Loaded(String),
    /// The server answered with a non-OK status
    NotFound(u16),
    /// The request could not be made or its body could not be read
    Failed(String),
}

/// HTML for the documentation region
pub fn documentation_html(outcome: &DocOutcome) -> String {
    match outcome {
        DocOutcome::Loading => LOADING_HTML.to_string(),
        DocOutcome::Loaded(text) => markdown::render(text),
        DocOutcome::NotFound(_) => NOT_FOUND_HTML.to_string(),
        DocOutcome::Failed(_) => ERROR_HTML.to_string(),
    }
}

#[derive(Template)]
#[template(path = "project.html")]
struct ProjectTemplate<'a> {
    title: &'a str,
    videos: &'a [String],
    thumb: &'a str,
    link: &'a str,
    link_label: &'a str,
    gallery: &'a [String],
    documentation: &'a str,
    source: &'a str,
    source_name: &'a str,
}

#[derive(Template)]
#[template(path = "missing_project.html")]
struct MissingProjectTemplate<'a> {
    id: &'a str,
}

/// Render the content block for one project
pub fn render_project(project: &ProjectDescriptor, outcome: &DocOutcome) -> PortfolioResult<String> {
    let documentation = documentation_html(outcome);
    let template = ProjectTemplate {
        title: &project.title,
        videos: project.videos(),
        thumb: &project.thumb,
        link: &project.link,
        link_label: project.link_label(),
        gallery: &project.gallery,
        documentation: &documentation,
        source: &project.source,
        source_name: project.source_name(),
    };
    Ok(template.render()?)
}

/// Fallback block for an identifier missing from the catalog
pub fn render_missing(id: &str) -> PortfolioResult<String> {
    Ok(MissingProjectTemplate { id }.render()?)
}

/// Render the block for `id`, falling back to the "unavailable" block when
/// the project is not in the catalog.
pub fn render_for(content: &SiteContent, id: &str, outcome: &DocOutcome) -> PortfolioResult<String> {
    match content.project(id) {
        Ok(project) => render_project(project, outcome),
        Err(PortfolioError::MissingProject(_)) => {
            tracing::warn!(project = id, "project card references unknown project");
            render_missing(id)
        }
        Err(other) => Err(other),
    }
}

/// Identifies one modal open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Visibility of the modal and which project it shows
#[derive(Debug, Clone, Default)]
pub struct ModalState {
    visible: bool,
    project: Option<String>,
    opened: u64,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Project currently shown (or last shown, if closed)
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Show the modal for `id`, superseding any earlier open
    pub fn open(&mut self, id: &str) -> Ticket {
        self.opened += 1;
        self.visible = true;
        self.project = Some(id.to_string());
        Ticket(self.opened)
    }

    /// Whether `ticket` belongs to the most recent open
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.opened
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Handle a click on the modal container: only a click on the backdrop
    /// itself (not on the content) closes it. Returns whether it closed.
    pub fn click(&mut self, on_backdrop: bool) -> bool {
        if on_backdrop && self.visible {
            self.close();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> SiteContent {
        SiteContent::embedded().unwrap()
    }

    #[test]
    fn single_video_renders_one_element() {
        let content = content();
        let html = render_for(&content, "clock", &DocOutcome::Loading).unwrap();
        assert_eq!(html.matches("<video").count(), 1);
        assert!(html.contains("clockvideo.mp4"));
    }

    #[test]
    fn video_list_renders_one_element_each() {
        let content = content();
        let html = render_for(&content, "snake", &DocOutcome::Loading).unwrap();
        assert_eq!(html.matches("<video").count(), 2);

        let first = html.find("snakevideo1.mp4").unwrap();
        let second = html.find("snakevideo2.mp4").unwrap();
        assert!(first < second);
    }

    #[test]
    fn sections_render_in_order() {
        let content = content();
        let outcome = DocOutcome::Loaded("# Build log".to_string());
        let html = render_for(&content, "snake", &outcome).unwrap();

        let order = [
            html.find("Sound-Reactive Snake Lights System").unwrap(),
            html.find("<video").unwrap(),
            html.find("cyber-btn").unwrap(),
            html.find("gallery-carousel").unwrap(),
            html.find("doc-terminal").unwrap(),
            html.find("Download Snakelights_and_mic_module_code2.ino").unwrap(),
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{order:?}");
        assert_eq!(html.matches("<img").count(), 2);
    }

    #[test]
    fn documentation_is_rendered_markdown() {
        let content = content();
        let outcome = DocOutcome::Loaded("## Parts\n- DS1302".to_string());
        let html = render_for(&content, "clock", &outcome).unwrap();
        assert!(html.contains(r#"<h3 style="color:gold;margin:25px 0;">Parts</h3>"#));
        assert!(html.contains("• </span>DS1302<br>"));
        assert!(!html.contains(LOADING_HTML));
    }

    #[test]
    fn loading_placeholder_before_fetch() {
        let content = content();
        let html = render_for(&content, "clock", &DocOutcome::Loading).unwrap();
        assert!(html.contains("Loading documentation..."));
    }

    #[test]
    fn non_ok_response_shows_not_found() {
        let content = content();
        let html = render_for(&content, "clock", &DocOutcome::NotFound(404)).unwrap();
        assert!(html.contains("Documentation not found."));
        assert!(!html.contains("Loading documentation"));
    }

    #[test]
    fn network_failure_shows_error() {
        let content = content();
        let outcome = DocOutcome::Failed("TypeError: Failed to fetch".to_string());
        let html = render_for(&content, "snake", &outcome).unwrap();
        assert!(html.contains("Error loading documentation."));
        assert!(!html.contains("TypeError"));
    }

    #[test]
    fn unknown_project_renders_fallback() {
        let content = content();
        let html = render_for(&content, "drone", &DocOutcome::Loading).unwrap();
        assert!(html.contains("Project unavailable"));
        assert!(html.contains("drone"));
        assert!(!html.contains("<video"));
    }

    #[test]
    fn titles_are_escaped() {
        let mut content = content();
        let clock = content.projects.get_mut("clock").unwrap();
        clock.title = "<script>alert(1)</script>".to_string();

        let html = render_for(&content, "clock", &DocOutcome::Loading).unwrap();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn newer_open_supersedes_older_ticket() {
        let mut modal = ModalState::new();
        let first = modal.open("clock");
        let second = modal.open("snake");

        assert!(!modal.is_current(first));
        assert!(modal.is_current(second));
        assert_eq!(modal.project(), Some("snake"));
    }

    #[test]
    fn backdrop_click_closes_content_click_does_not() {
        let mut modal = ModalState::new();
        modal.open("clock");

        assert!(!modal.click(false));
        assert!(modal.is_visible());

        assert!(modal.click(true));
        assert!(!modal.is_visible());
        assert!(!modal.click(true));
    }

    #[test]
    fn close_control_hides_modal() {
        let mut modal = ModalState::new();
        let ticket = modal.open("snake");
        modal.close();
        assert!(!modal.is_visible());
        // Closing does not invalidate the pending fetch; the body is simply hidden
        assert!(modal.is_current(ticket));
    }
}
