//! Error types shared by the page models and the browser glue.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors that can occur while loading content or wiring the page
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// A project card referenced an identifier that is not in the catalog
    #[error("missing project: {0}")]
    MissingProject(String),

    /// A required page element could not be found
    #[error("required element not found: {0}")]
    MissingElement(String),

    /// The site content YAML could not be parsed
    #[error("invalid site content: {0}")]
    Content(#[from] serde_yaml::Error),

    /// An askama template failed to render
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// A browser API call failed
    #[error("browser API error: {0}")]
    Js(String),
}

impl From<JsValue> for PortfolioError {
    fn from(value: JsValue) -> Self {
        PortfolioError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

/// Result type for page operations
pub type PortfolioResult<T> = Result<T, PortfolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_names_identifier() {
        let err = PortfolioError::MissingProject("drone".to_string());
        assert_eq!(err.to_string(), "missing project: drone");
    }

    #[test]
    fn yaml_errors_convert() {
        let parse: Result<Vec<u32>, _> = serde_yaml::from_str("[1, two");
        let err: PortfolioError = parse.unwrap_err().into();
        assert!(matches!(err, PortfolioError::Content(_)));
        assert!(err.to_string().starts_with("invalid site content"));
    }
}
