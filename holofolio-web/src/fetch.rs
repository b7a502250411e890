//! Best-effort documentation fetch

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::modal::DocOutcome;

/// Fetch a documentation file as text.
///
/// Never fails: a non-OK status becomes [`DocOutcome::NotFound`] and any
/// browser error becomes [`DocOutcome::Failed`]. No retry, no timeout.
pub async fn fetch_documentation(path: &str) -> DocOutcome {
    match fetch_text(path).await {
        Ok(outcome) => outcome,
        Err(err) => {
            let reason = err.as_string().unwrap_or_else(|| format!("{:?}", err));
            tracing::error!(path, %reason, "documentation fetch failed");
            DocOutcome::Failed(reason)
        }
    }
}

async fn fetch_text(path: &str) -> Result<DocOutcome, wasm_bindgen::JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await?
        .dyn_into()?;

    if !response.ok() {
        tracing::warn!(path, status = response.status(), "documentation not available");
        return Ok(DocOutcome::NotFound(response.status()));
    }

    let text = JsFuture::from(response.text()?).await?;
    Ok(DocOutcome::Loaded(text.as_string().unwrap_or_default()))
}
