use nimbus_engine::AssetError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures setting up the browser host.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("no global `window`")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    ElementNotFound(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(describe(&value))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub(crate) fn window() -> Result<web_sys::Window, WebError> {
    web_sys::window().ok_or(WebError::NoWindow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_element() {
        assert_eq!(
            WebError::ElementNotFound("stage".to_string()).to_string(),
            "no element with id `stage`"
        );
        assert_eq!(WebError::NotACanvas("stage".to_string()).to_string(), "element `stage` is not a canvas");
    }

    #[test]
    fn asset_errors_pass_through() {
        let err: WebError = AssetError::load("images/cloud.png", "404").into();
        assert_eq!(err.to_string(), "failed to load `images/cloud.png`: 404");
    }
}
