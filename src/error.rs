//! Errors raised while wiring the field and guestbook into the page.
//!
//! The simulation itself has no failure path; everything here comes from the
//! browser host or from persisted data.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("no global `window` exists")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("no canvas element with id {0:?}")]
    CanvasNotFound(String),

    #[error("canvas does not provide a 2d rendering context")]
    ContextUnavailable,

    #[error("local storage is not available")]
    StorageUnavailable,

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("stored guestbook is not valid JSON: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("failed to encode guestbook: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for FieldError {
    fn from(value: JsValue) -> Self {
        FieldError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            FieldError::CanvasNotFound("bg-canvas".to_owned()).to_string(),
            "no canvas element with id \"bg-canvas\""
        );
        let corrupt = serde_json::from_str::<Vec<u8>>("[1,").unwrap_err();
        assert!(FieldError::Corrupt(corrupt)
            .to_string()
            .starts_with("stored guestbook is not valid JSON"));
        let encode = serde_json::from_str::<Vec<u8>>("]").unwrap_err();
        assert!(FieldError::Encode(encode)
            .to_string()
            .starts_with("failed to encode guestbook"));
    }
}
