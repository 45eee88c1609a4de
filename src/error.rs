//! Error type shared by every layer of the widget.
//!
//! The component never lets one of these escape to the page: each is logged,
//! emitted through `on_error`, and surfaced as the generic checkout message.
//! Only `init` hands them to JavaScript, converted into a `JsValue`.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong while driving the Opayo checkout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpayoError {
    /// The configuration object handed to `init` was unusable.
    #[error("invalid Opayo widget configuration: {0}")]
    Config(String),

    /// The request never produced a response (offline, CORS, aborted).
    #[error("transaction registration request failed: {0}")]
    Network(String),

    /// The endpoint answered outside the 2xx range.
    #[error("transaction registration endpoint answered with HTTP {0}")]
    Status(u16),

    /// The body was not the expected JSON document.
    #[error("malformed transaction registration response: {0}")]
    Decode(String),

    /// The body parsed but matched no known reply shape.
    #[error("transaction registration response carried nothing to act on")]
    EmptyResponse,

    /// A selector from the DOM contract matched nothing.
    #[error("required element `{0}` is missing from the page")]
    MissingElement(String),

    /// A browser API threw.
    #[error("browser call failed: {0}")]
    Js(String),

    /// The widget was asked to do something its current phase forbids.
    #[error("cannot {event} while the widget is {phase}")]
    InvalidTransition {
        phase: &'static str,
        event: &'static str,
    },
}

impl OpayoError {
    /// Convert any caught `JsValue` into an `OpayoError` with best effort.
    pub fn from_js(value: JsValue) -> Self {
        OpayoError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }

    /// Shorthand for a selector that matched nothing.
    pub fn missing(selector: impl Into<String>) -> Self {
        OpayoError::MissingElement(selector.into())
    }
}

impl From<gloo_net::Error> for OpayoError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(err) => OpayoError::Decode(err.to_string()),
            other => OpayoError::Network(other.to_string()),
        }
    }
}

impl From<serde_wasm_bindgen::Error> for OpayoError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        OpayoError::Config(err.to_string())
    }
}

impl From<OpayoError> for JsValue {
    fn from(err: OpayoError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_transition_error_names_phase_and_event() {
        let err = OpayoError::InvalidTransition {
            phase: "loading",
            event: "submit the billing form",
        };
        assert_eq!(
            err.to_string(),
            "cannot submit the billing form while the widget is loading"
        );
    }

    #[rstest]
    fn test_missing_element_quotes_selector() {
        let err = OpayoError::missing("#opayo-payment-form");
        assert_eq!(
            err.to_string(),
            "required element `#opayo-payment-form` is missing from the page"
        );
    }

    #[rstest]
    fn test_status_error_mentions_code() {
        assert!(OpayoError::Status(403).to_string().ends_with("HTTP 403"));
    }
}
