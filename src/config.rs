//! Widget configuration.
//!
//! The checkout page hands `init` a plain JS object:
//!
//! ```js
//! init({ transactionRegistrationUrl: "/payment/opayo/register/" });
//! ```
//!
//! Only the URL is mandatory; it is used for both the form GET and the
//! billing POST.

use log::LevelFilter;
use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::OpayoError;

/// Element the widget renders into when no selector is configured.
pub const DEFAULT_MOUNT_SELECTOR: &str = "#opayo-checkout";

fn default_mount_selector() -> String {
    DEFAULT_MOUNT_SELECTOR.to_string()
}

fn default_log_level() -> LevelFilter {
    LevelFilter::Info
}

/// Settings accepted by `init`.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpayoConfig {
    /// Transaction registration endpoint (GET form, POST billing details).
    pub transaction_registration_url: String,

    /// CSS selector of the element the trigger button is rendered into.
    #[serde(default = "default_mount_selector")]
    pub mount_selector: String,

    /// Overrides the trigger button text.
    #[serde(default)]
    pub button_label: Option<String>,

    /// Console verbosity (`"off"`, `"error"`, … `"trace"`).
    #[serde(default = "default_log_level")]
    pub log_level: LevelFilter,
}

impl OpayoConfig {
    pub fn new(transaction_registration_url: impl Into<String>) -> Self {
        Self {
            transaction_registration_url: transaction_registration_url.into(),
            mount_selector: default_mount_selector(),
            button_label: None,
            log_level: default_log_level(),
        }
    }

    /// Parse the object passed to `init`.
    pub fn from_js(value: JsValue) -> Result<Self, OpayoError> {
        let config: Self = serde_wasm_bindgen::from_value(value)?;
        config.validate()
    }

    /// Parse the JSON text passed to `init_from_json`.
    pub fn from_json(text: &str) -> Result<Self, OpayoError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| OpayoError::Config(e.to_string()))?;
        config.validate()
    }

    /// Reject settings the widget cannot work with.
    pub fn validate(self) -> Result<Self, OpayoError> {
        if self.transaction_registration_url.trim().is_empty() {
            return Err(OpayoError::Config(
                "transactionRegistrationUrl must not be empty".into(),
            ));
        }
        if self.mount_selector.trim().is_empty() {
            return Err(OpayoError::Config("mountSelector must not be empty".into()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_url_only_uses_defaults() {
        let config =
            OpayoConfig::from_json(r#"{"transactionRegistrationUrl": "/payment/opayo/register/"}"#)
                .unwrap();
        assert_eq!(config, OpayoConfig::new("/payment/opayo/register/"));
        assert_eq!(config.mount_selector, DEFAULT_MOUNT_SELECTOR);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[rstest]
    fn test_all_fields() {
        let config = OpayoConfig::from_json(
            r##"{
                "transactionRegistrationUrl": "https://shop.example/opayo/",
                "mountSelector": "#pay-with-opayo",
                "buttonLabel": "Pay by card",
                "logLevel": "debug"
            }"##,
        )
        .unwrap();
        assert_eq!(config.mount_selector, "#pay-with-opayo");
        assert_eq!(config.button_label.as_deref(), Some("Pay by card"));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[rstest]
    #[case(r#"{}"#)]
    #[case(r#"{"transactionRegistrationUrl": "  "}"#)]
    #[case(r#"{"transactionRegistrationUrl": "/x", "mountSelector": ""}"#)]
    #[case(r#"{"transactionRegistrationUrl": "/x", "logLevel": "loud"}"#)]
    fn test_rejected(#[case] text: &str) {
        assert!(matches!(
            OpayoConfig::from_json(text),
            Err(OpayoError::Config(_))
        ));
    }
}
