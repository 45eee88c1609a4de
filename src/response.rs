//! Transaction registration responses.
//!
//! Both the GET that loads the form and the POST that submits it answer with
//! the same loose JSON document. It is decoded into [`RegistrationResponse`]
//! and classified exactly once into a [`ServerReply`] so the component never
//! has to inspect optional fields again.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Field name → error message, as rendered next to each input.
pub type FieldErrors = BTreeMap<String, String>;

/// Raw body of a transaction registration response.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RegistrationResponse {
    /// Markup of the extra-info form overlay (first load).
    #[serde(default)]
    pub form_template: Option<String>,

    /// Per-field rejections from server-side validation.
    #[serde(default)]
    pub field_errors: Option<FieldErrors>,

    /// Form-level rejection message.
    #[serde(default)]
    pub error: Option<String>,

    /// Hosted payment page to send the customer to.
    #[serde(default)]
    pub payment_page_url: Option<String>,
}

/// What the widget should do with a response.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerReply {
    /// Inject the form overlay.
    Template(String),
    /// Keep the form open and show the rejections.
    Errors {
        field_errors: FieldErrors,
        error: Option<String>,
    },
    /// Leave the page for the hosted payment page.
    Redirect(String),
    /// Nothing recognisable; treated as a failure.
    Unknown,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<RegistrationResponse> for ServerReply {
    /// Precedence is template, then errors, then redirect. Empty strings count
    /// as absent; an empty `field_errors` object still counts as present.
    fn from(response: RegistrationResponse) -> Self {
        let error = non_empty(response.error);
        if let Some(template) = non_empty(response.form_template) {
            ServerReply::Template(template)
        } else if response.field_errors.is_some() || error.is_some() {
            ServerReply::Errors {
                field_errors: response.field_errors.unwrap_or_default(),
                error,
            }
        } else if let Some(url) = non_empty(response.payment_page_url) {
            ServerReply::Redirect(url)
        } else {
            ServerReply::Unknown
        }
    }
}

impl ServerReply {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerReply::Template(_) => "template",
            ServerReply::Errors { .. } => "errors",
            ServerReply::Redirect(_) => "redirect",
            ServerReply::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn classify(body: &str) -> ServerReply {
        serde_json::from_str::<RegistrationResponse>(body)
            .expect("valid registration json")
            .into()
    }

    #[rstest]
    fn test_template_reply() {
        assert_eq!(
            classify(r#"{"form_template": "<div class=\"popup-opayo-extra-info\"></div>"}"#),
            ServerReply::Template("<div class=\"popup-opayo-extra-info\"></div>".into())
        );
    }

    #[rstest]
    fn test_field_errors_reply() {
        let reply = classify(r#"{"field_errors": {"city": "Required"}}"#);
        let ServerReply::Errors { field_errors, error } = reply else {
            panic!("expected an errors reply");
        };
        assert_eq!(field_errors.get("city").map(String::as_str), Some("Required"));
        assert_eq!(error, None);
    }

    #[rstest]
    fn test_general_error_only() {
        assert_eq!(
            classify(r#"{"error": "There was a problem retrieving your basket."}"#),
            ServerReply::Errors {
                field_errors: FieldErrors::new(),
                error: Some("There was a problem retrieving your basket.".into()),
            }
        );
    }

    #[rstest]
    fn test_empty_field_errors_object_still_counts() {
        assert!(matches!(
            classify(r#"{"field_errors": {}}"#),
            ServerReply::Errors { .. }
        ));
    }

    #[rstest]
    fn test_redirect_reply_keeps_url_verbatim() {
        assert_eq!(
            classify(r#"{"payment_page_url": "https://pay.example/x"}"#),
            ServerReply::Redirect("https://pay.example/x".into())
        );
    }

    #[rstest]
    fn test_template_wins_over_everything() {
        let reply = classify(
            r#"{"form_template": "<form></form>", "error": "x", "payment_page_url": "https://pay.example/x"}"#,
        );
        assert_eq!(reply.kind(), "template");
    }

    #[rstest]
    fn test_errors_win_over_redirect() {
        let reply = classify(r#"{"error": "no", "payment_page_url": "https://pay.example/x"}"#);
        assert_eq!(reply.kind(), "errors");
    }

    #[rstest]
    #[case("{}")]
    #[case(r#"{"form_template": "", "error": "", "payment_page_url": ""}"#)]
    #[case(r#"{"form_template": null, "payment_page_url": null}"#)]
    #[case(r#"{"status": "ok"}"#)]
    fn test_unrecognised_bodies_are_unknown(#[case] body: &str) {
        assert_eq!(classify(body), ServerReply::Unknown);
    }
}
