//! Operations on the injected extra-info form.
//!
//! The markup comes from the server; this module only relies on the DOM
//! contract below:
//!
//! ```text
//! .popup-opayo-extra-info
//! └── form#opayo-payment-form[data-has-error]
//!     ├── .error-message
//!     ├── .form-item
//!     │   ├── <input|select name="…">
//!     │   └── .help-block          ← inline messages as <span>
//!     ├── #div_id_state  > label, .controls
//!     ├── #div_id_postal_code > label
//!     ├── button#opayo-payment-button (.fa-spinner inside)
//!     └── button#opayo-cancel-button
//! ```

use wasm_bindgen::JsCast;
use web_sys::{
    js_sys, Element, EventTarget, FormData, HtmlElement, HtmlFormElement, HtmlOptionElement,
    HtmlSelectElement,
};

use crate::billing::{self, FormFields, STATE};
use crate::dom;
use crate::error::OpayoError;
use crate::i18n::{self, gettext};
use crate::response::FieldErrors;
use crate::subdivisions::{subdivisions_for, Subdivision};

pub const OVERLAY_SELECTOR: &str = ".popup-opayo-extra-info";
pub const FORM_SELECTOR: &str = "#opayo-payment-form";
pub const SUBMIT_BUTTON_SELECTOR: &str = "#opayo-payment-button";
pub const CANCEL_BUTTON_SELECTOR: &str = "#opayo-cancel-button";
pub const SPINNER_SELECTOR: &str = "#opayo-payment-button .fa-spinner";
pub const COUNTRY_SELECTOR: &str = "select[name=country]";
pub const STATE_CONTROLS_SELECTOR: &str = "#div_id_state .controls";
pub const STATE_LABEL_SELECTOR: &str = "#div_id_state label";
pub const POSTAL_CODE_LABEL_SELECTOR: &str = "#div_id_postal_code label";
pub const HELP_BLOCK_SELECTOR: &str = ".help-block";
pub const FORM_ITEM_SELECTOR: &str = ".form-item";
pub const ERROR_MESSAGE_SELECTOR: &str = ".error-message";

/// Attribute flagging a form that currently shows errors.
pub const HAS_ERROR_ATTR: &str = "data-has-error";

/// Remove the overlay (and with it the form) from the page.
pub fn remove_overlay() -> Result<usize, OpayoError> {
    dom::remove_all(OVERLAY_SELECTOR)
}

/// Handle on the live `#opayo-payment-form`.
#[derive(Clone, Debug)]
pub struct ExtraInfoForm {
    form: HtmlFormElement,
}

impl ExtraInfoForm {
    /// Find the form in the document.
    pub fn locate() -> Result<Self, OpayoError> {
        let form = dom::query(FORM_SELECTOR)?
            .ok_or_else(|| OpayoError::missing(FORM_SELECTOR))?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| OpayoError::missing(format!("form{FORM_SELECTOR}")))?;
        Ok(Self { form })
    }

    fn root(&self) -> &Element {
        self.form.as_ref()
    }

    fn find(&self, selector: &str) -> Result<Element, OpayoError> {
        dom::require_within(self.root(), selector)
    }

    pub fn country_select(&self) -> Result<EventTarget, OpayoError> {
        Ok(self.find(COUNTRY_SELECTOR)?.into())
    }

    pub fn submit_button(&self) -> Result<EventTarget, OpayoError> {
        Ok(self.find(SUBMIT_BUTTON_SELECTOR)?.into())
    }

    pub fn cancel_button(&self) -> Result<EventTarget, OpayoError> {
        Ok(self.find(CANCEL_BUTTON_SELECTOR)?.into())
    }

    /// Currently selected country code.
    pub fn country(&self) -> Result<String, OpayoError> {
        let select = self
            .find(COUNTRY_SELECTOR)?
            .dyn_into::<HtmlSelectElement>()
            .map_err(|_| OpayoError::missing(COUNTRY_SELECTOR))?;
        Ok(select.value())
    }

    /// Swap the state/province control and relabel the conditional fields for
    /// `country`.
    ///
    /// Countries with a subdivision table get a required dropdown; any other
    /// country gets a two-character free-text input.
    pub fn apply_country_rules(&self, country: &str) -> Result<(), OpayoError> {
        let controls = self.find(STATE_CONTROLS_SELECTOR)?;
        controls.set_inner_html("");
        let control = match subdivisions_for(country) {
            Some(table) => state_select(table)?,
            None => state_input()?,
        };
        controls.append_child(&control).map_err(OpayoError::from_js)?;

        let required = subdivisions_for(country).is_some();
        self.set_label(
            STATE_LABEL_SELECTOR,
            if required { i18n::STATE_LABEL_REQUIRED } else { i18n::STATE_LABEL },
            required,
        )?;
        self.set_label(
            POSTAL_CODE_LABEL_SELECTOR,
            if required {
                i18n::POSTAL_CODE_LABEL_REQUIRED
            } else {
                i18n::POSTAL_CODE_LABEL
            },
            required,
        )?;
        log::debug!("state control switched for country {country:?} (required: {required})");
        Ok(())
    }

    fn set_label(&self, selector: &str, msgid: &str, required: bool) -> Result<(), OpayoError> {
        let label = self.find(selector)?;
        label.set_text_content(Some(&gettext(msgid)));
        if required {
            let asterisk = create("span")?;
            asterisk.set_class_name("asteriskField");
            asterisk.set_text_content(Some("*"));
            label.append_child(&asterisk).map_err(OpayoError::from_js)?;
        }
        Ok(())
    }

    /// Clear inline messages, the general error and the error flag.
    pub fn reset_messages(&self) -> Result<(), OpayoError> {
        for block in dom::query_all_within(self.root(), HELP_BLOCK_SELECTOR)? {
            block.set_inner_html("");
        }
        let general = self
            .root()
            .query_selector(ERROR_MESSAGE_SELECTOR)
            .map_err(OpayoError::from_js)?;
        if let Some(general) = general {
            general.set_text_content(Some(""));
        }
        self.set_has_error(false)
    }

    pub fn set_has_error(&self, has_error: bool) -> Result<(), OpayoError> {
        self.form
            .set_attribute(HAS_ERROR_ATTR, if has_error { "true" } else { "false" })
            .map_err(OpayoError::from_js)
    }

    /// Append `message` to the help block of the field called `name`.
    ///
    /// Returns `false` when the field or its help block is not on the page;
    /// the message is then dropped.
    pub fn append_field_message(&self, name: &str, message: &str) -> Result<bool, OpayoError> {
        let selector = format!("[name=\"{name}\"]");
        let Some(field) = self.root().query_selector(&selector).map_err(OpayoError::from_js)? else {
            log::debug!("no field named {name:?} for message {message:?}");
            return Ok(false);
        };
        let Some(item) = field.closest(FORM_ITEM_SELECTOR).map_err(OpayoError::from_js)? else {
            return Ok(false);
        };
        let block = item
            .query_selector(HELP_BLOCK_SELECTOR)
            .map_err(OpayoError::from_js)?;
        let Some(block) = block else {
            return Ok(false);
        };
        let span = create("span")?;
        span.set_text_content(Some(message));
        block.append_child(&span).map_err(OpayoError::from_js)?;
        Ok(true)
    }

    /// Write the form-level error message.
    pub fn set_general_error(&self, message: &str) -> Result<(), OpayoError> {
        self.find(ERROR_MESSAGE_SELECTOR)?.set_text_content(Some(message));
        Ok(())
    }

    /// Focus the first field whose help block carries a message.
    pub fn focus_first_error(&self) -> Result<(), OpayoError> {
        let first = self
            .root()
            .query_selector(".help-block > span")
            .map_err(OpayoError::from_js)?;
        let field = match first {
            Some(span) => match span.closest(FORM_ITEM_SELECTOR).map_err(OpayoError::from_js)? {
                Some(item) => item.query_selector("input, select").map_err(OpayoError::from_js)?,
                None => None,
            },
            None => None,
        };
        if let Some(field) = field.and_then(|f| f.dyn_into::<HtmlElement>().ok()) {
            field.focus().map_err(OpayoError::from_js)?;
        }
        Ok(())
    }

    /// Every named field's current value, the way the browser would submit
    /// the form. File inputs are skipped.
    pub fn fields(&self) -> Result<FormFields, OpayoError> {
        let data = FormData::new_with_form(&self.form).map_err(OpayoError::from_js)?;
        let entries = js_sys::try_iter(data.as_ref())
            .map_err(OpayoError::from_js)?
            .ok_or_else(|| OpayoError::Js("FormData is not iterable".into()))?;
        let mut fields = FormFields::new();
        for entry in entries {
            let pair = js_sys::Array::from(&entry.map_err(OpayoError::from_js)?);
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                fields.insert(name, value);
            }
        }
        Ok(fields)
    }

    /// Check the required fields, rendering a message next to each empty one.
    ///
    /// Returns `true` when nothing required is missing.
    pub fn validate(&self) -> Result<bool, OpayoError> {
        let fields = self.fields()?;
        let missing = billing::missing_required_fields(&fields);
        if missing.is_empty() {
            return Ok(true);
        }
        let message = gettext(i18n::FIELD_REQUIRED);
        for name in &missing {
            self.append_field_message(name, &message)?;
        }
        self.set_has_error(true)?;
        self.focus_first_error()?;
        log::info!("billing form incomplete: {}", missing.join(", "));
        Ok(false)
    }

    /// Show server-side rejections in place.
    pub fn render_errors(
        &self,
        field_errors: &FieldErrors,
        error: Option<&str>,
    ) -> Result<(), OpayoError> {
        self.set_has_error(true)?;
        for (name, message) in field_errors {
            self.append_field_message(name, message)?;
        }
        if let Some(error) = error {
            self.set_general_error(error)?;
        }
        Ok(())
    }

    /// Show or hide the spinner inside the submit button, if it has one.
    pub fn set_spinner(&self, visible: bool) -> Result<(), OpayoError> {
        let spinner = dom::query(SPINNER_SELECTOR)?;
        if let Some(spinner) = spinner {
            let classes = spinner.class_list();
            let toggled = if visible {
                classes.remove_1("hidden")
            } else {
                classes.add_1("hidden")
            };
            toggled.map_err(OpayoError::from_js)?;
        }
        Ok(())
    }
}

fn create(tag: &str) -> Result<Element, OpayoError> {
    gloo_utils::document()
        .create_element(tag)
        .map_err(OpayoError::from_js)
}

/// `<select name="state">` with a placeholder followed by `table`.
fn state_select(table: &[Subdivision]) -> Result<Element, OpayoError> {
    let select = create("select")?;
    select.set_id("id_state");
    select.set_class_name("select form-control");
    for (name, value) in [("name", STATE), ("aria-required", "true"), ("required", "")] {
        select.set_attribute(name, value).map_err(OpayoError::from_js)?;
    }
    let placeholder =
        HtmlOptionElement::new_with_text_and_value(&gettext(i18n::CHOOSE_SUBDIVISION), "")
            .map_err(OpayoError::from_js)?;
    select.append_child(&placeholder).map_err(OpayoError::from_js)?;
    for entry in table {
        let option = HtmlOptionElement::new_with_text_and_value(entry.name, entry.code)
            .map_err(OpayoError::from_js)?;
        select.append_child(&option).map_err(OpayoError::from_js)?;
    }
    Ok(select)
}

/// Free-text `<input name="state" maxlength="2">`.
fn state_input() -> Result<Element, OpayoError> {
    let input = create("input")?;
    input.set_id("id_state");
    input.set_class_name("textinput textInput form-control");
    for (name, value) in [("type", "text"), ("name", STATE), ("maxlength", "2")] {
        input.set_attribute(name, value).map_err(OpayoError::from_js)?;
    }
    Ok(input)
}
