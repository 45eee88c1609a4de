//! User-visible strings.
//!
//! Every message shown by the widget is looked up through the page's
//! `gettext` catalog, keyed by its English text. Pages without a catalog get
//! the English text unchanged.

pub const CHECKOUT_PROBLEM: &str = "Problem occurred during checkout. Please contact support.";
pub const FIELD_REQUIRED: &str = "This field is required";
pub const CHOOSE_SUBDIVISION: &str = "<Choose state/province>";
pub const STATE_LABEL: &str = "State/Province";
pub const STATE_LABEL_REQUIRED: &str = "State/Province (required)";
pub const POSTAL_CODE_LABEL: &str = "Zip/Postal Code";
pub const POSTAL_CODE_LABEL_REQUIRED: &str = "Zip/Postal Code (required)";
pub const TRIGGER_LABEL: &str = "Checkout with Opayo";

/// Translate `msgid` with the page catalog.
#[cfg(target_arch = "wasm32")]
pub fn gettext(msgid: &str) -> String {
    use wasm_bindgen::JsValue;
    use web_sys::js_sys::Reflect;

    let has_catalog = web_sys::window()
        .and_then(|win| Reflect::has(&win, &JsValue::from_str("gettext")).ok())
        .unwrap_or(false);
    if !has_catalog {
        return msgid.to_owned();
    }
    crate::bindings::js_gettext(msgid).unwrap_or_else(|err| {
        log::debug!("gettext failed for {msgid:?}: {err:?}");
        msgid.to_owned()
    })
}

/// Translate `msgid` (non-WASM stub).
#[cfg(not(target_arch = "wasm32"))]
pub fn gettext(msgid: &str) -> String {
    msgid.to_owned()
}
