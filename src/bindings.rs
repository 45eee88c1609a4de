//! Low-level wasm-bindgen bindings to the page's JavaScript globals.
//!
//! The checkout page loads Django's JavaScript translation catalog, which
//! defines `window.gettext`. Higher-level wrappers live in `i18n.rs`.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `gettext(msgid)` → translated string.
    ///
    /// ```js
    ///   gettext("This field is required");
    /// ```
    #[wasm_bindgen(catch, js_name = gettext, js_namespace = window)]
    pub fn js_gettext(msgid: &str) -> Result<String, JsValue>;
}
