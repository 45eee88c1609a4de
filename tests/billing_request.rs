//! Browser tests for the billing POST: body encoding and the CSRF header.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlDocument, UrlSearchParams};

use yew_opayo::billing::FormFields;
use yew_opayo::client::{billing_request, url_encoded};
use yew_opayo::csrf::{csrf_token, CSRF_COOKIE_NAME, CSRF_HEADER_NAME};

wasm_bindgen_test_configure!(run_in_browser);

const REGISTER_URL: &str = "/payment/opayo/register/";

fn html_document() -> HtmlDocument {
    gloo_utils::document().dyn_into().unwrap()
}

fn sample_fields() -> FormFields {
    [
        ("basket", "7"),
        ("first_name", "Ada Lovelace"),
        ("address_line1", "1 Main St & Co"),
        ("city", "Zürich"),
        ("state", ""),
    ]
    .into_iter()
    .collect()
}

#[wasm_bindgen_test]
fn csrf_token_reads_and_decodes_cookie() {
    let document = html_document();
    document
        .set_cookie(&format!("{CSRF_COOKIE_NAME}=a%20b; path=/"))
        .unwrap();
    assert_eq!(csrf_token().as_deref(), Some("a b"));

    document
        .set_cookie(&format!(
            "{CSRF_COOKIE_NAME}=; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT"
        ))
        .unwrap();
    assert_eq!(csrf_token(), None);
}

#[wasm_bindgen_test]
fn body_keeps_field_order_and_escapes_values() {
    let params = url_encoded(&sample_fields()).unwrap();
    assert_eq!(
        String::from(params.to_string()),
        "basket=7&first_name=Ada+Lovelace&address_line1=1+Main+St+%26+Co&city=Z%C3%BCrich&state="
    );

    let decoded = UrlSearchParams::new_with_str(&String::from(params.to_string())).unwrap();
    for (name, value) in sample_fields().iter() {
        assert_eq!(decoded.get(name).as_deref(), Some(value), "{name}");
    }
}

#[wasm_bindgen_test]
fn post_carries_csrf_header() {
    let request = billing_request(REGISTER_URL, &sample_fields(), Some("a b")).unwrap();
    let headers = request.headers();
    assert_eq!(headers.get(CSRF_HEADER_NAME).as_deref(), Some("a b"));
    assert_eq!(headers.get("X-Requested-With").as_deref(), Some("XMLHttpRequest"));
    assert_eq!(headers.get("Accept").as_deref(), Some("application/json"));
}

#[wasm_bindgen_test]
fn post_without_token_omits_header() {
    let request = billing_request(REGISTER_URL, &sample_fields(), None).unwrap();
    assert_eq!(request.headers().get(CSRF_HEADER_NAME), None);
}
