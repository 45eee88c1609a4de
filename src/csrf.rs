//! CSRF token lookup for the billing form POST.
//!
//! The ecommerce backend issues its token in the `ecommerce_csrftoken` cookie
//! and expects it back in the `X-CSRFToken` header.

/// Cookie carrying the token.
pub const CSRF_COOKIE_NAME: &str = "ecommerce_csrftoken";

/// Header the token is sent in.
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// Find `name` in a `document.cookie` style string.
///
/// Whitespace around names and values is ignored; an empty value counts as no
/// token.
pub fn parse_cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Read the CSRF token from the page cookies.
#[cfg(target_arch = "wasm32")]
pub fn csrf_token() -> Option<String> {
    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    let document = web_sys::window()?.document()?;
    let cookies = document.dyn_ref::<HtmlDocument>()?.cookie().ok()?;
    let raw = parse_cookie_value(&cookies, CSRF_COOKIE_NAME)?;
    // Cookie values may be percent-encoded by whoever set them.
    Some(
        web_sys::js_sys::decode_uri_component(&raw)
            .map(String::from)
            .unwrap_or(raw),
    )
}

/// Read the CSRF token (non-WASM stub).
#[cfg(not(target_arch = "wasm32"))]
pub fn csrf_token() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_finds_token_among_other_cookies() {
        let cookies = "sessionid=abc123; ecommerce_csrftoken=xyz789; csrftoken=other";
        assert_eq!(
            parse_cookie_value(cookies, CSRF_COOKIE_NAME),
            Some("xyz789".to_string())
        );
    }

    #[rstest]
    fn test_does_not_match_name_suffix() {
        assert_eq!(parse_cookie_value("csrftoken=abc", CSRF_COOKIE_NAME), None);
        assert_eq!(
            parse_cookie_value("x_ecommerce_csrftoken=abc", CSRF_COOKIE_NAME),
            None
        );
    }

    #[rstest]
    #[case(" ecommerce_csrftoken = tok ; a=b", Some("tok"))]
    #[case("ecommerce_csrftoken=", None)]
    #[case("", None)]
    #[case("ecommerce_csrftoken=a=b", Some("a=b"))]
    fn test_edge_cases(#[case] cookies: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            parse_cookie_value(cookies, CSRF_COOKIE_NAME).as_deref(),
            expected
        );
    }
}
