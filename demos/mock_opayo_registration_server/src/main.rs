use std::collections::BTreeMap;
use std::env;
use std::io::Read;

use serde::Deserialize;
use serde_json::json;
use tiny_http::{Header, Method, Request, Response, Server};

/// Billing details as posted by the widget.
#[derive(Debug, Default, Deserialize)]
struct BillingForm {
    #[serde(default)]
    basket: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    address_line1: String,
    #[serde(default)]
    address_line2: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    postal_code: String,
}

const REQUIRED: &str = "This field is required.";
const BASKET_PROBLEM: &str =
    "There was a problem retrieving your basket. Refresh the page to try again.";

/// The only basket this mock knows about; it is rendered into the form.
const MOCK_BASKET_ID: &str = "1";

/// Server-side rules of the registration endpoint: one message per field.
fn validate(form: &BillingForm) -> BTreeMap<&'static str, String> {
    let mut errors = BTreeMap::new();
    // The basket is optional, but an unknown id is rejected.
    if !form.basket.is_empty() && form.basket != MOCK_BASKET_ID {
        errors.insert("basket", BASKET_PROBLEM.to_string());
    }
    let fields = [
        ("first_name", &form.first_name, 20, true),
        ("last_name", &form.last_name, 20, true),
        ("address_line1", &form.address_line1, 40, true),
        ("address_line2", &form.address_line2, 9, false),
        ("city", &form.city, 40, true),
        ("country", &form.country, 2, true),
        ("state", &form.state, 2, false),
        ("postal_code", &form.postal_code, 10, false),
    ];
    for (name, value, max_length, required) in fields {
        let value = value.trim();
        if required && value.is_empty() {
            errors.insert(name, REQUIRED.to_string());
        } else if value.chars().count() > max_length {
            errors.insert(
                name,
                format!("Ensure this value has at most {max_length} characters."),
            );
        }
    }
    if matches!(form.country.as_str(), "US" | "CA") {
        if form.state.trim().is_empty() {
            errors.entry("state").or_insert_with(|| REQUIRED.to_string());
        }
        if form.postal_code.trim().is_empty() {
            errors.entry("postal_code").or_insert_with(|| REQUIRED.to_string());
        }
    }
    errors
}

fn form_template() -> String {
    let item = |name: &str, label: &str| {
        format!(
            r#"<div class="form-item col-md-6"><div id="div_id_{name}" class="form-group"><label for="id_{name}">{label}</label><div class="controls"><input type="text" name="{name}" id="id_{name}" class="textinput textInput form-control"></div></div><p class="help-block"></p></div>"#
        )
    };
    format!(
        r#"<div class="popup-opayo-extra-info"><form id="opayo-payment-form" data-has-error="false"><p class="error-message"></p><input type="hidden" name="basket" value="{}">{}{}{}{}{}<div class="form-item col-md-6"><div id="div_id_country" class="form-group"><label for="id_country">Country (required)</label><div class="controls"><select name="country" id="id_country" class="select form-control"><option value="">---------</option><option value="CA">Canada</option><option value="GB">United Kingdom</option><option value="US">United States</option></select></div></div><p class="help-block"></p></div>{}{}<button id="opayo-payment-button" type="submit" class="btn btn-primary">Continue <span class="fa fa-spinner fa-spin hidden"></span></button><button id="opayo-cancel-button" type="button" class="btn btn-default">Cancel</button></form></div>"#,
        MOCK_BASKET_ID,
        item("first_name", "First Name (required)"),
        item("last_name", "Last Name (required)"),
        item("address_line1", "Address (required)"),
        item("address_line2", "Suite/Apartment Number"),
        item("city", "City (required)"),
        item("state", "State/Province"),
        item("postal_code", "Zip/Postal Code"),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let port = env::var("MOCK_OPAYO_SERVER_PORT").unwrap_or_else(|_| "2719".to_string());
    let allowed_origin = env::var("MOCK_OPAYO_ALLOWED_ORIGIN")
        .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr)?;
    println!("Running on http://{}", addr);

    let cors_headers = || {
        vec![
            Header::from_bytes("Access-Control-Allow-Origin", allowed_origin.as_bytes()).unwrap(),
            Header::from_bytes("Access-Control-Allow-Methods", "GET, POST, OPTIONS").unwrap(),
            Header::from_bytes(
                "Access-Control-Allow-Headers",
                "Content-Type, X-CSRFToken, X-Requested-With",
            )
            .unwrap(),
        ]
    };

    let mut transactions = 0u64;
    for mut request in server.incoming_requests() {
        if request.method() == &Method::Options {
            let mut resp = Response::empty(204);
            for h in cors_headers() {
                resp.add_header(h);
            }
            request.respond(resp)?;
            continue;
        }

        let (status, body) = match (request.method(), request.url()) {
            (&Method::Get, "/payment/opayo/register/") => {
                (200, json!({ "form_template": form_template() }))
            }
            (&Method::Post, "/payment/opayo/register/") => {
                if !has_csrf_header(&request) {
                    (403, json!({ "detail": "CSRF token missing." }))
                } else {
                    let mut raw = String::new();
                    request.as_reader().read_to_string(&mut raw)?;
                    let form: BillingForm = serde_urlencoded::from_str(&raw).unwrap_or_default();
                    println!("Received billing form: {:?}", form);
                    let errors = validate(&form);
                    if errors.is_empty() {
                        transactions += 1;
                        let url = format!(
                            "https://sandbox.opayo.example/gateway/service/cardselection?vpstxid=MOCK-{transactions:06}"
                        );
                        (200, json!({ "payment_page_url": url }))
                    } else if errors.contains_key("basket") {
                        (200, json!({ "field_errors": errors, "error": BASKET_PROBLEM }))
                    } else {
                        (200, json!({ "field_errors": errors }))
                    }
                }
            }
            _ => (404, json!({ "detail": "Not Found" })),
        };

        let mut resp = Response::from_string(body.to_string())
            .with_status_code(status)
            .with_header(Header::from_bytes("Content-Type", "application/json").unwrap());
        for h in cors_headers() {
            resp.add_header(h);
        }
        request.respond(resp)?;
    }

    Ok(())
}

fn has_csrf_header(request: &Request) -> bool {
    request
        .headers()
        .iter()
        .any(|h| h.field.equiv("X-CSRFToken") && !h.value.as_str().trim().is_empty())
}
