//! HTTP calls against the transaction registration endpoint.
//!
//! The same URL serves both requests:
//! - `GET` returns the extra-info form markup.
//! - `POST` takes the url-encoded billing fields and answers with either
//!   validation errors or the hosted payment page URL.
//!
//! Both responses are decoded and classified into a [`ServerReply`]. A
//! network failure, a non-2xx status or a body that is not the expected JSON
//! is reported as an [`OpayoError`].
//!
//! # Example Usage
//! ```rust,ignore
//! use yew_opayo::client::{fetch_extra_info, submit_billing_details};
//! use yew_opayo::csrf::csrf_token;
//!
//! wasm_bindgen_futures::spawn_local(async move {
//!     match fetch_extra_info("/payment/opayo/register/").await {
//!         Ok(reply) => log::info!("got {}", reply.kind()),
//!         Err(err) => log::error!("{err}"),
//!     }
//! });
//! ```

use gloo_net::http::{Request, Response};
use web_sys::UrlSearchParams;

use crate::billing::FormFields;
use crate::csrf::CSRF_HEADER_NAME;
use crate::error::OpayoError;
use crate::response::{RegistrationResponse, ServerReply};

/// Ask the endpoint for the extra-info form.
pub async fn fetch_extra_info(url: &str) -> Result<ServerReply, OpayoError> {
    log::debug!("GET {url}");
    let response = Request::get(url)
        .header("Content-Type", "application/json; charset=utf-8")
        .header("Accept", "application/json")
        .send()
        .await?;
    into_reply(response).await
}

/// Post the billing fields back to the endpoint.
///
/// Every serialized field is sent under its own name. When `csrf_token` is
/// `None` the header is omitted and the server decides.
pub async fn submit_billing_details(
    url: &str,
    fields: &FormFields,
    csrf_token: Option<&str>,
) -> Result<ServerReply, OpayoError> {
    log::debug!("POST {url} with {} fields", fields.len());
    let response = billing_request(url, fields, csrf_token)?.send().await?;
    into_reply(response).await
}

/// Build the billing POST without sending it.
pub fn billing_request(
    url: &str,
    fields: &FormFields,
    csrf_token: Option<&str>,
) -> Result<Request, OpayoError> {
    let mut builder = Request::post(url)
        .header("Accept", "application/json")
        .header("X-Requested-With", "XMLHttpRequest");
    match csrf_token {
        Some(token) => builder = builder.header(CSRF_HEADER_NAME, token),
        None => log::warn!("no CSRF token cookie found, posting without {CSRF_HEADER_NAME}"),
    }
    // The browser sets the url-encoded content type for URLSearchParams bodies.
    Ok(builder.body(url_encoded(fields)?)?)
}

/// Url-encode `fields` in order, one pair per field.
pub fn url_encoded(fields: &FormFields) -> Result<UrlSearchParams, OpayoError> {
    let params = UrlSearchParams::new().map_err(OpayoError::from_js)?;
    for (name, value) in fields.iter() {
        params.append(name, value);
    }
    Ok(params)
}

async fn into_reply(response: Response) -> Result<ServerReply, OpayoError> {
    if !response.ok() {
        return Err(OpayoError::Status(response.status()));
    }
    let body: RegistrationResponse = response.json().await?;
    let reply = ServerReply::from(body);
    log::debug!("registration endpoint replied with {}", reply.kind());
    Ok(reply)
}
