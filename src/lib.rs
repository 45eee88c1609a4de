//! Opayo payment method widget for Yew checkout pages.
//!
//! Plain pages call the exported `init` with `{ transactionRegistrationUrl }`
//! (or `init_from_json` with the same object as JSON text);
//! Yew applications render [`OpayoCheckout`] directly.

pub mod bindings;
pub mod billing;
pub mod checkout_component;
pub mod client;
pub mod components;
pub mod config;
pub mod csrf;
pub mod dom;
pub mod error;
pub mod form;
pub mod i18n;
pub mod logging;
pub mod response;
pub mod subdivisions;
pub mod widget;

pub use checkout_component::*;
pub use config::OpayoConfig;
pub use error::OpayoError;
pub use response::{RegistrationResponse, ServerReply};

use wasm_bindgen::prelude::*;
use yew::{AttrValue, Callback};

/// Mount the Opayo checkout widget described by `config`.
///
/// ```js
/// import load, { init } from "./yew_opayo.js";
/// await load();
/// init({ transactionRegistrationUrl: "/payment/opayo/register/" });
/// ```
#[wasm_bindgen]
pub fn init(config: JsValue) -> Result<(), JsValue> {
    mount(OpayoConfig::from_js(config)?)?;
    Ok(())
}

/// Same as [`init`], for pages that embed the settings as JSON text, e.g.
/// `init_from_json(el.dataset.opayoConfig)`.
#[wasm_bindgen]
pub fn init_from_json(config: &str) -> Result<(), JsValue> {
    mount(OpayoConfig::from_json(config)?)?;
    Ok(())
}

fn mount(config: OpayoConfig) -> Result<(), OpayoError> {
    logging::init(config.log_level);
    let root = dom::query(&config.mount_selector)?
        .ok_or_else(|| OpayoError::missing(config.mount_selector.clone()))?;
    log::info!("mounting Opayo checkout into {}", config.mount_selector);
    let props = OpayoCheckoutProps {
        transaction_registration_url: config.transaction_registration_url.into(),
        button_label: config.button_label.map(AttrValue::from),
        on_error: Callback::default(),
        on_redirect: Callback::default(),
    };
    yew::Renderer::<OpayoCheckout>::with_root_and_props(root, props).render();
    Ok(())
}
