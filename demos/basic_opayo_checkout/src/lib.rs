// src/lib.rs
use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_opayo::{OpayoCheckout, OpayoError};

#[wasm_bindgen(start)]
pub fn start() {
    yew_opayo::logging::init(log::LevelFilter::Debug);
    yew::Renderer::<BasicCheckout>::new().render();
}

#[function_component(BasicCheckout)]
fn basic_checkout() -> Html {
    let last_error = use_state(|| None::<String>);
    let payment_page = use_state(|| None::<String>);

    // 📡 mock server from ../mock_opayo_registration_server
    let backend = "http://127.0.0.1:2719/payment/opayo/register/";

    let on_error = {
        let last_error = last_error.clone();
        Callback::from(move |err: OpayoError| last_error.set(Some(err.to_string())))
    };
    let on_redirect = {
        let payment_page = payment_page.clone();
        Callback::from(move |url: String| payment_page.set(Some(url)))
    };

    html! {
        <div>
            <h1>{ "Choose a payment method" }</h1>
            <OpayoCheckout
                transaction_registration_url={backend}
                on_error={on_error}
                on_redirect={on_redirect}
            />
            {
                if let Some(msg) = &*last_error {
                    html! { <p style="color:red;">{ msg.clone() }</p> }
                } else {
                    Html::default()
                }
            }
            {
                if let Some(url) = &*payment_page {
                    html! { <p>{ format!("Leaving for {url}") }</p> }
                } else {
                    Html::default()
                }
            }
        </div>
    }
}
