use yew::prelude::*;

/// Button that registers a payment method on the checkout page.
///
/// Without an `onclick` the button is inert: that is how the widget detaches
/// the trigger while a request is pending or the form is open.
#[derive(Properties, PartialEq)]
pub struct PaymentMethodButtonProps {
    /// DOM id, also used by page styles
    pub id: AttrValue,
    /// Button label text
    pub label: AttrValue,
    /// Click handler, `None` while disarmed
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
    /// Shows the spinner and marks the button busy
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(PaymentMethodButton)]
pub fn payment_method_button(props: &PaymentMethodButtonProps) -> Html {
    html! {
        <button
            type="button"
            id={props.id.clone()}
            class="btn payment-button"
            onclick={props.onclick.clone()}
            aria-busy={props.loading.to_string()}
        >
            if props.loading {
                <span class="fa fa-spinner fa-spin" aria-hidden="true" />
            }
            { props.label.as_str() }
        </button>
    }
}
