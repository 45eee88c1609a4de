//! A high-level Yew component registering Opayo as a payment method.
//!
//! This component renders the trigger button, loads the server-rendered
//! billing form into an overlay, validates it, posts it back and finally
//! sends the browser to the hosted Opayo payment page.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::client::{fetch_extra_info, submit_billing_details};
use crate::components::PaymentMethodButton;
use crate::csrf::csrf_token;
use crate::dom::{self, Listener};
use crate::error::OpayoError;
use crate::form::{self, ExtraInfoForm};
use crate::i18n::{self, gettext};
use crate::response::ServerReply;
use crate::widget::WidgetState;

/// DOM id of the trigger button.
pub const TRIGGER_BUTTON_ID: &str = "opayo";

/// Properties for the [`OpayoCheckout`] component.
///
/// # Fields
///
/// * `transaction_registration_url` – Endpoint serving the form (GET) and
///   accepting the billing details (POST).
/// * `button_label` – Override the trigger text (default: `"Checkout with Opayo"`).
/// * `on_error` – Invoked with every [`OpayoError`] the widget absorbs.
/// * `on_redirect` – Invoked with the payment page URL just before navigating.
#[derive(Properties, PartialEq, Clone)]
pub struct OpayoCheckoutProps {
    pub transaction_registration_url: AttrValue,
    #[prop_or_default]
    pub button_label: Option<AttrValue>,
    #[prop_or_default]
    pub on_error: Callback<OpayoError>,
    #[prop_or_default]
    pub on_redirect: Callback<String>,
}

/// Messages driving the [`OpayoCheckout`] component.
pub enum Msg {
    /// Trigger button clicked.
    RequestExtraInfo,
    /// A GET or POST finished.
    ReplyReceived(Result<ServerReply, OpayoError>),
    /// The country select changed.
    CountryChanged,
    /// The form's submit button was clicked.
    SubmitRequested,
    /// The form's cancel button was clicked.
    CancelRequested,
}

/// Yew component driving the Opayo checkout.
///
/// Lifecycle:
/// 1. The trigger button listens only while the widget is closed.
/// 2. A click GETs the form markup and appends it to `<body>`.
/// 3. The country, submit and cancel handlers are subscribed on the injected
///    form. They are dropped before the billing details are posted and
///    re-subscribed if the server sends the form back with errors.
/// 4. A payment page URL ends the flow with a browser navigation.
///
/// Transport failures, unknown replies and broken markup close the overlay
/// and show the generic support message in `#messages`.
///
/// # Example
///
/// ```rust,ignore
/// use yew::prelude::*;
/// use yew_opayo::{OpayoCheckout, OpayoError};
///
/// #[function_component(App)]
/// fn app() -> Html {
///     let on_error = Callback::from(|err: OpayoError| log::error!("{err}"));
///     html! {
///         <OpayoCheckout
///             transaction_registration_url="/payment/opayo/register/"
///             on_error={on_error}
///         />
///     }
/// }
/// ```
pub struct OpayoCheckout {
    state: WidgetState,
    /// Live subscriptions on the injected form.
    listeners: Vec<Listener>,
}

impl Component for OpayoCheckout {
    type Message = Msg;
    type Properties = OpayoCheckoutProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            state: WidgetState::default(),
            listeners: Vec::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Msg) -> bool {
        match msg {
            Msg::RequestExtraInfo => {
                if let Err(err) = self.state.request_form() {
                    log::debug!("ignoring trigger click: {err}");
                    return false;
                }
                let url = ctx.props().transaction_registration_url.to_string();
                let link = ctx.link().clone();
                log::info!("requesting Opayo billing form");
                spawn_local(async move {
                    let reply = fetch_extra_info(&url).await;
                    link.send_message(Msg::ReplyReceived(reply));
                });
                true
            }
            Msg::ReplyReceived(Ok(reply)) => {
                if let Err(err) = self.on_success(ctx, reply) {
                    self.on_fail(ctx, err);
                }
                true
            }
            Msg::ReplyReceived(Err(err)) => {
                self.on_fail(ctx, err);
                true
            }
            Msg::CountryChanged => {
                let result = ExtraInfoForm::locate().and_then(|form| {
                    let country = form.country()?;
                    form.apply_country_rules(&country)
                });
                if let Err(err) = result {
                    log::warn!("could not apply country rules: {err}");
                    ctx.props().on_error.emit(err);
                }
                false
            }
            Msg::SubmitRequested => match self.on_submit_requested(ctx) {
                Ok(changed) => changed,
                Err(err) => {
                    self.on_fail(ctx, err);
                    true
                }
            },
            Msg::CancelRequested => {
                log::info!("Opayo billing form cancelled");
                self.close_extra_info();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let onclick = self
            .state
            .trigger_armed()
            .then(|| ctx.link().callback(|_: MouseEvent| Msg::RequestExtraInfo));
        let label = props
            .button_label
            .clone()
            .unwrap_or_else(|| AttrValue::from(gettext(i18n::TRIGGER_LABEL)));
        html! {
            <PaymentMethodButton
                id={TRIGGER_BUTTON_ID}
                label={label}
                onclick={onclick}
                loading={self.state.is_busy()}
            />
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.close_extra_info();
    }
}

impl OpayoCheckout {
    fn on_success(&mut self, ctx: &Context<Self>, reply: ServerReply) -> Result<(), OpayoError> {
        log::debug!("handling {} reply", reply.kind());
        match reply {
            ServerReply::Template(markup) => {
                self.state.form_rendered(false)?;
                let stale = form::remove_overlay()?;
                if stale > 0 {
                    log::warn!("replacing {stale} stale overlay element(s)");
                }
                dom::append_to_body(&markup)?;
                let form = ExtraInfoForm::locate()?;
                form.set_spinner(false)?;
                self.ready_form(ctx, &form)?;
            }
            ServerReply::Errors { field_errors, error } => {
                self.state.form_rendered(true)?;
                let form = ExtraInfoForm::locate()?;
                form.set_spinner(false)?;
                form.render_errors(&field_errors, error.as_deref())?;
                self.ready_form(ctx, &form)?;
                log::info!(
                    "billing form rejected by server ({} field errors)",
                    field_errors.len()
                );
            }
            ServerReply::Redirect(url) => {
                self.state.redirect()?;
                log::info!("redirecting to Opayo payment page");
                ctx.props().on_redirect.emit(url.clone());
                dom::navigate_to(&url)?;
            }
            ServerReply::Unknown => return Err(OpayoError::EmptyResponse),
        }
        Ok(())
    }

    fn on_fail(&mut self, ctx: &Context<Self>, err: OpayoError) {
        log::error!(
            "Opayo checkout failed while {}: {err}",
            self.state.phase().name()
        );
        ctx.props().on_error.emit(err);
        self.close_extra_info();
        if let Err(err) = dom::show_page_error(&gettext(i18n::CHECKOUT_PROBLEM)) {
            log::warn!("could not show checkout error: {err}");
        }
    }

    /// Subscribe the form-scoped handlers, replacing any previous ones.
    fn ready_form(
        &mut self,
        ctx: &Context<Self>,
        form: &ExtraInfoForm,
    ) -> Result<(), OpayoError> {
        self.listeners.clear();
        let link = ctx.link();

        let on_country = link.callback(|_: ()| Msg::CountryChanged);
        self.listeners.push(Listener::new(&form.country_select()?, "change", move |_| {
            on_country.emit(())
        })?);

        let on_submit = link.callback(|_: ()| Msg::SubmitRequested);
        self.listeners.push(Listener::new(&form.submit_button()?, "click", move |event| {
            event.prevent_default();
            on_submit.emit(())
        })?);

        let on_cancel = link.callback(|_: ()| Msg::CancelRequested);
        self.listeners.push(Listener::new(&form.cancel_button()?, "click", move |_| {
            on_cancel.emit(())
        })?);
        Ok(())
    }

    /// Validate and, when complete, post the form. Returns whether the view
    /// needs a re-render.
    fn on_submit_requested(&mut self, ctx: &Context<Self>) -> Result<bool, OpayoError> {
        if !self.state.form_handlers_armed() {
            return Ok(false);
        }
        let form = ExtraInfoForm::locate()?;
        form.reset_messages()?;
        if !form.validate()? {
            return Ok(false);
        }

        self.state.begin_submit()?;
        self.listeners.clear();
        form.set_spinner(true)?;
        let fields = form.fields()?;
        let token = csrf_token();
        let url = ctx.props().transaction_registration_url.to_string();
        let link = ctx.link().clone();
        log::info!("submitting Opayo billing form");
        spawn_local(async move {
            let reply = submit_billing_details(&url, &fields, token.as_deref()).await;
            link.send_message(Msg::ReplyReceived(reply));
        });
        Ok(true)
    }

    /// Drop the form handlers, re-arm the trigger and remove the overlay.
    fn close_extra_info(&mut self) {
        self.listeners.clear();
        self.state.close();
        match form::remove_overlay() {
            Ok(removed) => log::debug!("removed {removed} overlay element(s)"),
            Err(err) => log::warn!("could not remove overlay: {err}"),
        }
    }
}
