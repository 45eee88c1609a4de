//! Lifecycle of the checkout widget.
//!
//! ```text
//!          request_form            form_rendered
//! Closed ────────────────▶ Loading ──────────────▶ FormShown ◀──┐
//!                             │                      │          │ form_rendered
//!                             │ redirect             │ begin_submit
//!                             ▼                      ▼          │
//!                        Redirected ◀──────────── Submitting ───┘
//!                                      redirect
//! ```
//!
//! `close` returns to `Closed` from any phase.
//!
//! The phase decides which subscriptions may be live: the trigger button only
//! listens while closed, the form handlers only while the form is shown. That
//! is what keeps at most one request in flight.

use crate::error::OpayoError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing on screen but the trigger button.
    #[default]
    Closed,
    /// Waiting for the form markup.
    Loading,
    /// Form on screen and interactive.
    FormShown { has_errors: bool },
    /// Billing details posted, waiting for the verdict.
    Submitting,
    /// Browser sent to the hosted payment page. Terminal.
    Redirected,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Closed => "closed",
            Phase::Loading => "loading",
            Phase::FormShown { has_errors: false } => "showing the form",
            Phase::FormShown { has_errors: true } => "showing the form with errors",
            Phase::Submitting => "submitting",
            Phase::Redirected => "redirected",
        }
    }
}

/// The widget's current phase plus the transitions allowed out of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WidgetState {
    phase: Phase,
}

impl WidgetState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn reject(&self, event: &'static str) -> OpayoError {
        OpayoError::InvalidTransition {
            phase: self.phase.name(),
            event,
        }
    }

    fn enter(&mut self, next: Phase) {
        log::debug!("widget {} -> {}", self.phase.name(), next.name());
        self.phase = next;
    }

    /// Trigger clicked: start loading the form.
    pub fn request_form(&mut self) -> Result<(), OpayoError> {
        match self.phase {
            Phase::Closed => {
                self.enter(Phase::Loading);
                Ok(())
            }
            _ => Err(self.reject("request the form")),
        }
    }

    /// A form (fresh or with errors) is on screen.
    pub fn form_rendered(&mut self, has_errors: bool) -> Result<(), OpayoError> {
        match self.phase {
            Phase::Loading | Phase::Submitting => {
                self.enter(Phase::FormShown { has_errors });
                Ok(())
            }
            _ => Err(self.reject("show the form")),
        }
    }

    /// Validated form is being posted.
    pub fn begin_submit(&mut self) -> Result<(), OpayoError> {
        match self.phase {
            Phase::FormShown { .. } => {
                self.enter(Phase::Submitting);
                Ok(())
            }
            _ => Err(self.reject("submit the billing form")),
        }
    }

    /// Server handed out the payment page URL.
    pub fn redirect(&mut self) -> Result<(), OpayoError> {
        match self.phase {
            Phase::Loading | Phase::Submitting => {
                self.enter(Phase::Redirected);
                Ok(())
            }
            _ => Err(self.reject("redirect to the payment page")),
        }
    }

    /// Cancel, failure or teardown. Always allowed, so a failed navigation can
    /// still fall back to the trigger.
    pub fn close(&mut self) {
        if self.phase != Phase::Closed {
            self.enter(Phase::Closed);
        }
    }

    /// Whether the trigger button should listen for clicks.
    pub fn trigger_armed(&self) -> bool {
        self.phase == Phase::Closed
    }

    /// Whether the country/submit/cancel handlers should be live.
    pub fn form_handlers_armed(&self) -> bool {
        matches!(self.phase, Phase::FormShown { .. })
    }

    /// Whether a request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Submitting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn showing() -> WidgetState {
        let mut state = WidgetState::default();
        state.request_form().unwrap();
        state.form_rendered(false).unwrap();
        state
    }

    #[rstest]
    fn test_starts_closed_with_trigger_armed() {
        let state = WidgetState::default();
        assert_eq!(state.phase(), Phase::Closed);
        assert!(state.trigger_armed());
        assert!(!state.form_handlers_armed());
    }

    #[rstest]
    fn test_loading_disarms_trigger() {
        let mut state = WidgetState::default();
        state.request_form().unwrap();
        assert!(!state.trigger_armed());
        assert!(state.is_busy());
        assert!(state.request_form().is_err());
    }

    #[rstest]
    fn test_error_loop_keeps_form_open(mut showing: WidgetState) {
        showing.begin_submit().unwrap();
        assert!(!showing.form_handlers_armed());
        assert!(showing.begin_submit().is_err());
        showing.form_rendered(true).unwrap();
        assert_eq!(showing.phase(), Phase::FormShown { has_errors: true });
        assert!(showing.form_handlers_armed());
        showing.begin_submit().unwrap();
        showing.redirect().unwrap();
        assert_eq!(showing.phase(), Phase::Redirected);
        assert!(!showing.trigger_armed());
    }

    #[rstest]
    fn test_close_rearms_trigger(mut showing: WidgetState) {
        showing.close();
        assert!(showing.trigger_armed());
        showing.request_form().unwrap();
        assert_eq!(showing.phase(), Phase::Loading);
    }

    #[rstest]
    fn test_redirect_requires_pending_request(mut showing: WidgetState) {
        let err = showing.redirect().unwrap_err();
        assert_eq!(
            err,
            OpayoError::InvalidTransition {
                phase: "showing the form",
                event: "redirect to the payment page",
            }
        );
    }

    #[rstest]
    fn test_cannot_show_form_when_closed() {
        let mut state = WidgetState::default();
        assert!(state.form_rendered(false).is_err());
        assert_eq!(state.phase(), Phase::Closed);
    }

    #[rstest]
    fn test_close_is_idempotent() {
        let mut state = WidgetState::default();
        state.close();
        state.close();
        assert_eq!(state.phase(), Phase::Closed);
    }
}
