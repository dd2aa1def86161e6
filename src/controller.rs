//! Event-level entry point for the presentation layer.
//!
//! [`LightboxController`] wires the pieces together so a renderer only has to
//! forward raw events and re-render from [`LightboxController::snapshot`]:
//!
//! ```text
//! key / touch / click ──▶ InputAdapter ──▶ Command ──▶ Session ──▶ Snapshot
//!                                │                        │
//!                         Tab / Shift+Tab            open / close
//!                                ▼                        ▼
//!                            FocusTrap              EffectScope (scroll lock,
//!                                                    key listener)
//! ```
//!
//! Opening acquires the scroll lock and key listener, attaches the input
//! adapter, and builds a focus trap around the rendered controls. Every path
//! that closes the session (close button, Escape, backdrop, programmatic
//! close, dropping the controller) releases them again.
//!
//! Rejected commands are returned as [`Handled::Rejected`] rather than
//! propagated: for the user they are no-ops, but the caller can still see
//! (and log or test) what was refused.

use crate::config::LightboxConfig;
use crate::effects::{EffectScope, Host};
use crate::focus::{Availability, FocusTarget, FocusTrap};
use crate::input::{Command, Control, InputAdapter};
use crate::session::{Applied, LightboxError, OpenRequest, Session, Snapshot};
use tracing::debug;

/// Result of feeding one event to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// A command was applied to the session.
    Applied(Applied),
    /// Keyboard focus moved inside the lightbox.
    Focus(FocusTarget),
    /// A command was produced but the session refused it; nothing changed.
    Rejected(LightboxError),
    /// The event does not map to anything.
    Ignored,
}

/// Result of a click on a lightbox control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlOutcome {
    pub handled: Handled,
    pub stop_propagation: bool,
}

#[derive(Debug)]
pub struct LightboxController<H: Host> {
    config: LightboxConfig,
    session: Session,
    input: InputAdapter,
    effects: EffectScope<H>,
    focus: Option<FocusTrap>,
}

impl<H: Host> LightboxController<H> {
    pub fn new(config: LightboxConfig, host: H) -> Self {
        let session = Session::new(&config.thumbnails);
        let input = InputAdapter::new(&config.keyboard, &config.gestures);
        Self {
            config,
            session,
            input,
            effects: EffectScope::new(host),
            focus: None,
        }
    }

    /// Open the lightbox. `return_focus` names the element that triggered the
    /// open; it is handed back by [`close`](Self::close).
    ///
    /// Reopening while open swaps the gallery but keeps the original
    /// `return_focus`.
    pub fn open(
        &mut self,
        request: OpenRequest,
        return_focus: Option<String>,
    ) -> Result<(), LightboxError> {
        self.session.open(request)?;
        let return_focus = match self.focus.take() {
            Some(previous) => previous.release(),
            None => return_focus,
        };
        let size = self.session.images().map_or(0, |set| set.size());
        let available = Availability::for_gallery(size, self.config.thumbnails.min_images);
        self.focus = Some(FocusTrap::new(
            &self.config.focus.ring,
            available,
            self.config.focus.initial,
            return_focus,
        ));
        self.effects.acquire();
        self.input.attach();
        Ok(())
    }

    /// Close the lightbox and return the element that should regain focus.
    pub fn close(&mut self) -> Option<String> {
        self.session.close();
        self.teardown()
    }

    /// Apply a command directly (e.g. from a custom control).
    pub fn apply(&mut self, command: Command) -> Handled {
        match self.session.apply(command) {
            Ok(Applied::Closed) => {
                self.teardown();
                Handled::Applied(Applied::Closed)
            }
            Ok(applied) => Handled::Applied(applied),
            Err(err) => Handled::Rejected(err),
        }
    }

    /// Handle a key press. `shift` only matters for Tab.
    pub fn handle_key(&mut self, key: &str, shift: bool) -> Handled {
        if key == "Tab" {
            return match (self.input.is_attached(), self.focus.as_mut()) {
                (true, Some(trap)) => {
                    let target = if shift { trap.shift_tab() } else { trap.tab() };
                    Handled::Focus(target)
                }
                _ => Handled::Ignored,
            };
        }
        match self.input.key(key) {
            Some(command) => self.apply(command),
            None => Handled::Ignored,
        }
    }

    pub fn handle_touch_start(&mut self, x: f64) {
        self.input.touch_start(x);
    }

    pub fn handle_touch_end(&mut self, x: f64, on_image: bool) -> Handled {
        match self.input.touch_end(x, on_image) {
            Some(command) => self.apply(command),
            None => Handled::Ignored,
        }
    }

    pub fn handle_control(&mut self, control: Control) -> ControlOutcome {
        let action = self.input.control(control);
        if let (Some(trap), Some(target)) = (self.focus.as_mut(), focus_target(control)) {
            trap.focus(target);
        }
        let handled = match action.command {
            Some(command) => self.apply(command),
            None => Handled::Ignored,
        };
        ControlOutcome {
            handled,
            stop_propagation: action.stop_propagation,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        self.focus.as_ref().map(FocusTrap::focused)
    }

    pub fn effects(&self) -> &EffectScope<H> {
        &self.effects
    }

    pub fn host(&self) -> &H {
        self.effects.host()
    }

    pub fn config(&self) -> &LightboxConfig {
        &self.config
    }

    fn teardown(&mut self) -> Option<String> {
        self.input.detach();
        self.effects.release();
        let return_focus = self.focus.take().and_then(FocusTrap::release);
        debug!(?return_focus, "lightbox torn down");
        return_focus
    }
}

fn focus_target(control: Control) -> Option<FocusTarget> {
    match control {
        Control::Previous => Some(FocusTarget::Previous),
        Control::Next => Some(FocusTarget::Next),
        Control::Close => Some(FocusTarget::Close),
        Control::ZoomButton => Some(FocusTarget::Zoom),
        Control::ThumbnailsButton => Some(FocusTarget::Thumbnails),
        Control::Thumbnail(_) | Control::Backdrop | Control::Image => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{HostEvent, RecordingHost};
    use crate::test_helpers::sample_set;

    fn controller() -> LightboxController<RecordingHost> {
        LightboxController::new(LightboxConfig::default(), RecordingHost::new())
    }

    fn opened(size: usize, start: usize) -> LightboxController<RecordingHost> {
        let mut c = controller();
        c.open(
            OpenRequest::new(sample_set(size), start),
            Some("card-1".to_string()),
        )
        .unwrap();
        c
    }

    #[test]
    fn open_acquires_effects_and_focuses_close() {
        let c = opened(3, 0);
        assert!(c.is_open());
        assert_eq!(c.host().active_suspensions(), 1);
        assert_eq!(c.host().active_listeners(), 1);
        assert_eq!(c.focused(), Some(FocusTarget::Close));
    }

    #[test]
    fn failed_open_acquires_nothing() {
        let mut c = controller();
        let err = c
            .open(OpenRequest::new(sample_set(0), 0), None)
            .unwrap_err();
        assert_eq!(err, LightboxError::EmptyImageSet);
        assert!(!c.is_open());
        assert!(c.host().events.is_empty());
        assert_eq!(c.focused(), None);
    }

    #[test]
    fn escape_closes_and_restores() {
        let mut c = opened(3, 1);
        assert_eq!(
            c.handle_key("Escape", false),
            Handled::Applied(Applied::Closed)
        );
        assert!(!c.is_open());
        assert_eq!(c.host().active_suspensions(), 0);
        assert_eq!(c.host().active_listeners(), 0);
        assert_eq!(c.focused(), None);
    }

    #[test]
    fn close_returns_trigger_element() {
        let mut c = opened(3, 1);
        assert_eq!(c.close().as_deref(), Some("card-1"));
        assert_eq!(c.close(), None);
    }

    #[test]
    fn keys_after_close_are_ignored() {
        let mut c = opened(3, 0);
        c.close();
        assert_eq!(c.handle_key("ArrowRight", false), Handled::Ignored);
        assert_eq!(c.handle_key("Tab", false), Handled::Ignored);
    }

    #[test]
    fn direct_apply_after_close_is_rejected() {
        let mut c = opened(3, 0);
        c.close();
        assert_eq!(
            c.apply(Command::Next),
            Handled::Rejected(LightboxError::InvalidCommandWhileClosed)
        );
    }

    #[test]
    fn tab_cycles_inside_lightbox() {
        let mut c = opened(3, 0);
        assert_eq!(c.handle_key("Tab", true), Handled::Focus(FocusTarget::Thumbnails));
        assert_eq!(c.handle_key("Tab", false), Handled::Focus(FocusTarget::Close));
        assert_eq!(c.handle_key("Tab", false), Handled::Focus(FocusTarget::Previous));
    }

    #[test]
    fn swipe_navigates() {
        let mut c = opened(3, 0);
        c.handle_touch_start(200.0);
        let handled = c.handle_touch_end(140.0, true);
        assert!(matches!(handled, Handled::Applied(Applied::Moved(_))));
        assert_eq!(c.session().current_index(), Some(1));
    }

    #[test]
    fn arrow_click_stops_propagation_and_moves_focus() {
        let mut c = opened(3, 0);
        let outcome = c.handle_control(Control::Next);
        assert!(outcome.stop_propagation);
        assert_eq!(c.focused(), Some(FocusTarget::Next));
        assert_eq!(c.session().current_index(), Some(1));
    }

    #[test]
    fn thumbnail_click_out_of_range_is_rejected() {
        let mut c = opened(3, 2);
        let outcome = c.handle_control(Control::Thumbnail(9));
        assert_eq!(
            outcome.handled,
            Handled::Rejected(LightboxError::IndexOutOfRange { index: 9, size: 3 })
        );
        assert_eq!(c.session().current_index(), Some(2));
    }

    #[test]
    fn backdrop_click_closes() {
        let mut c = opened(2, 0);
        let outcome = c.handle_control(Control::Backdrop);
        assert_eq!(outcome.handled, Handled::Applied(Applied::Closed));
        assert!(!outcome.stop_propagation);
        assert_eq!(c.host().active_suspensions(), 0);
    }

    #[test]
    fn reopen_keeps_single_lock_and_original_trigger() {
        let mut c = opened(3, 0);
        c.open(OpenRequest::new(sample_set(2), 1), Some("card-2".to_string()))
            .unwrap();
        assert_eq!(c.host().active_suspensions(), 1);
        assert_eq!(c.host().active_listeners(), 1);
        assert_eq!(c.close().as_deref(), Some("card-1"));
    }

    #[test]
    fn drop_releases_effects() {
        let mut host = RecordingHost::new();
        {
            let mut c = LightboxController::new(LightboxConfig::default(), &mut host);
            c.open(OpenRequest::new(sample_set(2), 0), None).unwrap();
        }
        assert_eq!(
            host.events,
            vec![
                HostEvent::ScrollSuspended,
                HostEvent::ListenerAdded,
                HostEvent::ListenerRemoved,
                HostEvent::ScrollRestored,
            ]
        );
    }
}
