//! Process-wide side effects held while the lightbox is open.
//!
//! Two effects reach outside the lightbox: background scrolling is suspended,
//! and a global key listener is installed. Both are owned by an
//! [`EffectScope`], which enforces:
//!
//! - acquiring an effect that is already held does nothing (no double
//!   suspension, no second listener);
//! - releasing an effect that is not held does nothing;
//! - dropping the scope releases whatever is still held, so unmounting the
//!   host or navigating away cannot leave the page unscrollable.
//!
//! The actual document manipulation lives behind the [`Host`] trait.

use tracing::debug;

/// The environment the lightbox runs in (a browser document, a test double).
pub trait Host {
    fn suspend_scroll(&mut self);
    fn restore_scroll(&mut self);
    fn add_key_listener(&mut self);
    fn remove_key_listener(&mut self);
}

#[derive(Debug)]
pub struct EffectScope<H: Host> {
    host: H,
    scroll_suspended: bool,
    keys_listening: bool,
}

impl<H: Host> EffectScope<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            scroll_suspended: false,
            keys_listening: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_scroll_suspended(&self) -> bool {
        self.scroll_suspended
    }

    pub fn is_listening(&self) -> bool {
        self.keys_listening
    }

    pub fn suspend_scroll(&mut self) {
        if !self.scroll_suspended {
            debug!("suspending background scroll");
            self.host.suspend_scroll();
            self.scroll_suspended = true;
        }
    }

    pub fn restore_scroll(&mut self) {
        if self.scroll_suspended {
            debug!("restoring background scroll");
            self.host.restore_scroll();
            self.scroll_suspended = false;
        }
    }

    pub fn listen(&mut self) {
        if !self.keys_listening {
            debug!("installing key listener");
            self.host.add_key_listener();
            self.keys_listening = true;
        }
    }

    pub fn unlisten(&mut self) {
        if self.keys_listening {
            debug!("removing key listener");
            self.host.remove_key_listener();
            self.keys_listening = false;
        }
    }

    pub fn acquire(&mut self) {
        self.suspend_scroll();
        self.listen();
    }

    pub fn release(&mut self) {
        self.unlisten();
        self.restore_scroll();
    }
}

impl<H: Host> Drop for EffectScope<H> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Something a [`RecordingHost`] observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    ScrollSuspended,
    ScrollRestored,
    ListenerAdded,
    ListenerRemoved,
}

/// Host that records every call. Used by the `replay` command and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net count of currently active scroll suspensions.
    pub fn active_suspensions(&self) -> i64 {
        self.net(HostEvent::ScrollSuspended, HostEvent::ScrollRestored)
    }

    /// Net count of currently installed key listeners.
    pub fn active_listeners(&self) -> i64 {
        self.net(HostEvent::ListenerAdded, HostEvent::ListenerRemoved)
    }

    fn net(&self, up: HostEvent, down: HostEvent) -> i64 {
        self.events.iter().fold(0, |n, e| match e {
            e if *e == up => n + 1,
            e if *e == down => n - 1,
            _ => n,
        })
    }
}

impl Host for RecordingHost {
    fn suspend_scroll(&mut self) {
        self.events.push(HostEvent::ScrollSuspended);
    }

    fn restore_scroll(&mut self) {
        self.events.push(HostEvent::ScrollRestored);
    }

    fn add_key_listener(&mut self) {
        self.events.push(HostEvent::ListenerAdded);
    }

    fn remove_key_listener(&mut self) {
        self.events.push(HostEvent::ListenerRemoved);
    }
}

impl<T: Host + ?Sized> Host for &mut T {
    fn suspend_scroll(&mut self) {
        (**self).suspend_scroll();
    }

    fn restore_scroll(&mut self) {
        (**self).restore_scroll();
    }

    fn add_key_listener(&mut self) {
        (**self).add_key_listener();
    }

    fn remove_key_listener(&mut self) {
        (**self).remove_key_listener();
    }
}
