//! Last-call-wins timer for debounced input.

use std::{cell::Cell, rc::Rc, time::Duration};

use leptos::{leptos_dom::helpers::TimeoutHandle, *};

/// Schedules a callback after a delay, replacing any pending one.
#[derive(Clone, Default)]
pub(crate) struct Debouncer {
    pending: Rc<Cell<Option<TimeoutHandle>>>,
}

impl Debouncer {
    /// Clears the pending callback and schedules `callback`. A zero delay runs it immediately.
    pub(crate) fn schedule(&self, delay: Duration, callback: impl FnOnce() + 'static) {
        self.cancel();
        if delay.is_zero() {
            callback();
            return;
        }
        match set_timeout_with_handle(callback, delay) {
            Ok(handle) => self.pending.set(Some(handle)),
            Err(err) => logging::warn!("debounce timer failed: {err:?}"),
        }
    }

    /// Drops the pending callback, if any.
    pub(crate) fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            handle.clear();
        }
    }
}
