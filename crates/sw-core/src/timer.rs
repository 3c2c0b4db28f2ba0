//! Single-slot cancellable timers
//!
//! Each deferred concern of the carousel (reset snap, resize settle, change
//! notification, navigation retry) owns exactly one slot. A slot is either
//! empty or holds one deadline with its payload; there is no sentinel handle.

/// One pending deferred action
#[derive(Debug, Clone)]
pub struct TimerSlot<T> {
    pending: Option<(u64, T)>,
}

impl<T> TimerSlot<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `payload` for `deadline_ms`. Rejected if already armed.
    pub fn arm(&mut self, deadline_ms: u64, payload: T) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some((deadline_ms, payload));
        true
    }

    /// Replace whatever is pending
    pub fn rearm(&mut self, deadline_ms: u64, payload: T) {
        self.pending = Some((deadline_ms, payload));
    }

    /// Clear the slot, returning the discarded payload
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, payload)| payload)
    }

    /// Take the payload ahead of its deadline
    pub fn fire_now(&mut self) -> Option<T> {
        self.cancel()
    }

    /// Take the payload if its deadline has passed
    pub fn take_due(&mut self, now_ms: u64) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if deadline <= now_ms => self.cancel(),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn payload(&self) -> Option<&T> {
        self.pending.as_ref().map(|(_, payload)| payload)
    }

    /// Update the pending payload in place, keeping its deadline
    pub fn payload_mut(&mut self) -> Option<&mut T> {
        self.pending.as_mut().map(|(_, payload)| payload)
    }
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
