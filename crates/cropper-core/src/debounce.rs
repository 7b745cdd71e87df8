//! Debounced effects.
//!
//! A [`Debouncer`] remembers the last dependency snapshot it was shown. When
//! a new snapshot differs (by value), any pending run is superseded and a new
//! [`DebounceTicket`] is issued. The host arms a timer for the ticket's delay
//! and hands the ticket back through [`Debouncer::fire`] when it expires. Only
//! the newest ticket yields the snapshot, so a burst of changes runs the
//! effect once, with the final values.
//!
//! Time is supplied by the caller as milliseconds on any monotonic clock
//! (`performance.now()` in the browser, a counter in tests), which keeps this
//! module free of platform timers.

/// Handle for one scheduled run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    generation: u64,
    deadline_ms: u64,
    delay_ms: u64,
}

impl DebounceTicket {
    /// How long the host timer should wait before firing.
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Clock reading at which the run becomes due.
    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }
}

/// Cancel-and-reschedule state for one effect.
#[derive(Debug, Clone)]
pub struct Debouncer<D> {
    delay_ms: u64,
    deps: Option<D>,
    generation: u64,
    pending: Option<DebounceTicket>,
}

impl<D: PartialEq + Clone> Debouncer<D> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deps: None,
            generation: 0,
            pending: None,
        }
    }

    /// Record a dependency snapshot observed at `now_ms`.
    ///
    /// Returns a ticket when the snapshot changed. The previous ticket, if
    /// any, is invalidated. Returns `None` when the snapshot equals the last
    /// one; a run already pending stays pending with its original deadline.
    pub fn track(&mut self, deps: D, now_ms: u64) -> Option<DebounceTicket> {
        if self.deps.as_ref() == Some(&deps) {
            return None;
        }
        self.deps = Some(deps);
        Some(self.schedule(now_ms))
    }

    fn schedule(&mut self, now_ms: u64) -> DebounceTicket {
        self.generation = self.generation.wrapping_add(1);
        let ticket = DebounceTicket {
            generation: self.generation,
            deadline_ms: now_ms.saturating_add(self.delay_ms),
            delay_ms: self.delay_ms,
        };
        self.pending = Some(ticket);
        ticket
    }

    /// Consume a ticket whose timer expired.
    ///
    /// Yields the snapshot to run with when `ticket` is the current pending
    /// run. A superseded or already-fired ticket yields `None`.
    pub fn fire(&mut self, ticket: DebounceTicket) -> Option<D> {
        match self.pending {
            Some(pending) if pending == ticket => {
                self.pending = None;
                self.deps.clone()
            }
            _ => None,
        }
    }

    /// Fire the pending run if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<D> {
        let ticket = self.pending?;
        if now_ms >= ticket.deadline_ms {
            self.fire(ticket)
        } else {
            None
        }
    }

    /// The pending run, if any.
    pub fn pending(&self) -> Option<DebounceTicket> {
        self.pending
    }

    /// Drop the pending run without firing it (teardown).
    ///
    /// The snapshot is kept, so tracking the same values again does not
    /// reschedule.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
