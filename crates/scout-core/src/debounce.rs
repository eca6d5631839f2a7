//! Trailing-edge debouncing for free-text input.
//!
//! `Debouncer` is driven by the caller's event loop: every keystroke is fed
//! through `input()` with the current instant, and `poll()` is called on each
//! tick. A value is emitted once, after `quiet` has elapsed since the most
//! recent keystroke. A newer keystroke supersedes the pending emission, and
//! `cancel()` drops it entirely.

use std::time::{Duration, Instant};

use tracing::debug;

/// A trailing-edge debouncer for values of type `T`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T: Clone> Debouncer<T> {
    /// Create a debouncer that settles after `quiet` without new input.
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None, deadline: None }
    }

    /// Record a raw value and restart the quiet window from `now`.
    pub fn input(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.quiet);
    }

    /// The latest raw value, updated synchronously on every `input()`.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// When the pending value will settle, if an emission is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Emit the pending value if the quiet window has elapsed at `now`.
    ///
    /// Returns `Some` at most once per scheduled emission.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                debug!(quiet_ms = self.quiet.as_millis() as u64, "debounced value settled");
                self.pending.clone()
            }
            _ => None,
        }
    }

    /// Drop any scheduled emission. The raw value is kept for display.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            debug!("pending debounce emission cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Debouncer;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn rapid_keystrokes_emit_once_with_last_value() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));

        let mut emissions = Vec::new();
        for (i, text) in ["a", "au", "aus", "aust"].iter().enumerate() {
            let now = t0 + ms(100 * i as u64);
            debouncer.input(text.to_string(), now);
            if let Some(v) = debouncer.poll(now) {
                emissions.push(v);
            }
        }

        // Ticks inside the window after the last keystroke (at 300ms) emit nothing.
        assert_eq!(debouncer.poll(t0 + ms(599)), None);
        if let Some(v) = debouncer.poll(t0 + ms(600)) {
            emissions.push(v);
        }
        // Nothing further once settled.
        assert_eq!(debouncer.poll(t0 + ms(5_000)), None);

        assert_eq!(emissions, vec!["aust".to_string()]);
    }

    #[test]
    fn pending_tracks_every_keystroke() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        assert_eq!(debouncer.pending(), None);

        debouncer.input("7".to_string(), t0);
        assert_eq!(debouncer.pending().map(String::as_str), Some("7"));
        debouncer.input("78".to_string(), t0 + ms(10));
        assert_eq!(debouncer.pending().map(String::as_str), Some("78"));
        assert_eq!(debouncer.next_deadline(), Some(t0 + ms(310)));
    }

    #[test]
    fn cancel_suppresses_emission_until_next_input() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        debouncer.input("jane".to_string(), t0);
        debouncer.cancel();

        assert_eq!(debouncer.poll(t0 + ms(1_000)), None);
        assert_eq!(debouncer.next_deadline(), None);

        debouncer.input("jane d".to_string(), t0 + ms(1_000));
        assert_eq!(debouncer.poll(t0 + ms(1_300)), Some("jane d".to_string()));
    }

    #[test]
    fn separate_bursts_emit_separately() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));

        debouncer.input("tx".to_string(), t0);
        assert_eq!(debouncer.poll(t0 + ms(300)), Some("tx".to_string()));

        debouncer.input("texas".to_string(), t0 + ms(800));
        assert_eq!(debouncer.poll(t0 + ms(900)), None);
        assert_eq!(debouncer.poll(t0 + ms(1_100)), Some("texas".to_string()));
    }
}
