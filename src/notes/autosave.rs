/// Quiet period after the last edit before the notes are written back.
pub(crate) const AUTOSAVE_DEBOUNCE_MS: i64 = 1000;

/// Trailing-edge debounce for one editing session.
///
/// Every `push` supersedes the previous snapshot and returns a fresh generation.
/// A timer armed for an older generation fires into `take_due` and gets nothing,
/// so only the last snapshot of a burst is ever handed out.
#[derive(Clone, Debug)]
pub(crate) struct DebouncedSave {
    window_ms: i64,
    generation: u64,
    pending: Option<PendingSnapshot>,
    closed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingSnapshot {
    content: String,
    due_ms: i64,
}

impl DebouncedSave {
    pub fn new(window_ms: i64) -> Self {
        Self {
            window_ms,
            generation: 0,
            pending: None,
            closed: false,
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Record a snapshot taken at `now_ms`. Returns the generation the caller's
    /// timer must present to `take_due`, or `None` once the session is closed.
    pub fn push(&mut self, content: String, now_ms: i64) -> Option<u64> {
        if self.closed {
            return None;
        }

        self.generation += 1;
        self.pending = Some(PendingSnapshot {
            content,
            due_ms: now_ms + self.window_ms,
        });
        Some(self.generation)
    }

    /// Hand out the pending snapshot if `generation` is still current and its
    /// quiet period has elapsed.
    pub fn take_due(&mut self, generation: u64, now_ms: i64) -> Option<String> {
        if self.closed || generation != self.generation {
            return None;
        }

        match &self.pending {
            Some(p) if now_ms >= p.due_ms => self.pending.take().map(|p| p.content),
            _ => None,
        }
    }

    /// Time left before `generation` becomes due, for timers that fired early.
    pub fn remaining_ms(&self, generation: u64, now_ms: i64) -> Option<i64> {
        if self.closed || generation != self.generation {
            return None;
        }
        self.pending
            .as_ref()
            .map(|p| p.due_ms - now_ms)
            .filter(|ms| *ms > 0)
    }

    /// Drop the pending snapshot; outstanding timers become no-ops.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.generation += 1;
    }

    /// Session teardown. Nothing is handed out afterwards.
    pub fn close(&mut self) {
        self.cancel();
        self.closed = true;
    }
}

impl Default for DebouncedSave {
    fn default() -> Self {
        Self::new(AUTOSAVE_DEBOUNCE_MS)
    }
}

/// Busy tracking for overlapping save requests.
///
/// Each request gets a sequence number. The session is busy while any request is
/// in flight, so an older request finishing late cannot clear the indicator of a
/// newer one.
#[derive(Clone, Debug, Default)]
pub(crate) struct SaveTracker {
    next_seq: u64,
    latest_started: u64,
    in_flight: usize,
}

impl SaveTracker {
    pub fn begin(&mut self) -> u64 {
        self.next_seq += 1;
        self.latest_started = self.next_seq;
        self.in_flight += 1;
        self.next_seq
    }

    /// Returns `true` if `seq` was superseded by a later request.
    pub fn finish(&mut self, seq: u64) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        seq != self.latest_started
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}
