use crate::api::ApiClient;
use crate::notes::{DebouncedSave, SaveTracker, AUTOSAVE_DEBOUNCE_MS};
use crate::util::now_ms;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::{Arc, Mutex};
use wasm_bindgen::JsCast;

/// Debounced write-back of one submission's review notes.
///
/// Owned by the notes editor for a single submission. The editor calls
/// [`NotesAutosave::schedule`] on every buffer change and [`NotesAutosave::close`]
/// from its cleanup; after `close` nothing else reaches the backend.
///
/// Failed saves are logged and dropped. The local buffer is never rolled back.
#[derive(Clone)]
pub(crate) struct NotesAutosave {
    api_client: ApiClient,
    submission_id: String,

    debounce: Arc<Mutex<DebouncedSave>>,
    tracker: Arc<Mutex<SaveTracker>>,
    timer_id: Arc<Mutex<Option<i32>>>,

    /// True while at least one save request is in flight.
    saving: RwSignal<bool>,
}

impl NotesAutosave {
    pub fn new(api_client: ApiClient, submission_id: String) -> Self {
        Self {
            api_client,
            submission_id,
            debounce: Arc::new(Mutex::new(DebouncedSave::new(AUTOSAVE_DEBOUNCE_MS))),
            tracker: Arc::new(Mutex::new(SaveTracker::default())),
            timer_id: Arc::new(Mutex::new(None)),
            saving: RwSignal::new(false),
        }
    }

    pub fn saving(&self) -> ReadSignal<bool> {
        self.saving.read_only()
    }

    /// Queue `content` as the latest snapshot and restart the quiet period.
    pub fn schedule(&self, content: String) {
        let armed = self
            .debounce
            .lock()
            .ok()
            .and_then(|mut d| d.push(content, now_ms()).map(|g| (g, d.window_ms())));

        let Some((generation, delay_ms)) = armed else {
            return;
        };
        self.arm(generation, delay_ms);
    }

    /// Session teardown: drop any pending snapshot and its timer.
    pub fn close(&self) {
        if let Ok(mut d) = self.debounce.lock() {
            d.close();
        }
        self.clear_timer();
    }

    fn clear_timer(&self) {
        let Ok(mut slot) = self.timer_id.lock() else {
            return;
        };
        if let Some(tid) = slot.take() {
            if let Some(win) = web_sys::window() {
                win.clear_timeout_with_handle(tid);
            }
        }
    }

    fn arm(&self, generation: u64, delay_ms: i64) {
        self.clear_timer();

        let Some(win) = web_sys::window() else {
            return;
        };

        let s2 = self.clone();
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            s2.fire(generation);
        });

        let tid = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay_ms.clamp(0, i32::MAX as i64) as i32,
            )
            .unwrap_or(0);

        if let Ok(mut slot) = self.timer_id.lock() {
            *slot = Some(tid);
        }
    }

    fn fire(&self, generation: u64) {
        let now = now_ms();
        let (due, remaining) = match self.debounce.lock() {
            Ok(mut d) => {
                let due = d.take_due(generation, now);
                let remaining = if due.is_none() {
                    d.remaining_ms(generation, now)
                } else {
                    None
                };
                (due, remaining)
            }
            Err(_) => (None, None),
        };

        if let Some(content) = due {
            self.persist(content);
        } else if let Some(ms) = remaining {
            // Timer fired ahead of the deadline; wait out the rest.
            self.arm(generation, ms);
        }
    }

    fn persist(&self, content: String) {
        let seq = match self.tracker.lock() {
            Ok(mut t) => t.begin(),
            Err(_) => return,
        };
        let _ = self.saving.try_set(true);

        let api_client = self.api_client.clone();
        let submission_id = self.submission_id.clone();
        let tracker = self.tracker.clone();
        let saving = self.saving;

        spawn_local(async move {
            match api_client
                .update_submission_notes(&submission_id, &content)
                .await
            {
                Ok(()) => {
                    tracing::debug!(%submission_id, seq, chars = content.len(), "notes saved");
                }
                Err(e) => {
                    tracing::warn!(%submission_id, seq, kind = ?e.kind, error = %e, "notes autosave failed");
                }
            }

            let busy = match tracker.lock() {
                Ok(mut t) => {
                    if t.finish(seq) {
                        tracing::debug!(%submission_id, seq, "older notes save completed after a newer one started");
                    }
                    t.is_busy()
                }
                Err(_) => false,
            };

            // The editor may already be gone.
            let _ = saving.try_set(busy);
        });
    }
}
