use crate::components::ui::Spinner;
use crate::models::Submission;
use crate::notes::{apply_selected_notes, apply_submission_notes, BulletNotes, BULLET};
use crate::state::{AppContext, NotesAutosave};
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Review notes for one submission.
///
/// Mount one instance per submission (the review page keys it by id). Each
/// instance owns its autosave session and closes it on unmount, so a pending save
/// for the previous submission never fires after switching.
#[component]
pub fn SubmissionNotes(
    submission_id: String,
    #[prop(into)] initial_notes: String,
    selected: RwSignal<Option<Submission>>,
    submissions: RwSignal<Vec<Submission>>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let autosave = NotesAutosave::new(
        app_state.0.api_client.get_untracked(),
        submission_id.clone(),
    );
    let saving = autosave.saving();
    let for_cleanup = autosave.clone();
    on_cleanup(move || for_cleanup.close());
    let autosave = StoredValue::new(autosave);

    let submission_id = StoredValue::new(submission_id);
    let buffer: RwSignal<BulletNotes> = RwSignal::new(BulletNotes::new(&initial_notes));
    let textarea_ref: NodeRef<html::Textarea> = NodeRef::new();

    // Accepted value: mirror into the page's copies, then queue the write-back.
    let commit = move |value: String| {
        let id = submission_id.get_value();
        selected.update(|s| {
            let _ = apply_selected_notes(s, &id, &value);
        });
        submissions.update(|xs| {
            let _ = apply_submission_notes(xs, &id, &value);
        });
        autosave.with_value(|a| a.schedule(value));
    };

    let on_input = move |ev: web_sys::Event| {
        let Some(el) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        else {
            return;
        };

        let incoming = el.value();
        let accepted = buffer
            .try_update(|b| b.on_change(&incoming).map(str::to_string))
            .flatten();

        match accepted {
            Some(value) => {
                if value != incoming {
                    el.set_value(&value);
                }
                commit(value);
            }
            None => {
                // Over the cap: put the previous value back.
                el.set_value(&buffer.with_untracked(|b| b.text().to_string()));
            }
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.is_composing() {
            return;
        }
        let key = ev.key();
        if key != "Enter" && key != "Backspace" {
            return;
        }

        let Some(el) = textarea_ref.get_untracked() else {
            return;
        };
        // selectionStart/End are in UTF-16 code units.
        let start = el.selection_start().ok().flatten();
        let end = el.selection_end().ok().flatten();
        let caret = start.unwrap_or_else(|| buffer.with_untracked(|b| b.len() as u32));

        let edited = if key == "Enter" {
            ev.prevent_default();
            buffer
                .try_update(|b| b.on_enter(caret).map(|pos| (b.text().to_string(), pos)))
                .flatten()
        } else {
            // A selection deletes normally.
            if start != end {
                return;
            }
            let edited = buffer
                .try_update(|b| b.on_backspace(caret).map(|pos| (b.text().to_string(), pos)))
                .flatten();
            if edited.is_some() {
                ev.prevent_default();
            }
            edited
        };

        let Some((value, caret_after)) = edited else {
            return;
        };
        el.set_value(&value);
        let _ = el.set_selection_range(caret_after, caret_after);
        commit(value);
    };

    let placeholder = format!("{BULLET}Start typing notes here");

    view! {
        <div class="flex w-full flex-col gap-2">
            <div class="flex items-center justify-between">
                <span class="text-sm font-medium">"Review Notes"</span>
                <span class="flex items-center gap-1 text-xs text-muted-foreground">
                    {move || {
                        if saving.get() {
                            view! {
                                <Spinner class="size-3" />
                                <span>"Saving"</span>
                            }
                                .into_any()
                        } else {
                            view! { <span>"Auto-saved"</span> }.into_any()
                        }
                    }}
                </span>
            </div>
            <textarea
                node_ref=textarea_ref
                class="min-h-64 w-full resize-none rounded-md border bg-transparent px-3 py-2 text-sm leading-relaxed outline-none placeholder:text-muted-foreground focus-visible:ring-2 focus-visible:ring-ring/50"
                placeholder=placeholder
                prop:value=initial_notes
                on:input=on_input
                on:keydown=on_keydown
            ></textarea>
            <span class="self-end text-xs text-muted-foreground">
                {move || format!("{} characters left", buffer.with(|b| b.remaining()))}
            </span>
        </div>
    }
}
