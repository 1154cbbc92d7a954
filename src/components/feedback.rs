use crate::components::ui::{Alert, AlertDescription, AlertTitle, Spinner};
use crate::state::{AppContext, ToastKind};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

const TOAST_VISIBLE_MS: i32 = 3000;

#[component]
pub fn LoadingSection() -> impl IntoView {
    view! {
        <div class="flex w-full items-center justify-center py-16 text-muted-foreground">
            <Spinner class="size-6" />
        </div>
    }
}

#[component]
pub fn ErrorSection(
    #[prop(into, optional)] title: Option<String>,
    #[prop(default = None)] message: Option<String>,
) -> impl IntoView {
    let title = title.unwrap_or_else(|| "Nothing Found".to_string());
    let message = message.unwrap_or_else(|| "Sorry, we couldn't find what you are looking for.".to_string());

    view! {
        <div class="mx-auto max-w-xl px-4 py-16">
            <Alert class="border-destructive/30">
                <AlertTitle>{title}</AlertTitle>
                <AlertDescription class="text-muted-foreground">{message}</AlertDescription>
            </Alert>
        </div>
    }
}

/// Renders the current toast and clears it after a few seconds.
#[component]
pub fn Toaster() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let toast = app_state.0.toast;

    Effect::new(move |_| {
        if toast.get().is_none() {
            return;
        }
        let Some(win) = web_sys::window() else {
            return;
        };
        let shown = toast.get_untracked();
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            // Only clear the toast this timer was armed for.
            if toast.try_get_untracked().flatten() == shown {
                let _ = toast.try_set(None);
            }
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            TOAST_VISIBLE_MS,
        );
    });

    view! {
        {move || {
            toast
                .get()
                .map(|t| {
                    let class = match t.kind {
                        ToastKind::Success => "border-green-600/30 text-green-700",
                        ToastKind::Error => "border-destructive/30 text-destructive",
                    };
                    view! {
                        <div class="fixed bottom-4 left-1/2 z-50 w-80 -translate-x-1/2" role="status">
                            <Alert class=class>
                                <AlertDescription class="text-xs">{t.message}</AlertDescription>
                            </Alert>
                        </div>
                    }
                })
        }}
    }
}
