//! Notice Bar Component
//!
//! Success / warning / error messages, dismissed by click or timeout.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::use_app_context;

/// How long a notice stays on screen
const NOTICE_TIMEOUT_MS: u32 = 4000;

#[component]
pub fn NoticeBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="notice-bar">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    Timeout::new(NOTICE_TIMEOUT_MS, move || ctx.dismiss(id)).forget();

                    view! {
                        <div class=notice.level.css_class()>
                            <span class="notice-message">{notice.message.clone()}</span>
                            <button class="notice-close" on:click=move |_| ctx.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
