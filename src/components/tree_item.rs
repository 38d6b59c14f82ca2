//! Tree Item Component
//!
//! Individual resource row in the tree view.

use leptos::prelude::*;
use resource_tree::VisibleRow;

use crate::store::{store_update_selection, use_tree_store};
use crate::tree::{indent_px, toggle_glyph};

/// A single resource row in the tree
#[component]
pub fn ResourceTreeItem(row: VisibleRow) -> impl IntoView {
    let store = use_tree_store();

    let id = row.id.clone();
    let resource = row.resource.clone();
    let indent = indent_px(row.level);
    let status = resource.status.as_str();
    let owner = resource.owner.clone().unwrap_or_default();

    // Collapse toggle
    let toggle = match toggle_glyph(&row) {
        Some(glyph) => {
            let toggle_id = id.clone();
            view! {
                <button class="collapse-btn" on:click=move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    store_update_selection(&store, |s| s.toggle_expanded(&toggle_id));
                }>
                    {glyph}
                </button>
            }.into_any()
        }
        None => view! { <span class="collapse-placeholder">"·"</span> }.into_any(),
    };

    view! {
        <div
            class="item-row"
            style=format!("margin-left: {}px;", indent)
            title=resource.description.clone().unwrap_or_default()
        >
            {toggle}

            // Selection checkbox
            <input
                type="checkbox"
                checked=row.is_selected
                on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                on:change=move |_| {
                    store_update_selection(&store, |s| s.toggle_selected(&id));
                }
            />

            <span class="item-text">{resource.name.clone()}</span>
            <span class="item-type">{resource.resource_type.clone()}</span>
            <span class=format!("item-status {}", status)>{status}</span>
            <span class="item-owner">{owner}</span>
        </div>
    }
}
