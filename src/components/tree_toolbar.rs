//! Tree Toolbar Component
//!
//! Filter, sort and bulk selection controls above the tree.

use leptos::prelude::*;
use resource_tree::{Forest, ResourceStatus, SortKey};

use crate::store::{store_update_selection, use_tree_store, TreeUiStateStoreFields};

/// Status filter options (value, label)
const STATUS_OPTIONS: &[(&str, &str)] = &[
    ("", "All statuses"),
    ("active", "Active"),
    ("inactive", "Inactive"),
    ("archived", "Archived"),
];

#[component]
pub fn TreeToolbar(
    /// Sorted, unfiltered forest
    full_forest: Memo<Forest>,
    /// Forest after filtering (what the user sees)
    visible_forest: Memo<Forest>,
) -> impl IntoView {
    let store = use_tree_store();

    let select_all = move |_| {
        visible_forest.with_untracked(|forest| {
            store_update_selection(&store, |s| s.select_all_visible(forest));
        });
    };
    let clear_all = move |_| {
        visible_forest.with_untracked(|forest| {
            store_update_selection(&store, |s| s.clear_visible(forest));
        });
    };
    let expand_all = move |_| {
        full_forest.with_untracked(|forest| {
            store_update_selection(&store, |s| s.expand_all(forest));
        });
    };
    let collapse_all = move |_| {
        store_update_selection(&store, |s| s.collapse_all());
    };
    let toggle_order = move |_| {
        let sort_field = store.sort();
        let mut sort = sort_field.write();
        sort.order = sort.order.toggled();
    };

    view! {
        <div class="tree-toolbar">
            <input
                type="search"
                class="tree-search"
                placeholder="Filter resources..."
                prop:value=move || store.filter().read().text.clone()
                on:input=move |ev| {
                    store.filter().write().text = event_target_value(&ev);
                }
            />

            <label class="tree-toggle">
                <input
                    type="checkbox"
                    prop:checked=move || store.filter().read().has_children_only
                    on:change=move |ev| {
                        store.filter().write().has_children_only = event_target_checked(&ev);
                    }
                />
                "With children"
            </label>

            <label class="tree-toggle">
                <input
                    type="checkbox"
                    prop:checked=move || store.filter().read().selected_only
                    on:change=move |ev| {
                        store.filter().write().selected_only = event_target_checked(&ev);
                    }
                />
                "Selected only"
            </label>

            <select
                class="tree-status"
                prop:value=move || store.filter().read().status.map(|s| s.as_str()).unwrap_or("")
                on:change=move |ev| {
                    store.filter().write().status = ResourceStatus::parse(&event_target_value(&ev));
                }
            >
                {STATUS_OPTIONS
                    .iter()
                    .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                    .collect_view()}
            </select>

            <select
                class="tree-sort"
                prop:value=move || store.sort().read().key.as_str()
                on:change=move |ev| {
                    store.sort().write().key = SortKey::parse(&event_target_value(&ev));
                }
            >
                {SortKey::ALL
                    .iter()
                    .map(|key| view! { <option value=key.as_str()>{key.as_str()}</option> })
                    .collect_view()}
            </select>
            <button class="tree-order" on:click=toggle_order>
                {move || store.sort().read().order.as_str()}
            </button>

            <button on:click=select_all>"Select all"</button>
            <button on:click=clear_all>"Clear"</button>
            <button on:click=expand_all>"Expand all"</button>
            <button on:click=collapse_all>"Collapse all"</button>

            <span class="tree-selected-count">
                {move || format!("{} selected", store.selection().read().selected_count())}
            </span>
        </div>
    }
}
