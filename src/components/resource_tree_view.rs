//! Resource Tree View Component
//!
//! Displays the resource hierarchy with drag-and-drop reparenting and
//! keyboard navigation. The forest is rebuilt from the store on every
//! relevant change; the drag engine validates against the unfiltered tree.

use leptos::prelude::*;
use leptos::task::spawn_local;
use resource_tree::{
    build_forest, filter_forest, flatten_visible, sort_forest, DropOutcome, MoveRequest, NavEffect, NavKey,
    PermissionGate, ResourceId,
};

use crate::commands;
use crate::components::{ResourceTreeItem, TreeToolbar};
use crate::context::use_app_context;
use crate::models::NoticeLevel;
use crate::store::{store_update_selection, use_tree_store, TreeUiStateStoreFields};
use crate::tree::{is_form_control, row_class, RowInteraction};

use leptos_dragdrop::*;
use wasm_bindgen::JsCast;

/// Resource tree view component with DnD and keyboard support
#[component]
pub fn ResourceTreeView(
    /// Replaces the default `move_resource` host command
    #[prop(optional)]
    on_move: Option<Callback<MoveRequest>>,
    /// Called when a resource is activated (click, Enter, Space)
    #[prop(optional)]
    on_resource_selected: Option<Callback<ResourceId>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_tree_store();

    // Sorted but unfiltered: drag validation must see every descendant
    let full_forest = Memo::new(move |_| {
        let records = store.records().read();
        let selection = store.selection().read();
        sort_forest(build_forest(&records, &selection), store.sort().get())
    });
    let visible_forest = Memo::new(move |_| {
        let filter = store.filter().read();
        full_forest.with(|forest| filter_forest(forest.clone(), &filter))
    });
    let rows = Memo::new(move |_| visible_forest.with(flatten_visible));

    // Create DnD signals
    let dnd = create_dnd_signals(&store.config().get_untracked());

    bind_global_mouseup(dnd, full_forest, move |outcome| match outcome {
        DropOutcome::Move(request) => {
            web_sys::console::log_1(
                &format!("[DND] Drop: resource={}, new_parent={:?}", request.resource_id, request.new_parent_id).into(),
            );
            if let Some(on_move) = on_move {
                on_move.run(request);
                return;
            }
            spawn_local(async move {
                match commands::move_resource(&request).await {
                    Ok(()) => {
                        ctx.notify(NoticeLevel::Success, format!("Moved resource {}", request.resource_id));
                    }
                    Err(e) => {
                        ctx.notify(
                            NoticeLevel::Error,
                            format!("Failed to move resource {}: {}", request.resource_id, e),
                        );
                    }
                }
                // Reload after backend update completes; the server is the source of truth
                ctx.reload();
            });
        }
        DropOutcome::Rejected(err) => {
            ctx.notify(NoticeLevel::Warning, err.to_string());
        }
        _ => {}
    });

    let activate = move |id: ResourceId| {
        store.active_resource().set(Some(id.clone()));
        if let Some(on_resource_selected) = on_resource_selected {
            on_resource_selected.run(id);
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        // Keys pressed on a row's checkbox or toggle belong to that control
        let from_control = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .is_some_and(|el| is_form_control(&el.tag_name()));
        if from_control {
            return;
        }
        let Some(key) = NavKey::from_key_name(&ev.key()) else {
            return;
        };
        ev.prevent_default();
        let effect = visible_forest.with_untracked(|forest| store.navigator().write().handle(key, forest));
        web_sys::console::log_1(&format!("[KEY] {:?} -> {:?}", key, effect).into());
        match effect {
            NavEffect::None | NavEffect::Focus(_) => {}
            NavEffect::Expand(id) => {
                store_update_selection(&store, |s| s.expand(&id));
            }
            NavEffect::Collapse(id) => {
                store_update_selection(&store, |s| s.collapse(&id));
            }
            NavEffect::Activate(id) => activate(id),
        }
    };

    let permissions = ctx.permissions;
    let gate = move |permission: &str| permissions.with_untracked(|set| set.has_permission(permission));

    view! {
        <div class="resource-tree">
            <TreeToolbar full_forest=full_forest visible_forest=visible_forest />

            <div class="tree-view" tabindex="0" on:keydown=on_keydown>
                <Show when=move || rows.with(|r| r.is_empty())>
                    <p class="tree-empty">"No resources"</p>
                </Show>

                <For
                    each=move || rows.get()
                    key=|row| {
                        // Derived flags are part of the key so changes re-render the row
                        (
                            row.id.clone(),
                            row.level,
                            row.is_expanded,
                            row.is_selected,
                            row.is_visible,
                            row.has_children,
                        )
                    }
                    children=move |row| {
                        let id = row.id.clone();

                        // DnD handlers
                        let on_mousedown = make_on_mousedown(dnd, id.clone(), gate);
                        let on_mousemove = make_on_row_mousemove(dnd, id.clone());
                        let on_mouseleave = make_on_mouseleave(dnd);

                        let click_id = id.clone();
                        let on_click = move |_| {
                            if dnd.drag_just_ended_read.get_untracked() {
                                return;
                            }
                            store.navigator().write().set_focus(Some(click_id.clone()));
                            activate(click_id.clone());
                        };

                        // Visual state
                        let class_row = row.clone();
                        let item_class = move || {
                            let interaction = RowInteraction {
                                dragging_id: dnd.dragging_id(),
                                drop_target: dnd.drop_target(),
                                focused: store.navigator().read().focused().cloned(),
                            };
                            row_class(&class_row, &interaction)
                        };

                        view! {
                            <div
                                class=item_class
                                on:mousedown=on_mousedown
                                on:mousemove=on_mousemove
                                on:mouseleave=on_mouseleave
                                on:click=on_click
                            >
                                <ResourceTreeItem row=row />
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
