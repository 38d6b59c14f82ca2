//! Resource Tree Frontend App
//!
//! Main application component: loads resources and permissions, owns the
//! tree state store and renders the tree.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use resource_tree::TreeConfig;

use crate::commands;
use crate::components::{NoticeBar, ResourceTreeView};
use crate::context::AppContext;
use crate::models::{Notice, NoticeLevel, PermissionSet};
use crate::store::{store_set_records, TreeUiState, TreeUiStateStoreFields};

/// localStorage key holding an optional JSON `TreeConfig` override
const CONFIG_STORAGE_KEY: &str = "resource-tree.config";

#[component]
pub fn App() -> impl IntoView {
    // State
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (notices, set_notices) = signal(Vec::<Notice>::new());
    let (permissions, set_permissions) = signal(PermissionSet::default());

    // Provide context to all children
    let ctx = AppContext::new((reload_trigger, set_reload_trigger), (notices, set_notices), permissions);
    provide_context(ctx);

    let store = Store::new(TreeUiState::new(load_config()));
    provide_context(store);

    // Load permissions on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::list_permissions().await {
                Ok(loaded) => set_permissions.set(PermissionSet::new(loaded)),
                Err(e) => web_sys::console::log_1(&format!("[APP] Failed to load permissions: {}", e).into()),
            }
        });
    });

    // Load resources when trigger changes
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        web_sys::console::log_1(&format!("[APP] Loading resources, trigger={}", trigger).into());
        spawn_local(async move {
            match commands::list_resources().await {
                Ok(loaded) => {
                    web_sys::console::log_1(&format!("[APP] Loaded {} resources", loaded.len()).into());
                    let dropped = store_set_records(&store, loaded);
                    if !dropped.is_empty() {
                        web_sys::console::log_1(
                            &format!("[APP] Forgot {} vanished ids", dropped.removed.len()).into(),
                        );
                    }
                }
                Err(e) => {
                    ctx.notify(NoticeLevel::Error, format!("Failed to load resources: {}", e));
                }
            }
        });
    });

    view! {
        <main class="main-content">
            <h1>"Resources"</h1>

            <NoticeBar />

            <ResourceTreeView />

            <p class="item-count">{move || format!("{} resources", store.records().read().len())}</p>
            <p class="active-resource">
                {move || {
                    store
                        .active_resource()
                        .get()
                        .map(|id| format!("Selected resource #{}", id))
                        .unwrap_or_default()
                }}
            </p>
        </main>
    }
}

/// Read the config override from localStorage, falling back to defaults
fn load_config() -> TreeConfig {
    let stored = web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(CONFIG_STORAGE_KEY).ok().flatten());

    match stored {
        Some(json) => TreeConfig::from_json(&json).unwrap_or_else(|e| {
            web_sys::console::log_1(&format!("[APP] Ignoring stored config: {}", e).into());
            TreeConfig::default()
        }),
        None => TreeConfig::default(),
    }
}
