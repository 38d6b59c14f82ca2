//! Tree UI State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Owns the records
//! and the expansion / selection sets the tree engine only reads.

use std::sync::Arc;

use leptos::prelude::*;
use reactive_stores::Store;
use resource_tree::{
    KeyboardNavigator, ResourceId, ResourceRecord, SetDelta, SortSpec, TreeConfig, TreeFilter, TreeSelection,
};

/// Tree state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TreeUiState {
    /// Flat resource records as last loaded
    pub records: Vec<Arc<ResourceRecord>>,
    /// Expanded / selected ids
    pub selection: TreeSelection,
    pub filter: TreeFilter,
    pub sort: SortSpec,
    /// Focused row for keyboard navigation
    pub navigator: KeyboardNavigator,
    pub config: TreeConfig,
    /// Resource most recently activated (Enter / Space / click)
    pub active_resource: Option<ResourceId>,
}

impl TreeUiState {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            sort: config.sort,
            config,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type TreeStore = Store<TreeUiState>;

/// Get the tree store from context
pub fn use_tree_store() -> TreeStore {
    expect_context::<TreeStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace records after a load, dropping expansion / selection of vanished ids
pub fn store_set_records(store: &TreeStore, records: Vec<ResourceRecord>) -> SetDelta {
    let records: Vec<Arc<ResourceRecord>> = records.into_iter().map(Arc::new).collect();
    let delta = store.selection().write().retain_known(&records);
    store.records().set(records);
    delta
}

/// Apply a selection change and log the delta
pub fn store_update_selection(store: &TreeStore, change: impl FnOnce(&mut TreeSelection) -> SetDelta) -> SetDelta {
    let delta = change(&mut *store.selection().write());
    if !delta.is_empty() {
        web_sys::console::log_1(
            &format!("[STORE] selection +{} -{}", delta.added.len(), delta.removed.len()).into(),
        );
    }
    delta
}
