//! UI Components
//!
//! Reusable Leptos components.

mod notice_bar;
mod resource_tree_view;
mod tree_item;
mod tree_toolbar;

pub use notice_bar::NoticeBar;
pub use resource_tree_view::ResourceTreeView;
pub use tree_item::ResourceTreeItem;
pub use tree_toolbar::TreeToolbar;
