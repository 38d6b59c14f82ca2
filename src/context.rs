//! Application Context
//!
//! Shared signals provided via Leptos Context API.

use leptos::prelude::*;

use crate::models::{Notice, NoticeLevel, PermissionSet};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload resources from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload resources from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Notices currently shown - read
    pub notices: ReadSignal<Vec<Notice>>,
    /// Notices currently shown - write
    set_notices: WriteSignal<Vec<Notice>>,
    /// Permissions of the acting principal
    pub permissions: ReadSignal<PermissionSet>,
    next_notice_id: StoredValue<u32>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        notices: (ReadSignal<Vec<Notice>>, WriteSignal<Vec<Notice>>),
        permissions: ReadSignal<PermissionSet>,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            notices: notices.0,
            set_notices: notices.1,
            permissions,
            next_notice_id: StoredValue::new(0),
        }
    }

    /// Trigger a reload of resources
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Show a notice; returns its id for dismissal
    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) -> u32 {
        let id = self.next_notice_id.get_value() + 1;
        self.next_notice_id.set_value(id);
        let notice = Notice {
            id,
            level,
            message: message.into(),
        };
        self.set_notices.update(|list| list.push(notice));
        id
    }

    pub fn dismiss(&self, id: u32) {
        self.set_notices.update(|list| list.retain(|n| n.id != id));
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
