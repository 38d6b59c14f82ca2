//! Leptos DragDrop Utilities
//!
//! Mouse-event glue for the resource tree drag engine.
//! Uses movement threshold to distinguish click from drag; the row under the
//! pointer decides before / inside / after from the pointer's vertical offset.

use leptos::prelude::*;
use resource_tree::{
    DragEngine, DragState, DropOutcome, DropTarget, Forest, PermissionGate, Point, ResourceId, RowHit, TreeConfig,
};
use wasm_bindgen::JsCast;

pub use resource_tree::DropPosition;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    /// The drag state machine
    pub engine: RwSignal<DragEngine>,
    /// True for a short moment after a drag, so the trailing click is ignored
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
}

impl DndSignals {
    /// Node being dragged (tracked)
    pub fn dragging_id(&self) -> Option<ResourceId> {
        self.engine.with(|e| e.dragged().cloned())
    }

    /// Current drop target (tracked)
    pub fn drop_target(&self) -> Option<DropTarget> {
        self.engine.with(|e| e.drop_target().cloned())
    }

    pub fn is_dragging_untracked(&self) -> bool {
        self.engine.with_untracked(|e| e.is_dragging())
    }
}

/// Delay before a click is honoured again after a drag
const CLICK_SUPPRESS_MS: i32 = 100;

pub fn create_dnd_signals(config: &TreeConfig) -> DndSignals {
    let engine = RwSignal::new(DragEngine::new(config));
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    DndSignals {
        engine,
        drag_just_ended_read,
        drag_just_ended_write,
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.engine.update(|e| {
        e.cancel();
    });
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            CLICK_SUPPRESS_MS,
        );
        cb.forget();
    }
}

/// Create mousedown handler for draggable rows.
/// Records the press; the permission gate and read-only flag are checked here.
pub fn make_on_mousedown<G>(dnd: DndSignals, id: ResourceId, gate: G) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    G: PermissionGate + Clone + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is input or button
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        let at = Point::new(ev.client_x() as f64, ev.client_y() as f64);
        let result = dnd
            .engine
            .try_update(|e| e.pointer_down(id.clone(), at, &gate));
        if let Some(Err(err)) = result {
            web_sys::console::log_1(&format!("[DND] Drag refused for {}: {}", id, err).into());
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pressed = dnd
            .engine
            .with_untracked(|e| matches!(e.state(), DragState::Pressed { .. }));
        if pressed {
            let at = Point::new(ev.client_x() as f64, ev.client_y() as f64);
            dnd.engine.update(|e| e.pointer_move(at));
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mousemove handler for rows (computes before / inside / after)
pub fn make_on_row_mousemove(dnd: DndSignals, id: ResourceId) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if !dnd.is_dragging_untracked() {
            return;
        }
        let Some(row) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        let rect = row.get_bounding_client_rect();
        let hit = RowHit {
            target: id.clone(),
            row_top: rect.top(),
            row_height: rect.height(),
            pointer_y: ev.client_y() as f64,
        };
        let changed = dnd
            .engine
            .with_untracked(|e| e.drop_target() != Some(&e.target_for(&hit)));
        // Avoid re-rendering on every pixel when the target did not change
        if changed {
            dnd.engine.update(|e| e.hover(hit));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.engine.with_untracked(|e| e.drop_target().is_some()) {
            dnd.engine.update(|e| e.leave());
        }
    }
}

/// Bind global keydown handler: Escape aborts a drag
pub fn bind_global_escape(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && dnd.engine.with_untracked(|e| *e.state() != DragState::Idle) {
            web_sys::console::log_1(&"[DND] Drag cancelled".into());
            end_drag(&dnd);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
    }
    on_keydown.forget();
}

/// Bind global mouseup handler for drop detection.
///
/// `forest` must hold the unfiltered tree. `on_drop` receives every outcome
/// of a real drag (move, rejection, cancel); plain clicks fall through to
/// the element's click handler.
pub fn bind_global_mouseup<F>(dnd: DndSignals, forest: Memo<Forest>, on_drop: F)
where
    F: Fn(DropOutcome) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let outcome = forest.with_untracked(|forest| dnd.engine.try_update(|e| e.pointer_up(forest)));

        match outcome {
            None | Some(DropOutcome::Ignored) | Some(DropOutcome::Click(_)) => {
                // Not dragging - click event will fire naturally on the element
            }
            Some(outcome) => {
                end_drag(&dnd);
                on_drop(outcome);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove and escape
    bind_global_mousemove(dnd);
    bind_global_escape(dnd);
}
