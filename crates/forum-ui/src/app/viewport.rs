//! Viewport width tracking.

use crate::core::breakpoints::for_width;
use gloo::events::EventListener;
use gloo::utils::window;
use yew::prelude::*;

/// Current `innerWidth`, updated on resize. The matching breakpoint name is mirrored to
/// `data-bp` on the document body for the stylesheet.
#[hook]
pub(crate) fn use_viewport_width() -> u32 {
    let width = use_state_eq(current_width);
    {
        let width = width.clone();
        use_effect_with_deps(
            move |_| {
                let handler = EventListener::new(&window(), "resize", move |_event| {
                    width.set(current_width());
                });
                move || drop(handler)
            },
            (),
        );
    }
    use_effect_with_deps(
        |width: &u32| {
            apply_breakpoint(*width);
            || ()
        },
        *width,
    );
    *width
}

fn apply_breakpoint(width: u32) {
    if let Some(body) = window().document().and_then(|document| document.body()) {
        let _ = body.set_attribute("data-bp", for_width(width).name);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn current_width() -> u32 {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(1280.0)
        .max(0.0) as u32
}
