//! In-app links that push onto the browser history instead of reloading.

use crate::core::location::{IN_CONTEXT_PARAM, routes_in_app};
use crate::core::view::DiscussionContext;
use yew::prelude::*;
use yew_router::history::{BrowserHistory, History};

/// Append the embed flag when the forum runs in context.
pub(crate) fn scoped_href(path: &str, ctx: &DiscussionContext) -> String {
    if ctx.in_context {
        format!("{path}?{IN_CONTEXT_PARAM}")
    } else {
        path.to_string()
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct NavLinkProps {
    pub(crate) to: String,
    #[prop_or_default]
    pub(crate) class: Classes,
    #[prop_or_default]
    pub(crate) children: Children,
}

#[function_component(NavLink)]
pub(crate) fn nav_link(props: &NavLinkProps) -> Html {
    let onclick = {
        let to = props.to.clone();
        Callback::from(move |event: MouseEvent| {
            let modifier_held =
                event.ctrl_key() || event.meta_key() || event.shift_key() || event.alt_key();
            if routes_in_app(event.button(), modifier_held) {
                event.prevent_default();
                BrowserHistory::new().push(to.clone());
            }
        })
    };
    html! {
        <a href={props.to.clone()} class={props.class.clone()} onclick={onclick}>
            { for props.children.iter() }
        </a>
    }
}
