//! Row action menu.
//!
//! # Design
//! - Stateless: the owning controller decides which menu is open.
//! - The menu root carries `data-menu-id` so the document listener can tell
//!   clicks inside it from outside clicks.

use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub(crate) struct ActionMenuItem {
    label: String,
    on_click: Callback<MouseEvent>,
    danger: bool,
    disabled: bool,
}

impl ActionMenuItem {
    pub(crate) fn new(label: impl Into<String>, on_click: Callback<MouseEvent>) -> Self {
        Self {
            label: label.into(),
            on_click,
            danger: false,
            disabled: false,
        }
    }

    pub(crate) fn danger(label: impl Into<String>, on_click: Callback<MouseEvent>) -> Self {
        Self {
            danger: true,
            ..Self::new(label, on_click)
        }
    }

    pub(crate) const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ActionMenuProps {
    pub menu_id: AttrValue,
    pub open: bool,
    pub on_toggle: Callback<()>,
    pub items: Vec<ActionMenuItem>,
}

#[function_component(ActionMenu)]
pub(crate) fn action_menu(props: &ActionMenuProps) -> Html {
    let on_trigger = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            on_toggle.emit(());
        })
    };
    html! {
        <div class={classes!("dropdown", props.open.then_some("open"))} data-menu-id={props.menu_id.clone()}>
            <button
                type="button"
                aria-label="More actions"
                aria-expanded={props.open.to_string()}
                class="btn btn-ghost btn-xs btn-square"
                onclick={on_trigger}>
                {"⋯"}
            </button>
            if props.open {
                <ul class="dropdown-content menu" onclick={Callback::from(|event: MouseEvent| event.stop_propagation())}>
                    {for props.items.iter().cloned().map(|item| html! {
                        <li>
                            <button
                                type="button"
                                class={classes!(item.danger.then_some("text-error"))}
                                disabled={item.disabled}
                                onclick={item.on_click}>
                                {item.label}
                            </button>
                        </li>
                    })}
                </ul>
            }
        </div>
    }
}
