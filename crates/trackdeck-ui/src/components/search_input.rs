//! Debounced search input.
//!
//! # Design
//! - Keep local input state for immediate typing feedback.
//! - Emit debounced values to the caller for shared state updates.

use crate::core::config::DEFAULT_SEARCH_DEBOUNCE_MS;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SearchInputProps {
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub aria_label: Option<AttrValue>,
    #[prop_or(DEFAULT_SEARCH_DEBOUNCE_MS)]
    pub debounce_ms: u32,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub on_search: Callback<String>,
    #[prop_or_default]
    pub on_enter: Callback<String>,
}

#[function_component(SearchInput)]
pub(crate) fn search_input(props: &SearchInputProps) -> Html {
    let value_state = use_state(|| props.value.to_string());
    let debounce = props.debounce_ms;
    let timer = use_mut_ref(|| None as Option<Timeout>);

    {
        let value_state = value_state.clone();
        use_effect_with_deps(
            move |incoming: &AttrValue| {
                let next = incoming.to_string();
                if *value_state != next {
                    value_state.set(next);
                }
                || ()
            },
            props.value.clone(),
        );
    }

    let oninput = {
        let on_search = props.on_search.clone();
        let value_state = value_state.clone();
        Callback::from(move |event: InputEvent| {
            let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() else {
                return;
            };
            let next = input.value();
            value_state.set(next.clone());
            if debounce == 0 {
                on_search.emit(next);
                return;
            }
            let on_search = on_search.clone();
            // Replacing the handle cancels the pending timeout.
            *timer.borrow_mut() = Some(Timeout::new(debounce, move || on_search.emit(next)));
        })
    };

    let onkeydown = {
        let on_enter = props.on_enter.clone();
        let value_state = value_state.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" && !event.is_composing() {
                event.prevent_default();
                on_enter.emit((*value_state).clone());
            }
        })
    };

    html! {
        <label class={classes!("input", props.class.clone())}>
            <span class="icon-search" aria-hidden="true"></span>
            <input
                type="search"
                placeholder={props.placeholder.clone()}
                aria-label={props.aria_label.clone()}
                value={AttrValue::from((*value_state).clone())}
                {oninput}
                {onkeydown}
            />
        </label>
    }
}
