//! Document search form view.

use crate::components::search_input::SearchInput;
use crate::core::store::AppStore;
use crate::features::documents::search::{SearchForm, document_count_label};
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct DocumentSearchProps {
    pub debounce_ms: u32,
    pub on_search: Callback<String>,
}

#[function_component(DocumentSearch)]
pub(crate) fn document_search(props: &DocumentSearchProps) -> Html {
    let form = use_mut_ref(SearchForm::default);
    let redraw = use_force_update();
    let document_count = use_selector(|store: &AppStore| store.document_count);

    let on_query = {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |query: String| {
            form.borrow_mut().set_query(&query);
            redraw.force_update();
        })
    };

    let submit = {
        let form = form.clone();
        let redraw = redraw.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |latest: Option<String>| {
            let outcome = {
                let mut form = form.borrow_mut();
                if let Some(latest) = latest {
                    form.set_query(&latest);
                }
                form.submit()
            };
            match outcome {
                Ok(query) => on_search.emit(query),
                Err(_) => redraw.force_update(),
            }
        })
    };

    let onsubmit = submit.reform(|event: SubmitEvent| {
        event.prevent_default();
        None
    });
    let (query, error) = {
        let form = form.borrow();
        (form.query().to_string(), form.error())
    };

    html! {
        <form class="document-search" {onsubmit}>
            <span class="badge">{document_count_label(*document_count)}</span>
            <SearchInput
                value={AttrValue::from(query)}
                placeholder={AttrValue::from("Search documents")}
                aria_label={AttrValue::from("Search documents")}
                debounce_ms={props.debounce_ms}
                on_search={on_query}
                on_enter={submit.reform(Some)}
            />
            <button class="btn btn-primary" type="submit">{"Search"}</button>
            if let Some(error) = error {
                <p class="validator-hint text-error" role="alert">{error.to_string()}</p>
            }
        </form>
    }
}
