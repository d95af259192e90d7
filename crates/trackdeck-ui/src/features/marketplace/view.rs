//! Marketplace modal view.

use crate::components::search_input::SearchInput;
use crate::core::store::StoreNotifier;
use crate::features::marketplace::listing::{
    ListedTracker, SortMode, format_downloads, format_rating,
};
use crate::features::marketplace::state::{LoadState, Marketplace, MarketplaceState};
use crate::services::bridge::WindowBridge;
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::platform::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct MarketplaceModalProps {
    pub open: bool,
    pub search_debounce_ms: u32,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub on_installed: Callback<String>,
}

#[function_component(MarketplaceModal)]
pub(crate) fn marketplace_modal(props: &MarketplaceModalProps) -> Html {
    let market = use_memo(
        |_| Marketplace::new(Rc::new(WindowBridge), Rc::new(StoreNotifier::new())),
        (),
    );
    let redraw = use_force_update();

    let load = {
        let market = market.clone();
        let redraw = redraw.clone();
        Callback::from(move |()| {
            let market = market.clone();
            let redraw = redraw.clone();
            redraw.force_update();
            spawn_local(async move {
                market.load().await;
                redraw.force_update();
            });
        })
    };

    {
        let market = market.clone();
        let load = load.clone();
        use_effect_with_deps(
            move |open: &bool| {
                if *open {
                    market.open();
                    load.emit(());
                } else {
                    market.close();
                }
                || ()
            },
            props.open,
        );
    }

    let update = |apply: fn(&Marketplace<WindowBridge, StoreNotifier>, String)| {
        let market = market.clone();
        let redraw = redraw.clone();
        Callback::from(move |value: String| {
            apply(&market, value);
            redraw.force_update();
        })
    };
    let on_search = update(|market, value| market.set_search(&value));
    let on_category = update(|market, value| market.set_category(&value));
    let on_sort = update(|market, value| {
        if let Some(sort) = SortMode::from_value(&value) {
            market.set_sort(sort);
        }
    });
    let on_select = update(|market, id| market.select(&id));
    let on_dismiss = update(|market, _| market.dismiss_prompt());

    let on_install = {
        let market = market.clone();
        let redraw = redraw.clone();
        let on_installed = props.on_installed.clone();
        Callback::from(move |id: String| {
            let market = market.clone();
            let redraw = redraw.clone();
            let on_installed = on_installed.clone();
            redraw.force_update();
            spawn_local(async move {
                if market.install(&id).await.is_ok() {
                    on_installed.emit(id);
                }
                redraw.force_update();
            });
        })
    };

    let on_close = {
        let market = market.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            market.close();
            on_close.emit(());
        })
    };

    if !props.open {
        return html! {};
    }

    let state = market.snapshot();
    let listing = market.listing();
    let installing = market.is_installing();
    let card = |entry: &ListedTracker| {
        render_card(entry, market.is_installed(&entry.tracker.id), &on_select)
    };

    html! {
        <div class="modal modal-open marketplace">
            <div class="modal-box marketplace__box">
                <header class="marketplace__header">
                    <h2>{"Tracker marketplace"}</h2>
                    <button class="btn btn-ghost btn-sm" aria-label="Close" onclick={on_close}>{"✕"}</button>
                </header>
                <div class="marketplace__filters">
                    <SearchInput
                        value={AttrValue::from(state.query.search.clone())}
                        placeholder={AttrValue::from("Search trackers")}
                        aria_label={AttrValue::from("Search trackers")}
                        debounce_ms={props.search_debounce_ms}
                        {on_search}
                    />
                    {render_select("Category", state.categories.iter().map(|c| (c.clone(), c.clone())).collect(), &state.query.category, on_category)}
                    {render_select(
                        "Sort by",
                        SortMode::all().iter().map(|mode| (mode.as_str().to_string(), mode.label().to_string())).collect(),
                        state.query.sort.as_str(),
                        on_sort,
                    )}
                </div>
                {match &state.load {
                    LoadState::Idle | LoadState::Loading => html! { <div class="loading">{"Loading trackers…"}</div> },
                    LoadState::Failed(message) => html! {
                        <div class="alert alert-error" role="alert">
                            <span>{message.clone()}</span>
                            <button class="btn btn-sm" onclick={load.reform(|_: MouseEvent| ())}>{"Try again"}</button>
                        </div>
                    },
                    LoadState::Ready if listing.is_empty() => html! {
                        <div class="empty-state">{"No trackers match your filters."}</div>
                    },
                    LoadState::Ready => html! {
                        <>
                            if !listing.featured.is_empty() {
                                <section class="marketplace__featured">
                                    <h3>{"Featured"}</h3>
                                    <div class="carousel">{for listing.featured.iter().map(card)}</div>
                                </section>
                            }
                            <div class="marketplace__grid">{for listing.grid.iter().map(card)}</div>
                        </>
                    },
                }}
                {render_prompt(&state, &listing.featured, &listing.grid, installing, &on_install, &on_dismiss)}
            </div>
        </div>
    }
}

fn render_select(
    label: &'static str,
    options: Vec<(String, String)>,
    selected: &str,
    on_change: Callback<String>,
) -> Html {
    let onchange = on_change.reform(|event: Event| {
        event
            .target_dyn_into::<HtmlSelectElement>()
            .map(|select| select.value())
            .unwrap_or_default()
    });
    html! {
        <label class="select-label">
            <span>{label}</span>
            <select class="select select-sm" aria-label={label} {onchange}>
                {for options.into_iter().map(|(value, text)| html! {
                    <option selected={value == selected} value={value.clone()}>{text}</option>
                })}
            </select>
        </label>
    }
}

fn render_card(entry: &ListedTracker, installed: bool, on_select: &Callback<String>) -> Html {
    let tracker = &entry.tracker;
    let onclick = {
        let id = tracker.id.clone();
        on_select.reform(move |_: MouseEvent| id.clone())
    };
    html! {
        <article class={classes!("tracker-card", tracker.featured.then_some("featured"))} key={tracker.id.clone()} {onclick}>
            <h4>
                {tracker.name.clone()}
                if tracker.verified {
                    <span class="badge badge-success" title="Verified developer">{"✓"}</span>
                }
            </h4>
            <p class="developer">{tracker.developer.clone()}</p>
            <p class="description">{tracker.description.clone()}</p>
            <footer>
                <span class="category">{entry.category.clone()}</span>
                <span>{format!("⬇ {}", format_downloads(entry.downloads))}</span>
                <span>{format!("★ {}", format_rating(entry.rating))}</span>
                <span class="version">{format!("v{}", tracker.version)}</span>
                if installed {
                    <span class="badge">{"Installed"}</span>
                }
            </footer>
        </article>
    }
}

fn render_prompt(
    state: &MarketplaceState,
    featured: &[ListedTracker],
    grid: &[ListedTracker],
    installing: bool,
    on_install: &Callback<String>,
    on_dismiss: &Callback<String>,
) -> Html {
    let Some(entry) = state.selected.as_deref().and_then(|id| {
        featured
            .iter()
            .chain(grid)
            .find(|entry| entry.tracker.id == id)
    }) else {
        return html! {};
    };
    let tracker = &entry.tracker;
    let id = tracker.id.clone();
    html! {
        <div class="install-prompt" role="dialog" aria-label={format!("Install {}", tracker.name)}>
            <h3>{format!("Install {}?", tracker.name)}</h3>
            <p>{tracker.description.clone()}</p>
            <div class="modal-action">
                <button class="btn" onclick={on_dismiss.reform(|_: MouseEvent| String::new())}>{"Cancel"}</button>
                <button
                    class="btn btn-primary"
                    disabled={installing}
                    onclick={on_install.reform(move |_: MouseEvent| id.clone())}>
                    {if installing { "Installing…" } else { "Install" }}
                </button>
            </div>
        </div>
    }
}
