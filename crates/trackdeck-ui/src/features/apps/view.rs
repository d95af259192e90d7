//! Installed-tracker panel view.

use crate::components::action_menu::{ActionMenu, ActionMenuItem};
use crate::core::store::{StoreNotifier, publish_document_count};
use crate::features::apps::icons::AppIcon;
use crate::features::apps::panel::{AppEntry, AppPanel, AppPanelState, RefreshOutcome};
use crate::services::bridge::WindowBridge;
use crate::services::clicks;
use gloo_timers::callback::{Interval, Timeout};
use std::rc::Rc;
use tracing::debug;
use yew::platform::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct AppPanelViewProps {
    pub refresh_interval_ms: u32,
    #[prop_or_default]
    pub on_browse: Callback<()>,
}

#[function_component(AppPanelView)]
pub(crate) fn app_panel_view(props: &AppPanelViewProps) -> Html {
    let panel = use_memo(
        |_| AppPanel::new(Rc::new(WindowBridge), Rc::new(StoreNotifier::new())),
        (),
    );
    let redraw = use_force_update();
    let settle_timer = use_mut_ref(|| None as Option<Timeout>);

    let refresh = {
        let panel = panel.clone();
        let redraw = redraw.clone();
        Callback::from(move |()| {
            let panel = panel.clone();
            let redraw = redraw.clone();
            spawn_local(async move {
                if panel.refresh().await == RefreshOutcome::Completed {
                    publish_document_count(panel.snapshot().document_count);
                    redraw.force_update();
                }
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with_deps(
            move |interval: &u32| {
                refresh.emit(());
                let handle = Interval::new(*interval, move || refresh.emit(()));
                move || drop(handle)
            },
            props.refresh_interval_ms,
        );
    }
    {
        let panel = panel.clone();
        let redraw = redraw.clone();
        use_effect_with_deps(
            move |()| {
                let subscription = clicks::hub().subscribe(move |origin| {
                    if panel.handle_click(origin) {
                        redraw.force_update();
                    }
                });
                move || drop(subscription)
            },
            (),
        );
    }

    let run = {
        let panel = panel.clone();
        let redraw = redraw.clone();
        Callback::from(move |action: RowAction| {
            let panel = panel.clone();
            let redraw = redraw.clone();
            spawn_local(async move {
                let result = match &action {
                    RowAction::Toggle(id) => panel.toggle(id).await.map(|_| ()),
                    RowAction::Uninstall(id) => panel.uninstall(id).await,
                    RowAction::Update(id) => panel.update(id).await.map(|_| ()),
                    RowAction::Cleanup => panel.cleanup_documents().await,
                };
                if let Err(err) = result {
                    debug!(?action, error = %err, "row action failed");
                }
                publish_document_count(panel.snapshot().document_count);
                redraw.force_update();
            });
        })
    };

    let on_menu = {
        let panel = panel.clone();
        let redraw = redraw.clone();
        Callback::from(move |id: String| {
            panel.toggle_menu(&id);
            redraw.force_update();
        })
    };

    let on_configure = {
        let panel = panel.clone();
        let redraw = redraw.clone();
        Callback::from(move |id: String| {
            panel.configure(&id);
            redraw.force_update();
            let panel = panel.clone();
            let redraw = redraw.clone();
            *settle_timer.borrow_mut() = Some(Timeout::new(0, move || {
                if panel.settle_configure() {
                    redraw.force_update();
                }
            }));
        })
    };

    let on_close_configure = {
        let panel = panel.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            panel.close_configure();
            redraw.force_update();
        })
    };

    let state = panel.snapshot();
    let handlers = RowHandlers {
        run: run.clone(),
        on_menu,
        on_configure,
    };

    html! {
        <section class="app-panel">
            <header class="app-panel__header">
                <h2>{"Installed trackers"}</h2>
                <span class="badge">{document_badge(&state)}</span>
                <button class="btn btn-ghost btn-sm" onclick={run.reform(|_: MouseEvent| RowAction::Cleanup)}>
                    {"Clean up documents"}
                </button>
                <button class="btn btn-primary btn-sm" onclick={props.on_browse.reform(|_: MouseEvent| ())}>
                    {"Browse marketplace"}
                </button>
            </header>
            if let Some(error) = state.error.clone() {
                <div class="alert alert-error" role="alert">
                    <span>{error}</span>
                    <button class="btn btn-sm" onclick={refresh.reform(|_: MouseEvent| ())}>{"Try again"}</button>
                </div>
            }
            if !state.loaded {
                <div class="loading">{"Loading trackers…"}</div>
            } else if state.apps.is_empty() {
                <div class="empty-state">{"No trackers installed yet."}</div>
            } else {
                <div class="app-grid">
                    {for state.apps.iter().map(|entry| render_entry(entry, &state, &handlers))}
                </div>
            }
            {render_configure(&state, on_close_configure)}
        </section>
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum RowAction {
    Toggle(String),
    Uninstall(String),
    Update(String),
    Cleanup,
}

struct RowHandlers {
    run: Callback<RowAction>,
    on_menu: Callback<String>,
    on_configure: Callback<String>,
}

fn document_badge(state: &AppPanelState) -> String {
    state
        .document_count
        .map_or_else(|| "…".to_string(), |count| format!("{count} documents"))
}

fn render_icon(icon: &AppIcon, name: &str) -> Html {
    match icon {
        AppIcon::Path(path) => html! { <img class="app-icon" src={path.clone()} alt={name.to_string()} /> },
        AppIcon::Glyph(glyph) => html! { <span class="app-icon" aria-hidden="true">{*glyph}</span> },
    }
}

fn render_entry(entry: &AppEntry, state: &AppPanelState, handlers: &RowHandlers) -> Html {
    let app = &entry.app;
    let id = app.id.clone();
    let with_id = |make: fn(String) -> RowAction| {
        let id = id.clone();
        handlers.run.reform(move |_: MouseEvent| make(id.clone()))
    };
    let configure = {
        let id = id.clone();
        handlers.on_configure.reform(move |_: MouseEvent| id.clone())
    };
    let items = vec![
        ActionMenuItem::new("Configure", configure),
        ActionMenuItem::new("Update", with_id(RowAction::Update)).disabled(!app.has_update),
        ActionMenuItem::danger("Uninstall", with_id(RowAction::Uninstall)),
    ];
    let on_toggle = {
        let id = id.clone();
        handlers.run.reform(move |_: Event| RowAction::Toggle(id.clone()))
    };
    let on_toggle_menu = {
        let id = id.clone();
        handlers.on_menu.reform(move |()| id.clone())
    };

    html! {
        <article class={classes!("app-card", (!app.enabled).then_some("disabled"))} key={id.clone()}>
            {render_icon(&entry.icon, &app.name)}
            <div class="app-card__body">
                <h3>{app.name.clone()}</h3>
                <p>{app.description.clone()}</p>
                <span class="version">{format!("v{}", app.version)}</span>
                if app.has_update {
                    <span class="badge badge-info">{"Update available"}</span>
                }
            </div>
            <input
                type="checkbox"
                class="toggle"
                aria-label={format!("Enable {}", app.name)}
                checked={app.enabled}
                onchange={on_toggle}
            />
            <ActionMenu
                menu_id={AttrValue::from(id.clone())}
                open={state.menu.is_open(&id)}
                on_toggle={on_toggle_menu}
                {items}
            />
        </article>
    }
}

fn render_configure(state: &AppPanelState, on_close: Callback<MouseEvent>) -> Html {
    let Some(entry) = state
        .configure
        .open_id()
        .and_then(|id| state.apps.iter().find(|entry| entry.app.id == id))
    else {
        return html! {};
    };
    let app = &entry.app;
    html! {
        <div class="modal modal-open" key={state.configure.epoch().to_string()}>
            <div class="modal-box">
                <h3>{format!("Configure {}", app.name)}</h3>
                <dl>
                    <dt>{"Version"}</dt>
                    <dd>{app.version.clone()}</dd>
                    <dt>{"Status"}</dt>
                    <dd>{if app.enabled { "Enabled" } else { "Disabled" }}</dd>
                    if let Some(path) = app.path.clone() {
                        <dt>{"Location"}</dt>
                        <dd>{path}</dd>
                    }
                </dl>
                <div class="modal-action">
                    <button class="btn" onclick={on_close}>{"Close"}</button>
                </div>
            </div>
        </div>
    }
}
