//! Application shell: wires panels, the marketplace modal, and toasts together.

use crate::components::toast::ToastHost;
use crate::core::notify::Notifier;
use crate::core::store::{StoreNotifier, configure_toasts};
use crate::features::apps::view::AppPanelView;
use crate::features::chat::view::ChatListView;
use crate::features::documents::view::DocumentSearch;
use crate::features::marketplace::view::MarketplaceModal;
use chrono::Utc;
use preferences::{current_user_id, load_config};
use std::rc::Rc;
use trackdeck_bridge_models::{DeliveryStatus, Message, MessageType, Sender};
use yew::prelude::*;

mod preferences;

#[function_component(TrackdeckApp)]
pub(crate) fn trackdeck_app() -> Html {
    let config = use_memo(
        |_| {
            let config = load_config();
            configure_toasts(config.toast_duration_ms);
            config
        },
        (),
    );
    let user_id = use_memo(|_| current_user_id(), ());
    let notifier = use_memo(|_| StoreNotifier::new(), ());
    let marketplace_open = use_state(|| false);
    let messages = use_state(|| Rc::new(Vec::<Message>::new()));
    let draft = use_state(String::new);
    let next_local_id = use_mut_ref(|| 0_u64);

    let open_marketplace = {
        let marketplace_open = marketplace_open.clone();
        Callback::from(move |()| marketplace_open.set(true))
    };
    let close_marketplace = {
        let marketplace_open = marketplace_open.clone();
        Callback::from(move |()| marketplace_open.set(false))
    };

    let on_draft = {
        let draft = draft.clone();
        Callback::from(move |text: String| draft.set(text))
    };
    let on_send = {
        let messages = messages.clone();
        let draft = draft.clone();
        let user_id = user_id.clone();
        Callback::from(move |text: String| {
            let id = {
                let mut next = next_local_id.borrow_mut();
                *next += 1;
                format!("local-{next}")
            };
            let mut list = (**messages).clone();
            list.push(local_message(id, &user_id, text));
            messages.set(Rc::new(list));
            draft.set(String::new());
        })
    };
    let on_search = {
        let notifier = notifier.clone();
        Callback::from(move |query: String| {
            notifier.info("Searching documents", &format!("Looking for “{query}”."));
        })
    };

    html! {
        <main class="trackdeck">
            <DocumentSearch debounce_ms={config.search_debounce_ms} {on_search} />
            <AppPanelView refresh_interval_ms={config.refresh_interval_ms} on_browse={open_marketplace} />
            <ChatListView
                messages={(*messages).clone()}
                current_user_id={AttrValue::from((*user_id).clone())}
                draft={AttrValue::from((*draft).clone())}
                auto_scroll_threshold_px={config.auto_scroll_threshold_px}
                {on_draft}
                {on_send}
            />
            <MarketplaceModal
                open={*marketplace_open}
                search_debounce_ms={config.search_debounce_ms}
                on_close={close_marketplace}
            />
            <ToastHost />
        </main>
    }
}

fn local_message(id: String, user_id: &str, text: String) -> Message {
    Message {
        id,
        sender: Sender {
            id: user_id.to_string(),
            name: "You".to_string(),
            avatar: String::new(),
            online: Some(true),
        },
        text,
        timestamp: Utc::now(),
        message_type: Some(MessageType::Text),
        delivery_status: Some(DeliveryStatus::Sent),
        attachments: Vec::new(),
        reply_to: None,
        replies: Vec::new(),
        reply_count: None,
        metadata: None,
    }
}

/// Mount the renderer into `#root`, or the body when it is missing.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<TrackdeckApp>::with_root(root).render();
    } else {
        yew::Renderer::<TrackdeckApp>::new().render();
    }
}
