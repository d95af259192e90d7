//! Chat list view.

use crate::components::action_menu::{ActionMenu, ActionMenuItem};
use crate::features::chat::attachments::AttachmentView;
use crate::features::chat::logic::{delivery_glyph, reply_label, time_label};
use crate::features::chat::scroll::{ScrollDirective, ScrollMetrics};
use crate::features::chat::state::ChatList;
use crate::services::clicks;
use std::rc::Rc;
use trackdeck_bridge_models::{Message, MessageType};
use web_sys::{HtmlDivElement, HtmlTextAreaElement, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ChatListViewProps {
    pub messages: Rc<Vec<Message>>,
    pub current_user_id: AttrValue,
    pub draft: AttrValue,
    pub auto_scroll_threshold_px: u32,
    pub on_draft: Callback<String>,
    pub on_send: Callback<String>,
    #[prop_or_default]
    pub on_reply: Callback<String>,
}

#[function_component(ChatListView)]
pub(crate) fn chat_list_view(props: &ChatListViewProps) -> Html {
    let threshold = props.auto_scroll_threshold_px;
    let chat = use_mut_ref(move || ChatList::with_threshold(threshold));
    let list_ref = use_node_ref();
    let redraw = use_force_update();

    {
        let chat = chat.clone();
        let list_ref = list_ref.clone();
        use_effect_with_deps(
            move |messages: &Rc<Vec<Message>>| {
                if chat.borrow_mut().on_render(messages) == ScrollDirective::ScrollToBottom {
                    scroll_to_bottom(&list_ref, ScrollBehavior::Smooth);
                }
                || ()
            },
            props.messages.clone(),
        );
    }
    {
        let chat = chat.clone();
        let redraw = redraw.clone();
        use_effect_with_deps(
            move |()| {
                let subscription = clicks::hub().subscribe(move |origin| {
                    if chat.borrow_mut().handle_click(origin) {
                        redraw.force_update();
                    }
                });
                move || drop(subscription)
            },
            (),
        );
    }

    let onscroll = {
        let chat = chat.clone();
        let list_ref = list_ref.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: Event| {
            let Some(list) = list_ref.cast::<HtmlDivElement>() else {
                return;
            };
            let mut chat = chat.borrow_mut();
            let before = chat.show_jump_to_latest();
            chat.on_scroll(ScrollMetrics {
                scroll_top: list.scroll_top().into(),
                scroll_height: list.scroll_height().into(),
                client_height: list.client_height().into(),
            });
            if chat.show_jump_to_latest() != before {
                redraw.force_update();
            }
        })
    };

    let on_jump = {
        let chat = chat.clone();
        let list_ref = list_ref.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            chat.borrow_mut().jump_to_latest();
            scroll_to_bottom(&list_ref, ScrollBehavior::Smooth);
            redraw.force_update();
        })
    };

    let onkeydown = {
        let chat = chat.clone();
        let on_send = props.on_send.clone();
        let draft = props.draft.clone();
        Callback::from(move |event: KeyboardEvent| {
            let outcome = chat.borrow_mut().on_key(
                &event.key(),
                event.shift_key(),
                event.is_composing(),
                &draft,
            );
            if outcome.prevent_default {
                event.prevent_default();
            }
            if let Some(text) = outcome.send {
                on_send.emit(text);
            }
        })
    };

    let on_send_click = {
        let chat = chat.clone();
        let on_send = props.on_send.clone();
        let draft = props.draft.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(text) = chat.borrow_mut().send(&draft) {
                on_send.emit(text);
            }
        })
    };

    let oninput = props.on_draft.reform(|event: InputEvent| {
        event
            .target_dyn_into::<HtmlTextAreaElement>()
            .map(|area| area.value())
            .unwrap_or_default()
    });

    let on_menu = {
        let chat = chat.clone();
        let redraw = redraw.clone();
        Callback::from(move |id: String| {
            chat.borrow_mut().toggle_menu(&id);
            redraw.force_update();
        })
    };
    let on_reply = {
        let chat = chat.clone();
        let on_reply = props.on_reply.clone();
        let redraw = redraw.clone();
        Callback::from(move |id: String| {
            chat.borrow_mut().close_menu();
            on_reply.emit(id);
            redraw.force_update();
        })
    };

    let show_jump = chat.borrow().show_jump_to_latest();
    let rows: Vec<Html> = {
        let chat = chat.borrow();
        props
            .messages
            .iter()
            .map(|message| {
                render_message(
                    message,
                    message.sender.id == props.current_user_id.as_str(),
                    chat.is_menu_open(&message.id),
                    &on_menu,
                    &on_reply,
                )
            })
            .collect()
    };

    html! {
        <section class="chat">
            <div class="chat__list" ref={list_ref} {onscroll}>
                {for rows}
            </div>
            if show_jump {
                <button class="chat__jump btn btn-sm" onclick={on_jump}>{"New messages ↓"}</button>
            }
            <div class="chat__compose">
                <textarea
                    class="textarea"
                    placeholder="Write a message"
                    value={props.draft.clone()}
                    {oninput}
                    {onkeydown}
                />
                <button
                    class="btn btn-primary"
                    disabled={props.draft.trim().is_empty()}
                    onclick={on_send_click}>
                    {"Send"}
                </button>
            </div>
        </section>
    }
}

fn scroll_to_bottom(list_ref: &NodeRef, behavior: ScrollBehavior) {
    if let Some(list) = list_ref.cast::<HtmlDivElement>() {
        let options = ScrollToOptions::new();
        options.set_top(list.scroll_height().into());
        options.set_behavior(behavior);
        list.scroll_to_with_scroll_to_options(&options);
    }
}

fn render_message(
    message: &Message,
    own: bool,
    menu_open: bool,
    on_menu: &Callback<String>,
    on_reply: &Callback<String>,
) -> Html {
    if message.message_type == Some(MessageType::System) {
        return html! {
            <div class="chat__system" key={message.id.clone()}>{message.text.clone()}</div>
        };
    }
    let id = message.id.clone();
    let items = {
        let id = id.clone();
        vec![ActionMenuItem::new(
            "Reply",
            on_reply.reform(move |_: MouseEvent| id.clone()),
        )]
    };
    let on_toggle = {
        let id = id.clone();
        on_menu.reform(move |()| id.clone())
    };
    html! {
        <div class={classes!("chat__message", own.then_some("own"))} key={id.clone()}>
            if !own {
                <img class="avatar" src={message.sender.avatar.clone()} alt={message.sender.name.clone()} />
            }
            <div class="chat__bubble">
                <header>
                    <span class="name">{message.sender.name.clone()}</span>
                    <time>{time_label(message.timestamp)}</time>
                    if let Some(status) = message.delivery_status.filter(|_| own) {
                        <span class="delivery">{delivery_glyph(status)}</span>
                    }
                </header>
                if !message.text.is_empty() {
                    <p>{message.text.clone()}</p>
                }
                {for message.attachments.iter().map(|attachment| render_attachment(&AttachmentView::from(attachment)))}
                if let Some(label) = reply_label(message) {
                    <span class="chat__replies">{label}</span>
                }
            </div>
            <ActionMenu menu_id={AttrValue::from(id)} open={menu_open} {on_toggle} {items} />
        </div>
    }
}

fn render_attachment(view: &AttachmentView) -> Html {
    match view {
        AttachmentView::Image { url, alt } => html! {
            <img class="chat__image" src={url.clone()} alt={alt.clone()} loading="lazy" />
        },
        AttachmentView::File {
            url,
            filename,
            size,
        } => html! {
            <a class="chat__file" href={url.clone()} download={filename.clone()}>
                <span class="filename">{filename.clone()}</span>
                <span class="size">{size.clone()}</span>
            </a>
        },
    }
}
