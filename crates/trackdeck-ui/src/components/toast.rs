//! Toast host bound to the store's notification queue.

use crate::core::notify::{Notifier, Toast, ToastTimers};
use crate::core::store::{AppStore, StoreNotifier};
use gloo::timers::callback::Timeout;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(ToastHost)]
pub(crate) fn toast_host() -> Html {
    let toasts = use_selector(|store: &AppStore| store.toasts.toasts().to_vec());
    let notifier = use_memo(|_| StoreNotifier::new(), ());
    let on_dismiss = {
        let notifier = notifier.clone();
        Callback::from(move |id: u64| notifier.remove(id))
    };
    let timers = use_mut_ref(ToastTimers::<Timeout>::default);
    {
        let on_dismiss = on_dismiss.clone();
        let timers = timers.clone();
        use_effect_with_deps(
            move |list: &std::rc::Rc<Vec<Toast>>| {
                timers.borrow_mut().sync(list, |toast| {
                    let on_dismiss = on_dismiss.clone();
                    let id = toast.id;
                    Timeout::new(toast.notification.duration_ms, move || on_dismiss.emit(id))
                });
                || ()
            },
            toasts.clone(),
        );
    }
    {
        let timers = timers.clone();
        use_effect_with_deps(move |()| move || timers.borrow_mut().clear(), ());
    }

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for toasts.iter().map(|toast| render_toast(toast, &on_dismiss))}
        </div>
    }
}

fn render_toast(toast: &Toast, on_dismiss: &Callback<u64>) -> Html {
    let id = toast.id;
    let on_close = {
        let on_dismiss = on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(id))
    };
    html! {
        <div class={classes!("toast", toast.notification.kind.as_str())} role="status">
            <strong>{toast.notification.title.clone()}</strong>
            <span>{toast.notification.message.clone()}</span>
            <button class="ghost" aria-label="Dismiss" onclick={on_close}>{"✕"}</button>
        </div>
    }
}
