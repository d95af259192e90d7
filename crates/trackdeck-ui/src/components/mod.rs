pub(crate) mod action_menu;
pub(crate) mod search_input;
pub(crate) mod toast;
