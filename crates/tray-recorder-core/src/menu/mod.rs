mod menu_action;
mod menu_entry;
mod menu_model;

pub use {
    menu_action::MenuAction,
    menu_entry::{ActionItem, MenuEntry, SubmenuEntry},
    menu_model::{MenuModel, NO_DEVICES_LABEL, QUIT_ID, START_ID, STOP_ID},
};
