use crate::MenuAction;

/// A clickable menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItem {
    /// Stable id, unique within the menu.
    pub id: String,
    /// Text shown to the user.
    pub label: String,
    /// Whether the item can be clicked.
    pub enabled: bool,
    /// `Some` for radio items, holding whether this one is selected.
    pub checked: Option<bool>,
    /// Action triggered on click.
    pub action: MenuAction,
}

/// A nested menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmenuEntry {
    /// Submenu title.
    pub label: String,
    /// Whether the submenu can be opened.
    pub enabled: bool,
    /// Submenu contents.
    pub items: Vec<MenuEntry>,
}

/// One row of the tray menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// Disabled informational text.
    Label {
        /// Text shown to the user.
        text: String,
    },
    /// Horizontal divider.
    Separator,
    /// Nested menu.
    Submenu(SubmenuEntry),
    /// Clickable item.
    Action(ActionItem),
}
