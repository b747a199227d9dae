//! Tray menu contents as plain data.
//!
//! [`MenuModel::build`] is a pure function of session state, preferences and
//! the catalog snapshot; the tray adapter only renders what it returns.

use crate::{
    ActionItem, CatalogSnapshot, MenuAction, MenuEntry, PreferenceKind, PreferenceValue,
    Preferences, SessionState, SubmenuEntry,
};

/// Id of the "Start Recording" item.
pub const START_ID: &str = "start";
/// Id of the "Stop Recording" item.
pub const STOP_ID: &str = "stop";
/// Id of the "Quit" item.
pub const QUIT_ID: &str = "quit";
/// Placeholder shown in an empty device submenu.
pub const NO_DEVICES_LABEL: &str = "No devices found";

/// Rendered tray menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    entries: Vec<MenuEntry>,
}

impl MenuModel {
    /// Build the menu for the given state.
    ///
    /// Device and codec submenus, Start and Quit are only enabled while idle;
    /// Stop only while recording.
    pub fn build(
        state: SessionState,
        preferences: &Preferences,
        catalog: &CatalogSnapshot,
    ) -> Self {
        let idle = state == SessionState::Idle;

        let microphones = catalog
            .microphones
            .iter()
            .cloned()
            .map(PreferenceValue::Device);
        let displays = catalog
            .displays
            .iter()
            .cloned()
            .map(PreferenceValue::Device);
        let codecs = catalog.codecs.iter().copied().map(PreferenceValue::Codec);

        let entries = vec![
            MenuEntry::Label {
                text: format!("Recorder – {}", state.label()),
            },
            MenuEntry::Separator,
            MenuEntry::Submenu(selection_submenu(
                PreferenceKind::Microphone,
                microphones,
                preferences,
                idle,
            )),
            MenuEntry::Submenu(selection_submenu(
                PreferenceKind::Display,
                displays,
                preferences,
                idle,
            )),
            MenuEntry::Submenu(selection_submenu(
                PreferenceKind::Codec,
                codecs,
                preferences,
                idle,
            )),
            MenuEntry::Separator,
            MenuEntry::Action(ActionItem {
                id: START_ID.to_string(),
                label: "Start Recording".to_string(),
                enabled: idle,
                checked: None,
                action: MenuAction::StartRecording,
            }),
            MenuEntry::Action(ActionItem {
                id: STOP_ID.to_string(),
                label: "Stop Recording".to_string(),
                enabled: state == SessionState::Recording,
                checked: None,
                action: MenuAction::StopRecording,
            }),
            MenuEntry::Separator,
            MenuEntry::Action(ActionItem {
                id: QUIT_ID.to_string(),
                label: "Quit".to_string(),
                enabled: idle,
                checked: None,
                action: MenuAction::Quit,
            }),
        ];

        Self { entries }
    }

    /// Top-level entries in display order.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Find a clickable item by id, searching submenus.
    pub fn item(&self, id: &str) -> Option<&ActionItem> {
        find_item(&self.entries, id)
    }

    /// Action bound to the item with `id`.
    pub fn action_for(&self, id: &str) -> Option<&MenuAction> {
        self.item(id).map(|item| &item.action)
    }
}

fn selection_submenu(
    kind: PreferenceKind,
    values: impl Iterator<Item = PreferenceValue>,
    preferences: &Preferences,
    enabled: bool,
) -> SubmenuEntry {
    let mut items: Vec<MenuEntry> = values
        .enumerate()
        .map(|(index, value)| {
            MenuEntry::Action(ActionItem {
                id: selection_id(kind, index, &value),
                label: value.label().to_string(),
                enabled: true,
                checked: Some(preferences.is_selected(kind, &value)),
                action: MenuAction::Select { kind, value },
            })
        })
        .collect();

    if items.is_empty() {
        items.push(MenuEntry::Label {
            text: NO_DEVICES_LABEL.to_string(),
        });
    }

    SubmenuEntry {
        label: kind.label().to_string(),
        enabled,
        items,
    }
}

/// `kind:position:value`. The position keeps ids unique when a backend
/// reports two devices under the same id.
fn selection_id(kind: PreferenceKind, index: usize, value: &PreferenceValue) -> String {
    let value_id = match value {
        PreferenceValue::Device(device) => device.id.as_str(),
        PreferenceValue::Codec(codec) => codec.as_str(),
    };
    format!("{}:{}:{}", kind.as_str(), index, value_id)
}

fn find_item<'a>(entries: &'a [MenuEntry], id: &str) -> Option<&'a ActionItem> {
    entries.iter().find_map(|entry| match entry {
        MenuEntry::Action(item) if item.id == id => Some(item),
        MenuEntry::Submenu(submenu) => find_item(&submenu.items, id),
        _ => None,
    })
}
