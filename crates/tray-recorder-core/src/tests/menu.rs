use crate::{
    CatalogSnapshot, Codec, Device, MenuAction, MenuEntry, MenuModel, NO_DEVICES_LABEL,
    PreferenceKind, PreferenceValue, Preferences, QUIT_ID, START_ID, STOP_ID, SessionState,
    SubmenuEntry,
};

fn catalog() -> CatalogSnapshot {
    CatalogSnapshot {
        microphones: vec![
            Device::microphone("0", "Built-in Mic"),
            Device::microphone("1", "USB Mic"),
        ],
        displays: vec![Device::display("2", "Capture screen 0")],
        codecs: Codec::ALL.to_vec(),
    }
}

fn submenu<'a>(model: &'a MenuModel, label: &str) -> Option<&'a SubmenuEntry> {
    model.entries().iter().find_map(|entry| match entry {
        MenuEntry::Submenu(submenu) if submenu.label == label => Some(submenu),
        _ => None,
    })
}

fn enabled(model: &MenuModel, id: &str) -> Option<bool> {
    model.item(id).map(|item| item.enabled)
}

/// WHAT: Idle menu allows starting, selecting and quitting
/// WHY: Only an idle recorder may change settings or exit
#[test]
fn given_idle_state_when_building_menu_then_start_and_quit_enabled() {
    // Given/When: An idle menu
    let model = MenuModel::build(SessionState::Idle, &Preferences::new(), &catalog());

    // Then: Status reads Idle and controls match
    assert_eq!(
        model.entries().first(),
        Some(&MenuEntry::Label {
            text: "Recorder – Idle".to_string()
        })
    );
    assert_eq!(enabled(&model, START_ID), Some(true));
    assert_eq!(enabled(&model, STOP_ID), Some(false));
    assert_eq!(enabled(&model, QUIT_ID), Some(true));
    for kind in PreferenceKind::ALL {
        assert!(submenu(&model, kind.label()).is_some_and(|s| s.enabled));
    }
}

/// WHAT: Recording menu only allows stopping
/// WHY: Settings and quit are locked while a session is active
#[test]
fn given_recording_state_when_building_menu_then_only_stop_enabled() {
    // Given/When: A recording menu
    let model = MenuModel::build(SessionState::Recording, &Preferences::new(), &catalog());

    // Then: Status reads Active, only Stop is enabled
    assert_eq!(
        model.entries().first(),
        Some(&MenuEntry::Label {
            text: "Recorder – Active".to_string()
        })
    );
    assert_eq!(enabled(&model, START_ID), Some(false));
    assert_eq!(enabled(&model, STOP_ID), Some(true));
    assert_eq!(enabled(&model, QUIT_ID), Some(false));
    assert!(submenu(&model, "Microphone").is_some_and(|s| !s.enabled));
}

/// WHAT: Stopping menu disables both start and stop
/// WHY: The stop is already queued and a new session cannot start yet
#[test]
fn given_stopping_state_when_building_menu_then_start_and_stop_disabled() {
    // Given/When: A stopping menu
    let model = MenuModel::build(SessionState::Stopping, &Preferences::new(), &catalog());

    // Then: Neither start nor stop nor quit is clickable
    assert_eq!(enabled(&model, START_ID), Some(false));
    assert_eq!(enabled(&model, STOP_ID), Some(false));
    assert_eq!(enabled(&model, QUIT_ID), Some(false));
}

/// WHAT: The selected preference is the checked radio item
/// WHY: The menu reflects the current selection
#[test]
fn given_selected_microphone_when_building_menu_then_only_it_is_checked() {
    // Given: USB Mic selected
    let mut prefs = Preferences::new();
    prefs.set(
        PreferenceKind::Microphone,
        Device::microphone("1", "USB Mic").into(),
    );

    // When: Building the menu
    let model = MenuModel::build(SessionState::Idle, &prefs, &catalog());

    // Then: Only the USB Mic is checked
    assert_eq!(model.item("microphone:1:1").and_then(|i| i.checked), Some(true));
    assert_eq!(model.item("microphone:0:0").and_then(|i| i.checked), Some(false));
    assert_eq!(model.item("codec:1:h264").and_then(|i| i.checked), Some(false));
}

/// WHAT: Menu ids resolve to their actions
/// WHY: Tray click events carry only the item id
#[test]
fn given_menu_when_resolving_ids_then_actions_returned() {
    // Given: An idle menu
    let model = MenuModel::build(SessionState::Idle, &Preferences::new(), &catalog());

    // When/Then: Ids map to the expected actions
    assert_eq!(model.action_for(START_ID), Some(&MenuAction::StartRecording));
    assert_eq!(model.action_for(QUIT_ID), Some(&MenuAction::Quit));
    assert_eq!(
        model.action_for("codec:2:proRes422"),
        Some(&MenuAction::Select {
            kind: PreferenceKind::Codec,
            value: PreferenceValue::Codec(Codec::ProRes422),
        })
    );
    assert_eq!(
        model.action_for("display:0:2"),
        Some(&MenuAction::Select {
            kind: PreferenceKind::Display,
            value: PreferenceValue::Device(Device::display("2", "Capture screen 0")),
        })
    );
    assert_eq!(model.action_for("microphone:missing"), None);
}

/// WHAT: Degraded catalog renders placeholders but keeps codecs
/// WHY: A device query failure must not break the menu
#[test]
fn given_degraded_catalog_when_building_menu_then_placeholder_shown() {
    // Given/When: A menu over a degraded snapshot
    let model = MenuModel::build(
        SessionState::Idle,
        &Preferences::new(),
        &CatalogSnapshot::degraded(),
    );

    // Then: Device submenus hold only a placeholder, codecs are still offered
    let placeholder = MenuEntry::Label {
        text: NO_DEVICES_LABEL.to_string(),
    };
    assert_eq!(
        submenu(&model, "Microphone").map(|s| s.items.clone()),
        Some(vec![placeholder.clone()])
    );
    assert_eq!(
        submenu(&model, "Display").map(|s| s.items.clone()),
        Some(vec![placeholder])
    );
    assert_eq!(submenu(&model, "Codec").map(|s| s.items.len()), Some(4));
}

/// WHAT: Devices sharing an id still get distinct menu ids
/// WHY: A click on the second device must select the second device
#[test]
fn given_duplicate_device_ids_when_building_menu_then_ids_unique_and_resolvable() {
    // Given: Two microphones the backend reports under the same id
    let catalog = CatalogSnapshot {
        microphones: vec![
            Device::microphone("USB Audio", "USB Audio"),
            Device::microphone("USB Audio", "USB Audio (2)"),
        ],
        ..CatalogSnapshot::degraded()
    };

    // When: Building the menu
    let model = MenuModel::build(SessionState::Idle, &Preferences::new(), &catalog);

    // Then: Each item resolves to its own device
    let ids: Vec<&str> = submenu(&model, "Microphone")
        .map(|s| {
            s.items
                .iter()
                .filter_map(|entry| match entry {
                    MenuEntry::Action(item) => Some(item.id.as_str()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(ids, vec!["microphone:0:USB Audio", "microphone:1:USB Audio"]);
    assert_eq!(
        model.action_for("microphone:1:USB Audio"),
        Some(&MenuAction::Select {
            kind: PreferenceKind::Microphone,
            value: PreferenceValue::Device(Device::microphone("USB Audio", "USB Audio (2)")),
        })
    );
}
