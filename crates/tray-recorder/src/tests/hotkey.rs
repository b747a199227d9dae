use crate::{AppCommand, HotkeyHandler, config::DEFAULT_SHORTCUT};

use global_hotkey::HotKeyState;
use tokio::sync::mpsc;

/// WHAT: The default shortcut parses
/// WHY: A fresh install must register its hotkey without user edits
#[test]
#[allow(clippy::unwrap_used)]
fn given_default_shortcut_when_parsed_then_hotkey_built() {
    // Given/When: Parsing the default shortcut
    let hotkey = HotkeyHandler::parse_shortcut(DEFAULT_SHORTCUT).unwrap();

    // Then: Parsing it again yields the same id
    let again = HotkeyHandler::parse_shortcut(DEFAULT_SHORTCUT).unwrap();
    assert_eq!(hotkey.id(), again.id());
}

/// WHAT: Garbage shortcuts are rejected with a registration error
/// WHY: The app logs and continues without a hotkey instead of crashing
#[test]
fn given_invalid_shortcut_when_parsed_then_registration_error() {
    // Given/When: Parsing nonsense
    let result = HotkeyHandler::parse_shortcut("ctrl+shift+NotAKey");

    // Then: A hotkey registration error is returned
    assert!(matches!(
        result,
        Err(crate::AppError::HotkeyRegistrationFailed { .. })
    ));
}

/// WHAT: Only presses of the registered hotkey count
/// WHY: Releases and other apps' hotkeys must not toggle recording
#[test]
#[allow(clippy::unwrap_used)]
fn given_hotkey_events_when_checked_then_only_own_presses_match() {
    // Given: A handler for the default shortcut
    let hotkey = HotkeyHandler::parse_shortcut(DEFAULT_SHORTCUT).unwrap();
    let (command_tx, _command_rx) = mpsc::channel(1);
    let handler = HotkeyHandler::new(hotkey.id(), command_tx);

    // When/Then: Press matches, release and foreign ids do not
    assert!(handler.is_press(hotkey.id(), HotKeyState::Pressed));
    assert!(!handler.is_press(hotkey.id(), HotKeyState::Released));
    assert!(!handler.is_press(hotkey.id().wrapping_add(1), HotKeyState::Pressed));
}

/// WHAT: Toggle commands reach the app in order
/// WHY: Two quick presses must arrive as start then stop
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_two_presses_when_sent_then_app_receives_two_toggles() {
    // Given: An open command channel
    let (command_tx, mut command_rx) = mpsc::channel(32);

    // When: Sending two toggles
    command_tx.send(AppCommand::ToggleRecording).await.unwrap();
    command_tx.send(AppCommand::ToggleRecording).await.unwrap();

    // Then: Both arrive
    assert_eq!(command_rx.recv().await.unwrap(), AppCommand::ToggleRecording);
    assert_eq!(command_rx.recv().await.unwrap(), AppCommand::ToggleRecording);
}

/// WHAT: Sending on a closed channel fails
/// WHY: The handler surfaces the error instead of dropping presses silently
#[tokio::test]
async fn given_closed_channel_when_toggle_sent_then_error() {
    // Given: A closed command channel
    let (command_tx, command_rx) = mpsc::channel(1);
    drop(command_rx);

    // When: Sending a toggle
    let result = command_tx.send(AppCommand::ToggleRecording).await;

    // Then: Send fails
    assert!(result.is_err());
}
