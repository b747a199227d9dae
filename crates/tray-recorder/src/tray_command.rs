use crate::TrayIconState;

use tray_recorder_core::MenuModel;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`),
/// so all tray mutations and process lifecycle events flow through this enum.
#[derive(Debug, Clone)]
pub enum TrayCommand {
    /// Replace the menu and switch the icon to match the session state.
    Update {
        /// Freshly built menu.
        menu: MenuModel,
        /// Icon state for the current session.
        state: TrayIconState,
    },
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
