//! System tray icon with state-based updates.
//!
//! Renders a [`MenuModel`] into a native context menu and swaps the icon and
//! tooltip as the session moves between idle, recording and stopping.

use crate::{AppError, AppResult, TrayIconState};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tray_icon::menu::{CheckMenuItem, IsMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};
use tray_recorder_core::{MenuEntry, MenuModel};

/// Edge length of the generated tray icon, in pixels.
pub(crate) const ICON_SIZE: u32 = 32;

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
}

impl TrayManager {
    /// Create the tray icon showing `menu` in the idle state.
    #[track_caller]
    #[instrument(skip(menu))]
    pub fn new(menu: &MenuModel) -> AppResult<Self> {
        let state = TrayIconState::Idle;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(state.tooltip())
            .with_menu(Box::new(Self::render_menu(menu)?))
            .with_icon(Self::load_icon(state)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self { tray_icon })
    }

    /// Replace the menu and update icon and tooltip for `state`.
    #[track_caller]
    #[instrument(skip(self, menu))]
    pub fn update(&mut self, menu: &MenuModel, state: TrayIconState) -> AppResult<()> {
        self.tray_icon
            .set_menu(Some(Box::new(Self::render_menu(menu)?)));

        self.tray_icon
            .set_icon(Some(Self::load_icon(state)?))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(state.tooltip()))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(state = ?state, entries = menu.entries().len(), "Tray updated");

        Ok(())
    }

    #[track_caller]
    fn render_menu(model: &MenuModel) -> AppResult<Menu> {
        let menu = Menu::new();

        for entry in model.entries() {
            let item = Self::render_entry(entry)?;
            menu.append(item.as_ref()).map_err(|e| AppError::TrayError {
                reason: format!("Failed to append menu entry: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        Ok(menu)
    }

    #[track_caller]
    fn render_entry(entry: &MenuEntry) -> AppResult<Box<dyn IsMenuItem>> {
        let item: Box<dyn IsMenuItem> = match entry {
            MenuEntry::Label { text } => Box::new(MenuItem::new(text, false, None)),
            MenuEntry::Separator => Box::new(PredefinedMenuItem::separator()),
            MenuEntry::Action(action) => match action.checked {
                Some(checked) => Box::new(CheckMenuItem::with_id(
                    action.id.as_str(),
                    &action.label,
                    action.enabled,
                    checked,
                    None,
                )),
                None => Box::new(MenuItem::with_id(
                    action.id.as_str(),
                    &action.label,
                    action.enabled,
                    None,
                )),
            },
            MenuEntry::Submenu(submenu) => {
                let native = Submenu::new(&submenu.label, submenu.enabled);
                for child in &submenu.items {
                    let child = Self::render_entry(child)?;
                    native.append(child.as_ref()).map_err(|e| AppError::TrayError {
                        reason: format!("Failed to append to {} submenu: {}", submenu.label, e),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                }
                Box::new(native)
            }
        };

        Ok(item)
    }

    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<Icon> {
        Icon::from_rgba(icon_rgba(state), ICON_SIZE, ICON_SIZE).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Draw a filled dot in the state's color on a transparent square.
pub(crate) fn icon_rgba(state: TrayIconState) -> Vec<u8> {
    let [r, g, b] = state.color();
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 3.0;

    let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let alpha = if dx * dx + dy * dy <= radius * radius {
                u8::MAX
            } else {
                0
            };
            rgba.extend_from_slice(&[r, g, b, alpha]);
        }
    }

    rgba
}
