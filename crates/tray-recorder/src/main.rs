//! Tray Recorder: menu-bar screen recording with microphone, display and
//! codec selection.

mod app;
mod app_command;
mod config;
mod desktop_notifier;
mod error;
mod hotkey_handler;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_icon_state;
mod tray_manager;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    desktop_notifier::DesktopNotifier,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
};

use crate::config::Config;

use std::sync::Arc;

use global_hotkey::GlobalHotKeyManager;
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tray_recorder_core::{
    CatalogSnapshot, DeviceCatalog, FfmpegEngine, FileHandoff, MenuModel, Preferences,
    SessionController, SessionState, SystemFileOps,
};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "tray_recorder=debug,tray_recorder_core=debug";

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    #[allow(unused_mut)]
    let mut event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();

    // Menu-bar only: no Dock icon, no app switcher entry.
    #[cfg(target_os = "macos")]
    {
        use tao::platform::macos::{ActivationPolicy, EventLoopExtMacOS};
        event_loop.set_activation_policy(ActivationPolicy::Accessory);
    }

    let tray_proxy = event_loop.create_proxy();

    // Placeholder until the runtime has queried devices.
    let initial_menu = MenuModel::build(
        SessionState::Idle,
        &Preferences::new(),
        &CatalogSnapshot::degraded(),
    );

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new(&initial_menu) {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                match cmd {
                    TrayCommand::Update { menu, state } => {
                        if let Err(e) = tray_manager.update(&menu, state) {
                            error!(error = ?e, "Failed to update tray");
                        }
                    }
                    TrayCommand::Shutdown => {
                        *control_flow = ControlFlow::ExitWithCode(0);
                    }
                }
                return;
            }
            Event::NewEvents(StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                if let Err(e) = config.validate() {
                    error!("Invalid configuration: {:?}", e);
                    std::process::exit(1);
                }

                let output_dir = match config.output_dir() {
                    Ok(dir) => dir,
                    Err(e) => {
                        error!("Failed to resolve output directory: {:?}", e);
                        std::process::exit(1);
                    }
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let (command_tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                // Register on the main thread - tao's event loop pumps the
                // Windows messages needed for WM_HOTKEY delivery. The tray
                // menu still works if registration fails.
                let hotkey_id = if config.hotkey.enabled {
                    match HotkeyHandler::register_hotkey(&config.hotkey.shortcut) {
                        Ok((manager, id)) => {
                            hotkey_manager = Some(manager);
                            Some(id)
                        }
                        Err(e) => {
                            warn!(error = ?e, "Global hotkey unavailable, continuing without it");
                            None
                        }
                    }
                } else {
                    info!("Global hotkey disabled");
                    None
                };

                let tray_proxy = tray_proxy.clone();
                let initial_menu = initial_menu.clone();
                let poll_interval = config.poll_interval();
                let ffmpeg_path = config.recorder.ffmpeg_path.clone();

                info!(output_dir = ?output_dir, ffmpeg_path = ?ffmpeg_path, "Recorder configured");

                // TrayManager and hotkey_manager stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let engine = Arc::new(FfmpegEngine::new(ffmpeg_path));
                        let notifier = Arc::new(DesktopNotifier::default());
                        let handoff = FileHandoff::new(SystemFileOps, output_dir);

                        let app = App {
                            controller: SessionController::new(
                                Arc::clone(&engine),
                                notifier,
                                handoff,
                            ),
                            catalog: DeviceCatalog::new(engine),
                            preferences: Preferences::new(),
                            menu: initial_menu,
                            tray_proxy,
                            command_rx,
                            shutdown_tx,
                            poll_interval,
                        };

                        tokio::join!(
                            async {
                                let Some(hotkey_id) = hotkey_id else {
                                    return;
                                };
                                let hotkey_handler = HotkeyHandler::new(hotkey_id, command_tx);
                                if let Err(e) = hotkey_handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}
