use crate::{AppCommand, AppError, AppResult, DesktopNotifier, TrayCommand};

use std::{ops::ControlFlow, time::Duration};

use tao::event_loop::EventLoopProxy;
use tokio::{
    sync::{mpsc, watch},
    time::{Interval, MissedTickBehavior},
};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;
use tray_recorder_core::{
    CatalogSnapshot, CommandOutcome, DeviceCatalog, FfmpegEngine, MenuModel, PollOutcome,
    Preferences, SessionController, SessionState, SystemFileOps,
};

/// Session controller as wired up by the binary.
pub(crate) type Controller = SessionController<FfmpegEngine, DesktopNotifier, SystemFileOps>;

/// Main application state.
///
/// Runs on the async runtime thread. Tray updates go back to the main
/// thread through `tray_proxy` because `TrayIcon` is `!Send` and must
/// remain on the UI thread.
pub struct App {
    pub(crate) controller: Controller,
    pub(crate) catalog: DeviceCatalog<FfmpegEngine>,
    pub(crate) preferences: Preferences,
    pub(crate) menu: MenuModel,
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) poll_interval: Duration,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!(poll_interval_ms = self.poll_interval.as_millis(), "Tray Recorder starting");

        // MenuEvent::receiver() blocks in recv(), so forwarding lives on one
        // blocking thread. Dropping tray_event_rx ends it on the next event.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        let mut poll_ticker = tokio::time::interval(self.poll_interval);
        poll_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let termination = termination_signal();
        tokio::pin!(termination);

        self.refresh_menu().await;

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    let Some(action) = self.menu.action_for(&event.id.0).cloned() else {
                        debug!(menu_id = ?event.id, "Menu event without action");
                        continue;
                    };
                    if self.dispatch(AppCommand::from(action), &mut poll_ticker).await.is_break() {
                        break;
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    if self.dispatch(cmd, &mut poll_ticker).await.is_break() {
                        break;
                    }
                }

                _ = poll_ticker.tick(), if self.controller.is_active() => {
                    if let Err(e) = self.poll_session().await {
                        error!(error = ?e, "Failed to stop recording");
                    }
                }

                _ = &mut termination => {
                    info!(state = %self.controller.state(), "Termination signal received, quitting");
                    break;
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(tray_event_rx);

        // The capture must be gone before the main thread exits the process.
        if let Err(e) = self.teardown_session().await {
            error!(error = ?e, "Failed to abort active session");
        }

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        if let Err(e) = self.tray_proxy.send_event(TrayCommand::Shutdown) {
            error!(error = ?e, "Failed to send shutdown to tray");
        }
        let _ = self.shutdown_tx.send(true);
        info!("Tray Recorder shut down successfully");

        Ok(())
    }

    /// Handle one command, restarting the poll clock when a session begins.
    async fn dispatch(&mut self, cmd: AppCommand, poll_ticker: &mut Interval) -> ControlFlow<()> {
        let was_active = self.controller.is_active();

        let flow = self.handle_command(cmd).await;

        if !was_active && self.controller.is_active() {
            poll_ticker.reset();
        }

        flow
    }

    #[instrument(skip(self))]
    async fn handle_command(&mut self, cmd: AppCommand) -> ControlFlow<()> {
        match cmd {
            AppCommand::StartRecording => self.start_recording_logged().await,
            AppCommand::StopRecording => self.request_stop().await,
            AppCommand::ToggleRecording => match self.controller.state() {
                SessionState::Idle => self.start_recording_logged().await,
                SessionState::Recording => self.request_stop().await,
                SessionState::Stopping => debug!("Toggle ignored while stopping"),
            },
            AppCommand::SelectPreference { kind, value } => {
                self.preferences.set(kind, value);
                self.refresh_menu().await;
            }
            AppCommand::Quit => {
                if !self.controller.can_quit() {
                    warn!(
                        state = %self.controller.state(),
                        "Quit requested while a session is active"
                    );
                }
                info!("Quit requested");
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    async fn start_recording_logged(&mut self) {
        if let Err(e) = self.start_recording().await {
            error!(error = ?e, "Failed to start recording");
        }
    }

    async fn start_recording(&mut self) -> AppResult<()> {
        if self.controller.start(&self.preferences).await? == CommandOutcome::Applied {
            self.refresh_menu().await;
        }
        Ok(())
    }

    async fn request_stop(&mut self) {
        if self.controller.request_stop() == CommandOutcome::Applied {
            self.refresh_menu().await;
        }
    }

    async fn poll_session(&mut self) -> AppResult<()> {
        match self.controller.poll().await {
            Ok(PollOutcome::Completed(report)) => {
                info!(
                    source = ?report.source,
                    destination = ?report.destination,
                    moved = report.moved,
                    opened = report.opened,
                    cleaned_up = report.cleaned_up,
                    "Recording handed off"
                );
                self.refresh_menu().await;
            }
            Ok(PollOutcome::Pending | PollOutcome::Inactive) => {}
            Err(e) => {
                self.refresh_menu().await;
                return Err(AppError::from(e));
            }
        }

        Ok(())
    }

    async fn teardown_session(&mut self) -> AppResult<()> {
        if self.controller.is_active() {
            info!(state = %self.controller.state(), "Quitting with an active session");
        }
        self.controller.shutdown().await?;
        Ok(())
    }

    /// Rebuild the menu from live devices and push it to the tray.
    async fn refresh_menu(&mut self) {
        let catalog = match self.catalog.list_devices().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = ?e, "Device query failed, showing codecs only");
                CatalogSnapshot::degraded()
            }
        };

        let state = self.controller.state();
        self.menu = MenuModel::build(state, &self.preferences, &catalog);

        if let Err(e) = self.tray_proxy.send_event(TrayCommand::Update {
            menu: self.menu.clone(),
            state: state.into(),
        }) {
            error!(error = ?e, "Failed to send tray update");
        }
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn termination_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = ?e, "Failed to install SIGTERM handler");
                ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    ctrl_c().await;
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = ?e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
