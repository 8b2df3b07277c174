use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use arboard::Clipboard;
use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use hush::config_ext::{hotkey_label, ConfigExt};
use hush::event::HushEvent;
use hush::icon::StateIcons;
use hush::notify::NotificationLayer;
use hush::{
    ConfigManager, MicState, MuteController, SystemBackend, APP_NAME_PRETTY, DEFAULT_LOG_LEVEL,
    VERSION,
};
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tray_icon::menu::{AboutMetadataBuilder, Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{TrayIconBuilder, TrayIconEvent};

/// How long the accent icon stays up after a toggle.
const FLASH_DURATION: Duration = Duration::from_millis(300);

fn main() -> Result<()> {
    // Initialize the logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("HUSH_LOG")
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .finish()
        .with(NotificationLayer::new())
        .init();

    // Load config
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load()?;
    // save back the config to create the file if it doesn't exist
    config_manager.save(&config)?;

    // Set up hotkey
    let hotkey = config.hotkey();
    let hotkey_manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;
    hotkey_manager
        .register(hotkey)
        .context("Failed to register hotkey")?;

    // Set up clipboard interaction
    let mut clipboard = Clipboard::new()?;

    // Set up the mute controller, seeding the aggregate state from the
    // devices as they are right now.
    let mut controller = MuteController::new(SystemBackend::default());
    controller.refresh();

    let mut menu = build_menu(&controller, &hotkey)?;

    // Set up the event loop
    let mut icon_tray = None;
    let mut flash_revert: Option<Instant> = None;

    let menu_channel = MenuEvent::receiver();
    let tray_channel = TrayIconEvent::receiver();
    let hotkey_channel = GlobalHotKeyEvent::receiver();

    #[cfg_attr(not(target_os = "macos"), allow(unused_mut))]
    let mut event_loop: EventLoop<HushEvent> = EventLoopBuilder::with_user_event().build();

    // Menu bar app only, no Dock icon.
    #[cfg(target_os = "macos")]
    {
        use tao::platform::macos::{ActivationPolicy, EventLoopExtMacOS};
        event_loop.set_activation_policy(ActivationPolicy::Accessory);
    }

    let event_sender = event_loop.create_proxy();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = match flash_revert {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };

        match event {
            Event::NewEvents(StartCause::Init) => {
                // We create the icon once the event loop is actually running
                // to prevent issues like https://github.com/tauri-apps/tray-icon/issues/90

                let state = controller.state();
                icon_tray.replace(
                    TrayIconBuilder::new()
                        .with_menu(Box::new(menu.menu.clone()))
                        .with_tooltip(tooltip(state, &hotkey))
                        .with_icon(state.icon())
                        .build()
                        .unwrap(),
                );

                // We have to request a redraw here to have the icon actually show up.
                // Tao only exposes a redraw method on the Window so we use core-foundation directly.
                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};

                    let rl = CFRunLoopGetMain();
                    CFRunLoopWakeUp(rl);
                }

                info!("Hush ready");
            }
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                // End of the post-toggle flash
                flash_revert = None;
                if let Some(tray) = icon_tray.as_ref() {
                    tray.set_icon(Some(controller.state().icon())).ok();
                }
            }
            Event::UserEvent(HushEvent::StateChanged(state)) => {
                info!(state = ?state, "State changed");

                // Rebuild the menu so the toggle label and device list stay
                // current.
                match build_menu(&controller, &hotkey) {
                    Ok(rebuilt) => {
                        if let Some(tray) = icon_tray.as_ref() {
                            tray.set_menu(Some(Box::new(rebuilt.menu.clone())));
                        }
                        menu = rebuilt;
                    }
                    Err(e) => error!("Failed to rebuild menu: {e}"),
                }

                if let Some(tray) = icon_tray.as_ref() {
                    tray.set_tooltip(Some(tooltip(state, &hotkey))).ok();
                    // Visual feedback, reverted when the deadline fires
                    tray.set_icon(Some(state.flash_icon())).ok();
                }
                flash_revert = Some(Instant::now() + FLASH_DURATION);
            }
            _ => {}
        }

        if let Ok(event) = menu_channel.try_recv() {
            if event.id == menu.quit.id() {
                icon_tray.take();
                *control_flow = ControlFlow::Exit;
            } else if event.id == menu.toggle.id() {
                let state = controller.toggle();
                event_sender.send_event(HushEvent::StateChanged(state)).ok();
            } else if event.id == menu.copy_config.id() {
                if let Err(e) =
                    clipboard.set_text(config_manager.config_path().to_string_lossy().into_owned())
                {
                    error!("Failed to copy config path to clipboard: {}", e);
                }
            }
        }

        #[expect(clippy::redundant_pattern_matching)]
        if let Ok(_) = tray_channel.try_recv() {
            // Handle tray icon events
        }

        // Handle hotkey events
        if let Ok(event) = hotkey_channel.try_recv() {
            if event.id() == hotkey.id() && event.state() == HotKeyState::Pressed {
                let state = controller.toggle();
                event_sender.send_event(HushEvent::StateChanged(state)).ok();
            }
        }
    });
}

struct MenuHandles {
    menu: Menu,
    toggle: MenuItem,
    copy_config: MenuItem,
    quit: MenuItem,
}

fn build_menu(controller: &MuteController<SystemBackend>, hotkey: &HotKey) -> Result<MenuHandles> {
    let menu = Menu::new();
    let toggle = MenuItem::new(
        if controller.is_muted() {
            "Unmute All Mics"
        } else {
            "Mute All Mics"
        },
        true,
        None,
    );
    let copy_config = MenuItem::new("Copy config path", true, None);
    let quit = MenuItem::new("Quit", true, None);

    menu.append_items(&[
        // the name of the app
        &MenuItem::new(APP_NAME_PRETTY, false, None),
        &PredefinedMenuItem::separator(),
        &PredefinedMenuItem::about(
            None,
            Some(
                AboutMetadataBuilder::new()
                    .version(Some(VERSION.to_owned()))
                    .build(),
            ),
        ),
        &PredefinedMenuItem::separator(),
        &toggle,
    ])?;

    let devices = controller.devices();
    if !devices.is_empty() {
        menu.append(&PredefinedMenuItem::separator())?;
        menu.append(&MenuItem::new("Detected Microphones:", false, None))?;
        for device in &devices {
            menu.append(&MenuItem::new(format!("  • {}", device.name), false, None))?;
        }
    }

    menu.append_items(&[
        &PredefinedMenuItem::separator(),
        &MenuItem::new(format!("Hotkey: {}", hotkey_label(hotkey)), false, None),
        &copy_config,
        &PredefinedMenuItem::separator(),
        &quit,
    ])?;

    Ok(MenuHandles {
        menu,
        toggle,
        copy_config,
        quit,
    })
}

fn tooltip(state: MicState, hotkey: &HotKey) -> String {
    let label = hotkey_label(hotkey);
    match state {
        MicState::Muted => format!("Microphones muted ({label} to toggle)"),
        MicState::Live => format!("Microphones live ({label} to toggle)"),
    }
}
