use std::path::Path;
use std::sync::LazyLock;

use crate::MicState;

// System red and yellow from the macOS palette, dark-mode defaults.
const COLOR_MUTED: (u8, u8, u8) = (255, 69, 58);
const COLOR_FLASH: (u8, u8, u8) = (255, 214, 10);
pub const ICON_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/icon.png");

static ICON_LIVE: LazyLock<tray_icon::Icon> = LazyLock::new(|| load_icon(ICON_PATH, None));
static ICON_MUTED: LazyLock<tray_icon::Icon> =
    LazyLock::new(|| load_icon(ICON_PATH, Some(COLOR_MUTED)));
static ICON_FLASH: LazyLock<tray_icon::Icon> =
    LazyLock::new(|| load_icon(ICON_PATH, Some(COLOR_FLASH)));

/// Tray icons for each aggregate microphone state.
pub trait StateIcons {
    fn icon(&self) -> tray_icon::Icon;
    /// Accent variant shown briefly right after a toggle.
    fn flash_icon(&self) -> tray_icon::Icon;
}

impl StateIcons for MicState {
    fn icon(&self) -> tray_icon::Icon {
        match self {
            MicState::Live => ICON_LIVE.clone(),
            MicState::Muted => ICON_MUTED.clone(),
        }
    }

    fn flash_icon(&self) -> tray_icon::Icon {
        ICON_FLASH.clone()
    }
}

fn load_icon(path: impl AsRef<Path>, recolor: Option<(u8, u8, u8)>) -> tray_icon::Icon {
    let (icon_rgba, icon_width, icon_height) = {
        let mut image = image::open(path)
            .expect("Failed to open icon path")
            .into_rgba8();

        if let Some((r, g, b)) = recolor {
            for pixel in image.pixels_mut() {
                pixel[0] = r;
                pixel[1] = g;
                pixel[2] = b;
            }
        }

        let (width, height) = image.dimensions();
        let rgba = image.into_raw();
        (rgba, width, height)
    };
    tray_icon::Icon::from_rgba(icon_rgba, icon_width, icon_height).expect("Failed to open icon")
}
