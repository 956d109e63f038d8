//! Capability and metadata types reported to the host.
//!
//! All values are fixed at build time. They derive `Serialize` so a frontend
//! (or the player's `SNEK_INFO=1` mode) can dump them as JSON.

use serde::{Serialize, Serializer};

use snek_types::{Button, FB_HEIGHT, FB_WIDTH, FPS, SAMPLE_RATE};

pub const LIBRARY_NAME: &str = "Snek Core";
pub const LIBRARY_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInfo {
    pub library_name: &'static str,
    pub library_version: &'static str,
    /// `|`-separated list; empty because the core needs no content.
    pub valid_extensions: &'static str,
    pub need_fullpath: bool,
    pub block_extract: bool,
}

impl SystemInfo {
    pub fn current() -> Self {
        Self {
            library_name: LIBRARY_NAME,
            library_version: LIBRARY_VERSION,
            valid_extensions: "",
            need_fullpath: false,
            block_extract: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub base_width: u32,
    pub base_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub aspect_ratio: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timing {
    pub fps: f64,
    pub sample_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AvInfo {
    pub geometry: Geometry,
    pub timing: Timing,
}

impl AvInfo {
    pub fn current() -> Self {
        Self {
            geometry: Geometry {
                base_width: FB_WIDTH as u32,
                base_height: FB_HEIGHT as u32,
                max_width: FB_WIDTH as u32,
                max_height: FB_HEIGHT as u32,
                aspect_ratio: FB_WIDTH as f32 / FB_HEIGHT as f32,
            },
            timing: Timing {
                fps: FPS,
                sample_rate: SAMPLE_RATE,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Ntsc,
    Pal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PixelFormat {
    /// 32-bit packed `0x00RRGGBB`, top byte ignored.
    Xrgb8888,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputDescriptor {
    pub port: u32,
    #[serde(serialize_with = "serialize_button")]
    pub button: Button,
    pub description: &'static str,
}

fn serialize_button<S: Serializer>(button: &Button, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(button.as_str())
}

const fn pad(button: Button, description: &'static str) -> InputDescriptor {
    InputDescriptor {
        port: 0,
        button,
        description,
    }
}

pub const INPUT_DESCRIPTORS: [InputDescriptor; 6] = [
    pad(Button::Up, "Up"),
    pad(Button::Down, "Down"),
    pad(Button::Left, "Left"),
    pad(Button::Right, "Right"),
    pad(Button::Start, "Start"),
    pad(Button::Select, "Reset Highscore"),
];

/// Everything a frontend asks about before the first frame.
#[derive(Debug, Clone, Serialize)]
pub struct CoreInfo {
    pub system: SystemInfo,
    pub av: AvInfo,
    pub region: Region,
    pub pixel_format: PixelFormat,
    pub supports_no_game: bool,
    pub input_descriptors: &'static [InputDescriptor],
}

impl CoreInfo {
    pub fn current() -> Self {
        Self {
            system: SystemInfo::current(),
            av: AvInfo::current(),
            region: Region::Ntsc,
            pixel_format: PixelFormat::Xrgb8888,
            supports_no_game: true,
            input_descriptors: &INPUT_DESCRIPTORS,
        }
    }
}
