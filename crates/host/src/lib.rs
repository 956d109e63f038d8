//! Host boundary for the snake core.
//!
//! A frontend drives the game through [`Core`]: one [`Core::run`] per video
//! frame at 60 Hz, plus reset, save-state and metadata queries. Nothing here
//! blocks or spawns; the whole update happens inside the `run` call.
//!
//! ```
//! use snek_host::Core;
//! use snek_types::InputState;
//!
//! let mut core = Core::new(7);
//! let frame = core.run_input(InputState::start());
//! assert_eq!(frame.video.len(), frame.width * frame.height);
//! assert_eq!(frame.audio.len(), 1600);
//! ```

pub mod info;
pub mod runtime;

pub use snek_core as core;
pub use snek_render as render;
pub use snek_types as types;

pub use info::{AvInfo, CoreInfo, InputDescriptor, PixelFormat, Region, SystemInfo};
pub use runtime::{Core, Frame, InputSource, AUDIO_SAMPLES_PER_FRAME};
