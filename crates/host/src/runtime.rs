//! The per-frame host entry point.
//!
//! [`Core`] owns the simulation, the renderer and the output buffers. A host
//! calls [`Core::run`] once per video frame; the core polls input through an
//! [`InputSource`], advances the game, paints the frame and hands back borrowed
//! video and (silent) audio.

use snek_core::{GameState, SaveStateError, SAVE_STATE_SIZE};
use snek_render::{FrameBuffer, GameView};
use snek_types::{InputState, AUDIO_FRAMES_PER_VIDEO_FRAME};

use crate::info::{
    AvInfo, CoreInfo, InputDescriptor, PixelFormat, Region, SystemInfo, INPUT_DESCRIPTORS,
    LIBRARY_NAME, LIBRARY_VERSION,
};

/// Interleaved stereo samples per video frame.
pub const AUDIO_SAMPLES_PER_FRAME: usize = AUDIO_FRAMES_PER_VIDEO_FRAME * 2;

/// Something the core can poll for one frame of button state.
pub trait InputSource {
    fn poll(&mut self) -> InputState;
}

impl<F: FnMut() -> InputState> InputSource for F {
    fn poll(&mut self) -> InputState {
        self()
    }
}

/// One finished frame, borrowed from the core until the next call.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Packed `0x00RRGGBB`, row-major.
    pub video: &'a [u32],
    pub width: usize,
    pub height: usize,
    /// Bytes per row.
    pub pitch: usize,
    /// Interleaved left/right samples; always silence.
    pub audio: &'a [i16],
}

impl Frame<'_> {
    /// Stereo frames in [`Frame::audio`].
    pub fn audio_frames(&self) -> usize {
        self.audio.len() / 2
    }
}

pub struct Core {
    state: GameState,
    view: GameView,
    fb: FrameBuffer,
    audio: [i16; AUDIO_SAMPLES_PER_FRAME],
}

impl Core {
    /// Create a core on the title screen.
    pub fn new(seed: u32) -> Self {
        log::info!("[Core] {LIBRARY_NAME} {LIBRARY_VERSION} loaded (seed {seed})");
        Self {
            state: GameState::new(seed),
            view: GameView::new(),
            fb: FrameBuffer::default(),
            audio: [0; AUDIO_SAMPLES_PER_FRAME],
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Advance one frame: poll input, update, render, emit silence.
    pub fn run(&mut self, input: &mut impl InputSource) -> Frame<'_> {
        let sample = input.poll();
        self.state.run_frame(sample);
        if let Some(event) = self.state.take_last_event() {
            if let Some(collision) = event.collision {
                log::debug!("[Core] game over: {} (score {})", collision.as_str(), self.state.score());
            }
            if let Some(kind) = event.power_up {
                log::debug!("[Core] picked up {}", kind.as_str());
            }
        }
        self.view.render_into(&self.state, &mut self.fb);
        self.frame()
    }

    /// [`Core::run`] with an already-sampled input state.
    pub fn run_input(&mut self, input: InputState) -> Frame<'_> {
        self.run(&mut || input)
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            video: self.fb.pixels(),
            width: self.fb.width(),
            height: self.fb.height(),
            pitch: self.fb.pitch(),
            audio: &self.audio,
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Start a new round regardless of the current mode.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn serialize_size(&self) -> usize {
        SAVE_STATE_SIZE
    }

    /// Write a save block into `out`. Fails (and writes nothing) if `out` is too small.
    pub fn serialize(&self, out: &mut [u8]) -> bool {
        match self.state.serialize(out) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("[Core] serialize failed: {e}");
                false
            }
        }
    }

    /// Restore from a save block. On failure the running game is untouched.
    pub fn unserialize(&mut self, data: &[u8]) -> bool {
        match self.try_unserialize(data) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[Core] rejected save state: {e}");
                false
            }
        }
    }

    pub fn try_unserialize(&mut self, data: &[u8]) -> Result<(), SaveStateError> {
        self.state.deserialize(data)
    }

    /// The core runs without content; anything passed here is ignored.
    pub fn load_game(&mut self, content: Option<&[u8]>) -> bool {
        if let Some(data) = content {
            log::debug!("[Core] ignoring {} bytes of content", data.len());
        }
        true
    }

    pub fn unload_game(&mut self) {}

    /// Only the standard joypad is supported; port assignments are ignored.
    pub fn set_controller_port_device(&mut self, port: u32, device: u32) {
        log::debug!("[Core] controller port {port} -> device {device} (ignored)");
    }

    pub fn system_info() -> SystemInfo {
        SystemInfo::current()
    }

    pub fn av_info() -> AvInfo {
        AvInfo::current()
    }

    pub fn info() -> CoreInfo {
        CoreInfo::current()
    }

    pub fn region() -> Region {
        Region::Ntsc
    }

    pub fn pixel_format() -> PixelFormat {
        PixelFormat::Xrgb8888
    }

    pub fn input_descriptors() -> &'static [InputDescriptor] {
        &INPUT_DESCRIPTORS
    }

    /// No memory regions (save RAM, RTC, ...) are exposed.
    pub fn memory_data(&mut self, _id: u32) -> Option<&mut [u8]> {
        None
    }

    pub fn memory_size(&self, _id: u32) -> usize {
        0
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snek_types::{GameMode, FB_HEIGHT, FB_WIDTH};

    #[test]
    fn test_run_emits_full_frame_and_silence() {
        let mut core = Core::new(3);
        let frame = core.run_input(InputState::NONE);
        assert_eq!(frame.video.len(), FB_WIDTH * FB_HEIGHT);
        assert_eq!((frame.width, frame.height), (640, 480));
        assert_eq!(frame.pitch, 640 * 4);
        assert_eq!(frame.audio_frames(), 800);
        assert!(frame.audio.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_closure_input_source() {
        let mut core = Core::new(3);
        let mut presses = [InputState::start(), InputState::NONE].into_iter();
        let mut source = || presses.next().unwrap_or_default();
        core.run(&mut source);
        assert_eq!(core.state().mode(), GameMode::Playing);
        core.run(&mut source);
        core.run(&mut source);
        assert_eq!(core.state().frame_count(), 3);
    }

    #[test]
    fn test_reset_ignores_mode() {
        let mut core = Core::new(3);
        core.run_input(InputState::start());
        for _ in 0..20 {
            core.run_input(InputState::NONE);
        }
        let mode = core.state().mode();
        core.reset();
        assert_eq!(core.state().snake().len(), 3);
        assert_eq!(core.state().score(), 0);
        assert_eq!(core.state().mode(), mode);
    }

    #[test]
    fn test_serialize_contract() {
        let mut core = Core::new(8);
        core.run_input(InputState::start());
        let mut small = vec![0u8; core.serialize_size() - 1];
        assert!(!core.serialize(&mut small));
        assert!(!core.unserialize(&small));

        let mut buf = vec![0u8; core.serialize_size()];
        assert!(core.serialize(&mut buf));
        let mut other = Core::new(99);
        assert!(other.unserialize(&buf));
        assert_eq!(other.state().snake(), core.state().snake());
        assert_eq!(other.state().mode(), GameMode::Playing);
    }

    #[test]
    fn test_no_content_and_no_memory() {
        let mut core = Core::default();
        assert!(core.load_game(None));
        assert!(core.load_game(Some(b"ignored")));
        assert!(core.memory_data(0).is_none());
        assert_eq!(core.memory_size(0), 0);
        core.set_controller_port_device(0, 1);
        assert_eq!(Core::region(), Region::Ntsc);
        assert_eq!(Core::input_descriptors().len(), 6);
    }
}
