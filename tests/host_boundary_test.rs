use serde::Deserialize;

use snek::host::{Core, PixelFormat, Region};
use snek::types::{Direction, GameMode, InputState, FB_HEIGHT, FB_WIDTH};

fn script(frame: u32) -> InputState {
    match frame % 50 {
        0 => InputState::start(),
        10 => InputState::direction(Direction::Down),
        30 => InputState::direction(Direction::Right),
        _ => InputState::NONE,
    }
}

/// Start once, then wander.
fn played_core(seed: u32, frames: u32) -> Core {
    let mut core = Core::new(seed);
    core.run_input(InputState::start());
    core.run_input(InputState::NONE);
    for frame in 1..frames {
        core.run_input(script(frame));
    }
    core.run_input(InputState::NONE);
    core
}

fn save(core: &Core) -> Vec<u8> {
    let mut buf = vec![0u8; core.serialize_size()];
    assert!(core.serialize(&mut buf));
    buf
}

#[test]
fn every_frame_is_640x480_with_silent_stereo_audio() {
    let mut core = Core::new(1);
    for frame in 0..10 {
        let out = core.run_input(script(frame));
        assert_eq!((out.width, out.height), (FB_WIDTH, FB_HEIGHT));
        assert_eq!(out.pitch, FB_WIDTH * 4);
        assert_eq!(out.video.len(), FB_WIDTH * FB_HEIGHT);
        assert_eq!(out.audio_frames(), 800);
        assert!(out.audio.iter().all(|&s| s == 0));
    }
}

#[test]
fn input_source_is_polled_once_per_frame() {
    let mut core = Core::new(2);
    let mut polls = 0;
    let mut source = || {
        polls += 1;
        InputState::start()
    };
    core.run(&mut source);
    core.run(&mut source);
    assert_eq!(polls, 2);
    assert_eq!(core.state().mode(), GameMode::Playing);
}

#[test]
fn save_state_round_trip_reproduces_future_play() {
    let original = played_core(31, 180);
    let block = save(&original);

    let mut restored = Core::new(999);
    assert!(restored.unserialize(&block));
    assert_eq!(save(&restored), block);

    let mut original = original;
    for frame in 0..400 {
        original.run_input(script(frame));
        restored.run_input(script(frame));
    }
    assert_eq!(save(&original), save(&restored));
}

#[test]
fn undersized_buffers_are_rejected_without_side_effects() {
    let mut core = played_core(41, 90);
    let before = save(&core);

    let mut small = vec![0u8; core.serialize_size() - 1];
    assert!(!core.serialize(&mut small));
    assert!(small.iter().all(|&b| b == 0));

    assert!(!core.unserialize(&before[..before.len() - 1]));
    assert!(!core.unserialize(&[]));
    assert_eq!(save(&core), before);
}

#[test]
fn corrupted_blocks_are_rejected() {
    let mut core = played_core(43, 60);
    let before = save(&core);

    let mut bad_magic = before.clone();
    bad_magic[0] = b'X';
    assert!(core.try_unserialize(&bad_magic).is_err());
    assert_eq!(save(&core), before);
}

#[test]
fn reset_starts_a_fresh_round_in_any_mode() {
    let mut core = played_core(47, 120);
    let mode = core.state().mode();
    let high = core.state().high_score();

    core.reset();
    assert_eq!(core.state().score(), 0);
    assert_eq!(core.state().snake().len(), 3);
    assert_eq!(core.state().mode(), mode);
    assert_eq!(core.state().high_score(), high);
}

#[derive(Debug, Deserialize)]
struct Geometry {
    base_width: u32,
    base_height: u32,
    aspect_ratio: f32,
}

#[test]
fn metadata_describes_a_contentless_ntsc_core() {
    let system = Core::system_info();
    assert_eq!(system.library_name, "Snek Core");
    assert_eq!(system.library_version, "1.0");
    assert!(system.valid_extensions.is_empty());
    assert!(Core::info().supports_no_game);

    let av = Core::av_info();
    assert_eq!(av.timing.fps, 60.0);
    assert_eq!(av.timing.sample_rate, 48000.0);

    assert_eq!(Core::region(), Region::Ntsc);
    assert_eq!(Core::pixel_format(), PixelFormat::Xrgb8888);
    assert_eq!(Core::input_descriptors().len(), 6);

    let mut core = Core::new(1);
    assert!(core.load_game(None));
    assert!(core.load_game(Some(&b"ignored"[..])));
    assert!(core.memory_data(0).is_none());
    assert_eq!(core.memory_size(0), 0);
    core.set_controller_port_device(0, 1);
    core.unload_game();

    let json = serde_json::to_value(Core::info()).unwrap();
    let geometry: Geometry = serde_json::from_value(json["av"]["geometry"].clone()).unwrap();
    assert_eq!((geometry.base_width, geometry.base_height), (640, 480));
    assert!((geometry.aspect_ratio - 4.0 / 3.0).abs() < 1e-6);
    assert_eq!(json["region"], "ntsc");
    assert_eq!(json["pixel_format"], "XRGB8888");
}
