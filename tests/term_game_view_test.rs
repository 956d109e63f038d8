use snek::core::GameState;
use snek::host::Core;
use snek::render::GameView;
use snek::term::{encode_diff_into, encode_full_into, ScreenView, Viewport};
use snek::types::{Cell, InputState};

#[test]
fn default_scale_fits_the_frame_in_80x30_cells() {
    let mut core = Core::new(1);
    core.run_input(InputState::start());

    let view = ScreenView::default().with_help(false);
    let out = view.render(core.framebuffer(), Viewport::new(80, 30));

    // Every cell is image, no blank margin.
    for y in 0..30 {
        for x in 0..80 {
            assert_eq!(out.get(x, y).map(|c| c.ch), Some('▀'));
        }
    }
}

#[test]
fn title_screen_help_line_is_visible() {
    let core = Core::new(1);
    let out = ScreenView::default().render(core.framebuffer(), Viewport::new(100, 40));

    let found = (0..out.height()).any(|y| {
        let row: String = (0..out.width()).filter_map(|x| out.get(x, y)).map(|c| c.ch).collect();
        row.contains("q quit")
    });
    assert!(found);
}

#[test]
fn diff_after_one_step_is_smaller_than_a_full_redraw() {
    let mut gs = GameState::new(3);
    gs.run_frame(InputState::start());
    gs.grid_mut().clear();
    gs.set_food(Cell::new(2, 27));
    gs.set_power_up(None);

    let game = GameView::new();
    let view = ScreenView::new(4).with_help(false);
    let viewport = Viewport::new(160, 60);
    let before = view.render(&game.render(&gs), viewport);

    for _ in 0..8 {
        gs.run_frame(InputState::NONE);
    }
    assert_eq!(gs.snake().head(), Cell::new(21, 15));
    let after = view.render(&game.render(&gs), viewport);

    let mut full = Vec::new();
    encode_full_into(&after, &mut full).unwrap();
    let mut diff = Vec::new();
    encode_diff_into(&before, &after, &mut diff).unwrap();

    assert!(!diff.is_empty());
    assert!(diff.len() < full.len() / 4);

    let mut none = Vec::new();
    encode_diff_into(&after, &after.clone(), &mut none).unwrap();
    assert!(none.is_empty());
}
