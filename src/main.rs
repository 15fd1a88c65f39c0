// What you SEE now:
// • A question picture. Click on every danger hidden in it; the HUD counts
//   "Found X out of Y" and flashes Correct!/Nope... at each click.
// • Once everything is found, A shows the answer, E the explanation,
//   N (or Space) moves on. After the last step the deck is reshuffled.
// • ESC quits. RUST_LOG=debug logs every click with its sampled mask colour.

mod assets;
mod config;
mod draw;
mod error;
mod feedback;
mod model;
mod quiz;
mod sampler;
mod types;
mod view;

use assets::AssetStore;
use config::AppConfig;
use draw::{darken_band, draw_crosshair, draw_text_5x7, wrap_text, Drawer, GLYPH_ADVANCE, LINE_HEIGHT};
use env_logger::Env;
use error::Error;
use feedback::{Feedback, Outcome};
use log::{debug, error, info};
use quiz::QuizFlowState;
use std::time::Instant;
use types::FrameBuffer;
use view::{Action, Screen};

const PLACEHOLDER_SIZE: (usize, usize) = (480, 360);
const PLACEHOLDER_RGB: u32 = 0x00_30_30_30;
const HUD_RGB: u32 = 0x00_FF_FF_FF;
const HINT_RGB: u32 = 0x00_FF_CC_33;
const MARGIN: i32 = 6;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    /* --- Config + deck ---
       Nothing on screen yet; bad config or a broken deck file stops here. */
    let cfg = AppConfig::from_env()?;
    let deck = match &cfg.deck_path {
        Some(path) => {
            info!("Loading deck from {}", path.display());
            model::load_deck(path)?
        }
        None => model::reference_deck(),
    };

    /* --- Pictures ---
       Missing pictures are logged here and later shown as a grey placeholder. */
    let mut assets = AssetStore::new(&cfg.asset_dir);
    assets.preload(&deck);

    let mut state = QuizFlowState::new(cfg.palette.iter().copied(), deck)?;

    /* --- Window sized to the first picture --- */
    let mut shown = ShownImage::load(&mut assets, Screen::of(&state).image);
    let mut drawer = Drawer::new(&cfg.window_title, shown.frame.width, shown.frame.height)?;

    let mut feedback = Feedback::new(32);
    let mut last_frame_time = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32(); // drives marker fading
        last_frame_time = now;

        /* 1) Click -> mask colour -> quiz. Only while a mask is on screen. */
        let mask_id = Screen::of(&state).mask.map(str::to_owned);
        if let Some(pos) = drawer.clicked() {
            if let Some(mask_id) = &mask_id {
                handle_tap(&mut state, &mut assets, &mut feedback, mask_id, pos, drawer.size());
            }
        }

        /* 2) Keys. Read the phase again so a click that just finished the
           question already unlocks A in this frame. */
        let allowed = Screen::of(&state).actions;
        let pressed: Vec<Action> = [
            (drawer.a_pressed_once(), Action::ShowAnswer),
            (drawer.e_pressed_once(), Action::ShowExplanation),
            (drawer.next_pressed_once(), Action::NextStep),
        ]
        .into_iter()
        .filter_map(|(down, action)| down.then_some(action))
        .collect();
        if let Some(action) = Action::first_allowed(&pressed, &allowed) {
            debug!("{action:?}");
            action.apply(&mut state);
            feedback.clear();
        }

        /* 3) Re-read the state and build this frame. */
        let screen = Screen::of(&state);
        if shown.id != screen.image {
            shown = ShownImage::load(&mut assets, screen.image);
        }
        let mut frame = shown.frame.clone();

        feedback.update_and_render(&mut frame, dt);

        if screen.accepts_taps() {
            if let Some(pos) = drawer.mouse_pos() {
                let (x, y) = sampler::map_to_buffer(pos, drawer.size(), (frame.width as u32, frame.height as u32));
                draw_crosshair(&mut frame, x as i32, y as i32, 8, HINT_RGB);
            }
        }

        draw_hud(&mut frame, &screen, feedback.latest());

        /* 4) Present to the window. */
        drawer.present(&frame)?;
    }

    info!("Bye");
    Ok(())
}

/// The picture currently on screen, converted once per phase change.
struct ShownImage {
    id: String,
    frame: FrameBuffer,
}

impl ShownImage {
    fn load(assets: &mut AssetStore, id: &str) -> Self {
        let frame = assets.frame(id).unwrap_or_else(|e| {
            error!("{e}");
            FrameBuffer::filled(PLACEHOLDER_SIZE.0, PLACEHOLDER_SIZE.1, PLACEHOLDER_RGB)
        });
        Self { id: id.to_string(), frame }
    }
}

/// Window position -> mask pixel -> colour -> `register_selected_color`.
fn handle_tap(
    state: &mut QuizFlowState,
    assets: &mut AssetStore,
    feedback: &mut Feedback,
    mask_id: &str,
    pos: (f32, f32),
    window_size: (usize, usize),
) {
    let mask = match assets.image(mask_id) {
        Ok(mask) => mask,
        Err(e) => {
            // Without a mask every click is a miss.
            error!("{e}");
            return;
        }
    };

    let (x, y) = sampler::map_to_buffer(pos, window_size, mask.dimensions());
    let color = sampler::color_at(mask, x, y);
    let hit = state.register_selected_color(color) || state.found_colors().contains(&color);
    debug!("Click at ({x:.1}, {y:.1}) -> {color:?} hit={hit}");

    feedback.spawn(x, y, if hit { Outcome::Hit } else { Outcome::Miss });
}

/// Caption, counter, wrapped text at the top; key hints at the bottom.
fn draw_hud(frame: &mut FrameBuffer, screen: &Screen, latest: Option<Outcome>) {
    let max_chars = (frame.width.saturating_sub(2 * MARGIN as usize) / GLYPH_ADVANCE).max(1);

    let mut lines = Vec::new();
    let position = format!("{}/{}", screen.step.0, screen.step.1);
    let headline = [Some(position), screen.caption.map(str::to_owned), screen.dangers_found.clone()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" | ");
    lines.push((headline, HUD_RGB));
    if let Some(text) = screen.text {
        lines.extend(wrap_text(text, max_chars).into_iter().map(|l| (l, HUD_RGB)));
    }
    if let Some(outcome) = latest {
        lines.push((outcome.message().to_string(), HINT_RGB));
    }

    darken_band(frame, 0, lines.len() * LINE_HEIGHT + 2 * MARGIN as usize);
    for (i, (line, color)) in lines.iter().enumerate() {
        draw_text_5x7(frame, MARGIN, MARGIN + (i * LINE_HEIGHT) as i32, line, *color);
    }

    let hints = screen
        .actions
        .iter()
        .map(|a| a.hint())
        .chain(["Esc: quit"])
        .collect::<Vec<_>>()
        .join("  ");
    let y = frame.height.saturating_sub(LINE_HEIGHT + MARGIN as usize);
    darken_band(frame, y.saturating_sub(MARGIN as usize / 2), LINE_HEIGHT + MARGIN as usize);
    draw_text_5x7(frame, MARGIN, y as i32, &hints, HINT_RGB);
}
