//! Cardforge demo
//!
//! Runs a short scripted session headlessly: two cards, a hover, a drag,
//! some XP, and logs the result. `RUST_LOG=debug` shows level-ups and
//! redraws.
//!
//! Usage: `cardforge [settings.json] [seed]`

use std::process;

use glam::{UVec2, Vec2};

use cardforge::assets::MemoryLoader;
use cardforge::card::{InputEvent, PointerButton};
use cardforge::renderer::{Image, Rgba, SwatchIcons};
use cardforge::{Board, CardConfig, CardFactory, CardKind, CardSpec, Settings};

const SCREEN: UVec2 = UVec2::new(640, 480);
const CARD_SIZE: UVec2 = UVec2::new(100, 125);
const FACE_IMAGE: &str = "Assets/cardFront.png";
const SESSION_FRAMES: u32 = 96;

/// Pointer position and events for one scripted frame
fn script(frame: u32) -> (Vec2, Vec<InputEvent>) {
    let press = InputEvent::Press {
        button: PointerButton::Primary,
    };
    let release = InputEvent::Release {
        button: PointerButton::Primary,
    };
    match frame {
        // Drift onto the first card
        0..=9 => (Vec2::new(40.0 + frame as f32 * 6.0, 100.0), vec![InputEvent::Move]),
        10 => (Vec2::new(100.0, 100.0), vec![press]),
        // Drag it down and right
        11..=40 => {
            let t = (frame - 10) as f32 / 30.0;
            let pointer = Vec2::new(100.0, 100.0).lerp(Vec2::new(200.0, 300.0), t);
            (pointer, vec![InputEvent::Move])
        }
        41 => (Vec2::new(200.0, 300.0), vec![release]),
        f if f == SESSION_FRAMES - 1 => (Vec2::new(200.0, 300.0), vec![InputEvent::Quit]),
        _ => (Vec2::new(200.0, 300.0), Vec::new()),
    }
}

fn main() {
    env_logger::init();
    log::info!("Cardforge demo starting...");

    let mut args = std::env::args().skip(1);
    let settings = args.next().map(Settings::load).unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());

    let config = match &settings.card_config {
        Some(path) => match CardConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load card config {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => CardConfig::default(),
    };

    // No decoder is wired in, so faces fall back to the placeholder
    let loader = MemoryLoader::new();
    let factory = match seed {
        Some(seed) => CardFactory::with_seed(config, loader, seed),
        None => CardFactory::new(config, loader),
    };
    let mut factory = match factory {
        Ok(factory) => factory,
        Err(e) => {
            log::error!("Invalid card config: {e}");
            process::exit(1);
        }
    };

    let mut board = Board::new();
    for (x, kind) in [(100.0, CardKind::Standard), (300.0, CardKind::Bonus)] {
        let spec = CardSpec::new(Vec2::new(x, 100.0), CARD_SIZE)
            .kind(kind)
            .face_image(FACE_IMAGE);
        board.add(factory.create(spec));
    }

    let dt = settings.frame_dt();
    log::info!("Running at {} fps", settings.frame_rate);
    let mut screen = Image::new(SCREEN.x, SCREEN.y);
    let mut icons = SwatchIcons::default();

    for frame in 0..SESSION_FRAMES {
        let (pointer, events) = script(frame);

        match frame {
            45 => {
                if let Some(card) = board.get_mut(2) {
                    let summary = card.gain_xp(250u32);
                    log::info!(
                        "Card {} gained {} level(s)",
                        card.id(),
                        summary.levels_gained()
                    );
                }
            }
            50 => {
                if let Some(card) = board.get_mut(1) {
                    card.flip();
                }
                if let Some(card) = board.get_mut(2) {
                    card.set_rotation(15.0, true);
                }
            }
            _ => {}
        }

        screen.fill(Rgba::BLACK);
        board.frame(&events, pointer, dt, &mut screen, &mut icons);

        if events.contains(&InputEvent::Quit) {
            log::info!("Quit after {} frames", frame + 1);
            break;
        }
    }

    let screen = screen.tinted(settings.brightness_dye());
    log::info!("Final frame: {} bytes", screen.as_bytes().len());

    for card in board.iter() {
        let stats = card.stats();
        log::info!(
            "{} #{} [{} {}] at ({:.1}, {:.1}) angle {:.1} | L{} XP {}/{} ATK {} HP {} DEF {} | redraws {}{}",
            card.name(),
            card.id(),
            card.rarity(),
            card.kind(),
            card.position().x,
            card.position().y,
            card.angle(),
            stats.level(),
            stats.xp,
            stats.max_xp(),
            stats.attack,
            stats.health,
            stats.defense,
            card.redraws(),
            stats
                .special_ability
                .as_deref()
                .map(|a| format!(" | {a}"))
                .unwrap_or_default()
        );
    }
}
