//! Island Brawl entry point
//!
//! Native builds run a headless session from the command line; wasm builds
//! drive the game on a 2D canvas.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

    use island_brawl::consts::*;
    use island_brawl::platform::{FrameClock, key_down, key_up};
    use island_brawl::sim::state::COIN_RADIUS;
    use island_brawl::sim::{
        GameEvent, GamePhase, GameState, InputState, autopilot_input, dismiss, restart, start,
        toggle_pause,
    };
    use island_brawl::{HudView, Overlay};

    const SKY_COLOR: &str = "#87ceeb";
    const SAND_COLOR: &str = "#e2c275";
    const PLAYER_COLOR: &str = "#2f6fdf";
    const COIN_COLOR: &str = "#ffd700";
    const LABEL_FONT: &str = "12px sans-serif";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        clock: FrameClock,
        ctx: CanvasRenderingContext2d,
        document: Document,
        last_time: f64,
        /// Attract mode: the autopilot plays instead of the keyboard
        autoplay: bool,
    }

    impl Game {
        fn new(seed: u64, ctx: CanvasRenderingContext2d, document: Document) -> Self {
            Self {
                state: GameState::new(seed),
                input: InputState::new(),
                clock: FrameClock::new(),
                ctx,
                document,
                last_time: 0.0,
                autoplay: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            if self.autoplay {
                self.clock.drive_with(&mut self.state, dt, autopilot_input);
            } else {
                self.clock.drive(&mut self.state, &mut self.input, dt);
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::SessionEnded {
                        reason,
                        score,
                        coins,
                    } => log::info!("{:?}: score {}, coins {}", reason, score, coins),
                    other => log::debug!("{:?}", other),
                }
            }
        }

        /// Start a fresh session from the start screen or a terminal overlay
        fn begin(&mut self) {
            self.input.clear();
            self.clock.reset();
            match self.state.phase {
                GamePhase::Start => start(&mut self.state),
                GamePhase::GameOver | GamePhase::DemoExpired => restart(&mut self.state),
                _ => {}
            }
        }

        fn auto_pause(&mut self, why: &str) {
            self.input.clear();
            if self.state.phase == GamePhase::Playing {
                toggle_pause(&mut self.state);
                log::info!("Auto-paused ({})", why);
            }
        }

        /// Render the current frame
        fn render(&self) {
            let ctx = &self.ctx;
            let state = &self.state;

            ctx.set_fill_style_str(SKY_COLOR);
            ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH as f64, GROUND_LEVEL as f64);
            ctx.set_fill_style_str(SAND_COLOR);
            ctx.fill_rect(
                0.0,
                GROUND_LEVEL as f64,
                CANVAS_WIDTH as f64,
                (CANVAS_HEIGHT - GROUND_LEVEL) as f64,
            );

            for coin in &state.coins {
                ctx.set_fill_style_str(COIN_COLOR);
                ctx.begin_path();
                let _ = ctx.arc(
                    coin.pos.x as f64,
                    coin.pos.y as f64,
                    COIN_RADIUS as f64,
                    0.0,
                    TAU,
                );
                ctx.fill();
            }

            ctx.set_font(LABEL_FONT);
            for power_up in &state.power_ups {
                let size = power_up.kind.size() as f64;
                ctx.set_fill_style_str(power_up.kind.color());
                ctx.fill_rect(
                    power_up.pos.x as f64 - size / 2.0,
                    power_up.pos.y as f64 - size / 2.0,
                    size,
                    size,
                );
                let _ = ctx.fill_text(
                    power_up.kind.name(),
                    power_up.pos.x as f64 - size / 2.0,
                    power_up.pos.y as f64 - size / 2.0 - 4.0,
                );
            }

            for enemy in &state.enemies {
                let (x, y) = (enemy.pos.x as f64, enemy.pos.y as f64);
                let (w, h) = (enemy.size.x as f64, enemy.size.y as f64);
                ctx.set_fill_style_str(enemy.kind.template().color);
                ctx.fill_rect(x, y, w, h);
                // Health bar
                let fill = enemy.health as f64 / enemy.max_health.max(1) as f64;
                ctx.set_fill_style_str("#400");
                ctx.fill_rect(x, y - 10.0, w, 5.0);
                ctx.set_fill_style_str("#e33");
                ctx.fill_rect(x, y - 10.0, w * fill, 5.0);
            }

            let player = &state.player;
            // Blink while invincible
            let visible = !player.invincible || (state.time_ticks / 4) % 2 == 0;
            if visible {
                ctx.set_fill_style_str(PLAYER_COLOR);
                ctx.fill_rect(
                    player.pos.x as f64,
                    player.pos.y as f64,
                    player.size.x as f64,
                    player.size.y as f64,
                );
            }
            if player.attacking {
                let reach = player.reach_box(state.tuning.attack_range);
                ctx.set_global_alpha(0.35);
                ctx.set_fill_style_str("#fff");
                ctx.fill_rect(
                    reach.min.x as f64,
                    reach.min.y as f64,
                    reach.size.x as f64,
                    reach.size.y as f64,
                );
                ctx.set_global_alpha(1.0);
            }

            let life = state.tuning.particle_life.max(1) as f64;
            for particle in &state.particles {
                ctx.set_global_alpha(particle.life as f64 / life);
                ctx.set_fill_style_str(particle.color.hex());
                ctx.fill_rect(particle.pos.x as f64 - 2.0, particle.pos.y as f64 - 2.0, 4.0, 4.0);
            }
            ctx.set_global_alpha(1.0);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let hud = HudView::from_state(&self.state);
            let set_text = |id: &str, text: &str| {
                if let Some(el) = self.document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };

            set_text("hud-health", &format!("{}/{}", hud.health, hud.max_health));
            set_text("hud-coins", &hud.coins.to_string());
            set_text("hud-score", &hud.score.to_string());
            set_text("hud-level", &hud.level.to_string());
            set_text("hud-time", &hud.time_text);

            if let Some(el) = self.document.get_element_by_id("hud-health-bar") {
                let width = format!("width: {:.0}%", hud.health_fraction() * 100.0);
                let _ = el.set_attribute("style", &width);
            }

            if let Some(el) = self.document.get_element_by_id("overlay") {
                let class = if hud.overlay == Overlay::None { "hidden" } else { "" };
                let _ = el.set_attribute("class", class);
            }
            set_text("overlay-title", hud.overlay.title().unwrap_or_default());
            if let Some(el) = self.document.get_element_by_id("final-stats") {
                if hud.overlay.shows_totals() {
                    let _ = el.set_attribute("class", "");
                    set_text("final-score", &hud.score.to_string());
                    set_text("final-coins", &hud.coins.to_string());
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Island Brawl starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, ctx, document.clone())));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        request_animation_frame(game);

        log::info!("Island Brawl running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                match key.as_str() {
                    "Enter" => g.begin(),
                    "Escape" | "p" | "P" => {
                        g.input.clear();
                        toggle_pause(&mut g.state);
                    }
                    "i" | "I" => {
                        // Drop presses queued while the autopilot had control
                        g.input.clear();
                        g.autoplay = !g.autoplay;
                        log::info!("Autoplay: {}", g.autoplay);
                    }
                    _ => {
                        if key_down(&mut g.input, &key) {
                            // Keep arrows and space from scrolling the page
                            event.prevent_default();
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                key_up(&mut game.borrow_mut().input, &event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let bind = |id: &str, action: fn(&mut Game)| {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    action(&mut game.borrow_mut());
                });
                let _ = btn
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        };

        bind("start-btn", |g| g.begin());
        bind("restart-btn", |g| g.begin());
        bind("resume-btn", |g| {
            toggle_pause(&mut g.state);
        });
        bind("dismiss-btn", |g| {
            dismiss(&mut g.state);
        });
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().auto_pause("window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::{fs, path::PathBuf};

    use anyhow::{Context, Result};
    use clap::Parser;

    use island_brawl::consts::FRAMES_PER_SECOND;
    use island_brawl::sim::{
        GameEvent, GameState, TickInput, autopilot_input, start, tick, tick_second,
    };
    use island_brawl::{HudView, Tuning};

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Run a headless Island Brawl session", long_about = None)]
    pub struct Args {
        /// RNG seed; equal seeds replay identically
        #[arg(long, default_value_t = 12345)]
        seed: u64,
        /// JSON file with balance overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Feed idle input instead of the autopilot
        #[arg(long)]
        no_autoplay: bool,
        /// Stop after this many simulated seconds
        #[arg(long)]
        max_seconds: Option<u32>,
        /// Print the final HUD as JSON
        #[arg(long)]
        json: bool,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let text = fs::read_to_string(path).with_context(|| format!("read tuning {:?}", path))?;
        Tuning::from_json(&text).with_context(|| format!("parse tuning {:?}", path))
    }

    #[derive(Debug, Default)]
    struct Tally {
        defeated: u32,
        hits_taken: u32,
        pickups: u32,
    }

    pub fn run(args: Args) -> Result<()> {
        let tuning = load_tuning(args.tuning.as_ref())?;
        let mut state = GameState::with_tuning(args.seed, tuning);
        start(&mut state);

        let limit = args.max_seconds.unwrap_or(u32::MAX);
        let mut seconds = 0;
        let mut tally = Tally::default();
        while !state.phase.is_terminal() && seconds < limit {
            for _ in 0..FRAMES_PER_SECOND {
                let input = if args.no_autoplay {
                    TickInput::default()
                } else {
                    autopilot_input(&state)
                };
                tick(&mut state, &input);
            }
            tick_second(&mut state);
            seconds += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::EnemyDefeated { .. } => tally.defeated += 1,
                    GameEvent::PlayerHit { .. } => tally.hits_taken += 1,
                    GameEvent::CoinCollected { .. } | GameEvent::PowerUpCollected { .. } => {
                        tally.pickups += 1
                    }
                    _ => {}
                }
                log::debug!("t={}s {:?}", seconds, event);
            }
        }

        log::info!(
            "Finished in {:?} after {}s (seed {}): {:?}",
            state.phase,
            seconds,
            args.seed,
            tally
        );

        let hud = HudView::from_state(&state);
        if args.json {
            println!("{}", hud.to_json().context("serialize HUD")?);
        } else {
            println!(
                "{:?} at {}: score {}, coins {}, health {}/{}, enemies defeated {}",
                state.phase,
                hud.time_text,
                hud.score,
                hud.coins,
                hud.health,
                hud.max_health,
                tally.defeated
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Island Brawl (native) starting...");
    headless::run(headless::Args::parse())
}
