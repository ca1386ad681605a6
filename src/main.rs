//! Asteroids Demo entry point
//!
//! Handles platform-specific initialization and runs the frame loop.
//! Web builds render to a canvas with WebGPU; native builds have no window
//! backend and run a headless attract loop flown by the autopilot.

use asteroids_demo::sim::WorldEvent;

/// Host-side reaction to simulation events
fn log_event(event: &WorldEvent) {
    match event {
        WorldEvent::BulletFired { pos } => log::debug!("Bullet fired from {:?}", pos),
        WorldEvent::ShipReset { hit_at } => log::info!("Ship hit at {:?}, respawning", hit_at),
        WorldEvent::AsteroidDestroyed { pos, radius } => {
            log::info!("Asteroid (r={}) destroyed at {:?}", radius, pos)
        }
    }
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use asteroids_demo::consts::*;
    use asteroids_demo::renderer::{LineRenderState, RenderError, world_lines};
    use asteroids_demo::settings::Settings;
    use asteroids_demo::sim::{Keys, World, apply_key, step_frame};

    /// Game instance holding all host state
    struct Game {
        world: World,
        settings: Settings,
        render_state: Option<LineRenderState>,
        keys: Keys,
        /// Last `requestAnimationFrame` timestamp (ms)
        last_time: f64,
        running: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        last_fps_log: f64,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            Self {
                world: World::new(),
                settings,
                render_state: None,
                keys: Keys::default(),
                last_time: 0.0,
                running: true,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_fps_log: 0.0,
            }
        }

        /// Run one simulation step for this frame
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(MAX_FRAME_DT);
            let intent = step_frame(&mut self.world, &self.keys, time / 1000.0, dt);

            for event in self.world.drain_events() {
                super::log_event(&event);
            }

            if intent.quit {
                log::info!("Quit requested");
                self.running = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            if self.settings.show_fps && time - self.last_fps_log >= 1000.0 {
                log::info!("FPS: {}", self.fps);
                self.last_fps_log = time;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = world_lines(&self.world, self.settings.palette);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                        self.running = false;
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Asteroids demo starting...");

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(settings)));

        let render_state = match init_renderer().await {
            Ok(state) => state,
            Err(e) => {
                log::error!("Graphics initialization failed: {}", e);
                return;
            }
        };
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Asteroids demo running!");
    }

    /// Find the canvas and bring up WebGPU on it
    async fn init_renderer() -> Result<LineRenderState, RenderError> {
        let window = web_sys::window().ok_or(RenderError::UnsupportedSurface)?;
        let document = window.document().ok_or(RenderError::UnsupportedSurface)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(RenderError::UnsupportedSurface)?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let world_size = glam::Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);
        LineRenderState::new(surface, &adapter, width, height, world_size).await
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if apply_key(&mut g.keys, &key, true) {
                    event.prevent_default();
                } else if key == "p" || key == "P" {
                    g.settings.palette = g.settings.palette.next();
                    g.settings.save();
                    log::info!("Palette: {}", g.settings.palette.as_str());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if apply_key(&mut g.keys, &event.key(), false) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events never arrive, so drop everything held
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.release_keys_on_blur {
                    g.keys = Keys::default();
                    log::info!("Released keys (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
        let running = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                1.0 / REFERENCE_HZ
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.running
        };

        if running {
            request_animation_frame(game);
        } else {
            log::info!("Asteroids demo stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroids demo (native) starting...");
    log::info!("Native mode has no window backend - running headless attract loop");

    let settings = asteroids_demo::Settings::load();
    run_headless(&settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Fixed-rate frame loop flown by the autopilot, with no presentation surface
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(settings: &asteroids_demo::Settings) {
    use asteroids_demo::autopilot::run_attract;
    use asteroids_demo::consts::REFERENCE_HZ;
    use asteroids_demo::renderer::world_lines;
    use asteroids_demo::sim::World;

    let mut frame = 0u64;
    let run = run_attract(World::new(), settings.demo_frames, 1.0 / REFERENCE_HZ, |world, events| {
        frame += 1;
        for event in events {
            log_event(event);
        }
        let vertices = world_lines(world, settings.palette);
        log::trace!("Frame {}: {} line vertices", frame, vertices.len());
    });

    if run.cleared {
        log::info!("Field cleared after {} frames ({:.1}s)", run.frames, run.elapsed);
    }
    log::info!(
        "Headless run finished: {} shots fired, {} asteroids left, {} bullets in flight",
        run.shots_fired,
        run.world.asteroids.len(),
        run.world.bullets.len()
    );
}
