//! Relativity Gallery - Main Entry Point
//!
//! An interactive viewer that renders artworks as seen from a relativistic
//! frame: length contraction along the motion direction, Doppler hue shift
//! and relativistic beaming, driven by a user-controlled 2D velocity.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use relativity_gallery::App;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

const WINDOW_TITLE: &str = "Relativity Gallery";
const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;
const TARGET_FPS: u32 = 60;

/// Application state machine
enum AppState {
    /// Initial state before window is created
    Uninitialized,
    /// Window and graphics context are ready
    Running { window: Arc<Window>, app: App },
}

/// Main application handler implementing winit's ApplicationHandler trait
struct RelativityGalleryApp {
    state: AppState,
    next_redraw_at: Instant,
    asset_root: PathBuf,
    mouse_down: bool,
    last_cursor: Option<(f32, f32)>,
}

impl RelativityGalleryApp {
    fn new(asset_root: PathBuf) -> Self {
        Self {
            state: AppState::Uninitialized,
            next_redraw_at: Instant::now(),
            asset_root,
            mouse_down: false,
            last_cursor: None,
        }
    }
}

impl ApplicationHandler for RelativityGalleryApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Only initialize if we haven't already
        if let AppState::Uninitialized = &self.state {
            log::info!("Creating window...");

            let window_attributes = WindowAttributes::default()
                .with_title(WINDOW_TITLE)
                .with_inner_size(LogicalSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));

            let window = Arc::new(
                event_loop
                    .create_window(window_attributes)
                    .expect("Failed to create window"),
            );

            log::info!(
                "Window created: {}x{}",
                window.inner_size().width,
                window.inner_size().height
            );

            log::info!("Initializing wgpu and egui...");
            let app = pollster::block_on(App::new(window.clone(), self.asset_root.clone()));

            log::info!("Relativity Gallery ready!");
            log::info!("Scroll to zoom, drag to pan, hold Ctrl to re-centre on the artwork");

            self.state = AppState::Running { window, app };
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Only handle events if we're running
        let AppState::Running { window, app } = &mut self.state else {
            return;
        };

        // Let egui handle the event first
        let egui_consumed = app.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }

            // Handle keyboard input (only if egui doesn't want it)
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } if !egui_consumed => match key_code {
                KeyCode::Escape => {
                    log::info!("Escape pressed, exiting...");
                    event_loop.exit();
                }
                KeyCode::F11 => {
                    let fullscreen = window.fullscreen();
                    if fullscreen.is_some() {
                        window.set_fullscreen(None);
                        log::info!("Exiting fullscreen");
                    } else {
                        window
                            .set_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
                        log::info!("Entering fullscreen");
                    }
                }
                _ => {}
            },

            WindowEvent::ModifiersChanged(modifiers) => {
                app.set_ctrl_held(modifiers.state().contains(ModifiersState::CONTROL));
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.mouse_down = state == ElementState::Pressed && !egui_consumed;
                if !self.mouse_down {
                    self.last_cursor = None;
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                if self.mouse_down && !egui_consumed {
                    if let Some((lx, ly)) = self.last_cursor {
                        app.on_pointer_dragged(x - lx, y - ly);
                    }
                    self.last_cursor = Some((x, y));
                }
                app.on_cursor_moved(x, y);
            }

            WindowEvent::MouseWheel { delta, .. } if !egui_consumed => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                app.on_scroll(amount);
            }

            WindowEvent::Resized(physical_size) => {
                app.resize(physical_size);
            }

            WindowEvent::RedrawRequested => {
                // Pick up finished background image loads
                app.update_textures();

                // Recompute the plane transform and uniforms from scratch
                app.update_frame();

                match app.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        log::warn!("Surface lost, reconfiguring...");
                        app.resize(app.size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory!");
                        event_loop.exit();
                    }
                    Err(e) => {
                        log::warn!("Surface error: {:?}", e);
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let AppState::Running { window, .. } = &mut self.state else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };

        // Drive redraws at target FPS
        let frame_duration = Duration::from_nanos(1_000_000_000u64 / TARGET_FPS as u64);
        let wake_early = Duration::from_micros(1000);
        let wake_at = self
            .next_redraw_at
            .checked_sub(wake_early)
            .unwrap_or(self.next_redraw_at);
        let now = Instant::now();

        if now >= wake_at {
            // Spin-wait for precise timing
            while Instant::now() < self.next_redraw_at {
                std::hint::spin_loop();
            }

            window.request_redraw();
            self.next_redraw_at += frame_duration;

            // Reset if too far behind
            let max_behind = frame_duration * 2;
            let now_after = Instant::now();
            if now_after > self.next_redraw_at + max_behind {
                self.next_redraw_at = now_after + frame_duration;
            }
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(wake_at));
    }
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Relativity Gallery v0.1.0");

    let asset_root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"));
    log::info!("Asset root: {}", asset_root.display());

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = RelativityGalleryApp::new(asset_root);
    event_loop.run_app(&mut app).expect("Event loop error");
}
