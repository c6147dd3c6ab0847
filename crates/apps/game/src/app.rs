//! Window, GL context and frame loop
//!
//! Owns everything with a GL lifetime. Input events are recorded into
//! [`InputState`] as they arrive; each redraw advances the frame clock, steps
//! the [`Game`], draws the scene and the HUD, then swaps.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context as _, anyhow};
use glam::Vec2;
use glow::*;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use wanderer_core::FrameContext;
use wanderer_devices::{Action, InputState, Key};
use wanderer_renderer::{Color, DebugRenderer, GroundPlane, SkinnedModelRenderer};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Fullscreen, Window, WindowId};

use crate::config::GameConfig;
use crate::game::Game;
use crate::hud::render_hud;
use crate::input_map::{map_key, map_mouse_button, scroll_amount};

pub struct WandererApp {
    config: GameConfig,
    game: Game,
    input: InputState,

    // Window and GL state
    window: Option<Window>,
    gl_context: Option<PossiblyCurrentContext>,
    gl_surface: Option<Surface<WindowSurface>>,
    gl: Option<Arc<Context>>,

    // egui state
    egui_ctx: Option<egui::Context>,
    egui_state: Option<egui_winit::State>,
    painter: Option<egui_glow::Painter>,

    // Scene renderers
    ground: Option<GroundPlane>,
    model_renderer: Option<SkinnedModelRenderer>,
    debug: Option<DebugRenderer>,

    // Timing
    frame: FrameContext,
    last_frame: Instant,
    fps: f32,
    frames_rendered: u64,
    frame_limit: Option<u64>,

    startup_error: Option<anyhow::Error>,
}

impl WandererApp {
    pub fn new(config: GameConfig, game: Game, frame_limit: Option<u64>) -> Self {
        let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
        Self {
            input: InputState::new(config.controls.clone()),
            config,
            game,
            window: None,
            gl_context: None,
            gl_surface: None,
            gl: None,
            egui_ctx: None,
            egui_state: None,
            painter: None,
            ground: None,
            model_renderer: None,
            debug: None,
            frame: FrameContext::new(0.0, viewport),
            last_frame: Instant::now(),
            fps: 0.0,
            frames_rendered: 0,
            frame_limit,
            startup_error: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Error that stopped the app during startup, if any
    pub fn into_result(self) -> anyhow::Result<()> {
        match self.startup_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn frame_interval(&self) -> Option<Duration> {
        match self.config.window.target_fps {
            0 => None,
            fps => Some(Duration::from_secs_f64(1.0 / fps as f64)),
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_config = &self.config.window;
        let window_attributes = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_config.width,
                window_config.height,
            ));

        let mut template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_transparency(false);
        if window_config.msaa_samples > 0 {
            template = template.with_multisampling(window_config.msaa_samples);
        }

        let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attributes));
        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("glutin offers at least one config")
            })
            .map_err(|e| anyhow!("failed to create window: {e}"))?;
        let window = window.context("display builder returned no window")?;
        tracing::info!("GL config with {} samples", gl_config.num_samples());

        let window_handle = window
            .window_handle()
            .context("window has no handle")?
            .as_raw();
        let gl_display = gl_config.display();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
            .build(Some(window_handle));
        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("failed to create GL context")?;

        let size = window.inner_size();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window_handle,
            NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
        );
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .context("failed to create window surface")?;
        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("failed to make GL context current")?;

        let gl = Arc::new(unsafe {
            Context::from_loader_function_cstr(|s| gl_display.get_proc_address(s))
        });

        let ground_config = &self.config.ground;
        let mut ground = GroundPlane::new(ground_config.tiles);
        if let Err(e) = unsafe {
            ground.init_gl(
                &gl,
                &ground_config.vertex_shader,
                &ground_config.fragment_shader,
                (ground_config.size[0], ground_config.size[1]),
                (ground_config.resolution[0], ground_config.resolution[1]),
            )
        } {
            tracing::warn!("Ground plane disabled: {e}");
        }

        let player = self.game.player();
        let mut model_renderer = SkinnedModelRenderer::new();
        unsafe { model_renderer.init_gl(&gl, &player.model().mesh.indices, player.posed_vertices()) }
            .map_err(|e| anyhow!("failed to initialize model renderer: {e}"))?;

        let mut debug = DebugRenderer::new();
        unsafe { debug.init_gl(&gl) }
            .map_err(|e| anyhow!("failed to initialize debug renderer: {e}"))?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );
        let painter = egui_glow::Painter::new(gl.clone(), "", None, false)
            .map_err(|e| anyhow!("failed to create egui painter: {e}"))?;

        tracing::info!(
            "Window {}x{} ready, model has {} vertices",
            size.width,
            size.height,
            player.posed_vertices().len()
        );

        self.window = Some(window);
        self.gl_context = Some(gl_context);
        self.gl_surface = Some(gl_surface);
        self.gl = Some(gl);
        self.ground = Some(ground);
        self.model_renderer = Some(model_renderer);
        self.debug = Some(debug);
        self.egui_ctx = Some(egui_ctx);
        self.egui_state = Some(egui_state);
        self.painter = Some(painter);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn toggle_borderless(&self) {
        let Some(window) = &self.window else {
            return;
        };
        if window.fullscreen().is_some() {
            tracing::info!("Leaving borderless fullscreen");
            window.set_fullscreen(None);
        } else {
            tracing::info!("Entering borderless fullscreen");
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.cleanup();
        event_loop.exit();
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.fps = 1.0 / delta.max(0.001);

        let size = window.inner_size();
        let viewport = Vec2::new(size.width as f32, size.height as f32);
        self.frame = if self.frames_rendered == 0 {
            FrameContext::new(delta, viewport)
        } else {
            self.frame.advance(delta, viewport)
        };

        if self.input.was_action_pressed(Action::ToggleBorderless) {
            self.toggle_borderless();
        }
        self.game.step(&self.input, &self.frame);
        self.input.end_frame();

        let (Some(window), Some(gl), Some(gl_context), Some(gl_surface)) = (
            self.window.as_ref(),
            self.gl.as_ref(),
            self.gl_context.as_ref(),
            self.gl_surface.as_ref(),
        ) else {
            return;
        };

        let camera = self.game.camera();
        let view_projection = camera.view_projection(viewport);
        let player = self.game.player();

        unsafe {
            let clear = Color::RAYWHITE;
            gl.viewport(0, 0, size.width as i32, size.height as i32);
            gl.clear_color(clear.r(), clear.g(), clear.b(), clear.a());
            gl.clear(COLOR_BUFFER_BIT | DEPTH_BUFFER_BIT);

            if let Some(ground) = &self.ground {
                ground.render(gl, view_projection, self.config.ground.y);
            }
            if let Some(debug) = self.debug.as_mut() {
                debug.grid(self.config.grid.slices, self.config.grid.spacing);
                debug.flush(gl, view_projection);
            }
            if let Some(model_renderer) = self.model_renderer.as_mut() {
                model_renderer.update_vertices(gl, player.posed_vertices());
                model_renderer.render(gl, view_projection, player.model_matrix(), Color::WHITE);
            }
            if let Some(debug) = self.debug.as_mut() {
                let (start, end) = self.game.path_line();
                debug.line(start, end, Color::BLUE);
                let (center, radius) = self.game.destination_marker();
                debug.sphere(center, radius, Color::GREEN);
                debug.flush(gl, view_projection);
            }
        }

        if let (Some(egui_ctx), Some(egui_state), Some(painter)) = (
            self.egui_ctx.as_ref(),
            self.egui_state.as_mut(),
            self.painter.as_mut(),
        ) {
            let stats = self.game.hud_stats(self.fps);
            let raw_input = egui_state.take_egui_input(window);
            let full_output = egui_ctx.run(raw_input, |ctx| render_hud(ctx, &stats));
            egui_state.handle_platform_output(window, full_output.platform_output);

            let clipped_primitives =
                egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
            painter.paint_and_update_textures(
                [size.width, size.height],
                full_output.pixels_per_point,
                &clipped_primitives,
                &full_output.textures_delta,
            );
        }

        if let Err(e) = gl_surface.swap_buffers(gl_context) {
            tracing::warn!("swap_buffers failed: {e}");
        }

        self.frames_rendered += 1;
        if self.frame_limit.is_some_and(|limit| self.frames_rendered >= limit) {
            tracing::info!("Rendered {} frames, exiting", self.frames_rendered);
            self.exit(event_loop);
        }
    }

    /// Release GL resources in reverse order of creation
    fn cleanup(&mut self) {
        tracing::info!("Cleaning up resources");

        if let Some(mut painter) = self.painter.take() {
            painter.destroy();
        }
        self.egui_state = None;
        self.egui_ctx = None;

        if let Some(gl) = &self.gl {
            unsafe {
                if let Some(mut debug) = self.debug.take() {
                    debug.destroy_gl(gl);
                }
                if let Some(mut model_renderer) = self.model_renderer.take() {
                    model_renderer.destroy_gl(gl);
                }
                if let Some(mut ground) = self.ground.take() {
                    ground.destroy_gl(gl);
                }
            }
        }

        self.gl = None;
        self.gl_surface = None;
        self.gl_context = None;
        self.window = None;
    }
}

impl ApplicationHandler for WandererApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            tracing::error!("Startup failed: {e:#}");
            self.startup_error = Some(e);
            self.exit(event_loop);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            let _ = egui_state.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => self.exit(event_loop),
            WindowEvent::Resized(size) => {
                if let (Some(gl_surface), Some(gl_context), Some(width), Some(height)) = (
                    self.gl_surface.as_ref(),
                    self.gl_context.as_ref(),
                    NonZeroU32::new(size.width),
                    NonZeroU32::new(size.height),
                ) {
                    gl_surface.resize(gl_context, width, height);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::Focused(false) => self.input.reset(),
            WindowEvent::KeyboardInput { event, .. } => {
                let Some(key) = map_key(event.physical_key) else {
                    return;
                };
                match event.state {
                    ElementState::Pressed if key == Key::Escape => self.exit(event_loop),
                    ElementState::Pressed => self.input.key_down(key),
                    ElementState::Released => self.input.key_up(key),
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = map_mouse_button(button) {
                    match state {
                        ElementState::Pressed => self.input.button_down(button),
                        ElementState::Released => self.input.button_up(button),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input
                    .mouse
                    .set_position(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => self.input.mouse.clear_position(),
            WindowEvent::MouseWheel { delta, .. } => self.input.mouse.add_scroll(scroll_amount(delta)),
            WindowEvent::RedrawRequested => self.render(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        match self.frame_interval() {
            Some(interval) => {
                let next = self.last_frame + interval;
                if Instant::now() >= next {
                    window.request_redraw();
                    event_loop.set_control_flow(ControlFlow::Wait);
                } else {
                    event_loop.set_control_flow(ControlFlow::WaitUntil(next));
                }
            }
            None => {
                window.request_redraw();
                event_loop.set_control_flow(ControlFlow::Poll);
            }
        }
    }
}
