//! Interactive particle field viewer built with eframe/egui.
//!
//! This module defines [`FieldApp`], which owns the simulation state
//! (particles, links, configuration, pixel surface) and implements
//! [`eframe::App`] to advance and paint the field every display frame.

use eframe::App;
use field_core::{
    config::FieldConfig,
    particle::{self, Particle},
    phases::{self, Link},
    render,
    surface::Surface,
    types::Pointer,
};
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Particles added per click, on top of the width-derived population.
const BURST_COUNT: usize = 8;

/// Main application state for the particle field window.
///
/// [`FieldApp`] glues together:
/// - The simulation core: the particle set, the per-frame [`Link`]
///   buffer, [`FieldConfig`].
/// - The CPU [`Surface`] the frames are painted onto and the egui
///   texture it is uploaded through.
/// - eframe/egui callbacks for input handling and blitting.
///
/// The typical per-frame update is:
/// 1. Track the pointer and handle clicks / panel interactions.
/// 2. If `running`, call [`FieldApp::step_once`].
/// 3. Upload the surface and draw it across the central panel.
///
/// ### Fields
/// - `cfg` - Global configuration (population, forces, palette).
/// - `particles` - Current particle set.
/// - `links` - Close pairs found in the last step, reused every frame.
/// - `pointer` - Last-known pointer position in surface coordinates.
///
/// - `surface` - Pixel buffer frames are painted onto; `None` until the
///   central panel reports a usable size.
/// - `texture` - GPU copy of the surface, recreated lazily.
///
/// - `config_path` - Where "Save config" writes the configuration.
/// - `rng` - Generator behind spawning and bursts.
///
/// - `running` - Whether the field is auto-advancing.
/// - `show_settings` - Whether the config side panel is visible.
/// - `stopped` - Set once [`FieldApp::shutdown`] has run.
///
/// - `last_frame_time` - Time stamp of the last step (egui time).
/// - `last_frame_dt` - Time delta between the last two steps (for
///   display only).
pub struct FieldApp {
    cfg: FieldConfig,
    particles: Vec<Particle>,
    links: Vec<Link>,
    pointer: Pointer,

    surface: Option<Surface>,
    texture: Option<egui::TextureHandle>,

    config_path: String,
    rng: StdRng,

    running: bool,
    show_settings: bool,
    stopped: bool,

    last_frame_time: f64,
    last_frame_dt: f64,
}

impl FieldApp {
    /// Creates a new app around a configuration and a seed.
    ///
    /// The surface and the particle set are created lazily on the first
    /// frame, once the central panel reports its size; until then the
    /// field is empty and stepping is a no-op.
    ///
    /// ### Parameters
    /// - `cfg` - Initial configuration, typically loaded from disk.
    /// - `config_path` - Where "Save config" writes the configuration.
    /// - `seed` - Seed for the particle generator.
    /// - `start_paused` - Start without auto-advancing.
    ///
    /// ### Returns
    /// A fully-initialized [`FieldApp`] ready to be passed to
    /// `eframe::run_native`.
    pub fn new(cfg: FieldConfig, config_path: String, seed: u64, start_paused: bool) -> Self {
        Self {
            cfg,
            particles: Vec::new(),
            links: Vec::new(),
            pointer: Pointer::default(),
            surface: None,
            texture: None,
            config_path,
            rng: StdRng::seed_from_u64(seed),
            running: !start_paused,
            show_settings: true,
            stopped: false,
            last_frame_time: 0.0,
            last_frame_dt: 0.0,
        }
    }

    /// Rebuilds the surface and the particle set for new dimensions.
    ///
    /// The particle count is derived from the new width, the old set is
    /// discarded, and the first frame is painted immediately so a
    /// paused app still shows the fresh field. A zero-sized surface
    /// clears everything instead; stepping resumes once the panel has a
    /// usable size again.
    fn reinit(&mut self, width: usize, height: usize) {
        self.surface = Surface::new(width, height);
        let Some(surface) = &mut self.surface else {
            self.particles.clear();
            self.links.clear();
            return;
        };

        surface.clear(render::background_color(&self.cfg));
        let bounds = surface.bounds();
        let count = self.cfg.particle_count(bounds.x);
        self.particles = particle::spawn_field(count, bounds, &self.cfg, &mut self.rng);
        phases::link_phase(&self.particles, &self.cfg, &mut self.links);
        render::paint_frame(surface, &self.particles, &self.links, self.pointer, &self.cfg);
    }

    /// Discards the particle set and respawns it at the current size.
    fn reset(&mut self) {
        let (width, height) = match &self.surface {
            Some(surface) => (surface.width(), surface.height()),
            None => return,
        };
        self.reinit(width, height);
    }

    /// Advances the field by a single frame.
    ///
    /// The step consists of:
    /// 1. [`phases::attraction_phase`] — pointer forces.
    /// 2. [`phases::motion_phase`] — integration, friction, reflection.
    /// 3. [`phases::link_phase`] — collect close pairs.
    /// 4. [`render::paint_frame`] — fade the old frame and paint.
    ///
    /// Without a surface (before the first layout, or after a zero-size
    /// resize) this does nothing.
    fn step_once(&mut self) {
        let Some(surface) = &mut self.surface else {
            return;
        };
        phases::attraction_phase(&mut self.particles, self.pointer, &self.cfg);
        phases::motion_phase(&mut self.particles, surface.bounds(), &self.cfg);
        phases::link_phase(&self.particles, &self.cfg, &mut self.links);
        render::paint_frame(surface, &self.particles, &self.links, self.pointer, &self.cfg);
    }

    /// Adds a small burst of particles at the clicked position.
    ///
    /// Burst particles get freshly randomized attributes but share one
    /// spawn point, so they fan out from under the pointer.
    fn spawn_burst(&mut self, at: Vec2) {
        let Some(surface) = &self.surface else {
            return;
        };
        let bounds = surface.bounds();
        for _ in 0..BURST_COUNT {
            let mut p = Particle::random(bounds, &self.cfg, &mut self.rng);
            p.pos = at;
            self.particles.push(p);
        }
    }

    /// Tears the field down: stops the animation and releases the
    /// surface, texture, and particle buffers. Safe to call more than
    /// once; only the first call does anything.
    fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.running = false;
        self.particles.clear();
        self.links.clear();
        self.surface = None;
        self.texture = None;
        log::debug!("particle field shut down");
    }

    /// Uploads the current surface into the egui texture.
    fn update_texture(&mut self, ctx: &egui::Context) {
        let Some(surface) = &self.surface else {
            return;
        };
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [surface.width(), surface.height()],
            surface.as_rgba(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("field", image, egui::TextureOptions::LINEAR));
            }
        }
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, settings).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    let now = ctx.input(|i| i.time);
                    if self.last_frame_time > 0.0 {
                        self.last_frame_dt = now - self.last_frame_time;
                    }
                    self.step_once();
                    self.last_frame_time = now;
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.toggle_value(&mut self.show_settings, "Settings");
            });
        });
    }

    /// Builds the bottom status bar (frame time, link and particle counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("frame = {:.1} ms", self.last_frame_dt * 1000.0));
                ui.separator();
                ui.label(format!("links = {}", self.links.len()));
                ui.label(format!("particles = {}", self.particles.len()));
                if let Some(surface) = &self.surface {
                    ui.label(format!("{}×{}", surface.width(), surface.height()));
                }
            });
        });
    }

    /// Builds the right-hand configuration panel for field parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Population");
                Self::labeled_drag_usize(ui, "max_count:", &mut self.cfg.max_count, 0..=500, 1.0);
                Self::labeled_drag_f32(
                    ui,
                    "width_per_particle:",
                    &mut self.cfg.width_per_particle,
                    1.0..=200.0,
                    1.0,
                );

                ui.separator();
                ui.label("Spawn ranges");
                Self::labeled_drag_f32(
                    ui,
                    "max_start_speed:",
                    &mut self.cfg.max_start_speed,
                    0.0..=5.0,
                    0.01,
                );
                Self::labeled_drag_f32(ui, "size_min:", &mut self.cfg.size_min, 0.0..=20.0, 0.1);
                Self::labeled_drag_f32(ui, "size_max:", &mut self.cfg.size_max, 0.0..=20.0, 0.1);
                Self::labeled_drag_f32(
                    ui,
                    "opacity_min:",
                    &mut self.cfg.opacity_min,
                    0.0..=1.0,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "opacity_max:",
                    &mut self.cfg.opacity_max,
                    0.0..=1.0,
                    0.01,
                );

                ui.separator();
                ui.label("Pointer");
                Self::labeled_drag_f32(
                    ui,
                    "attract_radius:",
                    &mut self.cfg.attract_radius,
                    0.0..=500.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "attract_strength:",
                    &mut self.cfg.attract_strength,
                    0.0..=0.5,
                    0.001,
                );
                Self::labeled_drag_f32(
                    ui,
                    "glow_radius:",
                    &mut self.cfg.glow_radius,
                    0.0..=1000.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "glow_alpha:",
                    &mut self.cfg.glow_alpha,
                    0.0..=1.0,
                    0.01,
                );

                ui.separator();
                ui.label("Motion");
                Self::labeled_drag_f32(ui, "friction:", &mut self.cfg.friction, 0.0..=1.0, 0.005);

                ui.separator();
                ui.label("Links");
                Self::labeled_drag_f32(
                    ui,
                    "link_radius:",
                    &mut self.cfg.link_radius,
                    0.0..=500.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "link_alpha:",
                    &mut self.cfg.link_alpha,
                    0.0..=1.0,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "link_width:",
                    &mut self.cfg.link_width,
                    0.0..=2.0,
                    0.01,
                );

                ui.separator();
                ui.label("Trail");
                Self::labeled_drag_f32(
                    ui,
                    "fade_alpha:",
                    &mut self.cfg.fade_alpha,
                    0.0..=1.0,
                    0.01,
                );

                ui.separator();
                ui.label("Palette");
                Self::labeled_drag_f32(
                    ui,
                    "hue_primary:",
                    &mut self.cfg.hue_primary,
                    0.0..=360.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "hue_secondary:",
                    &mut self.cfg.hue_secondary,
                    0.0..=360.0,
                    1.0,
                );

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = FieldConfig::default();
                }
                if ui.button("Save config").clicked() {
                    match self.cfg.save(&self.config_path) {
                        Ok(()) => log::info!("saved config to {}", self.config_path),
                        Err(err) => log::warn!("could not save config: {err}"),
                    }
                }
            });
    }

    /// Builds the central panel the field is drawn into and tracks the
    /// pointer over it.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::click());
                let rect = response.rect;

                // Match the surface to the panel, regenerating on resize.
                let width = rect.width().max(0.0) as usize;
                let height = rect.height().max(0.0) as usize;
                let fits = match &self.surface {
                    Some(surface) => surface.width() == width && surface.height() == height,
                    None => false,
                };
                if !fits {
                    self.reinit(width, height);
                }

                // The pointer keeps its last position when the cursor
                // leaves the panel.
                if let Some(pos) = response.hover_pos() {
                    self.pointer.pos = Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);
                }
                if response.clicked() {
                    self.spawn_burst(self.pointer.pos);
                }

                // Auto-advance once per display frame while running.
                if self.running {
                    let now = ctx.input(|i| i.time);
                    if self.last_frame_time > 0.0 {
                        self.last_frame_dt = now - self.last_frame_time;
                    }
                    self.step_once();
                    self.last_frame_time = now;

                    ctx.request_repaint();
                }

                self.update_texture(ctx);
                if let Some(texture) = &self.texture {
                    let painter = ui.painter_at(rect);
                    painter.image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
            });
    }
}

impl App for FieldApp {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// This method:
    /// - Renders the top control bar and status bar.
    /// - Renders the config side panel when it is toggled on.
    /// - Draws the field in the central panel and handles interactions.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        if self.show_settings {
            self.ui_config_panel(ctx);
        }
        self.ui_central_panel(ctx);
    }

    /// Tears the field down when the window closes.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shutdown();
    }
}

impl Drop for FieldApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> FieldApp {
        FieldApp::new(FieldConfig::default(), "unused.json".into(), 5, true)
    }

    #[test]
    fn reinit_spawns_the_width_derived_count() {
        let mut app = test_app();

        app.reinit(1600, 900);
        assert_eq!(app.particles.len(), 80);

        app.reinit(400, 300);
        assert_eq!(app.particles.len(), 20);

        // Wide surfaces cap at max_count.
        app.reinit(3000, 200);
        assert_eq!(app.particles.len(), 80);
    }

    #[test]
    fn reinit_discards_the_previous_field() {
        let mut app = test_app();
        app.reinit(800, 600);
        let before = app.particles.clone();

        app.reinit(800, 600);

        // Same count, fresh draws from the generator.
        assert_eq!(app.particles.len(), before.len());
        assert_ne!(app.particles, before);
    }

    #[test]
    fn reinit_with_zero_area_clears_the_field() {
        let mut app = test_app();
        app.reinit(800, 600);
        assert!(!app.particles.is_empty());

        app.reinit(0, 600);

        assert!(app.surface.is_none());
        assert!(app.particles.is_empty());
        assert!(app.links.is_empty());
    }

    #[test]
    fn stepping_without_a_surface_is_a_no_op() {
        let mut app = test_app();

        app.step_once();

        assert!(app.surface.is_none());
        assert!(app.particles.is_empty());
    }

    #[test]
    fn step_once_advances_the_field() {
        let mut app = test_app();
        app.reinit(400, 300);
        let before = app.particles.clone();

        app.step_once();

        assert_eq!(app.particles.len(), before.len());
        assert_ne!(app.particles, before);
    }

    #[test]
    fn pointer_starts_at_the_origin() {
        let app = test_app();

        assert_eq!(app.pointer, Pointer::default());
        assert_eq!(app.pointer.pos, Vec2::ZERO);
    }

    #[test]
    fn spawn_burst_appends_at_the_given_position() {
        let mut app = test_app();
        app.reinit(800, 600);
        let base = app.particles.len();

        let at = Vec2::new(123.0, 45.0);
        app.spawn_burst(at);

        assert_eq!(app.particles.len(), base + BURST_COUNT);
        for p in &app.particles[base..] {
            assert_eq!(p.pos, at);
        }
    }

    #[test]
    fn reset_restores_the_width_derived_count() {
        let mut app = test_app();
        app.reinit(800, 600);
        let derived = app.particles.len();

        app.spawn_burst(Vec2::new(10.0, 10.0));
        assert_eq!(app.particles.len(), derived + BURST_COUNT);

        app.reset();

        assert_eq!(app.particles.len(), derived);
    }

    #[test]
    fn shutdown_twice_is_safe() {
        let mut app = test_app();
        app.reinit(800, 600);

        app.shutdown();
        app.shutdown();

        assert!(app.stopped);
        assert!(!app.running);
        assert!(app.surface.is_none());
        assert!(app.particles.is_empty());

        // Stepping after shutdown stays a no-op.
        app.step_once();
        assert!(app.particles.is_empty());
    }
}
