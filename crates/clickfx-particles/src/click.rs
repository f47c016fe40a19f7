//! Press / long-press particle burst: the effect controller
//!
//! `ClickEffect` owns every piece of mutable state the effect needs: the
//! particle store, the RNG, the long-press timer and multiplier, the surface
//! bounds and the cursor. Hosts share one instance between their input
//! callbacks and their frame callback.

use crate::config::ClickConfig;
use crate::long_press::LongPress;
use crate::particle::{Particle, ParticleStore, StepParams};
use crate::rand::ParticleRng;
use clickfx_core::{Color, Result, Size, Vec2};
use clickfx_render::{Drawable, Surface};
use clickfx_runtime::{HostEvent, PointerIndicator, RuntimeSystem, Timers};

pub struct ClickEffect {
    config: ClickConfig,
    particles: ParticleStore,
    rng: ParticleRng,
    timers: Timers,
    long_press: LongPress,
    bounds: Size,
    /// Surface centre; reset on every resize
    origin: Vec2,
    cursor: Vec2,
}

impl ClickEffect {
    pub fn new(config: ClickConfig, seed: u32) -> Self {
        let particles = ParticleStore::new(config.max_particles);
        Self {
            config,
            particles,
            rng: ParticleRng::new(seed),
            timers: Timers::new(),
            long_press: LongPress::new(),
            bounds: Size::default(),
            origin: Vec2::ZERO,
            cursor: Vec2::ZERO,
        }
    }

    pub fn config(&self) -> &ClickConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn multiplier(&self) -> f32 {
        self.long_press.multiplier()
    }

    pub fn is_long_pressed(&self) -> bool {
        self.long_press.is_active()
    }

    /// Fire any timer that is due at `now_ms`
    pub fn poll_timers(&mut self, now_ms: f64) {
        for id in self.timers.fire_due(now_ms) {
            if self.long_press.on_timer(id) {
                log::debug!("[click] long press engaged at {now_ms:.0}ms");
            }
        }
    }

    /// Spawn the press burst at `position` and start the long-press timer.
    /// Returns the number of particles added.
    pub fn pointer_down(&mut self, position: Vec2, now_ms: f64) -> usize {
        self.poll_timers(now_ms);
        self.cursor = position;

        let count = self
            .rng
            .int_between(self.config.spawn_min, self.config.spawn_max);
        let spawned = self.spawn_burst(count, position, 1.0);

        let timer = self.timers.start(now_ms, self.config.long_press_ms);
        if let Some(stale) = self.long_press.press(timer) {
            self.timers.cancel(stale);
        }

        log::debug!(
            "[click] down at ({:.0}, {:.0}): spawned {spawned}",
            position.x,
            position.y
        );
        spawned
    }

    /// Cancel the long-press timer and, if the threshold was reached, spawn
    /// the charged release burst. Returns the number of particles added.
    pub fn pointer_up(&mut self, position: Vec2, now_ms: f64) -> usize {
        self.poll_timers(now_ms);
        self.cursor = position;

        let (pending, charged) = self.long_press.release();
        if let Some(timer) = pending {
            self.timers.cancel(timer);
        }

        let Some(multiplier) = charged else {
            return 0;
        };

        let bonus = multiplier.max(0.0).ceil() as u32;
        let count = self.rng.int_between(
            self.config.release_min + bonus,
            self.config.release_max + bonus,
        );
        let speed_scale = 1.0 + self.config.release_speed_scale * multiplier;
        let spawned = self.spawn_burst(count, position, speed_scale);

        log::debug!(
            "[click] long press released at ({:.0}, {:.0}) with multiplier {multiplier:.1}: spawned {spawned}",
            position.x,
            position.y
        );
        spawned
    }

    /// Track the pointer for the cursor indicator; never spawns
    pub fn pointer_move(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Adopt new surface dimensions and re-centre the origin
    pub fn resize(&mut self, size: Size) {
        self.bounds = size;
        self.origin = size.center();
    }

    /// Spawn `count` particles at `position`, speeds multiplied by `speed_scale`.
    /// Returns how many fit in the store.
    pub fn spawn_burst(&mut self, count: u32, position: Vec2, speed_scale: f32) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            let particle = self.new_particle(position, speed_scale);
            if !self.particles.push(particle) {
                log::debug!(
                    "[click] store full at {} particles, dropping {}",
                    self.particles.capacity(),
                    count as usize - spawned
                );
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Spawn at the surface origin, the default burst location
    pub fn spawn_at_origin(&mut self, count: u32) -> usize {
        self.spawn_burst(count, self.origin, 1.0)
    }

    /// One simulation step: move every particle, update the multiplier, then
    /// drop what expired.
    pub fn step(&mut self) {
        let params = StepParams {
            radius_decay: self.config.radius_decay,
            damping: self.config.damping,
            drift: self.config.drift,
        };
        for particle in self.particles.iter_mut() {
            particle.step(self.bounds, &params);
        }

        self.long_press
            .tick(self.config.multiplier_ramp, self.config.multiplier_decay);

        self.particles.retain_live(self.bounds);
    }

    fn new_particle(&mut self, position: Vec2, speed_scale: f32) -> Particle {
        let angle = self.rng.angle();
        let speed = self.rng.range(self.config.speed_min, self.config.speed_max) * speed_scale;
        let radius = self.rng.range(self.config.radius_min, self.config.radius_max);
        let color = self
            .rng
            .pick(&self.config.colors)
            .copied()
            .unwrap_or(Color::WHITE);
        Particle {
            position,
            velocity: Vec2::from_angle(angle) * speed,
            radius,
            color,
            angle,
        }
    }
}

impl RuntimeSystem for ClickEffect {
    fn initialize(&mut self, surface: Size) -> Result<()> {
        self.config.validate()?;
        self.resize(surface);
        log::info!(
            "[click] installed on {}x{} surface",
            surface.width,
            surface.height
        );
        Ok(())
    }

    fn handle_event(&mut self, event: &HostEvent, now_ms: f64) {
        match *event {
            HostEvent::PointerDown { position } => {
                self.pointer_down(position, now_ms);
            }
            HostEvent::PointerUp { position } => {
                self.pointer_up(position, now_ms);
            }
            HostEvent::PointerMove { position } => self.pointer_move(position),
            HostEvent::Resize { size } => self.resize(size),
        }
    }

    fn update(&mut self, now_ms: f64) {
        self.poll_timers(now_ms);
        self.step();
    }

    fn indicator(&self) -> Option<PointerIndicator> {
        Some(PointerIndicator {
            pressed: self.long_press.is_pressed(),
            long_press: self.long_press.is_active(),
            cursor: self.cursor,
        })
    }

    fn live_count(&self) -> usize {
        self.particles.len()
    }

    fn name(&self) -> &str {
        "click"
    }
}

impl Drawable for ClickEffect {
    fn draw(&self, surface: &mut dyn Surface) {
        for p in self.particles.iter() {
            surface.fill_circle(p.position, p.radius, p.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickfx_render::{DrawCommand, RecordingSurface};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn effect() -> ClickEffect {
        let mut fx = ClickEffect::new(ClickConfig::default(), 42);
        fx.initialize(Size::new(800.0, 600.0)).unwrap();
        fx
    }

    #[test]
    fn pointer_down_adds_exactly_the_spawned_count() {
        let mut fx = effect();
        let before = fx.particles().len();
        let spawned = fx.pointer_down(Vec2::new(100.0, 100.0), 0.0);

        assert!((15..=25).contains(&spawned));
        assert_eq!(fx.particles().len(), before + spawned);
        assert!(fx
            .particles()
            .iter()
            .all(|p| p.position == Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn click_burst_dies_out() {
        let mut fx = effect();
        fx.pointer_down(Vec2::new(100.0, 100.0), 0.0);
        fx.pointer_up(Vec2::new(100.0, 100.0), 50.0);

        for frame in 0..1000 {
            fx.update(50.0 + frame as f64 * FRAME_MS);
        }
        assert_eq!(fx.particles().len(), 0);
    }

    #[test]
    fn radius_decays_by_constant_until_removed() {
        // Equal starting radii keep every particle alive for the same number
        // of frames, so each survivor is checked on every frame
        let config = ClickConfig {
            radius_min: 3.0,
            radius_max: 3.0,
            ..ClickConfig::default()
        };
        let mut fx = ClickEffect::new(config, 42);
        fx.initialize(Size::new(800.0, 600.0)).unwrap();
        let spawned = fx.pointer_down(Vec2::new(400.0, 300.0), 0.0);
        let decay = fx.config().radius_decay;

        let mut last_frame = 0;
        for frame in 1..400 {
            fx.step();
            if fx.particles().is_empty() {
                last_frame = frame;
                break;
            }
            assert_eq!(fx.particles().len(), spawned, "frame {frame}");
            let expected = 3.0 - decay * frame as f32;
            for p in fx.particles().iter() {
                assert!(p.radius > 0.0, "frame {frame}");
                assert!((p.radius - expected).abs() < 1e-4, "frame {frame}");
            }
        }
        // 3.0 / 0.025 = 120 frames, give or take float rounding
        assert!((120..=121).contains(&last_frame), "{last_frame}");
    }

    #[test]
    fn step_removes_exactly_the_expired() {
        let mut fx = effect();
        let bounds = fx.bounds();
        let make = |x: f32, radius: f32| Particle {
            position: Vec2::new(x, 300.0),
            velocity: Vec2::ZERO,
            radius,
            color: Color::WHITE,
            angle: 0.0,
        };
        // Radius shrinks to ≤ 0 this frame
        fx.particles.push(make(100.0, 0.02));
        // Healthy
        fx.particles.push(make(200.0, 3.0));
        // Off the left edge by more than its radius
        fx.particles.push(make(-10.0, 3.0));
        // Straddling the right edge
        fx.particles.push(make(bounds.width + 1.0, 3.0));

        fx.step();

        let xs: Vec<f32> = fx.particles().iter().map(|p| p.position.x.round()).collect();
        assert_eq!(xs, vec![200.0, (bounds.width + 1.0).round()]);
    }

    #[test]
    fn short_press_has_no_release_burst() {
        let mut fx = effect();
        fx.pointer_down(Vec2::new(10.0, 10.0), 0.0);
        let before = fx.particles().len();
        assert_eq!(fx.pointer_up(Vec2::new(10.0, 10.0), 499.0), 0);
        assert_eq!(fx.particles().len(), before);
        assert!(!fx.is_long_pressed());
        // The cancelled timer must not engage later
        fx.update(2000.0);
        assert!(!fx.is_long_pressed());
    }

    #[test]
    fn long_press_release_burst_scales_with_multiplier() {
        let mut fx = effect();
        let initial = fx.pointer_down(Vec2::new(200.0, 200.0), 0.0);
        assert!((15..=25).contains(&initial));

        let mut now = 0.0;
        while now < 700.0 {
            now += FRAME_MS;
            fx.update(now);
        }
        assert!(fx.is_long_pressed());
        let m = fx.multiplier();
        assert!(m > 0.0);

        let before = fx.particles().len();
        let spawned = fx.pointer_up(Vec2::new(50.0, 50.0), now);
        let bonus = m.ceil() as usize;
        assert!((20 + bonus..=40 + bonus).contains(&spawned));
        assert_eq!(fx.particles().len(), before + spawned);
        assert!(!fx.is_long_pressed());
    }

    #[test]
    fn release_exactly_at_threshold_counts_as_long_press() {
        let mut fx = effect();
        fx.pointer_down(Vec2::new(50.0, 50.0), 1000.0);
        // No frames in between: the timer fires when the release is handled
        let spawned = fx.pointer_up(Vec2::new(50.0, 50.0), 1500.0);
        assert!((20..=40).contains(&spawned));
    }

    #[test]
    fn multiplier_monotonic_while_held_and_released() {
        let mut fx = effect();
        fx.pointer_down(Vec2::new(50.0, 50.0), 0.0);
        let mut now = 0.0;
        let mut prev = fx.multiplier();
        for _ in 0..120 {
            now += FRAME_MS;
            fx.update(now);
            assert!(fx.multiplier() >= prev);
            prev = fx.multiplier();
        }
        assert!(prev > 0.0);

        fx.pointer_up(Vec2::new(50.0, 50.0), now);
        for _ in 0..120 {
            now += FRAME_MS;
            fx.update(now);
            assert!(fx.multiplier() <= prev);
            assert!(fx.multiplier() >= 0.0);
            prev = fx.multiplier();
        }
        assert_eq!(fx.multiplier(), 0.0);
    }

    #[test]
    fn indicator_tracks_pointer_state() {
        let mut fx = effect();
        fx.pointer_move(Vec2::new(5.0, 6.0));
        let ind = fx.indicator().unwrap();
        assert!(!ind.pressed);
        assert_eq!(ind.cursor, Vec2::new(5.0, 6.0));
        assert_eq!(fx.particles().len(), 0);

        fx.pointer_down(Vec2::new(7.0, 8.0), 0.0);
        assert!(fx.indicator().unwrap().pressed);
        fx.update(600.0);
        assert!(fx.indicator().unwrap().long_press);

        fx.pointer_up(Vec2::new(7.0, 8.0), 650.0);
        let ind = fx.indicator().unwrap();
        assert!(!ind.pressed);
        assert!(!ind.long_press);
    }

    #[test]
    fn resize_recenters_origin() {
        let mut fx = effect();
        assert_eq!(fx.origin(), Vec2::new(400.0, 300.0));
        fx.handle_event(
            &HostEvent::Resize {
                size: Size::new(1000.0, 200.0),
            },
            0.0,
        );
        assert_eq!(fx.bounds(), Size::new(1000.0, 200.0));
        assert_eq!(fx.origin(), Vec2::new(500.0, 100.0));

        let spawned = fx.spawn_at_origin(3);
        assert_eq!(spawned, 3);
        assert!(fx
            .particles()
            .iter()
            .all(|p| p.position == Vec2::new(500.0, 100.0)));
    }

    #[test]
    fn store_capacity_caps_bursts() {
        let config = ClickConfig {
            max_particles: 10,
            ..ClickConfig::default()
        };
        let mut fx = ClickEffect::new(config, 1);
        fx.initialize(Size::new(100.0, 100.0)).unwrap();
        assert_eq!(fx.pointer_down(Vec2::new(50.0, 50.0), 0.0), 10);
        assert_eq!(fx.particles().len(), 10);
    }

    #[test]
    fn draw_emits_one_circle_per_particle() {
        let mut fx = effect();
        let spawned = fx.pointer_down(Vec2::new(100.0, 100.0), 0.0);
        let mut surface = RecordingSurface::new(fx.bounds());
        fx.draw(&mut surface);

        assert_eq!(surface.commands().len(), spawned);
        assert!(surface
            .commands()
            .iter()
            .all(|c| matches!(c, DrawCommand::Circle { radius, .. } if *radius >= 2.0 && *radius < 4.0)));
    }
}
