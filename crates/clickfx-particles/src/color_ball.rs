//! Colour-ball burst: balls fly out from a click and shrink away
//!
//! Unlike the click effect this one is time-based rather than frame-based:
//! every ball follows a fixed ease-out path over `duration_ms`, so the result
//! does not depend on frame rate.

use crate::config::ColorBallConfig;
use crate::curves::{ease_out, lerp_f32};
use crate::rand::ParticleRng;
use clickfx_core::{Color, Result, Size, Vec2};
use clickfx_render::{Drawable, Surface};
use clickfx_runtime::{HostEvent, RuntimeSystem};

#[derive(Debug, Clone)]
struct Ball {
    origin: Vec2,
    /// Final displacement from `origin`
    offset: Vec2,
    color: Color,
    /// Animation start: click time plus this ball's loop delay
    start_ms: f64,
}

impl Ball {
    /// Animation progress in [0, 1]; `None` before this ball's loop starts
    fn progress(&self, now_ms: f64, duration_ms: f64) -> Option<f32> {
        let elapsed = now_ms - self.start_ms;
        if elapsed < 0.0 {
            return None;
        }
        Some((elapsed / duration_ms).min(1.0) as f32)
    }
}

pub struct ColorBallBurst {
    config: ColorBallConfig,
    balls: Vec<Ball>,
    rng: ParticleRng,
    now_ms: f64,
}

impl ColorBallBurst {
    pub fn new(config: ColorBallConfig, seed: u32) -> Self {
        Self {
            config,
            balls: Vec::new(),
            rng: ParticleRng::new(seed),
            now_ms: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Launch `max_count * play_count` balls from `position`.
    /// Returns the number launched.
    pub fn fly(&mut self, position: Vec2, now_ms: f64) -> usize {
        self.now_ms = self.now_ms.max(now_ms);
        let per_loop = self.config.max_count.max(1);
        let total = per_loop * self.config.play_count.max(1);
        let reach = self.config.spread.max(0.0) as u32;

        for i in 0..total {
            let loop_index = i / per_loop;
            let dx = self.rng.int_between(0, reach.saturating_sub(1)) as f32;
            let dy = self.rng.int_between(0, reach.saturating_sub(1)) as f32;
            let offset = Vec2::new(self.rng.signed(dx), self.rng.signed(dy));
            let color = self
                .rng
                .pick(&self.config.colors)
                .copied()
                .unwrap_or(Color::WHITE);
            self.balls.push(Ball {
                origin: position,
                offset,
                color,
                start_ms: now_ms + loop_index as f64 * self.config.loop_delay_ms,
            });
        }

        log::debug!(
            "[color_balls] launched {total} at ({:.0}, {:.0})",
            position.x,
            position.y
        );
        total as usize
    }

    /// Centre and radius of a ball at the current time, if visible
    fn placement(&self, ball: &Ball) -> Option<(Vec2, f32)> {
        let t = ball.progress(self.now_ms, self.config.duration_ms)?;
        let eased = ease_out(t);
        let center = ball.origin + ball.offset * eased;
        let radius = lerp_f32(self.config.size / 2.0, 0.0, eased);
        Some((center, radius))
    }
}

impl RuntimeSystem for ColorBallBurst {
    fn initialize(&mut self, _surface: Size) -> Result<()> {
        self.config.validate()?;
        log::info!("[color_balls] installed");
        Ok(())
    }

    fn handle_event(&mut self, event: &HostEvent, now_ms: f64) {
        if let HostEvent::PointerUp { position } = *event {
            self.fly(position, now_ms);
        }
    }

    fn update(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        let duration = self.config.duration_ms;
        self.balls
            .retain(|ball| ball.progress(now_ms, duration).map_or(true, |t| t < 1.0));
    }

    fn live_count(&self) -> usize {
        self.balls.len()
    }

    fn name(&self) -> &str {
        "color_balls"
    }
}

impl Drawable for ColorBallBurst {
    fn draw(&self, surface: &mut dyn Surface) {
        for ball in &self.balls {
            if let Some((center, radius)) = self.placement(ball) {
                surface.fill_circle(center, radius, ball.color);
            }
        }
    }
}
