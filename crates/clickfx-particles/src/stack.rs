//! Ordered set of effects driven together by one host

use crate::click::ClickEffect;
use crate::color_ball::ColorBallBurst;
use crate::config::EffectsConfig;
use clickfx_core::{Result, Size};
use clickfx_render::{Drawable, Surface};
use clickfx_runtime::{FrameClock, HostEvent, PointerIndicator, RuntimeSystem};
use serde::Serialize;

/// An effect the stack can both tick and draw
pub trait Effect: RuntimeSystem + Drawable {}

impl<T: RuntimeSystem + Drawable> Effect for T {}

/// Snapshot reported after each frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameStats {
    pub frame: u64,
    pub time_ms: f64,
    /// Time since the previous frame
    pub delta_ms: f64,
    pub fps: f64,
    /// Live element count per effect, in stack order
    pub live: Vec<(String, usize)>,
    pub pressed: bool,
    pub long_press: bool,
}

impl FrameStats {
    pub fn total_live(&self) -> usize {
        self.live.iter().map(|(_, n)| n).sum()
    }
}

pub struct EffectStack {
    effects: Vec<Box<dyn Effect>>,
    clock: FrameClock,
}

impl Default for EffectStack {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectStack {
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
            clock: FrameClock::new(),
        }
    }

    /// Build the enabled effects from configuration. Each effect gets its own
    /// RNG stream derived from `seed`.
    pub fn from_config(config: &EffectsConfig, seed: u32) -> Self {
        let mut stack = Self::new();
        if config.click.enabled {
            stack.push(Box::new(ClickEffect::new(config.click.clone(), seed)));
        }
        if config.color_balls.enabled {
            stack.push(Box::new(ColorBallBurst::new(
                config.color_balls.clone(),
                seed.wrapping_mul(0x9E37_79B9).wrapping_add(1),
            )));
        }
        stack
    }

    pub fn push(&mut self, effect: Box<dyn Effect>) {
        self.effects.push(effect);
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.effects.iter().map(|e| e.name()).collect()
    }

    /// Initialize every effect against the starting surface size
    pub fn initialize(&mut self, surface: Size) -> Result<()> {
        for effect in &mut self.effects {
            effect.initialize(surface)?;
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: &HostEvent, now_ms: f64) {
        for effect in &mut self.effects {
            effect.handle_event(event, now_ms);
        }
    }

    /// Run one animation frame: update every effect, then clear the surface
    /// once and draw each effect in order.
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> FrameStats {
        self.clock.tick(now_ms);

        for effect in &mut self.effects {
            effect.update(now_ms);
        }

        surface.clear();
        for effect in &self.effects {
            effect.draw(surface);
        }

        self.stats()
    }

    /// Pointer state of the first effect that tracks one
    pub fn indicator(&self) -> Option<PointerIndicator> {
        self.effects.iter().find_map(|e| e.indicator())
    }

    pub fn stats(&self) -> FrameStats {
        let indicator = self.indicator().unwrap_or_default();
        FrameStats {
            frame: self.clock.frame_count,
            time_ms: self.clock.now_ms,
            delta_ms: self.clock.delta_ms,
            fps: self.clock.fps(),
            live: self
                .effects
                .iter()
                .map(|e| (e.name().to_string(), e.live_count()))
                .collect(),
            pressed: indicator.pressed,
            long_press: indicator.long_press,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickfx_core::Vec2;
    use clickfx_render::{DrawCommand, RecordingSurface};

    fn both_enabled() -> EffectsConfig {
        let mut config = EffectsConfig::default();
        config.color_balls.enabled = true;
        config
    }

    #[test]
    fn from_config_respects_enabled_flags() {
        let stack = EffectStack::from_config(&EffectsConfig::default(), 1);
        assert_eq!(stack.names(), vec!["click"]);

        let stack = EffectStack::from_config(&both_enabled(), 1);
        assert_eq!(stack.names(), vec!["click", "color_balls"]);

        let mut none = EffectsConfig::default();
        none.click.enabled = false;
        assert!(EffectStack::from_config(&none, 1).is_empty());
    }

    #[test]
    fn frame_clears_once_then_draws_all() {
        let size = Size::new(800.0, 600.0);
        let mut stack = EffectStack::from_config(&both_enabled(), 5);
        stack.initialize(size).unwrap();

        let at = Vec2::new(300.0, 300.0);
        stack.handle_event(&HostEvent::PointerDown { position: at }, 0.0);
        stack.handle_event(&HostEvent::PointerUp { position: at }, 100.0);

        let mut surface = RecordingSurface::new(size);
        let stats = stack.frame(116.0, &mut surface);

        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        assert_eq!(
            surface
                .commands()
                .iter()
                .filter(|c| **c == DrawCommand::Clear)
                .count(),
            1
        );
        assert_eq!(surface.circles_since_clear(), stats.total_live());
        assert_eq!(stats.live[1], ("color_balls".to_string(), 30));
        assert_eq!(stats.frame, 1);
        assert_eq!(stats.delta_ms, 0.0);
        assert!(!stats.pressed);
    }

    #[test]
    fn stats_report_frame_timing() {
        let size = Size::new(100.0, 100.0);
        let mut stack = EffectStack::from_config(&EffectsConfig::default(), 2);
        stack.initialize(size).unwrap();
        let mut surface = RecordingSurface::last_frame_only(size);

        stack.frame(1000.0, &mut surface);
        let stats = stack.frame(1020.0, &mut surface);
        assert_eq!(stats.frame, 2);
        assert!((stats.delta_ms - 20.0).abs() < 1e-9);
        assert!((stats.fps - 50.0).abs() < 1e-9);
    }

    #[test]
    fn indicator_comes_from_click_effect() {
        let mut stack = EffectStack::from_config(&EffectsConfig::default(), 3);
        stack.initialize(Size::new(100.0, 100.0)).unwrap();
        stack.handle_event(
            &HostEvent::PointerDown {
                position: Vec2::new(1.0, 2.0),
            },
            0.0,
        );
        let ind = stack.indicator().unwrap();
        assert!(ind.pressed);
        assert_eq!(ind.cursor, Vec2::new(1.0, 2.0));
        assert!(stack.stats().total_live() >= 15);
    }

    #[test]
    fn initialize_surfaces_config_errors() {
        let mut config = EffectsConfig::default();
        config.click.damping = 2.0;
        let mut stack = EffectStack::from_config(&config, 1);
        assert!(stack.initialize(Size::new(10.0, 10.0)).is_err());
    }
}
