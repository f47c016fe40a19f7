//! Scripted pointer sessions played back against a headless surface

use clickfx_core::{FxError, Result, Size, Vec2};
use clickfx_particles::{EffectStack, EffectsConfig, FrameStats};
use clickfx_render::Surface;
use clickfx_runtime::{run_every_frame, HostEvent, ManualScheduler};
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

/// Sample session written by `clickfx init`
pub const SAMPLE_SESSION_TOML: &str = r#"# Pointer session replayed by `clickfx simulate` and `clickfx render`.
frame_ms = 16.667

[surface]
width = 800
height = 600

# Quick click
[[events]]
at_ms = 0
kind = "down"
x = 200
y = 200

[[events]]
at_ms = 120
kind = "up"
x = 200
y = 200

# Long press, released somewhere else
[[events]]
at_ms = 1000
kind = "down"
x = 400
y = 300

[[events]]
at_ms = 1500
kind = "move"
x = 450
y = 320

[[events]]
at_ms = 2200
kind = "up"
x = 500
y = 350
"#;

fn default_frame_ms() -> f64 {
    1000.0 / 60.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurfaceDef {
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceDef {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Down,
    Up,
    Move,
    Resize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptEvent {
    pub at_ms: f64,
    pub kind: EventKind,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl ScriptEvent {
    pub fn to_host_event(&self) -> Result<HostEvent> {
        let position = Vec2::new(self.x, self.y);
        Ok(match self.kind {
            EventKind::Down => HostEvent::PointerDown { position },
            EventKind::Up => HostEvent::PointerUp { position },
            EventKind::Move => HostEvent::PointerMove { position },
            EventKind::Resize => match (self.width, self.height) {
                (Some(width), Some(height)) => HostEvent::Resize {
                    size: Size::new(width, height),
                },
                _ => {
                    return Err(FxError::ScriptError(format!(
                        "resize at {}ms needs width and height",
                        self.at_ms
                    )))
                }
            },
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub surface: SurfaceDef,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f64,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl SessionScript {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut script: SessionScript = toml::from_str(source)?;
        script.validate()?;
        // Playback consumes events in time order
        script
            .events
            .sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    pub fn size(&self) -> Size {
        Size::new(self.surface.width, self.surface.height)
    }

    fn validate(&self) -> Result<()> {
        if !(self.frame_ms > 0.0 && self.frame_ms.is_finite()) {
            return Err(FxError::ScriptError(format!(
                "frame_ms must be positive, got {}",
                self.frame_ms
            )));
        }
        if self.size().is_empty() {
            return Err(FxError::ScriptError(format!(
                "surface must be non-empty, got {}x{}",
                self.surface.width, self.surface.height
            )));
        }
        for event in &self.events {
            if event.at_ms < 0.0 {
                return Err(FxError::ScriptError(format!(
                    "event times must be non-negative, got {}",
                    event.at_ms
                )));
            }
            event.to_host_event()?;
        }
        Ok(())
    }

    /// Frames needed to play every event and let the last burst settle
    pub fn suggested_frames(&self) -> u64 {
        let last = self.events.last().map_or(0.0, |e| e.at_ms);
        (last / self.frame_ms).ceil() as u64 + 600
    }
}

/// Result of a playback run
pub struct Playback<S> {
    pub frames: Vec<FrameStats>,
    pub surface: S,
}

struct Player<S> {
    effects: EffectStack,
    surface: S,
    pending: VecDeque<ScriptEvent>,
    frames: Vec<FrameStats>,
    limit: u64,
}

impl<S: Surface> Player<S> {
    fn frame(&mut self, now_ms: f64) -> bool {
        while self.pending.front().is_some_and(|e| e.at_ms <= now_ms) {
            let Some(event) = self.pending.pop_front() else {
                break;
            };
            // Validated when the script was loaded
            if let Ok(host_event) = event.to_host_event() {
                if let HostEvent::Resize { size } = host_event {
                    self.surface.resize(size);
                }
                log::debug!("[session] {} at {}ms", host_event.name(), event.at_ms);
                self.effects.handle_event(&host_event, event.at_ms);
            }
        }

        let stats = self.effects.frame(now_ms, &mut self.surface);
        self.frames.push(stats);
        (self.frames.len() as u64) < self.limit
    }
}

/// Replay `script` for `frames` frames, drawing into `surface`.
///
/// Frames are driven through a [`ManualScheduler`] so the loop re-requests
/// itself exactly like a browser animation loop; frame `n` runs at
/// `n * frame_ms`.
pub fn play<S: Surface + 'static>(
    script: &SessionScript,
    config: &EffectsConfig,
    seed: u32,
    frames: u64,
    surface: S,
) -> Result<Playback<S>> {
    let mut effects = EffectStack::from_config(config, seed);
    effects.initialize(script.size())?;

    let player = Rc::new(RefCell::new(Player {
        effects,
        surface,
        pending: script.events.iter().cloned().collect(),
        frames: Vec::new(),
        limit: frames,
    }));
    if frames == 0 {
        return finish(player);
    }

    let scheduler = Rc::new(ManualScheduler::new());
    let ticking = Rc::clone(&player);
    run_every_frame(Rc::clone(&scheduler), move |now_ms| {
        ticking.borrow_mut().frame(now_ms)
    })?;

    let mut frame = 0u64;
    while scheduler.pending() > 0 {
        scheduler.run_frame(frame as f64 * script.frame_ms);
        frame += 1;
    }
    finish(player)
}

fn finish<S>(player: Rc<RefCell<Player<S>>>) -> Result<Playback<S>> {
    let player = Rc::try_unwrap(player)
        .map_err(|_| FxError::ScriptError("frame loop still running".into()))?
        .into_inner();
    Ok(Playback {
        frames: player.frames,
        surface: player.surface,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickfx_render::RecordingSurface;

    fn script(events: &str) -> SessionScript {
        let source = format!("surface = {{ width = 400, height = 300 }}\n{events}");
        SessionScript::from_toml_str(&source).unwrap()
    }

    #[test]
    fn test_defaults_and_sorting() {
        let s = script(
            r#"
[[events]]
at_ms = 50
kind = "up"
x = 1
y = 2

[[events]]
at_ms = 10
kind = "down"
x = 1
y = 2
"#,
        );
        assert!((s.frame_ms - 1000.0 / 60.0).abs() < 1e-9);
        assert_eq!(s.events[0].kind, EventKind::Down);
        assert_eq!(s.events[1].kind, EventKind::Up);
        assert_eq!(s.size(), Size::new(400.0, 300.0));
    }

    #[test]
    fn test_sample_session_parses() {
        let s = SessionScript::from_toml_str(SAMPLE_SESSION_TOML).unwrap();
        assert_eq!(s.events.len(), 5);
        assert!(s.suggested_frames() > 600);
    }

    #[test]
    fn test_resize_requires_dimensions() {
        let err = SessionScript::from_toml_str(
            r#"
[[events]]
at_ms = 0
kind = "resize"
width = 100
"#,
        )
        .unwrap_err();
        assert!(matches!(err, FxError::ScriptError(_)));
    }

    #[test]
    fn test_rejects_unknown_kind_and_bad_frame_ms() {
        assert!(SessionScript::from_toml_str("[[events]]\nat_ms = 0\nkind = \"tap\"\n").is_err());
        assert!(SessionScript::from_toml_str("frame_ms = 0\n").is_err());
    }

    #[test]
    fn test_click_then_settle() {
        let s = script(
            r#"
[[events]]
at_ms = 0
kind = "down"
x = 100
y = 100

[[events]]
at_ms = 100
kind = "up"
x = 100
y = 100
"#,
        );
        let playback = play(
            &s,
            &EffectsConfig::default(),
            7,
            1000,
            RecordingSurface::new(s.size()),
        )
        .unwrap();

        assert_eq!(playback.frames.len(), 1000);
        let first = &playback.frames[0];
        assert!(first.pressed);
        assert!((15..=25).contains(&first.total_live()));
        assert_eq!(playback.frames[999].total_live(), 0);
        assert_eq!(playback.surface.circles_since_clear(), 0);
    }

    #[test]
    fn test_long_press_release_adds_second_batch() {
        let s = script(
            r#"frame_ms = 10

[[events]]
at_ms = 0
kind = "down"
x = 200
y = 150

[[events]]
at_ms = 800
kind = "up"
x = 50
y = 50
"#,
        );
        let playback = play(
            &s,
            &EffectsConfig::default(),
            3,
            90,
            RecordingSurface::new(s.size()),
        )
        .unwrap();

        assert!(playback.frames[60].long_press);
        let before = playback.frames[79].total_live();
        let after = playback.frames[80].total_live();
        assert!(!playback.frames[80].pressed);
        assert!(after > before, "{before} -> {after}");
    }

    #[test]
    fn test_zero_frames() {
        let s = script("");
        let playback = play(
            &s,
            &EffectsConfig::default(),
            1,
            0,
            RecordingSurface::new(s.size()),
        )
        .unwrap();
        assert!(playback.frames.is_empty());
    }
}
