//! Headless session playback with per-frame stats

use crate::commands::{load_config, resolve_seed};
use crate::session::{play, SessionScript};
use anyhow::{Context, Result};
use clickfx_particles::FrameStats;
use clickfx_render::RecordingSurface;

pub struct SimulateArgs {
    pub script: String,
    pub config: Option<String>,
    pub frames: Option<u64>,
    pub seed: Option<u32>,
    pub format: String,
    pub every: u64,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let script = SessionScript::load(&args.script)
        .context(format!("Failed to load session {}", args.script))?;
    let config = load_config(args.config.as_deref())?;
    let seed = resolve_seed(args.seed, &config);
    let frames = args.frames.unwrap_or_else(|| script.suggested_frames());

    let playback = play(
        &script,
        &config,
        seed,
        frames,
        RecordingSurface::last_frame_only(script.size()),
    )
    .context("Session playback failed")?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&playback.frames)?);
        return Ok(());
    }

    println!(
        "Session: {} ({} event(s), {}x{}, seed {})",
        args.script,
        script.events.len(),
        script.surface.width,
        script.surface.height,
        seed
    );
    let every = args.every.max(1);
    for stats in &playback.frames {
        if stats.frame % every == 0 || stats.frame == 1 {
            println!("{}", format_frame(stats));
        }
    }

    let summary = summarize(&playback.frames);
    println!();
    println!("Frames:     {}", playback.frames.len());
    println!("Peak live:  {} (frame {})", summary.peak, summary.peak_frame);
    println!("Final live: {}", summary.final_live);
    println!("Frame rate: {:.1} fps", summary.mean_fps);
    if summary.long_press_frames > 0 {
        println!("Long press: {} frame(s)", summary.long_press_frames);
    }
    Ok(())
}

fn format_frame(stats: &FrameStats) -> String {
    let per_effect: Vec<String> = stats
        .live
        .iter()
        .map(|(name, n)| format!("{}={}", name, n))
        .collect();
    let state = match (stats.pressed, stats.long_press) {
        (_, true) => " [long press]",
        (true, false) => " [pressed]",
        _ => "",
    };
    format!(
        "  frame {:>5} @ {:>8.1}ms (+{:.1}ms)  live {:>4}  {}{}",
        stats.frame,
        stats.time_ms,
        stats.delta_ms,
        stats.total_live(),
        per_effect.join(" "),
        state
    )
}

struct Summary {
    peak: usize,
    peak_frame: u64,
    final_live: usize,
    long_press_frames: usize,
    mean_fps: f64,
}

fn summarize(frames: &[FrameStats]) -> Summary {
    let mut summary = Summary {
        peak: 0,
        peak_frame: 0,
        final_live: frames.last().map_or(0, |s| s.total_live()),
        long_press_frames: frames.iter().filter(|s| s.long_press).count(),
        mean_fps: 0.0,
    };
    // The first frame has no predecessor and reports 0 fps
    let timed: Vec<f64> = frames.iter().map(|s| s.fps).filter(|f| *f > 0.0).collect();
    if !timed.is_empty() {
        summary.mean_fps = timed.iter().sum::<f64>() / timed.len() as f64;
    }
    for stats in frames {
        let live = stats.total_live();
        if live > summary.peak {
            summary.peak = live;
            summary.peak_frame = stats.frame;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(frame: u64, live: usize, long_press: bool) -> FrameStats {
        FrameStats {
            frame,
            time_ms: frame as f64 * 16.0,
            delta_ms: if frame > 1 { 16.0 } else { 0.0 },
            fps: if frame > 1 { 62.5 } else { 0.0 },
            live: vec![("click".to_string(), live)],
            pressed: long_press,
            long_press,
        }
    }

    #[test]
    fn summary_tracks_peak_and_final() {
        let frames = vec![
            stats(1, 20, false),
            stats(2, 45, true),
            stats(3, 30, true),
            stats(4, 0, false),
        ];
        let summary = summarize(&frames);
        assert_eq!(summary.peak, 45);
        assert_eq!(summary.peak_frame, 2);
        assert_eq!(summary.final_live, 0);
        assert_eq!(summary.long_press_frames, 2);
        assert!((summary.mean_fps - 62.5).abs() < 1e-9);
    }

    #[test]
    fn frame_line_lists_effects_and_state() {
        let line = format_frame(&stats(12, 7, true));
        assert!(line.contains("frame    12"));
        assert!(line.contains("(+16.0ms)"));
        assert!(line.contains("click=7"));
        assert!(line.ends_with("[long press]"));
    }

    #[test]
    fn stats_serialize_to_json() {
        let json = serde_json::to_value(stats(3, 5, false)).unwrap();
        assert_eq!(json["frame"], 3);
        assert_eq!(json["live"][0][0], "click");
        assert_eq!(json["live"][0][1], 5);
    }
}
