//! Trace replay
//!
//! A trace is a JSON array of timed host events:
//!
//! ```json
//! [
//!   { "at_ms": 0, "delta_y": 120 },
//!   { "at_ms": 700, "resize": { "width": 800, "height": 600 } },
//!   { "at_ms": 900, "delta_y": -80 }
//! ]
//! ```
//!
//! Events are routed through an [`EventRouter`] to a carousel, frames are
//! broadcast at a fixed rate and every frame is reported as one JSON line.

use anyhow::{Context, Result};
use deckflow_carousel::{Carousel, Geometry, ItemId, RecordingSink, SlotKind, ViewportMetrics};
use deckflow_platform::{Event, EventRouter, InputEvent, WindowEvent};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

/// Extra time simulated after the last event when no end is given
const SETTLE_MARGIN_MS: f64 = 100.0;

// ============================================================================
// Trace Events
// ============================================================================

/// One timed event of a trace
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TraceEvent {
    Wheel { at_ms: f64, delta_y: f32 },
    Resize { at_ms: f64, resize: ViewportMetrics },
}

impl TraceEvent {
    pub fn at_ms(&self) -> f64 {
        match self {
            TraceEvent::Wheel { at_ms, .. } | TraceEvent::Resize { at_ms, .. } => *at_ms,
        }
    }

    fn to_event(self) -> Event {
        match self {
            TraceEvent::Wheel { at_ms, delta_y } => {
                Event::Input(InputEvent::scroll(0.0, delta_y, at_ms))
            }
            TraceEvent::Resize { resize, .. } => Event::Window(WindowEvent::Resized {
                width: resize.width,
                height: resize.height,
            }),
        }
    }
}

/// Parse a trace, ordering events by time
pub fn parse_trace(content: &str) -> Result<Vec<TraceEvent>> {
    let mut events: Vec<TraceEvent> = serde_json::from_str(content)?;
    // Stable sort keeps same-timestamp events in file order
    events.sort_by(|a, b| a.at_ms().total_cmp(&b.at_ms()));
    Ok(events)
}

/// Load a trace file
pub fn load_trace(path: &Path) -> Result<Vec<TraceEvent>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    parse_trace(&content).with_context(|| format!("Failed to parse trace {}", path.display()))
}

// ============================================================================
// Frame Lines
// ============================================================================

/// Per-item entry of a frame line
#[derive(Clone, Debug, Serialize)]
pub struct ItemLine {
    pub id: ItemId,
    pub slot: SlotKind,
    #[serde(flatten)]
    pub geometry: Geometry,
}

/// One simulated frame
#[derive(Clone, Debug, Serialize)]
pub struct FrameLine {
    pub frame: usize,
    pub t_ms: f64,
    pub current_index: usize,
    pub animating: bool,
    pub items: Vec<ItemLine>,
}

impl FrameLine {
    fn capture(frame: usize, t_ms: f64, carousel: &Carousel) -> Self {
        let items = carousel
            .deck()
            .iter()
            .zip(carousel.displayed())
            .enumerate()
            .map(|(index, (item, geometry))| ItemLine {
                id: item.id,
                slot: carousel.slot_of(index),
                geometry: *geometry,
            })
            .collect();

        Self {
            frame,
            t_ms,
            current_index: carousel.current_index(),
            animating: carousel.is_animating(),
            items,
        }
    }
}

// ============================================================================
// Simulation
// ============================================================================

/// Simulation parameters
#[derive(Clone, Copy, Debug)]
pub struct SimulationOptions {
    pub fps: u32,
    pub until_ms: Option<f64>,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            until_ms: None,
        }
    }
}

/// Replay `events` against `carousel`, writing one JSON line per frame
///
/// Returns the number of frames written.
pub fn simulate(
    carousel: Carousel,
    events: &[TraceEvent],
    options: SimulationOptions,
    out: &mut impl Write,
) -> Result<usize> {
    if options.fps == 0 {
        anyhow::bail!("fps must be at least 1");
    }

    let frame_ms = 1000.0 / f64::from(options.fps);
    let until_ms = options.until_ms.unwrap_or_else(|| {
        let last = events.last().map(TraceEvent::at_ms).unwrap_or(0.0);
        last + carousel.config().transition_duration_ms + SETTLE_MARGIN_MS
    });

    let sink = Rc::new(RefCell::new(RecordingSink::new()));
    let carousel = Rc::new(RefCell::new(carousel));
    carousel.borrow_mut().attach_sink(Box::new(sink.clone()));

    let mut router = EventRouter::new();
    let region = router.create_target("card-stack");
    let listener = router.attach(region, carousel.clone())?;

    let mut pending = events.iter().peekable();
    let mut frame = 0;
    loop {
        let t_ms = frame as f64 * frame_ms;
        if t_ms > until_ms {
            break;
        }

        while let Some(event) = pending.next_if(|e| e.at_ms() <= t_ms) {
            tracing::trace!("t={:.1}ms routing {:?}", t_ms, event);
            router.dispatch(region, &event.to_event())?;
        }
        router.broadcast(&Event::Frame { timestamp_ms: t_ms })?;

        let line = FrameLine::capture(frame, t_ms, &carousel.borrow());
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
        frame += 1;
    }

    router.detach(listener);
    tracing::debug!(
        "Simulated {} frames, sink accepted {} updates",
        frame,
        sink.borrow().applied()
    );
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckflow_carousel::CarouselConfig;

    fn run(trace: &str, options: SimulationOptions) -> Vec<serde_json::Value> {
        let events = parse_trace(trace).unwrap();
        let carousel = Carousel::from_config(CarouselConfig::default()).unwrap();
        let mut out = Vec::new();
        let frames = simulate(carousel, &events, options, &mut out).unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), frames);
        lines
    }

    #[test]
    fn test_parse_trace_sorts_by_time() {
        let events = parse_trace(
            r#"[
                { "at_ms": 50, "delta_y": 10 },
                { "at_ms": 0, "resize": { "width": 800, "height": 600 } }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                TraceEvent::Resize {
                    at_ms: 0.0,
                    resize: ViewportMetrics::new(800.0, 600.0)
                },
                TraceEvent::Wheel {
                    at_ms: 50.0,
                    delta_y: 10.0
                },
            ]
        );
    }

    #[test]
    fn test_parse_trace_rejects_unknown_shape() {
        assert!(parse_trace(r#"[{ "at_ms": 0, "key": "a" }]"#).is_err());
    }

    #[test]
    fn test_simulate_single_advance() {
        let lines = run(
            r#"[{ "at_ms": 0, "delta_y": 120 }]"#,
            SimulationOptions::default(),
        );

        let first = &lines[0];
        assert_eq!(first["current_index"], 1);
        assert_eq!(first["animating"], true);

        let last = lines.last().unwrap();
        assert_eq!(last["current_index"], 1);
        assert_eq!(last["animating"], false);
        assert_eq!(last["items"][1]["slot"], "expanded");
        assert_eq!(last["items"][0]["slot"], "stacked_above1");
        assert_eq!(last["items"][1]["y_offset"], 0.0);
    }

    #[test]
    fn test_simulate_until() {
        let lines = run(
            "[]",
            SimulationOptions {
                fps: 10,
                until_ms: Some(250.0),
            },
        );
        // Frames at 0, 100 and 200 ms
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l["current_index"] == 0));
    }

    #[test]
    fn test_simulate_resize_narrows_expanded() {
        let lines = run(
            r#"[{ "at_ms": 0, "resize": { "width": 600, "height": 800 } }]"#,
            SimulationOptions {
                fps: 60,
                until_ms: Some(0.0),
            },
        );
        assert_eq!(lines[0]["items"][0]["width"], 568.0);
    }

    #[test]
    fn test_simulate_zero_fps_rejected() {
        let carousel = Carousel::from_config(CarouselConfig::default()).unwrap();
        let options = SimulationOptions {
            fps: 0,
            until_ms: None,
        };
        assert!(simulate(carousel, &[], options, &mut Vec::new()).is_err());
    }
}
