use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::{lerp, Easing};

/// 2D position in the diagram's viewBox coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One GPU worker node in the architecture diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerNode {
    pub id: usize,
    pub position: Point,
    pub label: String,
}

/// Static geometry of the controller/worker diagram.
#[derive(Debug, Clone)]
pub struct DiagramLayout {
    pub controller: Point,
    pub workers: Vec<WorkerNode>,
}

impl DiagramLayout {
    /// The production layout: controller centered, four workers at the
    /// corners of an 800x520 viewBox.
    pub fn standard() -> Self {
        let worker = |id: usize, x: f32, y: f32| WorkerNode {
            id,
            position: Point::new(x, y),
            label: format!("Worker {}", id + 1),
        };
        Self {
            controller: Point::new(400.0, 260.0),
            workers: vec![
                worker(0, 140.0, 100.0),
                worker(1, 660.0, 100.0),
                worker(2, 140.0, 420.0),
                worker(3, 660.0, 420.0),
            ],
        }
    }

    /// Packet paths for one pipeline stage: a fan-out burst from the
    /// controller to every worker, then a fan-in burst back. Per-worker
    /// delays stagger the packets; the stage index shifts the whole burst so
    /// each stage animates in its own window.
    pub fn packet_paths(&self, stage_index: usize, timing: &PacketTiming) -> Vec<PacketPath> {
        let stage_shift = timing.stage_stride * stage_index as u32;
        let mut paths = Vec::with_capacity(self.workers.len() * 2);
        for (i, worker) in self.workers.iter().enumerate() {
            paths.push(PacketPath {
                from: self.controller,
                to: worker.position,
                delay: timing.packet_step * i as u32 + stage_shift,
            });
        }
        for (i, worker) in self.workers.iter().enumerate() {
            paths.push(PacketPath {
                from: worker.position,
                to: self.controller,
                delay: timing.packet_step * i as u32 + timing.return_offset + stage_shift,
            });
        }
        paths
    }
}

/// Presentation attributes for one pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageStyle {
    pub key: String,
    pub label: String,
    pub color: String,
    pub icon: String,
}

/// The three pipeline stages the diagram cycles through, with the site's
/// palette.
pub fn standard_stages() -> Vec<StageStyle> {
    let style = |key: &str, label: &str, color: &str, icon: &str| StageStyle {
        key: key.to_string(),
        label: label.to_string(),
        color: color.to_string(),
        icon: icon.to_string(),
    };
    vec![
        style("blocking", "Blocking", "#818cf8", "⚡"),
        style("features", "Feature Extraction", "#a78bfa", "🧠"),
        style("prediction", "Prediction", "#34d399", "🎯"),
    ]
}

/// Timing constants for packet flights.
#[derive(Debug, Clone)]
pub struct PacketTiming {
    /// Time a packet spends in flight along its path.
    pub flight: Duration,
    /// Gap between one flight landing and the next taking off.
    pub repeat_delay: Duration,
    /// Per-worker stagger within a burst.
    pub packet_step: Duration,
    /// Shift applied per stage index so stages animate in turn.
    pub stage_stride: Duration,
    /// Extra delay before the fan-in burst returns to the controller.
    pub return_offset: Duration,
}

impl Default for PacketTiming {
    fn default() -> Self {
        Self {
            flight: Duration::from_millis(1600),
            repeat_delay: Duration::from_millis(4800),
            packet_step: Duration::from_millis(150),
            stage_stride: Duration::from_millis(1800),
            return_offset: Duration::from_millis(1000),
        }
    }
}

/// A straight packet path with its takeoff delay.
#[derive(Debug, Clone)]
pub struct PacketPath {
    pub from: Point,
    pub to: Point,
    pub delay: Duration,
}

/// Instantaneous state of one in-flight packet.
#[derive(Debug, Clone, Serialize)]
pub struct PacketState {
    pub position: Point,
    pub opacity: f32,
}

/// Evaluates a packet at `elapsed` since the diagram started animating.
/// Flights repeat every `flight + repeat_delay`; returns `None` before the
/// first takeoff and between flights.
pub fn packet_state(path: &PacketPath, elapsed: Duration, timing: &PacketTiming) -> Option<PacketState> {
    let local = elapsed.checked_sub(path.delay)?;
    let cycle = timing.flight + timing.repeat_delay;
    let phase = Duration::from_nanos((local.as_nanos() % cycle.as_nanos()) as u64);
    if phase >= timing.flight {
        return None;
    }

    let t = phase.as_secs_f32() / timing.flight.as_secs_f32();
    let eased = Easing::EaseInOut.apply(t);
    Some(PacketState {
        position: Point::new(
            lerp(path.from.x, path.to.x, eased),
            lerp(path.from.y, path.to.y, eased),
        ),
        opacity: flight_opacity(t),
    })
}

// Fade in over the first third of the flight, hold, fade out over the last.
fn flight_opacity(t: f32) -> f32 {
    const RAMP: f32 = 1.0 / 3.0;
    if t < RAMP {
        t / RAMP
    } else if t > 1.0 - RAMP {
        (1.0 - t) / RAMP
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn standard_layout_matches_production_geometry() {
        let layout = DiagramLayout::standard();
        assert_eq!(layout.controller, Point::new(400.0, 260.0));
        assert_eq!(layout.workers.len(), 4);
        assert_eq!(layout.workers[3].position, Point::new(660.0, 420.0));
        assert_eq!(layout.workers[0].label, "Worker 1");
    }

    #[test]
    fn packet_paths_stagger_and_fan_both_ways() {
        let layout = DiagramLayout::standard();
        let timing = PacketTiming::default();
        let paths = layout.packet_paths(1, &timing);

        assert_eq!(paths.len(), 8);
        // Fan-out for stage 1 starts one stride in.
        assert_eq!(paths[0].delay, ms(1800));
        assert_eq!(paths[1].delay, ms(1950));
        // Fan-in mirrors the path and adds the return offset.
        assert_eq!(paths[4].from, layout.workers[0].position);
        assert_eq!(paths[4].to, layout.controller);
        assert_eq!(paths[4].delay, ms(2800));
    }

    #[test]
    fn packet_traverses_endpoints() {
        let timing = PacketTiming::default();
        let path = PacketPath {
            from: Point::new(0.0, 0.0),
            to: Point::new(100.0, 50.0),
            delay: Duration::ZERO,
        };

        let start = packet_state(&path, Duration::ZERO, &timing).unwrap();
        assert_eq!(start.position, Point::new(0.0, 0.0));
        assert_eq!(start.opacity, 0.0);

        let mid = packet_state(&path, ms(800), &timing).unwrap();
        assert!((mid.position.x - 50.0).abs() < 1.0);
        assert_eq!(mid.opacity, 1.0);

        let end = packet_state(&path, ms(1599), &timing).unwrap();
        assert!((end.position.x - 100.0).abs() < 1.0);
        assert!(end.opacity < 0.01);
    }

    #[test]
    fn packet_is_absent_before_delay_and_between_flights() {
        let timing = PacketTiming::default();
        let path = PacketPath {
            from: Point::new(0.0, 0.0),
            to: Point::new(100.0, 0.0),
            delay: ms(500),
        };

        assert!(packet_state(&path, ms(400), &timing).is_none());
        // 500ms delay + 1600ms flight puts 2500ms inside the repeat gap.
        assert!(packet_state(&path, ms(2500), &timing).is_none());
        // Next flight begins at 500 + 6400.
        assert!(packet_state(&path, ms(6901), &timing).is_some());
    }

    #[test]
    fn stage_palette_covers_the_pipeline() {
        let stages = standard_stages();
        let keys: Vec<_> = stages.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, ["blocking", "features", "prediction"]);
        assert_eq!(stages[2].color, "#34d399");
    }
}
