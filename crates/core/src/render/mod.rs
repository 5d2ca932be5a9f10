use std::time::Duration;

use crate::{
    diagram::{packet_state, standard_stages, DiagramLayout, PacketState, PacketTiming, StageStyle},
    sequencer::StageSequencer,
    Result,
};

/// One legend row under the diagram.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub active: bool,
}

/// Everything a renderer needs to paint one frame of the diagram.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub stage_key: String,
    pub stage_label: String,
    pub stage_color: String,
    pub stage_icon: String,
    pub legend: Vec<LegendEntry>,
    pub packets: Vec<PacketState>,
}

/// Composes frame snapshots from the sequencer state and diagram geometry.
/// The crate has no opinion on how a snapshot is drawn; [`FrameComposer::draw`]
/// is a thin hook that logs what a rendering backend would receive.
#[derive(Debug)]
pub struct FrameComposer {
    layout: DiagramLayout,
    palette: Vec<StageStyle>,
    timing: PacketTiming,
}

impl FrameComposer {
    pub fn standard() -> Self {
        Self {
            layout: DiagramLayout::standard(),
            palette: standard_stages(),
            timing: PacketTiming::default(),
        }
    }

    pub fn layout(&self) -> &DiagramLayout {
        &self.layout
    }

    /// Snapshots the diagram at `elapsed` since it started animating.
    pub fn compose(&self, sequencer: &StageSequencer, elapsed: Duration) -> FrameSnapshot {
        let stage = sequencer.current_stage();
        let style = self
            .palette
            .iter()
            .find(|style| style.key == stage.key)
            .cloned()
            .unwrap_or_else(|| StageStyle {
                key: stage.key.clone(),
                label: stage.label.clone(),
                color: "#94a3b8".to_string(),
                icon: String::new(),
            });

        let legend = self
            .palette
            .iter()
            .map(|entry| LegendEntry {
                label: entry.label.clone(),
                color: entry.color.clone(),
                active: entry.key == stage.key,
            })
            .collect();

        let packets = self
            .layout
            .packet_paths(sequencer.current_index(), &self.timing)
            .iter()
            .filter_map(|path| packet_state(path, elapsed, &self.timing))
            .collect();

        FrameSnapshot {
            stage_key: style.key,
            stage_label: style.label,
            stage_color: style.color,
            stage_icon: style.icon,
            legend,
            packets,
        }
    }

    pub fn draw(&self, snapshot: &FrameSnapshot) -> Result<()> {
        tracing::trace!(
            stage = %snapshot.stage_key,
            packets = snapshot.packets.len(),
            "frame composed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagramConfig;
    use std::time::Instant;

    #[test]
    fn snapshot_reflects_the_active_stage() {
        let sequence = DiagramConfig::default().sequence().unwrap();
        let mut sequencer = StageSequencer::new(sequence);
        let t0 = Instant::now();
        sequencer.start(t0);
        sequencer.poll(t0 + Duration::from_secs_f32(2.8));

        let composer = FrameComposer::standard();
        let snapshot = composer.compose(&sequencer, Duration::from_secs_f32(2.8));

        assert_eq!(snapshot.stage_key, "features");
        assert_eq!(snapshot.stage_color, "#a78bfa");
        let active: Vec<_> = snapshot
            .legend
            .iter()
            .filter(|entry| entry.active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Feature Extraction");
    }

    #[test]
    fn snapshot_carries_in_flight_packets() {
        let sequence = DiagramConfig::default().sequence().unwrap();
        let mut sequencer = StageSequencer::new(sequence);
        sequencer.start(Instant::now());

        let composer = FrameComposer::standard();
        // Stage 0's fan-out starts immediately; half a flight in, packets
        // from several workers are airborne.
        let snapshot = composer.compose(&sequencer, Duration::from_millis(800));
        assert!(!snapshot.packets.is_empty());
        assert!(snapshot.packets.iter().all(|p| p.opacity >= 0.0 && p.opacity <= 1.0));

        composer.draw(&snapshot).unwrap();
    }
}
