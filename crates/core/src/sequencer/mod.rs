use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::{Result, ShowcaseError};

/// One named phase in the cyclic pipeline animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Unique identifier; ordering within a [`Sequence`] is significant.
    pub key: String,
    /// Display text consumed by renderers, not part of the timing contract.
    pub label: String,
    /// How long the stage stays active before the sequencer advances.
    pub dwell: Duration,
}

impl Stage {
    pub fn new(key: impl Into<String>, label: impl Into<String>, dwell: Duration) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            dwell,
        }
    }
}

/// Ordered, non-empty list of stages. Immutable after construction, which is
/// the only place malformed input is rejected.
#[derive(Debug, Clone)]
pub struct Sequence {
    stages: Vec<Stage>,
}

impl Sequence {
    /// Validates and wraps an ordered stage list.
    pub fn new(stages: Vec<Stage>) -> Result<Self> {
        if stages.is_empty() {
            return Err(ShowcaseError::invalid_config(
                "a sequence requires at least one stage",
            ));
        }
        for stage in &stages {
            if stage.dwell.is_zero() {
                return Err(ShowcaseError::invalid_config(format!(
                    "stage `{}` has a non-positive dwell duration",
                    stage.key
                )));
            }
        }
        Ok(Self { stages })
    }

    /// Builds a sequence where every stage shares one interval. This is the
    /// degenerate case of the per-stage model, kept as a constructor rather
    /// than a second timing mechanism.
    pub fn uniform<I>(stages: I, interval: Duration) -> Result<Self>
    where
        I: IntoIterator<Item = Stage>,
    {
        let stages = stages
            .into_iter()
            .map(|stage| Stage { dwell: interval, ..stage })
            .collect();
        Self::new(stages)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    /// Total wall-clock length of one full cycle.
    pub fn cycle(&self) -> Duration {
        self.stages.iter().map(|stage| stage.dwell).sum()
    }

    /// Precomputes the active spans over `cycles` full cycles, starting at
    /// t = 0. Used by the schedule export.
    pub fn schedule(&self, cycles: u32) -> Vec<ScheduledStage> {
        let mut spans = Vec::with_capacity(self.stages.len() * cycles as usize);
        let mut cursor = 0.0_f32;
        for _ in 0..cycles {
            for stage in &self.stages {
                let end = cursor + stage.dwell.as_secs_f32();
                spans.push(ScheduledStage {
                    key: stage.key.clone(),
                    start_secs: cursor,
                    end_secs: end,
                });
                cursor = end;
            }
        }
        spans
    }

    /// Pretty-printed JSON form of [`Sequence::schedule`], for export.
    pub fn schedule_json(&self, cycles: u32) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.schedule(cycles))?)
    }
}

/// One active span in an exported stage schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledStage {
    pub key: String,
    pub start_secs: f32,
    pub end_secs: f32,
}

/// Emitted once per advance, strictly in sequence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageChange {
    pub index: usize,
    pub key: String,
}

/// The single pending deadline owned by a sequencer. Replaced wholesale on
/// every transition so two timers can never be armed at once.
#[derive(Debug, Clone, Copy)]
struct DwellTimer {
    deadline: Instant,
}

/// Cyclic timed state machine driving the pipeline-stage visualization.
///
/// The sequencer never reads a clock of its own; callers pass `now` into
/// every time-sensitive operation, which keeps it deterministic under test
/// and independent of any rendering surface. Visibility is likewise an
/// external signal fed through [`StageSequencer::set_visible`].
#[derive(Debug)]
pub struct StageSequencer {
    sequence: Sequence,
    current: usize,
    /// Dwell left for the current stage while stopped. `stop` captures it so
    /// a later `start` resumes mid-stage instead of restarting the dwell.
    remaining: Duration,
    timer: Option<DwellTimer>,
}

impl StageSequencer {
    pub fn new(sequence: Sequence) -> Self {
        let remaining = sequence.stages()[0].dwell;
        Self {
            sequence,
            current: 0,
            remaining,
            timer: None,
        }
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The stage at the current index. Pure read.
    pub fn current_stage(&self) -> &Stage {
        &self.sequence.stages()[self.current]
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Arms the dwell timer from the preserved remaining dwell. Calling this
    /// while already running is a no-op, so re-entrant starts cannot arm a
    /// second timer.
    pub fn start(&mut self, now: Instant) {
        if self.timer.is_none() {
            tracing::debug!(stage = %self.current_stage().key, "sequencer started");
            self.timer = Some(DwellTimer {
                deadline: now + self.remaining,
            });
        }
    }

    /// Cancels the pending transition without touching the current index.
    /// Idempotent; after this no stage change is emitted until `start`.
    pub fn stop(&mut self, now: Instant) {
        if let Some(timer) = self.timer.take() {
            self.remaining = timer.deadline.saturating_duration_since(now);
            tracing::debug!(stage = %self.current_stage().key, "sequencer stopped");
        }
    }

    /// External visibility signal: `true` starts, `false` stops.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        if visible {
            self.start(now);
        } else {
            self.stop(now);
        }
    }

    /// Fires every deadline at or before `now`, advancing `(current + 1) mod N`
    /// once per firing. Each replacement timer is armed from the deadline that
    /// fired, not from `now`, so the cadence stays exact however often the
    /// caller polls. Returns the changes in the order they occurred.
    pub fn poll(&mut self, now: Instant) -> Vec<StageChange> {
        let mut changes = Vec::new();
        loop {
            let fired = match &self.timer {
                Some(timer) if now >= timer.deadline => timer.deadline,
                _ => break,
            };
            self.current = (self.current + 1) % self.sequence.len();
            let stage = &self.sequence.stages()[self.current];
            self.timer = Some(DwellTimer {
                deadline: fired + stage.dwell,
            });
            changes.push(StageChange {
                index: self.current,
                key: stage.key.clone(),
            });
        }
        changes
    }
}
