use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    diagram::standard_stages,
    reveal::RevealGroup,
    sequencer::{Sequence, Stage},
    Result, ShowcaseError,
};

/// Top-level timing configuration for the animated sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowcaseConfig {
    pub diagram: DiagramConfig,
    pub counter: CounterConfig,
    pub reveal: RevealConfig,
}

/// Timing for the pipeline-stage diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramConfig {
    /// Dwell per stage, in order. The default keeps every stage on the same
    /// 2.8s interval the site ships with.
    pub stage_dwell_secs: Vec<f32>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            stage_dwell_secs: vec![2.8, 2.8, 2.8],
        }
    }
}

impl DiagramConfig {
    /// Builds the stage sequence by pairing the configured dwells with the
    /// standard stage palette.
    pub fn sequence(&self) -> Result<Sequence> {
        let styles = standard_stages();
        if self.stage_dwell_secs.len() != styles.len() {
            return Err(ShowcaseError::invalid_config(format!(
                "expected {} stage dwell values, got {}",
                styles.len(),
                self.stage_dwell_secs.len()
            )));
        }
        let stages = styles
            .into_iter()
            .zip(&self.stage_dwell_secs)
            .map(|(style, &dwell)| {
                Ok(Stage::new(
                    style.key,
                    style.label,
                    positive_secs(dwell, "stage dwell")?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Sequence::new(stages)
    }
}

/// Timing for the animated statistics counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    pub duration_secs: f32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { duration_secs: 2.0 }
    }
}

impl CounterConfig {
    pub fn duration(&self) -> Result<Duration> {
        positive_secs(self.duration_secs, "counter duration")
    }
}

/// Timing for staggered scroll reveals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    pub stagger_secs: f32,
    pub duration_secs: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            stagger_secs: 0.1,
            duration_secs: 0.5,
        }
    }
}

impl RevealConfig {
    pub fn group(&self, count: usize) -> Result<RevealGroup> {
        RevealGroup::staggered(
            count,
            non_negative_secs(self.stagger_secs, "reveal stagger")?,
            positive_secs(self.duration_secs, "reveal duration")?,
        )
    }
}

fn positive_secs(value: f32, what: &str) -> Result<Duration> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ShowcaseError::invalid_config(format!(
            "{what} must be a positive number of seconds, got {value}"
        )));
    }
    Ok(Duration::from_secs_f32(value))
}

fn non_negative_secs(value: f32, what: &str) -> Result<Duration> {
    if !value.is_finite() || value < 0.0 {
        return Err(ShowcaseError::invalid_config(format!(
            "{what} must be a non-negative number of seconds, got {value}"
        )));
    }
    Ok(Duration::from_secs_f32(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_a_valid_sequence() {
        let config = ShowcaseConfig::default();
        let sequence = config.diagram.sequence().unwrap();
        assert_eq!(sequence.len(), 3);
        assert!((sequence.cycle().as_secs_f32() - 8.4).abs() < 1e-3);
        assert!(config.counter.duration().is_ok());
        assert!(config.reveal.group(6).is_ok());
    }

    #[test]
    fn rejects_mismatched_dwell_list() {
        let config = DiagramConfig {
            stage_dwell_secs: vec![2.8, 2.8],
        };
        let err = config.sequence().unwrap_err();
        assert!(matches!(err, ShowcaseError::InvalidConfiguration(_)));
    }

    #[test]
    fn rejects_non_positive_dwell() {
        let config = DiagramConfig {
            stage_dwell_secs: vec![2.8, 0.0, 2.8],
        };
        assert!(config.sequence().is_err());

        let config = DiagramConfig {
            stage_dwell_secs: vec![2.8, -1.0, 2.8],
        };
        assert!(config.sequence().is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let config = ShowcaseConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ShowcaseConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.diagram.stage_dwell_secs, config.diagram.stage_dwell_secs);
        assert_eq!(back.counter.duration_secs, config.counter.duration_secs);
    }
}
