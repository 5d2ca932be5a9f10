use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::{easing::Easing, Result, ShowcaseError};

/// Describes one animated statistic (e.g. "670K pairs/sec", "97.7%").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterSpec {
    pub target: f32,
    pub duration: Duration,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl CounterSpec {
    pub fn new(target: f32, duration: Duration) -> Self {
        Self {
            target,
            duration,
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// One-shot count-up from zero to a target value, eased with
/// [`Easing::EaseOutQuart`]. Starts the first time its region becomes
/// visible and never re-runs, matching the run-once stat reveals on the
/// page.
#[derive(Debug, Clone)]
pub struct AnimatedCounter {
    spec: CounterSpec,
    started_at: Option<Instant>,
}

impl AnimatedCounter {
    /// Rejects a zero duration; everything after construction is total.
    pub fn new(spec: CounterSpec) -> Result<Self> {
        if spec.duration.is_zero() {
            return Err(ShowcaseError::invalid_config(
                "counter duration must be positive",
            ));
        }
        Ok(Self {
            spec,
            started_at: None,
        })
    }

    pub fn spec(&self) -> &CounterSpec {
        &self.spec
    }

    /// Visibility signal. Only the first `true` has any effect; the count-up
    /// keeps running (and stays finished) regardless of later transitions.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        if visible && self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        match self.started_at {
            Some(start) => now.saturating_duration_since(start) >= self.spec.duration,
            None => false,
        }
    }

    /// Current display value, rounded to one decimal place.
    pub fn value(&self, now: Instant) -> f32 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(start).as_secs_f32();
        let t = (elapsed / self.spec.duration.as_secs_f32()).min(1.0);
        let eased = Easing::EaseOutQuart.apply(t);
        (eased * self.spec.target * 10.0).round() / 10.0
    }

    /// Formats the current value with prefix/suffix, dropping the trailing
    /// `.0` on whole numbers.
    pub fn display(&self, now: Instant) -> String {
        let value = self.value(now);
        let number = if value.fract() == 0.0 {
            format!("{}", value.round() as i64)
        } else {
            format!("{value:.1}")
        };
        format!("{}{}{}", self.spec.prefix, number, self.spec.suffix)
    }
}
