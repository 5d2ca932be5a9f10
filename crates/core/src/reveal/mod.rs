use std::time::{Duration, Instant};

use crate::{easing::Easing, Result, ShowcaseError};

/// A group of elements revealed once with a per-item stagger, the way card
/// grids and feature lists fade in as they scroll into view.
///
/// Item `i` starts `i * step` after the group first becomes visible and
/// ramps from 0 to 1 over `duration`. The group never resets.
#[derive(Debug, Clone)]
pub struct RevealGroup {
    count: usize,
    step: Duration,
    duration: Duration,
    started_at: Option<Instant>,
}

impl RevealGroup {
    pub fn staggered(count: usize, step: Duration, duration: Duration) -> Result<Self> {
        if count == 0 {
            return Err(ShowcaseError::invalid_config(
                "a reveal group requires at least one item",
            ));
        }
        if duration.is_zero() {
            return Err(ShowcaseError::invalid_config(
                "reveal duration must be positive",
            ));
        }
        Ok(Self {
            count,
            step,
            duration,
            started_at: None,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Visibility signal; only the first `true` arms the group.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        if visible && self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Eased 0..1 reveal progress for item `index` at `now`. Items past the
    /// end of the group report 1 so callers can iterate defensively.
    pub fn progress(&self, index: usize, now: Instant) -> f32 {
        if index >= self.count {
            return 1.0;
        }
        let Some(start) = self.started_at else {
            return 0.0;
        };
        let delay = self.step * index as u32;
        let elapsed = now.saturating_duration_since(start);
        let Some(active) = elapsed.checked_sub(delay) else {
            return 0.0;
        };
        let t = (active.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        Easing::EaseInOut.apply(t)
    }

    /// True once every item has finished its ramp.
    pub fn is_settled(&self, now: Instant) -> bool {
        match self.started_at {
            Some(start) => {
                let last_delay = self.step * (self.count as u32 - 1);
                now.saturating_duration_since(start) >= last_delay + self.duration
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(value: f32) -> Duration {
        Duration::from_secs_f32(value)
    }

    fn group() -> RevealGroup {
        RevealGroup::staggered(4, secs(0.1), secs(0.5)).unwrap()
    }

    #[test]
    fn rejects_empty_group_and_zero_duration() {
        assert!(RevealGroup::staggered(0, secs(0.1), secs(0.5)).is_err());
        assert!(RevealGroup::staggered(3, secs(0.1), Duration::ZERO).is_err());
    }

    #[test]
    fn hidden_group_shows_nothing() {
        let t0 = Instant::now();
        let group = group();
        for i in 0..4 {
            assert_eq!(group.progress(i, t0 + secs(10.0)), 0.0);
        }
        assert!(!group.is_settled(t0 + secs(10.0)));
    }

    #[test]
    fn stagger_orders_item_progress() {
        let t0 = Instant::now();
        let mut group = group();
        group.set_visible(true, t0);

        let at = t0 + secs(0.35);
        let p0 = group.progress(0, at);
        let p1 = group.progress(1, at);
        let p3 = group.progress(3, at);
        assert!(p0 > p1, "earlier items lead: {p0} vs {p1}");
        assert!(p1 > p3);
        assert_eq!(group.progress(3, t0 + secs(0.2)), 0.0);
    }

    #[test]
    fn settles_after_last_item_finishes() {
        let t0 = Instant::now();
        let mut group = group();
        group.set_visible(true, t0);

        // Last item starts at 0.3s and runs 0.5s.
        assert!(!group.is_settled(t0 + secs(0.79)));
        assert!(group.is_settled(t0 + secs(0.8)));
        assert_eq!(group.progress(3, t0 + secs(0.8)), 1.0);
    }

    #[test]
    fn losing_visibility_does_not_reset() {
        let t0 = Instant::now();
        let mut group = group();
        group.set_visible(true, t0);
        group.set_visible(false, t0 + secs(0.1));

        assert!(group.is_settled(t0 + secs(1.0)));
    }
}
