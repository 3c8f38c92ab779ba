use std::collections::VecDeque;

use chrono::{DateTime, FixedOffset};

/// Bounded history of one field, oldest point first.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    name: String,
    capacity: usize,
    points: VecDeque<(DateTime<FixedOffset>, f64)>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            name: name.into(),
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends a point, evicting the oldest one when full.
    pub fn push(&mut self, at: DateTime<FixedOffset>, value: f64) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back((at, value));
    }

    pub fn first_at(&self) -> Option<DateTime<FixedOffset>> {
        self.points.front().map(|(at, _)| *at)
    }

    pub fn last_at(&self) -> Option<DateTime<FixedOffset>> {
        self.points.back().map(|(at, _)| *at)
    }

    /// Points as `(seconds since the oldest point, value)`.
    pub fn chart_data(&self) -> Vec<(f64, f64)> {
        let Some(origin) = self.first_at() else {
            return Vec::new();
        };
        self.points
            .iter()
            .map(|(at, v)| ((*at - origin).num_milliseconds() as f64 / 1000.0, *v))
            .collect()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let span = match (self.first_at(), self.last_at()) {
            (Some(first), Some(last)) => (last - first).num_milliseconds() as f64 / 1000.0,
            _ => 0.0,
        };
        [0.0, if span > 0.0 { span } else { 1.0 }]
    }

    /// Value range with a little headroom; never empty.
    pub fn y_bounds(&self) -> [f64; 2] {
        let (min, max) = self
            .points
            .iter()
            .map(|(_, v)| *v)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() || !max.is_finite() {
            return [0.0, 1.0];
        }
        if min == max {
            return [min - 1.0, max + 1.0];
        }
        let margin = (max - min) * 0.05;
        [min - margin, max + margin]
    }
}
