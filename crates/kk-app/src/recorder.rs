//! In-memory history of registry snapshots.

/// Sampling limits. `None` records every advance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecorderConfig {
    /// Minimum simulated time between transient samples [s].
    pub min_dt: Option<f64>,
    /// Minimum number of steady iterations between steady samples.
    pub pool_window: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder {
    config: RecorderConfig,
    samples: Vec<Vec<f64>>,
    last_time: Option<f64>,
    last_iteration: Option<usize>,
}

impl Recorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> RecorderConfig {
        self.config
    }

    /// Offer a snapshot taken after a transient step ending at `time`.
    /// Returns whether it was kept.
    pub fn record_transient(&mut self, time: f64, values: Vec<f64>) -> bool {
        let due = match (self.last_time, self.config.min_dt) {
            (Some(last), Some(min_dt)) => time - last >= min_dt,
            _ => true,
        };
        if self.keep(due, values) {
            self.last_time = Some(time);
            true
        } else {
            false
        }
    }

    /// Offer a snapshot taken after steady iteration `iteration`.
    pub fn record_steady(&mut self, iteration: usize, values: Vec<f64>) -> bool {
        let due = match (self.last_iteration, self.config.pool_window) {
            (Some(last), Some(window)) => iteration.saturating_sub(last) as f64 >= window,
            _ => true,
        };
        if self.keep(due, values) {
            self.last_iteration = Some(iteration);
            true
        } else {
            false
        }
    }

    fn keep(&mut self, due: bool, values: Vec<f64>) -> bool {
        if self.samples.is_empty() || due {
            self.samples.push(values);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Recorded samples, oldest first. Each row follows the registry order.
    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    /// One series per name, in the given order.
    pub fn datadict(&self, names: &[String]) -> Vec<(String, Vec<f64>)> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let series = self
                    .samples
                    .iter()
                    .map(|row| row.get(i).copied().unwrap_or(f64::NAN))
                    .collect();
                (name.clone(), series)
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.last_time = None;
        self.last_iteration = None;
    }
}
