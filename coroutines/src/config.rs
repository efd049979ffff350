/// Tuning applied to every delta handed to [`crate::Scheduler::tick`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Upper bound for a single delta, guards against frame hitches.
    pub max_delta: Option<f64>,
    /// Multiplies every delta, 1.0 is real time.
    pub time_scale: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_delta: None,
            time_scale: 1.0,
        }
    }
}

impl SchedulerConfig {
    /// Negative and NaN deltas become 0.
    pub fn effective_delta(&self, dt: f64) -> f64 {
        let dt = (dt * self.time_scale).max(0.0);
        match self.max_delta {
            Some(max_delta) => dt.min(max_delta),
            None => dt,
        }
    }
}
