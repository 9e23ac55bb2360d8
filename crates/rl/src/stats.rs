//! Reductions of a rollout into summary numbers.

use crate::error::{validate_dims, RolloutError};
use crate::trajectory::TrajectoryBundle;
use ml::Tensor;
use std::fmt;

/// Batch-level reward statistics of one rollout.
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceStats {
    pub average_total_reward: f64,
    /// Population standard deviation; zero for a single trajectory.
    pub stddev_total_reward: f64,
    pub per_trajectory_total_reward: Vec<f64>,
}

impl PerformanceStats {
    /// Sums rewards over the horizon axis and reduces the totals over the
    /// batch.
    ///
    /// `rewards` is `[batch_size, horizon]`; a trailing unit axis is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`RolloutError::ShapeMismatch`] for any other shape and the
    /// dimension errors for an empty batch or horizon.
    pub fn from_rewards(rewards: &Tensor) -> Result<Self, RolloutError> {
        let (batch, horizon) = match *rewards.shape() {
            [b, h] | [b, h, 1] => (b, h),
            _ => {
                return Err(RolloutError::ShapeMismatch {
                    what: "rewards",
                    expected: vec![rewards.rows(), rewards.len() / rewards.rows().max(1)],
                    actual: rewards.shape().to_vec(),
                })
            }
        };
        validate_dims(horizon, batch)?;

        let totals: Vec<f64> = rewards
            .data()
            .chunks(horizon)
            .map(|row| row.iter().map(|&r| f64::from(r)).sum())
            .collect();
        let n = totals.len() as f64;
        let mean = totals.iter().sum::<f64>() / n;
        let variance = totals.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n;

        Ok(Self {
            average_total_reward: mean,
            stddev_total_reward: variance.sqrt(),
            per_trajectory_total_reward: totals,
        })
    }

    pub fn from_bundle(bundle: &TrajectoryBundle) -> Result<Self, RolloutError> {
        Self::from_rewards(bundle.rewards())
    }
}

impl fmt::Display for PerformanceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ">> Performance stats:")?;
        writeln!(f, "Average total reward = {:.6}", self.average_total_reward)?;
        write!(f, "Stddev total reward  = {:.6}", self.stddev_total_reward)
    }
}

/// Wall-clock cost of one rollout, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingStats {
    pub uptime: f64,
    pub time_per_batch: f64,
    pub time_per_step: f64,
}

impl TimingStats {
    /// # Errors
    ///
    /// Rejects a zero horizon or batch size and a negative or non-finite
    /// uptime.
    pub fn new(uptime: f64, horizon: usize, batch_size: usize) -> Result<Self, RolloutError> {
        validate_dims(horizon, batch_size)?;
        if !uptime.is_finite() || uptime < 0.0 {
            return Err(RolloutError::InvalidUptime(uptime));
        }
        Ok(Self {
            uptime,
            time_per_batch: uptime / batch_size as f64,
            time_per_step: uptime / horizon as f64,
        })
    }
}

impl fmt::Display for TimingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ">> Time stats:")?;
        writeln!(f, "uptime = {:.6}", self.uptime)?;
        writeln!(f, "time per batch = {:.6}", self.time_per_batch)?;
        write!(f, "time per step  = {:.6}", self.time_per_step)
    }
}

/// Prints the reward report for `bundle` and returns the numbers behind it.
pub fn report_performance_stats(bundle: &TrajectoryBundle) -> Result<PerformanceStats, RolloutError> {
    let stats = PerformanceStats::from_bundle(bundle)?;
    println!("{stats}\n");
    Ok(stats)
}

pub fn report_time_stats(uptime: f64, horizon: usize, batch_size: usize) -> Result<TimingStats, RolloutError> {
    let stats = TimingStats::new(uptime, horizon, batch_size)?;
    println!("{stats}\n");
    Ok(stats)
}
