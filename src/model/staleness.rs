// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use crate::model::ActivityModel;

const HOUR: u64 = 60 * 60;
const DAY: u64 = 24 * HOUR;

/// Thresholds deciding when a set of cached models should be refetched.
///
/// The update and fetch ages are scaled by the set's completeness score, so sparse models are
/// refreshed sooner than well-populated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    /// Never refetch sooner than this after the last fetch.
    pub minimum_refetch_wait: Duration,
    /// A fully complete set is stale once not updated for this long.
    pub stale_last_updated_age: Duration,
    /// A fully complete set is stale once not fetched for this long.
    pub stale_last_fetched_age: Duration,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            minimum_refetch_wait: Duration::from_secs(HOUR),
            stale_last_updated_age: Duration::from_secs(30 * DAY),
            stale_last_fetched_age: Duration::from_secs(7 * DAY),
        }
    }
}

/// Aggregate metadata over a set of models.
///
/// Implemented for slices, so it is available on arrays and `Vec`s of models or of model
/// handles (`Arc<M>`, `&M`).
pub trait ModelCollection {
    /// Mean completeness score, or 0 for an empty set.
    fn completeness_score(&self) -> f64;

    /// Accuracy weighted by each model's event count, over models with a non-negative score.
    ///
    /// Returns `None` if no such model has any events.
    fn accuracy_score(&self) -> Option<f64>;

    /// Most recent update across the set, or `None` if no model has been updated.
    fn last_updated(&self) -> Option<SystemTime>;

    /// Most recent fetch across the set, or the Unix epoch if none has been fetched.
    fn last_fetched(&self) -> SystemTime;

    /// Returns true if the set should be refetched as of `now`.
    ///
    /// An empty set is always stale. A set with no update time is presumed to be awaiting its
    /// first population and is never stale. Otherwise the set is stale only once the minimum
    /// refetch wait has passed and both the update and fetch ages exceed their thresholds
    /// scaled by completeness.
    fn is_stale(&self, policy: &StalenessPolicy, now: SystemTime) -> bool;
}

impl<M: ActivityModel> ModelCollection for [M] {
    fn completeness_score(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let total = self.iter().map(|m| m.completeness_score()).sum::<f64>();
        total / self.len() as f64
    }

    fn accuracy_score(&self) -> Option<f64> {
        let mut total_score = 0.0;
        let mut total_weight = 0.0;
        for model in self {
            if let Some(score) = model.accuracy_score().filter(|&s| s >= 0.0) {
                let weight = model.total_events() as f64;
                total_score += score * weight;
                total_weight += weight;
            }
        }
        (total_weight > 0.0).then(|| total_score / total_weight)
    }

    fn last_updated(&self) -> Option<SystemTime> {
        self.iter().filter_map(|m| m.last_updated()).max()
    }

    fn last_fetched(&self) -> SystemTime {
        self.iter()
            .filter_map(|m| m.last_fetched())
            .max()
            .unwrap_or(UNIX_EPOCH)
    }

    fn is_stale(&self, policy: &StalenessPolicy, now: SystemTime) -> bool {
        if self.is_empty() {
            return true;
        }
        let Some(last_updated) = self.last_updated() else {
            return false;
        };

        let fetch_age = age(self.last_fetched(), now);
        if fetch_age < policy.minimum_refetch_wait {
            return false;
        }

        let completeness = unit_or_zero(self.completeness_score());
        if age(last_updated, now) < scaled(policy.stale_last_updated_age, completeness) {
            return false;
        }
        if fetch_age < scaled(policy.stale_last_fetched_age, completeness) {
            return false;
        }
        true
    }
}

/// Time elapsed from `then` to `now`, zero if `then` is in the future.
fn age(then: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(then).unwrap_or_default()
}

/// Scales `threshold` by `factor` in `[0, 1]`, saturating at [`Duration::MAX`].
fn scaled(threshold: Duration, factor: f64) -> Duration {
    Duration::try_from_secs_f64(threshold.as_secs_f64() * factor).unwrap_or(Duration::MAX)
}

fn unit_or_zero(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
