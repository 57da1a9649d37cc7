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

//! Interfaces between the estimators and the model cache that holds them.
//!
//! A classifier model bundles estimators for one activity type over one region at one depth of
//! a spatial partition. Model sources hand those models out as [`Arc`] handles: models are
//! immutable, and a cache that retrains one replaces the handle instead of mutating it.
//!
//! [`ModelCollection`] aggregates freshness metadata across a set of models and decides when the
//! set should be refetched.
//!
//! # Usage
//!
//! ```rust
//! use std::time::{Duration, SystemTime};
//!
//! use activity_density::model::{ActivityModel, ModelCollection, StalenessPolicy};
//!
//! struct CachedModel {
//!     updated: SystemTime,
//!     fetched: SystemTime,
//! }
//!
//! impl ActivityModel for CachedModel {
//!     fn completeness_score(&self) -> f64 { 1.0 }
//!     fn accuracy_score(&self) -> Option<f64> { None }
//!     fn total_events(&self) -> u64 { 0 }
//!     fn last_updated(&self) -> Option<SystemTime> { Some(self.updated) }
//!     fn last_fetched(&self) -> Option<SystemTime> { Some(self.fetched) }
//! }
//!
//! let now = SystemTime::now();
//! let fresh = [CachedModel { updated: now, fetched: now }];
//! assert!(!fresh.is_stale(&StalenessPolicy::default(), now));
//!
//! let long_ago = now - Duration::from_secs(365 * 24 * 60 * 60);
//! let old = [CachedModel { updated: long_ago, fetched: long_ago }];
//! assert!(old.is_stale(&StalenessPolicy::default(), now));
//! ```

mod staleness;

use std::sync::Arc;
use std::time::SystemTime;

use crate::common::Coordinate;

pub use self::staleness::ModelCollection;
pub use self::staleness::StalenessPolicy;

/// Freshness and quality metadata of a cached classifier model.
pub trait ActivityModel {
    /// Fraction of the model's expected data it has seen, in `[0, 1]`.
    fn completeness_score(&self) -> f64;

    /// Measured accuracy in `[0, 1]`, if it has been assessed.
    fn accuracy_score(&self) -> Option<f64>;

    /// Number of events the accuracy score was measured over.
    fn total_events(&self) -> u64;

    /// When the model's contents last changed, or `None` if it is still awaiting its first
    /// population.
    fn last_updated(&self) -> Option<SystemTime>;

    /// When the model was last fetched from the backing store, or `None` if never.
    fn last_fetched(&self) -> Option<SystemTime>;
}

impl<M: ActivityModel + ?Sized> ActivityModel for &M {
    fn completeness_score(&self) -> f64 {
        (**self).completeness_score()
    }

    fn accuracy_score(&self) -> Option<f64> {
        (**self).accuracy_score()
    }

    fn total_events(&self) -> u64 {
        (**self).total_events()
    }

    fn last_updated(&self) -> Option<SystemTime> {
        (**self).last_updated()
    }

    fn last_fetched(&self) -> Option<SystemTime> {
        (**self).last_fetched()
    }
}

impl<M: ActivityModel + ?Sized> ActivityModel for Arc<M> {
    fn completeness_score(&self) -> f64 {
        (**self).completeness_score()
    }

    fn accuracy_score(&self) -> Option<f64> {
        (**self).accuracy_score()
    }

    fn total_events(&self) -> u64 {
        (**self).total_events()
    }

    fn last_updated(&self) -> Option<SystemTime> {
        (**self).last_updated()
    }

    fn last_fetched(&self) -> Option<SystemTime> {
        (**self).last_fetched()
    }
}

/// A source of classifier models keyed by activity type name, location and partition depth.
pub trait ModelSource {
    /// The model type handed out.
    type Model: ActivityModel;
    /// The classifier type that composes this source's models.
    type Classifier;

    /// Partition depths this source can provide models for.
    fn provides_depths(&self) -> &[u8];

    /// Returns the model for `name` covering `coordinate` at `depth`.
    fn model_for(&self, name: &str, coordinate: Coordinate, depth: u8)
    -> Option<Arc<Self::Model>>;

    /// Returns the models for each of `names` covering `coordinate` at `depth`, skipping names
    /// with no model.
    fn models_for(
        &self,
        names: &[&str],
        coordinate: Coordinate,
        depth: u8,
    ) -> Vec<Arc<Self::Model>> {
        names
            .iter()
            .filter_map(|name| self.model_for(name, coordinate, depth))
            .collect()
    }

    /// Adds or replaces a model.
    fn add(&self, model: Self::Model);
}
