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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use activity_density::common::Coordinate;
use activity_density::common::ValueRange;
use activity_density::histogram::ScalarHistogram;
use activity_density::model::ActivityModel;
use activity_density::model::ModelCollection;
use activity_density::model::ModelSource;
use activity_density::model::StalenessPolicy;
use googletest::assert_that;
use googletest::prelude::near;

const HOUR: Duration = Duration::from_secs(60 * 60);
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct TestModel {
    name: String,
    depth: u8,
    speeds: ScalarHistogram,
    completeness: f64,
    accuracy: Option<f64>,
    events: u64,
    updated: Option<SystemTime>,
    fetched: Option<SystemTime>,
}

impl TestModel {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            depth: 2,
            speeds: ScalarHistogram::from_values(&[]),
            completeness: 1.0,
            accuracy: None,
            events: 0,
            updated: None,
            fetched: None,
        }
    }

    fn completeness(mut self, completeness: f64) -> Self {
        self.completeness = completeness;
        self
    }

    fn accuracy(mut self, accuracy: f64, events: u64) -> Self {
        self.accuracy = Some(accuracy);
        self.events = events;
        self
    }

    fn updated(mut self, at: SystemTime) -> Self {
        self.updated = Some(at);
        self
    }

    fn fetched(mut self, at: SystemTime) -> Self {
        self.fetched = Some(at);
        self
    }
}

impl ActivityModel for TestModel {
    fn completeness_score(&self) -> f64 {
        self.completeness
    }

    fn accuracy_score(&self) -> Option<f64> {
        self.accuracy
    }

    fn total_events(&self) -> u64 {
        self.events
    }

    fn last_updated(&self) -> Option<SystemTime> {
        self.updated
    }

    fn last_fetched(&self) -> Option<SystemTime> {
        self.fetched
    }
}

/// Models for a single region, keyed by name and depth.
struct InMemorySource {
    depths: Vec<u8>,
    region: (ValueRange, ValueRange),
    models: RwLock<HashMap<(String, u8), Arc<TestModel>>>,
}

impl InMemorySource {
    fn new() -> Self {
        Self {
            depths: vec![1, 2],
            region: (ValueRange::new(-42.0, -41.0), ValueRange::new(174.0, 175.0)),
            models: RwLock::new(HashMap::new()),
        }
    }

    fn covers(&self, coordinate: Coordinate) -> bool {
        let (lat, lng) = self.region;
        (lat.min()..=lat.max()).contains(&coordinate.latitude)
            && (lng.min()..=lng.max()).contains(&coordinate.longitude)
    }
}

impl ModelSource for InMemorySource {
    type Model = TestModel;
    type Classifier = ();

    fn provides_depths(&self) -> &[u8] {
        &self.depths
    }

    fn model_for(&self, name: &str, coordinate: Coordinate, depth: u8) -> Option<Arc<TestModel>> {
        if !self.covers(coordinate) {
            return None;
        }
        let models = self.models.read().unwrap();
        models.get(&(name.to_string(), depth)).cloned()
    }

    fn add(&self, model: TestModel) {
        let key = (model.name.clone(), model.depth);
        self.models.write().unwrap().insert(key, Arc::new(model));
    }
}

fn now() -> SystemTime {
    UNIX_EPOCH + 1000 * DAY
}

#[test]
fn test_default_policy() {
    let policy = StalenessPolicy::default();
    assert_eq!(policy.minimum_refetch_wait, HOUR);
    assert_eq!(policy.stale_last_updated_age, 30 * DAY);
    assert_eq!(policy.stale_last_fetched_age, 7 * DAY);
}

#[test]
fn test_empty_set_is_stale() {
    let models: Vec<TestModel> = Vec::new();
    assert!(models.is_stale(&StalenessPolicy::default(), now()));
    assert_eq!(models.completeness_score(), 0.0);
    assert_eq!(models.accuracy_score(), None);
    assert_eq!(models.last_updated(), None);
    assert_eq!(models.last_fetched(), UNIX_EPOCH);
}

#[test]
fn test_never_updated_is_not_stale() {
    let models = [TestModel::new("walking").fetched(UNIX_EPOCH)];
    assert!(!models.is_stale(&StalenessPolicy::default(), now()));
}

#[test]
fn test_recent_fetch_is_not_stale() {
    let long_ago = now() - 365 * DAY;
    let models = [TestModel::new("walking")
        .completeness(0.0)
        .updated(long_ago)
        .fetched(now() - 30 * 60 * Duration::from_secs(1))];
    assert!(!models.is_stale(&StalenessPolicy::default(), now()));
}

#[test]
fn test_thresholds_scale_with_completeness() {
    let policy = StalenessPolicy::default();
    let model = TestModel::new("cycling")
        .updated(now() - 20 * DAY)
        .fetched(now() - 4 * DAY);

    // a complete model is fresh for 30 days since its last update
    assert!(![model.clone()].is_stale(&policy, now()));

    // half complete: stale after 15 days without update and 3.5 days without fetch
    assert!([model.clone().completeness(0.5)].is_stale(&policy, now()));

    // both ages must pass their thresholds
    let refetched = model.completeness(0.5).fetched(now() - 2 * DAY);
    assert!(![refetched].is_stale(&policy, now()));
}

#[test]
fn test_incomplete_model_is_stale_after_minimum_wait() {
    let at = now() - 2 * HOUR;
    let models = [TestModel::new("car").completeness(0.0).updated(at).fetched(at)];
    assert!(models.is_stale(&StalenessPolicy::default(), now()));

    let models = [TestModel::new("car").completeness(f64::NAN).updated(at).fetched(at)];
    assert!(models.is_stale(&StalenessPolicy::default(), now()));
}

#[test]
fn test_future_timestamps_are_fresh() {
    let later = now() + DAY;
    let models = [TestModel::new("train").completeness(0.0).updated(later).fetched(later)];
    assert!(!models.is_stale(&StalenessPolicy::default(), now()));
}

#[test]
fn test_unbounded_thresholds_never_expire() {
    let policy = StalenessPolicy {
        stale_last_updated_age: Duration::MAX,
        stale_last_fetched_age: Duration::MAX,
        ..Default::default()
    };
    let models = [TestModel::new("walking").updated(UNIX_EPOCH).fetched(UNIX_EPOCH)];
    assert!(!models.is_stale(&policy, now()));
    assert!(!models.is_stale(&policy, UNIX_EPOCH + Duration::from_secs(1_000_000)));

    // an incomplete set scales even an unbounded threshold down to nothing
    let models = [TestModel::new("walking")
        .completeness(0.0)
        .updated(UNIX_EPOCH)
        .fetched(UNIX_EPOCH)];
    assert!(models.is_stale(&policy, now()));

    let policy = StalenessPolicy {
        minimum_refetch_wait: Duration::MAX,
        ..policy
    };
    assert!(!models.is_stale(&policy, now()));
}

#[test]
fn test_aggregates() {
    let models = [
        TestModel::new("walking")
            .completeness(0.25)
            .accuracy(0.9, 100)
            .updated(now() - 3 * DAY)
            .fetched(now() - DAY),
        TestModel::new("running")
            .completeness(0.75)
            .accuracy(0.5, 300)
            .updated(now() - DAY),
        TestModel::new("cycling").completeness(0.5).accuracy(-1.0, 50),
        TestModel::new("car").completeness(0.5),
    ];

    assert_eq!(models.completeness_score(), 0.5);
    // (0.9 * 100 + 0.5 * 300) / 400, ignoring unassessed and negative scores
    assert_that!(models.accuracy_score().unwrap(), near(0.6, 1e-12));
    assert_eq!(models.last_updated(), Some(now() - DAY));
    assert_eq!(models.last_fetched(), now() - DAY);
}

#[test]
fn test_accuracy_without_events() {
    let models = [TestModel::new("walking").accuracy(0.8, 0)];
    assert_eq!(models.accuracy_score(), None);
}

#[test]
fn test_source_hands_out_shared_models() {
    let source = InMemorySource::new();
    assert_eq!(source.provides_depths(), &[1, 2]);

    let wellington = Coordinate::new(-41.29, 174.78);
    source.add(TestModel::new("walking").completeness(0.5));
    source.add(TestModel::new("cycling"));

    let models = source.models_for(&["walking", "flying", "cycling"], wellington, 2);
    assert_eq!(models.len(), 2);
    assert_eq!(models[0].name, "walking");
    assert_eq!(models[1].name, "cycling");
    assert_eq!(models.completeness_score(), 0.75);

    assert!(source.model_for("walking", wellington, 1).is_none());
    assert!(source.model_for("walking", Coordinate::new(0.0, 0.0), 2).is_none());
}

#[test]
fn test_source_replaces_models() {
    let source = InMemorySource::new();
    let wellington = Coordinate::new(-41.29, 174.78);

    source.add(TestModel::new("walking"));
    let before = source.model_for("walking", wellington, 2).unwrap();
    assert!(before.speeds.is_empty());

    let mut retrained = TestModel::new("walking").updated(now());
    retrained.speeds = ScalarHistogram::from_values(&[1.2, 1.4, 1.3, 1.5]);
    source.add(retrained);

    let after = source.model_for("walking", wellington, 2).unwrap();
    assert!(!after.speeds.is_empty());
    assert_eq!(after.last_updated(), Some(now()));

    // handles taken earlier keep the model they were given
    assert!(before.speeds.is_empty());
    assert_eq!(before.last_updated(), None);
}
