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

//! Binned density estimators for on-device activity classification.
//!
//! Two independent estimators are provided:
//!
//! - [`histogram::ScalarHistogram`]: a 1D histogram over a continuous measurement (speed,
//!   altitude change, ...) that sizes its own bins from the sample.
//! - [`matrix::SpatialBinMatrix`]: a 2D grid over latitude/longitude with caller supplied bin
//!   counts and coordinate ranges.
//!
//! Both smooth their counts with a pseudo-count, answer probability queries relative to their
//! most populated bin, and round-trip through a compact `;`-delimited text format so trained
//! models can be cached. Both are immutable once built and can be shared freely between threads.
//!
//! The [`model`] module describes the cache-side collaborator that consumes these estimators and
//! decides when a set of cached models has gone stale.
//!
//! # Usage
//!
//! ```rust
//! use activity_density::histogram::ScalarHistogram;
//!
//! let speeds = [1.2, 1.4, 1.3, 1.5, 1.1, 4.0, 1.3, 1.2];
//! let histogram = ScalarHistogram::from_values(&speeds);
//! assert!(histogram.probability_for(1.3) > histogram.probability_for(3.5));
//!
//! let restored = ScalarHistogram::deserialize(&histogram.serialize()).unwrap();
//! assert_eq!(restored.bins(), histogram.bins());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;

pub mod common;
pub mod error;
pub mod histogram;
pub mod matrix;
pub mod model;
