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

//! Adaptive-bin histogram over a scalar measurement.
//!
//! The histogram sizes its bins from the sample using a Freedman-Diaconis width
//! (`2 * IQR * n^(-1/3)`), falling back to [`DEFAULT_BIN_COUNT`] bins when that width is too
//! narrow. Every bin starts from a pseudo-count so no in-range value scores exactly zero.
//!
//! Probabilities are relative to the most populated bin rather than normalized over the total,
//! so the mode always scores 1.
//!
//! Two degenerate shapes are produced on purpose:
//!
//! - an empty sample yields one bin of pseudo-count over `(0, 0)`, which
//!   [reports](ScalarHistogram::is_empty) as empty and scores 0 everywhere;
//! - a sample of identical values `v` yields one bin of pseudo-count plus one over `(v, v)`,
//!   which scores 1 at `v` and 0 elsewhere.
//!
//! # Usage
//!
//! ```rust
//! use activity_density::histogram::ScalarHistogram;
//!
//! let altitude_changes = [0.1, 0.3, 0.2, 0.2, 0.5, 0.4, 0.2, 0.3, 0.1, 2.5];
//! let histogram = ScalarHistogram::builder()
//!     .pseudo_count(1)
//!     .trim_outliers(true)
//!     .build(&altitude_changes);
//!
//! let peak = histogram.peak_index().unwrap();
//! assert_eq!(histogram.probability_for(histogram.middle_for(peak)), 1.0);
//!
//! let text = histogram.serialize();
//! let restored: ScalarHistogram = text.parse().unwrap();
//! assert_eq!(restored.bins(), histogram.bins());
//! assert_eq!(restored.range(), histogram.range());
//! ```

mod binning;
mod builder;
mod display;
mod serialization;
mod sketch;

pub use self::binning::DEFAULT_BIN_COUNT;
pub use self::binning::OUTLIER_STD_DEVS;
pub use self::builder::HistogramBuilder;
pub use self::serialization::MAX_SERIALIZED_BINS;
pub use self::sketch::ScalarHistogram;
