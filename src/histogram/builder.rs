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

use crate::common::Count;
use crate::common::DEFAULT_PSEUDO_COUNT;
use crate::common::MAX_PSEUDO_COUNT;
use crate::common::ValueRange;
use crate::common::saturating_increment;
use crate::common::tolerant_index;
use crate::histogram::ScalarHistogram;
use crate::histogram::binning;
use crate::histogram::binning::DEFAULT_BIN_COUNT;
use crate::histogram::binning::OUTLIER_STD_DEVS;

/// Builder for histograms over raw samples.
///
/// Histograms are immutable once built.
///
/// # Examples
///
/// ```
/// use activity_density::histogram::ScalarHistogram;
///
/// let speeds = [0.4, 1.1, 1.3, 1.2, 1.4, 1.3, 2.0, 1.2, 60.0];
/// let histogram = ScalarHistogram::builder()
///     .min_boundary(0.5)
///     .max_boundary(30.0)
///     .pseudo_count(0)
///     .name("walking speed")
///     .print_format("%.1f m/s")
///     .build(&speeds);
///
/// assert_eq!(histogram.range().min(), 1.1);
/// assert_eq!(histogram.range().max(), 2.0);
/// assert_eq!(histogram.name(), Some("walking speed"));
/// ```
#[derive(Debug, Clone)]
pub struct HistogramBuilder {
    min_boundary: Option<f64>,
    max_boundary: Option<f64>,
    pseudo_count: Count,
    trim_outliers: bool,
    name: Option<String>,
    print_format: Option<String>,
    print_modifier: Option<f64>,
}

impl Default for HistogramBuilder {
    fn default() -> Self {
        Self {
            min_boundary: None,
            max_boundary: None,
            pseudo_count: DEFAULT_PSEUDO_COUNT,
            trim_outliers: false,
            name: None,
            print_format: None,
            print_modifier: None,
        }
    }
}

impl HistogramBuilder {
    /// Discards samples below `boundary`.
    pub fn min_boundary(mut self, boundary: f64) -> Self {
        self.min_boundary = Some(boundary);
        self
    }

    /// Discards samples above `boundary`.
    pub fn max_boundary(mut self, boundary: f64) -> Self {
        self.max_boundary = Some(boundary);
        self
    }

    /// Sets the count every bin starts from.
    ///
    /// Values above [`MAX_PSEUDO_COUNT`] are lowered to it.
    pub fn pseudo_count(mut self, pseudo_count: Count) -> Self {
        if pseudo_count > MAX_PSEUDO_COUNT {
            log::warn!("lowering pseudo count {pseudo_count} to {MAX_PSEUDO_COUNT}");
        }
        self.pseudo_count = pseudo_count.min(MAX_PSEUDO_COUNT);
        self
    }

    /// Discards samples more than four standard deviations from the mean.
    pub fn trim_outliers(mut self, trim: bool) -> Self {
        self.trim_outliers = trim;
        self
    }

    /// Sets the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the printf-style format used for bin labels, e.g. `"%.1f km/h"`.
    pub fn print_format(mut self, format: impl Into<String>) -> Self {
        self.print_format = Some(format.into());
        self
    }

    /// Sets the multiplier applied to bin centres before formatting.
    pub fn print_modifier(mut self, modifier: f64) -> Self {
        self.print_modifier = Some(modifier);
        self
    }

    /// Builds a histogram from `values`.
    ///
    /// Non-finite samples are ignored. An empty sample produces a single bin holding only the
    /// pseudo-count over `(0, 0)`; a sample of identical values produces a single bin holding
    /// the pseudo-count plus one over `(v, v)`.
    pub fn build(self, values: &[f64]) -> ScalarHistogram {
        let filtered = self.filter(values);
        let mut histogram = self.bin(&filtered);
        histogram.name = self.name;
        histogram.print_format = self.print_format;
        histogram.print_modifier = self.print_modifier;
        histogram
    }

    fn filter(&self, values: &[f64]) -> Vec<f64> {
        let mut filtered = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();

        if self.trim_outliers {
            if let Some((mean, sd)) = binning::mean_and_std_dev(&filtered) {
                let lower = mean - sd * OUTLIER_STD_DEVS;
                let upper = mean + sd * OUTLIER_STD_DEVS;
                filtered.retain(|&v| v >= lower && v <= upper);
            }
        }
        if let Some(boundary) = self.min_boundary {
            filtered.retain(|&v| v >= boundary);
        }
        if let Some(boundary) = self.max_boundary {
            filtered.retain(|&v| v <= boundary);
        }
        filtered
    }

    fn bin(&self, values: &[f64]) -> ScalarHistogram {
        let pseudo_count = self.pseudo_count;
        if values.is_empty() {
            return ScalarHistogram::with_bins(vec![pseudo_count], ValueRange::ZERO, pseudo_count);
        }

        let (min, max) = binning::min_max(values);
        let range = ValueRange::new(min, max);
        if range.is_degenerate() {
            // every sample is the same value
            let bins = vec![pseudo_count.saturating_add(1)];
            return ScalarHistogram::with_bins(bins, range, pseudo_count);
        }

        let bin_count = binning::number_of_bins(values, DEFAULT_BIN_COUNT);
        let bin_width = range.bin_width(bin_count);
        let mut bins = vec![pseudo_count; bin_count];
        for &value in values {
            let position = (value - range.min()) / bin_width;
            match tolerant_index(position, bin_count) {
                Some(bin) => saturating_increment(&mut bins[bin]),
                None => log::debug!("dropped sample {value} at bin position {position}"),
            }
        }
        ScalarHistogram::with_bins(bins, range, pseudo_count)
    }
}
