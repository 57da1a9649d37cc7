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
use crate::common::ValueRange;
use crate::common::clamp_unit;
use crate::common::floor_index;
use crate::common::tolerant_index;
use crate::error::Error;
use crate::histogram::HistogramBuilder;

/// Histogram over a scalar measurement with pseudo-count smoothing.
///
/// See the [module documentation](super) for more details.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarHistogram {
    pub(super) bins: Vec<Count>,
    pub(super) range: ValueRange,
    pub(super) bin_width: f64,
    pub(super) pseudo_count: Count,

    pub(super) name: Option<String>,
    pub(super) print_format: Option<String>,
    pub(super) print_modifier: Option<f64>,
}

impl ScalarHistogram {
    /// Returns a builder for histograms over raw samples.
    pub fn builder() -> HistogramBuilder {
        HistogramBuilder::default()
    }

    /// Builds a histogram from samples with the default builder settings.
    pub fn from_values(values: &[f64]) -> Self {
        Self::builder().build(values)
    }

    /// Creates a histogram from precomputed bins.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if `bins`
    /// is empty.
    pub fn from_bins(
        bins: Vec<Count>,
        range: ValueRange,
        pseudo_count: Count,
    ) -> Result<Self, Error> {
        if bins.is_empty() {
            return Err(Error::invalid_argument("histogram must have at least one bin"));
        }
        Ok(Self::with_bins(bins, range, pseudo_count))
    }

    pub(super) fn with_bins(bins: Vec<Count>, range: ValueRange, pseudo_count: Count) -> Self {
        debug_assert!(!bins.is_empty());
        let bin_width = range.bin_width(bins.len());
        Self {
            bins,
            range,
            bin_width,
            pseudo_count,
            name: None,
            print_format: None,
            print_modifier: None,
        }
    }

    /// Returns the bin counts in ascending value order.
    pub fn bins(&self) -> &[Count] {
        &self.bins
    }

    /// Returns the number of bins.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Returns the value range covered by the bins.
    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Returns the width of each bin.
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Returns the pseudo-count every bin started from.
    pub fn pseudo_count(&self) -> Count {
        self.pseudo_count
    }

    /// Returns the display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the printf-style format for bin labels, if any.
    pub fn print_format(&self) -> Option<&str> {
        self.print_format.as_deref()
    }

    /// Returns the multiplier applied to bin labels, if any.
    pub fn print_modifier(&self) -> Option<f64> {
        self.print_modifier
    }

    /// Returns the largest bin count.
    pub fn max_count(&self) -> Count {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    /// Returns true if this histogram holds no observations.
    ///
    /// A histogram is empty when it has a single bin that holds nothing beyond its pseudo-count,
    /// which is what building from an empty (or fully filtered) sample produces. Builders cap the
    /// pseudo-count at [`MAX_PSEUDO_COUNT`](crate::common::MAX_PSEUDO_COUNT), so a single-value
    /// histogram is never mistaken for an empty one.
    pub fn is_empty(&self) -> bool {
        self.bins.len() == 1 && self.bins[0] <= self.pseudo_count
    }

    /// Returns the bin holding `value`, or `None` if it lies outside the range.
    ///
    /// Values overshooting the top edge by less than
    /// [`TOP_EDGE_TOLERANCE`](crate::common::TOP_EDGE_TOLERANCE) bins map to the last bin.
    pub fn bin_for(&self, value: f64) -> Option<usize> {
        let position = (value - self.range.min()) / self.bin_width;
        let bin = tolerant_index(position, self.bins.len());
        if bin.is_none() {
            log::debug!(
                "value {value} outside histogram range {} (bin width {})",
                self.range,
                self.bin_width
            );
        }
        bin
    }

    /// Returns the density at `value` relative to the most populated bin, in `[0, 1]`.
    ///
    /// Single-bin histograms act as exact-match indicators: 1 for the range minimum, 0
    /// otherwise. Values outside the range score 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use activity_density::histogram::ScalarHistogram;
    ///
    /// let histogram = ScalarHistogram::from_values(&[5.0, 5.0, 5.0]);
    /// assert_eq!(histogram.probability_for(5.0), 1.0);
    /// assert_eq!(histogram.probability_for(5.5), 0.0);
    /// ```
    pub fn probability_for(&self, value: f64) -> f64 {
        let max = self.max_count();
        if max == 0 || self.bin_width.is_nan() || self.is_empty() {
            return 0.0;
        }

        if self.bins.len() == 1 {
            return if value == self.range.min() { 1.0 } else { 0.0 };
        }

        let bin = if value == self.range.max() {
            self.bins.len() - 1
        } else {
            let position = (value - self.range.min()) / self.bin_width;
            match floor_index(position, self.bins.len()) {
                Some(bin) => bin,
                None => return 0.0,
            }
        };

        clamp_unit(self.bins[bin] as f64 / max as f64)
    }

    /// Returns the share of all counts held by `bin`.
    ///
    /// Returns `None` if `bin` is out of range or the histogram holds no counts at all.
    pub fn percent_of_total_for(&self, bin: usize) -> Option<f64> {
        let count = *self.bins.get(bin)?;
        let total = self.bins.iter().map(|&c| c as u64).sum::<u64>();
        if total == 0 {
            return None;
        }
        Some(count as f64 / total as f64)
    }

    /// Returns the lower edge of `bin`.
    pub fn bottom_for(&self, bin: usize) -> f64 {
        self.range.min() + self.bin_width * bin as f64
    }

    /// Returns the centre of `bin`.
    pub fn middle_for(&self, bin: usize) -> f64 {
        self.bottom_for(bin) + self.bin_width * 0.5
    }

    /// Returns the upper edge of `bin`.
    pub fn top_for(&self, bin: usize) -> f64 {
        self.bottom_for(bin) + self.bin_width
    }

    /// Returns every bin index holding the maximum count, or `None` if all bins are zero.
    pub fn peak_indexes(&self) -> Option<Vec<usize>> {
        let max = self.max_count();
        if max == 0 {
            return None;
        }
        let peaks = self
            .bins
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == max)
            .map(|(index, _)| index)
            .collect();
        Some(peaks)
    }

    /// Returns the peak bin if there is exactly one.
    pub fn peak_index(&self) -> Option<usize> {
        match self.peak_indexes()?.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Returns the value intervals covered by peak bins, merging adjacent peaks.
    ///
    /// Each range spans from the bottom of its first bin to the top of its last bin.
    pub fn peak_ranges(&self) -> Option<Vec<ValueRange>> {
        let peaks = self.peak_indexes()?;

        // runs of consecutive bin indexes, as (first, last)
        let mut runs: Vec<(usize, usize)> = Vec::new();
        for bin in peaks {
            match runs.last_mut() {
                Some((_, last)) if *last + 1 == bin => *last = bin,
                _ => runs.push((bin, bin)),
            }
        }

        let ranges = runs
            .into_iter()
            .filter_map(|(first, last)| {
                ValueRange::try_new(self.bottom_for(first), self.top_for(last)).ok()
            })
            .collect();
        Some(ranges)
    }
}
