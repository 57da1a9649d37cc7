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

use crate::common::Coordinate;
use crate::common::Count;
use crate::common::DEFAULT_PSEUDO_COUNT;
use crate::common::ValueRange;
use crate::common::clamp_count;
use crate::common::clamp_unit;
use crate::common::floor_index;
use crate::common::saturating_increment;
use crate::error::Error;

/// Grid of coordinate counts indexed `[lat_bin][lng_bin]`.
///
/// See the [module documentation](super) for more details.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialBinMatrix {
    pub(super) bins: Vec<Vec<Count>>,
    pub(super) lat_range: ValueRange,
    pub(super) lng_range: ValueRange,
    pub(super) lat_bin_width: f64,
    pub(super) lng_bin_width: f64,
    pub(super) pseudo_count: Count,
}

impl SpatialBinMatrix {
    /// Bins `coordinates` into a `lat_bin_count` by `lng_bin_count` grid over the given ranges,
    /// starting every cell from [`DEFAULT_PSEUDO_COUNT`].
    ///
    /// Coordinates falling outside the grid are ignored.
    ///
    /// # Panics
    ///
    /// Panics if either bin count is zero.
    pub fn from_coordinates(
        coordinates: &[Coordinate],
        lat_bin_count: usize,
        lng_bin_count: usize,
        lat_range: ValueRange,
        lng_range: ValueRange,
    ) -> Self {
        Self::from_coordinates_with_pseudo_count(
            coordinates,
            lat_bin_count,
            lng_bin_count,
            lat_range,
            lng_range,
            DEFAULT_PSEUDO_COUNT,
        )
    }

    /// Like [`from_coordinates`](Self::from_coordinates), with an explicit pseudo-count.
    ///
    /// # Panics
    ///
    /// Panics if either bin count is zero.
    pub fn from_coordinates_with_pseudo_count(
        coordinates: &[Coordinate],
        lat_bin_count: usize,
        lng_bin_count: usize,
        lat_range: ValueRange,
        lng_range: ValueRange,
        pseudo_count: Count,
    ) -> Self {
        assert!(
            lat_bin_count > 0 && lng_bin_count > 0,
            "bin counts must be at least 1. Found: {lat_bin_count}x{lng_bin_count}"
        );
        let mut matrix = Self::with_bins(
            vec![vec![pseudo_count; lng_bin_count]; lat_bin_count],
            lat_range,
            lng_range,
            pseudo_count,
        );
        for &coordinate in coordinates {
            match matrix.bin_for(coordinate) {
                Some((lat_bin, lng_bin)) => {
                    saturating_increment(&mut matrix.bins[lat_bin][lng_bin]);
                }
                None => log::debug!("dropped coordinate {coordinate:?} outside the grid"),
            }
        }
        matrix
    }

    /// Creates a matrix from precomputed cells indexed `[lat_bin][lng_bin]`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if the
    /// grid is empty or its rows differ in length.
    pub fn from_bins(
        bins: Vec<Vec<Count>>,
        lat_range: ValueRange,
        lng_range: ValueRange,
        pseudo_count: Count,
    ) -> Result<Self, Error> {
        let lng_bin_count = bins.first().map_or(0, Vec::len);
        if lng_bin_count == 0 {
            return Err(Error::invalid_argument("matrix must have at least one cell"));
        }
        if let Some(row) = bins.iter().position(|row| row.len() != lng_bin_count) {
            return Err(Error::invalid_argument("matrix rows must have equal length")
                .with_context("row", row)
                .with_context("expected", lng_bin_count));
        }
        Ok(Self::with_bins(bins, lat_range, lng_range, pseudo_count))
    }

    pub(super) fn with_bins(
        bins: Vec<Vec<Count>>,
        lat_range: ValueRange,
        lng_range: ValueRange,
        pseudo_count: Count,
    ) -> Self {
        let lat_bin_width = lat_range.bin_width(bins.len());
        let lng_bin_width = lng_range.bin_width(bins[0].len());
        Self {
            bins,
            lat_range,
            lng_range,
            lat_bin_width,
            lng_bin_width,
            pseudo_count,
        }
    }

    /// Returns the cells indexed `[lat_bin][lng_bin]`.
    pub fn bins(&self) -> &[Vec<Count>] {
        &self.bins
    }

    /// Returns the count of one cell, or `None` if it lies outside the grid.
    pub fn count(&self, lat_bin: usize, lng_bin: usize) -> Option<Count> {
        self.bins.get(lat_bin)?.get(lng_bin).copied()
    }

    /// Returns the number of latitude bins.
    pub fn lat_bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Returns the number of longitude bins.
    pub fn lng_bin_count(&self) -> usize {
        self.bins[0].len()
    }

    /// Returns the latitude range covered by the grid.
    pub fn lat_range(&self) -> ValueRange {
        self.lat_range
    }

    /// Returns the longitude range covered by the grid.
    pub fn lng_range(&self) -> ValueRange {
        self.lng_range
    }

    /// Returns the height of each latitude bin.
    pub fn lat_bin_width(&self) -> f64 {
        self.lat_bin_width
    }

    /// Returns the width of each longitude bin.
    pub fn lng_bin_width(&self) -> f64 {
        self.lng_bin_width
    }

    /// Returns the pseudo-count every cell started from.
    pub fn pseudo_count(&self) -> Count {
        self.pseudo_count
    }

    /// Returns the largest cell count.
    pub fn max_count(&self) -> Count {
        self.bins
            .iter()
            .filter_map(|row| row.iter().copied().max())
            .max()
            .unwrap_or(0)
    }

    /// Returns the `(lat_bin, lng_bin)` cell holding `coordinate`, or `None` if it lies outside
    /// the grid.
    pub fn bin_for(&self, coordinate: Coordinate) -> Option<(usize, usize)> {
        let lat_position = (coordinate.latitude - self.lat_range.min()) / self.lat_bin_width;
        let lng_position = (coordinate.longitude - self.lng_range.min()) / self.lng_bin_width;
        let lat_bin = floor_index(lat_position, self.lat_bin_count())?;
        let lng_bin = floor_index(lng_position, self.lng_bin_count())?;
        Some((lat_bin, lng_bin))
    }

    /// Returns the density at `coordinate` relative to the most populated cell, in `[0, 1]`.
    ///
    /// `max_threshold` caps the normalizing maximum, so several matrices can be scored against a
    /// shared ceiling. Coordinates outside the grid score as an untouched cell would.
    ///
    /// # Examples
    ///
    /// ```
    /// use activity_density::common::{Coordinate, ValueRange};
    /// use activity_density::matrix::SpatialBinMatrix;
    ///
    /// let home = Coordinate::new(-41.29, 174.78);
    /// let matrix = SpatialBinMatrix::from_coordinates(
    ///     &[home, home, home],
    ///     4,
    ///     4,
    ///     ValueRange::new(-41.3, -41.2),
    ///     ValueRange::new(174.7, 174.8),
    /// );
    /// assert_eq!(matrix.probability_for(home, None), 1.0);
    /// assert_eq!(matrix.probability_for(Coordinate::new(0.0, 0.0), None), 0.25);
    /// assert_eq!(matrix.probability_for(Coordinate::new(0.0, 0.0), Some(2)), 0.5);
    /// ```
    pub fn probability_for(&self, coordinate: Coordinate, max_threshold: Option<u64>) -> f64 {
        // also rejects NaN widths
        if !(self.lat_bin_width > 0.0 && self.lng_bin_width > 0.0) {
            return 0.0;
        }

        let mut max = self.max_count();
        if max == 0 {
            return 0.0;
        }
        if let Some(threshold) = max_threshold {
            max = max.min(clamp_count(threshold));
        }
        if max == 0 {
            return 0.0;
        }

        let count = match self.bin_for(coordinate) {
            Some((lat_bin, lng_bin)) => self.bins[lat_bin][lng_bin],
            None => self.pseudo_count,
        };
        clamp_unit(count as f64 / max as f64)
    }
}
