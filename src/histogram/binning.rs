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

//! Sample statistics used to size histogram bins.

/// Bin count used when the Freedman-Diaconis width is too narrow to be useful.
pub const DEFAULT_BIN_COUNT: usize = 10;

/// Samples further than this many standard deviations from the mean are outliers.
pub const OUTLIER_STD_DEVS: f64 = 4.0;

/// Chooses a bin count for `values` using a Freedman-Diaconis width.
///
/// Falls back to `default_bins` when the width is no wider than `range / n`. `values` must be
/// non-empty and finite.
pub(super) fn number_of_bins(values: &[f64], default_bins: usize) -> usize {
    let (lower, upper) = min_max(values);
    let spread = upper - lower;
    let h = bin_width(values);
    if h <= spread / values.len() as f64 {
        return default_bins;
    }
    (spread / h).ceil() as usize
}

/// Freedman-Diaconis bin width: `2 * IQR * n^(-1/3)`.
pub(super) fn bin_width(values: &[f64]) -> f64 {
    2.0 * iqr(values) * (values.len() as f64).powf(-1.0 / 3.0)
}

/// Interquartile range using floor-indexed quantiles, without interpolation.
pub(super) fn iqr(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    let q1 = sorted[(n / 4.0).floor() as usize];
    let q3 = sorted[(n * 3.0 / 4.0).floor() as usize];
    q3 - q1
}

/// Mean and population standard deviation, or `None` for an empty sample.
pub(super) fn mean_and_std_dev(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

pub(super) fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
