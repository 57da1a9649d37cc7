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

/// How far past the top edge (in bins) a position may land and still count as the last bin.
///
/// Values equal to a range maximum can overshoot the last bin by a rounding error when divided
/// by the bin width.
pub const TOP_EDGE_TOLERANCE: f64 = 0.001;

/// Maps a fractional bin position to a bin in `[0, bin_count)`.
///
/// Returns `None` for negative, non-finite or too-large positions.
pub(crate) fn floor_index(position: f64, bin_count: usize) -> Option<usize> {
    let floored = position.floor();
    if !floored.is_finite() || floored < 0.0 || floored >= bin_count as f64 {
        return None;
    }
    Some(floored as usize)
}

/// Like [`floor_index`], but a position landing exactly one bin past the end by less than
/// [`TOP_EDGE_TOLERANCE`] maps to the last bin.
pub(crate) fn tolerant_index(position: f64, bin_count: usize) -> Option<usize> {
    let top = bin_count as f64;
    if position.floor() == top && position - top < TOP_EDGE_TOLERANCE {
        return bin_count.checked_sub(1);
    }
    floor_index(position, bin_count)
}

/// Clamps a ratio into `[0, 1]`, mapping NaN to 0.
#[inline]
pub(crate) fn clamp_unit(ratio: f64) -> f64 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}
