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

/// Bin count type shared by both estimators.
///
/// Counts are 16 bits wide so that many cached models stay small on device. Accumulation
/// saturates at [`MAX_COUNT`] and loaded values above it are clamped down.
pub type Count = u16;

/// The largest value a bin can hold.
pub const MAX_COUNT: Count = Count::MAX;

/// The largest pseudo-count a histogram builder accepts.
///
/// One below [`MAX_COUNT`], so a bin holding an observation always exceeds the pseudo-count.
pub const MAX_PSEUDO_COUNT: Count = MAX_COUNT - 1;

/// Clamps a wide count (from text or a caller threshold) into the [`Count`] range.
///
/// # Examples
///
/// ```
/// use activity_density::common::{clamp_count, MAX_COUNT};
///
/// assert_eq!(clamp_count(42), 42);
/// assert_eq!(clamp_count(1_000_000), MAX_COUNT);
/// ```
pub fn clamp_count(value: u64) -> Count {
    Count::try_from(value).unwrap_or(MAX_COUNT)
}

#[inline]
pub(crate) fn saturating_increment(bin: &mut Count) {
    *bin = bin.saturating_add(1);
}
