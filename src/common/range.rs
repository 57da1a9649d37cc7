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

use std::fmt;

use crate::error::Error;

/// A closed `[min, max]` interval with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// The zero-width range at the origin.
    pub const ZERO: ValueRange = ValueRange { min: 0.0, max: 0.0 };

    /// Creates a range.
    ///
    /// # Panics
    ///
    /// Panics if `min > max` or either bound is NaN.
    pub fn new(min: f64, max: f64) -> Self {
        match Self::try_new(min, max) {
            Ok(range) => range,
            Err(err) => panic!("{}", err.message()),
        }
    }

    /// Creates a range, returning an error if `min > max` or either bound is NaN.
    pub fn try_new(min: f64, max: f64) -> Result<Self, Error> {
        if min <= max {
            Ok(Self { min, max })
        } else {
            Err(Error::invalid_argument(format!(
                "range min must not exceed max. Found: {min} > {max}"
            )))
        }
    }

    /// Returns the lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns `max - min`.
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if the range covers a single value.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Width of each of `bin_count` equal slices of this range.
    pub(crate) fn bin_width(&self, bin_count: usize) -> f64 {
        self.width() / bin_count as f64
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.min, self.max)
    }
}
