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

//! Value types and numeric helpers shared by both estimators.

mod bucket;
mod count;
mod range;

pub use self::bucket::TOP_EDGE_TOLERANCE;
pub use self::count::Count;
pub use self::count::MAX_COUNT;
pub use self::count::MAX_PSEUDO_COUNT;
pub use self::count::clamp_count;
pub use self::range::ValueRange;

pub(crate) use self::bucket::clamp_unit;
pub(crate) use self::bucket::floor_index;
pub(crate) use self::bucket::tolerant_index;
pub(crate) use self::count::saturating_increment;

/// Pseudo-count applied to every bin when none is specified.
pub const DEFAULT_PSEUDO_COUNT: Count = 1;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from a latitude and longitude.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
