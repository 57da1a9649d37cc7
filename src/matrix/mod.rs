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

//! Coordinate-bin matrix over latitude and longitude.
//!
//! Unlike the scalar histogram, the grid dimensions and coordinate ranges are fixed by the
//! caller, typically from an enclosing spatial partition, so that matrices for different
//! activity types over the same region line up cell for cell.
//!
//! # Usage
//!
//! ```rust
//! use activity_density::common::{Coordinate, ValueRange};
//! use activity_density::matrix::SpatialBinMatrix;
//!
//! let visits = [
//!     Coordinate::new(1.5, 1.5),
//!     Coordinate::new(1.6, 1.4),
//!     Coordinate::new(8.0, 3.0),
//! ];
//! let matrix = SpatialBinMatrix::from_coordinates(
//!     &visits,
//!     5,
//!     5,
//!     ValueRange::new(0.0, 10.0),
//!     ValueRange::new(0.0, 10.0),
//! );
//! assert_eq!(matrix.count(0, 0), Some(3));
//! assert_eq!(matrix.probability_for(Coordinate::new(8.5, 3.5), None), 2.0 / 3.0);
//!
//! let restored: SpatialBinMatrix = matrix.serialize().parse().unwrap();
//! assert_eq!(restored, matrix);
//! ```

mod display;
mod serialization;
mod sketch;

pub use self::serialization::MAX_SERIALIZED_CELLS;
pub use self::sketch::SpatialBinMatrix;
