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

use crate::matrix::SpatialBinMatrix;

/// Renders the ranges followed by one line per latitude bin, northernmost first.
///
/// Cells at or below the pseudo-count print as `-`, cells at the maximum as `X`, and anything
/// between as its share of the maximum in tenths.
impl fmt::Display for SpatialBinMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "lngRange: {}", self.lng_range)?;
        writeln!(f, "latRange: {}", self.lat_range)?;

        let max = self.max_count() as f64;
        for row in self.bins.iter().rev() {
            let line = row
                .iter()
                .map(|&count| {
                    let share = count as f64 / max;
                    if count <= self.pseudo_count {
                        '-'
                    } else if share >= 1.0 {
                        'X'
                    } else {
                        let tenths = ((share * 10.0).round() as u32).min(9);
                        char::from_digit(tenths, 10).unwrap_or('9')
                    }
                })
                .collect::<String>();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
