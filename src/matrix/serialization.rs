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

//! Text form of a coordinate matrix:
//!
//! ```text
//! latBinCount,lngBinCount,pseudoCount;
//! latMin,latMax;
//! lngMin,lngMax;
//! latBin,lngBin,value; ...
//! ```
//!
//! Only cells above the pseudo-count are listed.

use std::collections::TryReserveError;
use std::str::FromStr;

use crate::codec::Record;
use crate::codec::SketchRecords;
use crate::codec::SketchText;
use crate::common::Count;
use crate::common::DEFAULT_PSEUDO_COUNT;
use crate::common::ValueRange;
use crate::error::Error;
use crate::matrix::SpatialBinMatrix;

const CELL_RECORD_FIELDS: usize = 3;

/// The largest grid, in cells, that [`SpatialBinMatrix::deserialize`] accepts.
pub const MAX_SERIALIZED_CELLS: usize = 1 << 22;

impl SpatialBinMatrix {
    /// Serializes the matrix to its text form.
    pub fn serialize(&self) -> String {
        let mut text = SketchText::with_capacity(64);
        text.write_field(self.lat_bin_count());
        text.write_field(self.lng_bin_count());
        text.write_field(self.pseudo_count);
        text.end_record();
        write_range(&mut text, self.lat_range);
        write_range(&mut text, self.lng_range);

        for (lat_bin, row) in self.bins.iter().enumerate() {
            for (lng_bin, &count) in row.iter().enumerate() {
                if count > self.pseudo_count {
                    text.write_field(lat_bin);
                    text.write_field(lng_bin);
                    text.write_field(count);
                    text.end_record();
                }
            }
        }
        text.into_string()
    }

    /// Deserializes a matrix from its text form.
    ///
    /// A size record without a pseudo-count field uses [`DEFAULT_PSEUDO_COUNT`]. Cell records
    /// with the wrong number of fields, or naming a cell outside the grid, are skipped. Counts
    /// above [`MAX_COUNT`](crate::common::MAX_COUNT) are clamped.
    ///
    /// # Errors
    ///
    /// Returns an error if the size or either range record is missing or unparsable, if either
    /// bin count is zero, if the grid holds more than [`MAX_SERIALIZED_CELLS`] cells, or if any
    /// cell record holds an unparsable number.
    pub fn deserialize(text: &str) -> Result<Self, Error> {
        let mut records = SketchRecords::new(text);

        let header = records.read_record("size")?;
        let lat_bin_count = header.parse_field::<usize>(0, "lat bin count")?;
        let lng_bin_count = header.parse_field::<usize>(1, "lng bin count")?;
        let pseudo_count = if header.has_field(2) {
            header.parse_count(2, "pseudo count")?
        } else {
            DEFAULT_PSEUDO_COUNT
        };
        if lat_bin_count == 0 || lng_bin_count == 0 {
            return Err(Error::deserial("bin counts must be at least 1")
                .with_context("record", header.raw()));
        }
        if lat_bin_count
            .checked_mul(lng_bin_count)
            .is_none_or(|cells| cells > MAX_SERIALIZED_CELLS)
        {
            return Err(Error::deserial("matrix size too large")
                .with_context("record", header.raw())
                .with_context("max_cells", MAX_SERIALIZED_CELLS));
        }

        let lat_range = read_range(&records.read_record("lat range")?)?;
        let lng_range = read_range(&records.read_record("lng range")?)?;

        let too_large = |err: TryReserveError| {
            Error::deserial("matrix size too large")
                .with_context("record", header.raw())
                .set_source(err)
        };
        let mut bins: Vec<Vec<Count>> = Vec::new();
        bins.try_reserve_exact(lat_bin_count).map_err(too_large)?;
        for _ in 0..lat_bin_count {
            let mut row = Vec::new();
            row.try_reserve_exact(lng_bin_count).map_err(too_large)?;
            row.resize(lng_bin_count, pseudo_count);
            bins.push(row);
        }

        for record in records.remaining() {
            if record.len() != CELL_RECORD_FIELDS {
                log::warn!("skipping malformed matrix cell record: {:?}", record.raw());
                continue;
            }
            let lat_bin = record.parse_field::<usize>(0, "lat bin")?;
            let lng_bin = record.parse_field::<usize>(1, "lng bin")?;
            let count = record.parse_count(2, "cell value")?;
            match bins.get_mut(lat_bin).and_then(|row| row.get_mut(lng_bin)) {
                Some(cell) => *cell = count,
                None => log::warn!(
                    "skipping matrix cell ({lat_bin}, {lng_bin}) outside \
                     {lat_bin_count}x{lng_bin_count} grid"
                ),
            }
        }

        Ok(Self::with_bins(bins, lat_range, lng_range, pseudo_count))
    }
}

fn write_range(text: &mut SketchText, range: ValueRange) {
    text.write_field(range.min());
    text.write_field(range.max());
    text.end_record();
}

fn read_range(record: &Record<'_>) -> Result<ValueRange, Error> {
    ValueRange::try_new(
        record.parse_field(0, "range min")?,
        record.parse_field(1, "range max")?,
    )
}

impl FromStr for SpatialBinMatrix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s)
    }
}
