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

//! Text form of a histogram:
//!
//! ```text
//! binCount,pseudoCount;
//! rangeMin,rangeMax;
//! binIndex,value; ...
//! ```
//!
//! Only bins above the pseudo-count are listed.

use std::str::FromStr;

use crate::codec::SketchRecords;
use crate::codec::SketchText;
use crate::common::Count;
use crate::common::ValueRange;
use crate::error::Error;
use crate::histogram::ScalarHistogram;

const BIN_RECORD_FIELDS: usize = 2;

/// The largest bin count [`ScalarHistogram::deserialize`] accepts.
pub const MAX_SERIALIZED_BINS: usize = 1 << 22;

impl ScalarHistogram {
    /// Serializes the histogram to its text form.
    pub fn serialize(&self) -> String {
        let mut text = SketchText::with_capacity(32 + self.bins.len() * 8);
        text.write_field(self.bins.len());
        text.write_field(self.pseudo_count);
        text.end_record();
        text.write_field(self.range.min());
        text.write_field(self.range.max());
        text.end_record();

        for (index, &count) in self.bins.iter().enumerate() {
            if count > self.pseudo_count {
                text.write_field(index);
                text.write_field(count);
                text.end_record();
            }
        }
        text.into_string()
    }

    /// Deserializes a histogram from its text form.
    ///
    /// Bin records with the wrong number of fields, or naming a bin past the end, are skipped.
    /// Counts above [`MAX_COUNT`](crate::common::MAX_COUNT) are clamped.
    ///
    /// # Errors
    ///
    /// Returns an error if the size or range record is missing or unparsable, if the bin count
    /// is zero or above [`MAX_SERIALIZED_BINS`], or if any bin record holds an unparsable number.
    pub fn deserialize(text: &str) -> Result<Self, Error> {
        let mut records = SketchRecords::new(text);

        let header = records.read_record("size")?;
        let bin_count = header.parse_field::<usize>(0, "bin count")?;
        let pseudo_count = header.parse_count(1, "pseudo count")?;
        if bin_count == 0 {
            return Err(
                Error::deserial("bin count must be at least 1").with_context("record", header.raw())
            );
        }
        if bin_count > MAX_SERIALIZED_BINS {
            return Err(Error::deserial("bin count too large")
                .with_context("record", header.raw())
                .with_context("max_bins", MAX_SERIALIZED_BINS));
        }

        let range_record = records.read_record("range")?;
        let range = ValueRange::try_new(
            range_record.parse_field(0, "range min")?,
            range_record.parse_field(1, "range max")?,
        )?;

        let mut bins: Vec<Count> = Vec::new();
        bins.try_reserve_exact(bin_count).map_err(|err| {
            Error::deserial("bin count too large")
                .with_context("bin_count", bin_count)
                .set_source(err)
        })?;
        bins.resize(bin_count, pseudo_count);

        for record in records.remaining() {
            if record.len() != BIN_RECORD_FIELDS {
                log::warn!("skipping malformed histogram bin record: {:?}", record.raw());
                continue;
            }
            let bin = record.parse_field::<usize>(0, "bin index")?;
            let count = record.parse_count(1, "bin value")?;
            match bins.get_mut(bin) {
                Some(slot) => *slot = count,
                None => log::warn!("skipping histogram bin {bin} beyond bin count {bin_count}"),
            }
        }

        Ok(Self::with_bins(bins, range, pseudo_count))
    }
}

impl FromStr for ScalarHistogram {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s)
    }
}
