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

//! Text records shared by the estimator serializers.
//!
//! A serialized estimator is a sequence of records, each terminated by `;`, with fields
//! separated by `,`. Records are not tied to lines, and empty fragments are ignored.

use std::fmt::Display;
use std::fmt::Write;
use std::str::FromStr;

use crate::common::Count;
use crate::common::clamp_count;
use crate::error::Error;

pub(crate) const RECORD_TERMINATOR: char = ';';
pub(crate) const FIELD_SEPARATOR: char = ',';

pub(crate) struct SketchText {
    text: String,
    fields_in_record: usize,
}

impl SketchText {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            fields_in_record: 0,
        }
    }

    pub fn into_string(self) -> String {
        debug_assert_eq!(self.fields_in_record, 0, "unterminated record");
        self.text
    }

    pub fn write_field(&mut self, value: impl Display) {
        if self.fields_in_record > 0 {
            self.text.push(FIELD_SEPARATOR);
        }
        // writing into a String cannot fail
        let _ = write!(self.text, "{value}");
        self.fields_in_record += 1;
    }

    pub fn end_record(&mut self) {
        self.text.push(RECORD_TERMINATOR);
        self.fields_in_record = 0;
    }
}

/// Cursor over the non-empty records of a serialized estimator.
pub(crate) struct SketchRecords<'a> {
    records: std::vec::IntoIter<Record<'a>>,
}

impl<'a> SketchRecords<'a> {
    pub fn new(text: &'a str) -> Self {
        let records = text
            .split(RECORD_TERMINATOR)
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(Record::new)
            .collect::<Vec<_>>();
        Self {
            records: records.into_iter(),
        }
    }

    /// Takes the next structural record, failing if the text has run out.
    pub fn read_record(&mut self, tag: &'static str) -> Result<Record<'a>, Error> {
        self.records.next().ok_or_else(|| Error::missing_record(tag))
    }

    /// Consumes the remaining records.
    pub fn remaining(self) -> impl Iterator<Item = Record<'a>> {
        self.records
    }
}

#[derive(Debug)]
pub(crate) struct Record<'a> {
    raw: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    fn new(raw: &'a str) -> Self {
        let fields = raw.split(FIELD_SEPARATOR).map(str::trim).collect();
        Self { raw, fields }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the field at `index` is present.
    pub fn has_field(&self, index: usize) -> bool {
        self.fields.get(index).is_some_and(|field| !field.is_empty())
    }

    /// Parses the field at `index`, naming it `tag` in any error.
    pub fn parse_field<T>(&self, index: usize, tag: &'static str) -> Result<T, Error>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let field = self.fields.get(index).ok_or_else(|| {
            Error::deserial(format!("missing field {tag}")).with_context("record", self.raw)
        })?;
        field.parse::<T>().map_err(|err| {
            Error::deserial(format!("failed to parse {tag}"))
                .with_context("record", self.raw)
                .with_context("field", field)
                .set_source(err)
        })
    }
}

impl Record<'_> {
    /// Parses a bin count, clamping values above [`MAX_COUNT`](crate::common::MAX_COUNT).
    pub fn parse_count(&self, index: usize, tag: &'static str) -> Result<Count, Error> {
        let value = self.parse_field::<u64>(index, tag)?;
        let count = clamp_count(value);
        if u64::from(count) != value {
            log::warn!("clamped {tag} {value} to {count} in record {:?}", self.raw);
        }
        Ok(count)
    }
}
