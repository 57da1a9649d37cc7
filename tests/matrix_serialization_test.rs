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

use activity_density::common::Coordinate;
use activity_density::common::MAX_COUNT;
use activity_density::common::ValueRange;
use activity_density::error::ErrorKind;
use activity_density::matrix::MAX_SERIALIZED_CELLS;
use activity_density::matrix::SpatialBinMatrix;
use googletest::assert_that;
use googletest::prelude::eq;

fn two_by_three() -> SpatialBinMatrix {
    let coordinates = [
        Coordinate::new(0.5, 0.5),
        Coordinate::new(0.5, 0.5),
        Coordinate::new(1.5, 2.5),
    ];
    SpatialBinMatrix::from_coordinates(
        &coordinates,
        2,
        3,
        ValueRange::new(0.0, 2.0),
        ValueRange::new(0.0, 3.0),
    )
}

#[test]
fn test_serialize_lists_cells_above_pseudo_count() {
    assert_eq!(two_by_three().serialize(), "2,3,1;0,2;0,3;0,0,3;1,2,2;");
}

#[test]
fn test_round_trip() {
    let matrix = two_by_three();
    let restored = SpatialBinMatrix::deserialize(&matrix.serialize()).unwrap();
    assert_eq!(restored, matrix);

    let coordinate = Coordinate::new(1.5, 2.5);
    assert_eq!(
        restored.probability_for(coordinate, None),
        matrix.probability_for(coordinate, None)
    );
}

#[test]
fn test_round_trip_custom_pseudo_count() {
    let matrix = SpatialBinMatrix::from_coordinates_with_pseudo_count(
        &[Coordinate::new(-41.25, 174.75)],
        4,
        4,
        ValueRange::new(-41.3, -41.2),
        ValueRange::new(174.7, 174.8),
        3,
    );
    let restored: SpatialBinMatrix = matrix.serialize().parse().unwrap();
    assert_eq!(restored.pseudo_count(), 3);
    assert_eq!(restored.lat_range(), matrix.lat_range());
    assert_eq!(restored.lng_range(), matrix.lng_range());
    assert_eq!(restored, matrix);
}

#[test]
fn test_header_without_pseudo_count() {
    let matrix = SpatialBinMatrix::deserialize("2,2;0,1;0,1;1,1,5;").unwrap();
    assert_eq!(matrix.pseudo_count(), 1);
    assert_eq!(matrix.count(0, 0), Some(1));
    assert_eq!(matrix.count(1, 1), Some(5));
}

#[test]
fn test_skips_malformed_and_out_of_grid_cells() {
    let matrix = SpatialBinMatrix::deserialize("2,2,1;0,1;0,1;0,0;7,0,4;0,9,4;1,1,4;").unwrap();
    assert_eq!(matrix.count(0, 0), Some(1));
    assert_eq!(matrix.count(0, 1), Some(1));
    assert_eq!(matrix.count(1, 0), Some(1));
    assert_eq!(matrix.count(1, 1), Some(4));
}

#[test]
fn test_clamps_large_counts() {
    let matrix = SpatialBinMatrix::deserialize("1,1,1;0,1;0,1;0,0,80000;").unwrap();
    assert_eq!(matrix.count(0, 0), Some(MAX_COUNT));
}

#[test]
fn test_missing_records() {
    let err = SpatialBinMatrix::deserialize("2,2,1;0,1;").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), eq("missing lng range record"));

    let err = SpatialBinMatrix::deserialize("").unwrap_err();
    assert_that!(err.message(), eq("missing size record"));
}

#[test]
fn test_unparsable_records() {
    let err = SpatialBinMatrix::deserialize("a,2;0,1;0,1;").unwrap_err();
    assert_that!(err.message(), eq("failed to parse lat bin count"));

    let err = SpatialBinMatrix::deserialize("2,2,1;0,1;0,y;").unwrap_err();
    assert_that!(err.message(), eq("failed to parse range max"));

    let err = SpatialBinMatrix::deserialize("2,2,1;0,1;0,1;0,x,3;").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), eq("failed to parse lng bin"));
}

#[test]
fn test_rejects_oversized_grid() {
    for text in ["20000,20000,1;0,1;0,1;", "18446744073709551615,2,1;0,1;0,1;"] {
        let err = SpatialBinMatrix::deserialize(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
        assert_that!(err.message(), eq("matrix size too large"));
    }

    let side = 1 << 11;
    assert_eq!(side * side, MAX_SERIALIZED_CELLS);
    let matrix = SpatialBinMatrix::deserialize(&format!("{side},{side},1;0,1;0,1;")).unwrap();
    assert_eq!(matrix.lat_bin_count(), side);
}

#[test]
fn test_rejects_zero_bins() {
    let err = SpatialBinMatrix::deserialize("0,2,1;0,1;0,1;").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
}
