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

use std::sync::Arc;

use criterion::*;
use parquet_metadata::basic::{Repetition, Type as PhysicalType};
use parquet_metadata::file::metadata::{ColumnStatistics, FileMetaData, FileMetaDataBuilder};
use parquet_metadata::file::properties::{WriterProperties, WriterVersion};
use parquet_metadata::schema::types::{SchemaDescPtr, SchemaDescriptor, Type};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NUM_COLUMNS: usize = 1_000;
const NUM_ROW_GROUPS: usize = 10;

fn wide_schema() -> SchemaDescPtr {
    let fields = (0..NUM_COLUMNS)
        .map(|i| {
            let field = Type::primitive_type_builder(&i.to_string(), PhysicalType::FLOAT)
                .with_repetition(Repetition::REQUIRED)
                .build()
                .unwrap();
            Arc::new(field)
        })
        .collect();
    let schema = Type::group_type_builder("schema")
        .with_fields(fields)
        .build()
        .unwrap();
    Arc::new(SchemaDescriptor::new(Arc::new(schema)))
}

fn build_meta(schema: SchemaDescPtr, rng: &mut StdRng) -> FileMetaData {
    let props = WriterProperties::builder()
        .set_writer_version(WriterVersion::PARQUET_2_0)
        .build();
    let max_value: Vec<u8> = (0..8).map(|_| rng.random()).collect();
    let min_value: Vec<u8> = (0..8).map(|_| rng.random()).collect();
    let stats = ColumnStatistics {
        null_count: 0,
        distinct_count: 0,
        min: Some(min_value.as_slice()),
        max: Some(max_value.as_slice()),
    };

    let mut builder = FileMetaDataBuilder::new(schema, Arc::new(props));
    for _ in 0..NUM_ROW_GROUPS {
        let row_group = builder.append_row_group(rng.random_range(1..10_000_000));
        let mut total_bytes = 0;
        for _ in 0..NUM_COLUMNS {
            let compressed_size = rng.random_range(50_000..5_000_000);
            total_bytes += compressed_size;

            let mut column = row_group.next_column_chunk().unwrap();
            column.set_statistics(&stats);
            column.finish(
                rng.random_range(1..1_000_000),
                Some(rng.random_range(4..2_000_000_000)),
                None,
                rng.random_range(4..2_000_000_000),
                compressed_size,
                rng.random_range(100_000..100_000_000),
                false,
            );
        }
        row_group.finish(total_bytes).unwrap();
    }
    builder.finish().unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let schema = wide_schema();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("build parquet metadata (wide)", |b| {
        b.iter(|| build_meta(schema.clone(), &mut rng))
    });

    let meta = build_meta(schema.clone(), &mut rng);
    c.bench_function("encode parquet metadata (wide)", |b| {
        b.iter(|| black_box(&meta).to_bytes().unwrap())
    });

    let buf = black_box(meta.to_bytes().unwrap());
    c.bench_function("decode parquet metadata (wide)", |b| {
        b.iter(|| FileMetaData::decode(&buf).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
