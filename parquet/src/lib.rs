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

//!
//! This crate implements the metadata layer of
//! [Apache Parquet](https://parquet.apache.org/): the structures describing how
//! data is physically laid out inside a Parquet file, and the builders that
//! assemble them while a file is being written.
//!
//! # Format Overview
//!
//! Parquet files are partitioned for scalability. Each file ends with a footer
//! holding the file metadata: the flattened schema, followed by zero or more
//! "row groups", each row group holding one "column chunk" per schema leaf.
//! The column chunk metadata records where the column's pages live, how they
//! are encoded and compressed, and optional statistics.
//!
//! For more details about the Parquet format itself, see the [Parquet spec]
//!
//! [Parquet spec]: https://github.com/apache/parquet-format/blob/master/README.md#file-format
//!
//! # APIs
//!
//! ## Reading metadata
//!
//! [`file::footer::read_metadata`] reads the footer from any
//! [`ChunkReader`](file::reader::ChunkReader) into an owned
//! [`FileMetaData`](file::metadata::FileMetaData). Row groups and column chunks
//! are exposed as lightweight views borrowing from it.
//!
//! ## Building metadata
//!
//! [`FileMetaDataBuilder`](file::metadata::FileMetaDataBuilder) assembles the
//! same hierarchy in a single pass: row groups in append order, column chunks
//! in schema order. Every builder must be finished before a
//! [`FileMetaData`](file::metadata::FileMetaData) can be produced, and
//! [`file::properties::WriterProperties`] decides compression and encodings.
//!
//! ## Schema
//!
//! The [`schema`] module provides APIs to work with Parquet schemas, and
//! [`schema::printer`] renders schemas and metadata in human readable form.
#![warn(missing_docs)]

#[macro_use]
pub mod errors;
#[macro_use]
mod parquet_macros;
pub(crate) mod parquet_thrift;

pub mod basic;

pub mod format;

pub mod file;
pub mod schema;
