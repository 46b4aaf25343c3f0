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

//! APIs for building, reading and writing the metadata of a parquet file.
//!
//! # See Also:
//! * [`metadata`]: the file / row group / column chunk hierarchy and its builders
//! * [`footer`]: reading and writing the serialized footer
//! * [`properties`]: writer configuration consulted by the builders
//!
//! # Example of writing a footer
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use parquet_metadata::{
//!     basic::{Repetition, Type as PhysicalType},
//!     file::{footer, metadata::FileMetaDataBuilder, properties::WriterProperties},
//!     schema::types::{SchemaDescriptor, Type},
//! };
//!
//! let field = Type::primitive_type_builder("b", PhysicalType::INT32)
//!     .with_repetition(Repetition::REQUIRED)
//!     .build()
//!     .unwrap();
//! let schema = Type::group_type_builder("schema")
//!     .with_fields(vec![Arc::new(field)])
//!     .build()
//!     .unwrap();
//! let descr = Arc::new(SchemaDescriptor::new(Arc::new(schema)));
//!
//! let mut builder = FileMetaDataBuilder::new(descr, Arc::new(WriterProperties::default()));
//! let row_group = builder.append_row_group(1);
//! row_group
//!     .next_column_chunk()
//!     .unwrap()
//!     .finish(1, None, None, 4, 12, 12, false);
//! row_group.finish(12).unwrap();
//! let metadata = builder.finish().unwrap();
//!
//! let mut bytes = b"PAR1".to_vec();
//! footer::write_metadata(&metadata, &mut bytes).unwrap();
//! assert_eq!(&bytes[bytes.len() - 4..], b"PAR1");
//! ```
pub mod footer;
pub mod metadata;
pub mod properties;
pub mod reader;

/// The length of the parquet footer in bytes
pub const FOOTER_SIZE: usize = 8;
/// The magic bytes opening and closing a parquet file
pub const PARQUET_MAGIC: [u8; 4] = [b'P', b'A', b'R', b'1'];
