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

//! Parquet metadata API
//!
//! Users should use these structures to interact with Parquet metadata.
//!
//! * [`FileMetaData`]: File level metadata such as schema, row counts and
//!   version. It owns the decoded footer record.
//!
//! * [`RowGroupMetaData`]: Metadata for each Row Group with a File, such as
//!   location and number of rows, and column chunks.
//!
//! * [`ColumnChunkMetaData`]: Metadata for each column chunk (primitive leaf)
//!   within a Row Group including encoding and compression information,
//!   number of values, statistics, etc.
//!
//! [`RowGroupMetaData`] and [`ColumnChunkMetaData`] are views borrowed from
//! the owning [`FileMetaData`], constructed on demand through
//! [`FileMetaData::row_group`] and [`RowGroupMetaData::column`].
//!
//! Metadata for a file being written is assembled with
//! [`FileMetaDataBuilder`], [`RowGroupMetaDataBuilder`] and
//! [`ColumnChunkMetaDataBuilder`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use parquet_metadata::basic::{Repetition, Type as PhysicalType};
//! use parquet_metadata::file::metadata::{FileMetaData, FileMetaDataBuilder};
//! use parquet_metadata::file::properties::WriterProperties;
//! use parquet_metadata::schema::types::{SchemaDescriptor, Type};
//!
//! let field = Type::primitive_type_builder("id", PhysicalType::INT64)
//!     .with_repetition(Repetition::REQUIRED)
//!     .build()
//!     .unwrap();
//! let schema = Type::group_type_builder("schema")
//!     .with_fields(vec![Arc::new(field)])
//!     .build()
//!     .unwrap();
//! let schema_descr = Arc::new(SchemaDescriptor::new(Arc::new(schema)));
//!
//! let mut builder = FileMetaDataBuilder::new(schema_descr, Arc::new(WriterProperties::default()));
//! let row_group = builder.append_row_group(10);
//! let column = row_group.next_column_chunk().unwrap();
//! column.finish(10, None, None, 4, 100, 120, false);
//! row_group.finish(100).unwrap();
//!
//! let metadata = builder.finish().unwrap();
//! let bytes = metadata.to_bytes().unwrap();
//!
//! let decoded = FileMetaData::decode(&bytes).unwrap();
//! assert_eq!(decoded.num_rows(), 10);
//! let column = decoded.row_group(0).unwrap().column(0).unwrap();
//! assert_eq!(column.file_offset(), 104);
//! ```

mod builder;

use std::io::Write;
use std::sync::Arc;

use tracing::trace;

use crate::basic::{Compression, Encoding, Type};
use crate::errors::{ParquetError, Result};
use crate::format;
use crate::schema::types::{
    self, ColumnDescPtr, ColumnDescriptor, ColumnPath, SchemaDescPtr, SchemaDescriptor,
    Type as SchemaType,
};

pub use builder::{
    BuilderState, ColumnChunkMetaDataBuilder, FileMetaDataBuilder, RowGroupMetaDataBuilder,
};
pub use crate::format::KeyValue;

/// Initial capacity of the buffer used by [`FileMetaData::to_bytes`]
const SERIALIZE_CAPACITY_HINT: usize = 1024;

/// Metadata for a Parquet file.
///
/// Owns the decoded footer record and the [`SchemaDescriptor`] derived from
/// its flattened schema. Row group and column chunk metadata are borrowed
/// views into this record.
#[derive(Debug, Clone)]
pub struct FileMetaData {
    metadata: format::FileMetaData,
    schema_descr: SchemaDescPtr,
}

impl FileMetaData {
    /// Creates new file metadata from a footer record.
    ///
    /// Parses the schema and checks that every row group has exactly one
    /// column chunk with column metadata per schema leaf.
    pub fn try_new(metadata: format::FileMetaData) -> Result<Self> {
        let schema = types::from_thrift(&metadata.schema)?;
        let schema_descr = Arc::new(SchemaDescriptor::new(schema));

        for (i, row_group) in metadata.row_groups.iter().enumerate() {
            if row_group.columns.len() != schema_descr.num_columns() {
                return Err(general_err!(
                    "Column count mismatch. Schema has {} columns while Row Group {} has {}",
                    schema_descr.num_columns(),
                    i,
                    row_group.columns.len()
                ));
            }
            if let Some(j) = row_group.columns.iter().position(|c| c.meta_data.is_none()) {
                return Err(general_err!(
                    "Column {} of Row Group {} has no column metadata",
                    j,
                    i
                ));
            }
        }

        Ok(Self {
            metadata,
            schema_descr,
        })
    }

    /// Decodes file metadata from the Thrift compact encoded `buf`.
    ///
    /// `buf` must start with the encoded footer record; trailing bytes are
    /// ignored.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        Self::decode_with_len(buf).map(|(metadata, _)| metadata)
    }

    /// Like [`Self::decode`], also returning the number of bytes consumed
    pub fn decode_with_len(buf: &[u8]) -> Result<(Self, usize)> {
        let (metadata, len) = format::deserialize(buf)?;
        trace!(
            metadata_len = len,
            num_row_groups = metadata.row_groups.len(),
            "decoded file metadata"
        );
        Ok((Self::try_new(metadata)?, len))
    }

    /// Writes the Thrift compact encoding of this metadata to `sink`,
    /// returning the number of bytes written
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<usize> {
        let buf = self.to_bytes()?;
        sink.write_all(&buf)?;
        Ok(buf.len())
    }

    /// Returns the Thrift compact encoding of this metadata
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        format::serialize(&self.metadata, Vec::with_capacity(SERIALIZE_CAPACITY_HINT))
    }

    /// Returns version of this file.
    pub fn version(&self) -> i32 {
        self.metadata.version
    }

    /// Returns number of rows in the file.
    pub fn num_rows(&self) -> i64 {
        self.metadata.num_rows
    }

    /// String message for application that wrote this file.
    ///
    /// This should have the following format:
    /// `<application> version <application version> (build <application build hash>)`.
    ///
    /// ```shell
    /// parquet-mr version 1.8.0 (build 0fda28af84b9746396014ad6a415b90592a98b3b)
    /// ```
    pub fn created_by(&self) -> Option<&str> {
        self.metadata.created_by.as_deref()
    }

    /// Returns key_value_metadata of this file.
    pub fn key_value_metadata(&self) -> Option<&Vec<KeyValue>> {
        self.metadata.key_value_metadata.as_ref()
    }

    /// Returns number of row groups in this file.
    pub fn num_row_groups(&self) -> usize {
        self.metadata.row_groups.len()
    }

    /// Returns number of leaf columns in the schema.
    pub fn num_columns(&self) -> usize {
        self.schema_descr.num_columns()
    }

    /// Returns number of elements in the flattened schema, including the root.
    pub fn num_schema_elements(&self) -> usize {
        self.metadata.schema.len()
    }

    /// Returns Parquet [`Type`] that describes schema in this file.
    ///
    /// [`Type`]: crate::schema::types::Type
    pub fn schema(&self) -> &SchemaType {
        self.schema_descr.root_schema()
    }

    /// Returns a reference to schema descriptor.
    pub fn schema_descr(&self) -> &SchemaDescriptor {
        &self.schema_descr
    }

    /// Returns reference counted clone for schema descriptor.
    pub fn schema_descr_ptr(&self) -> SchemaDescPtr {
        self.schema_descr.clone()
    }

    /// Returns the metadata of row group `i`.
    ///
    /// Fails with [`ParquetError::IndexOutOfBound`] if `i` is not less than
    /// [`Self::num_row_groups`].
    pub fn row_group(&self, i: usize) -> Result<RowGroupMetaData<'_>> {
        let row_group = self
            .metadata
            .row_groups
            .get(i)
            .ok_or(ParquetError::IndexOutOfBound(i, self.num_row_groups()))?;
        Ok(RowGroupMetaData {
            row_group,
            schema_descr: &self.schema_descr,
        })
    }

    /// Returns the metadata of every row group, in file order.
    pub fn row_groups(&self) -> impl ExactSizeIterator<Item = RowGroupMetaData<'_>> + '_ {
        self.metadata
            .row_groups
            .iter()
            .map(|row_group| RowGroupMetaData {
                row_group,
                schema_descr: &self.schema_descr,
            })
    }

    /// Returns the underlying footer record.
    pub fn as_thrift(&self) -> &format::FileMetaData {
        &self.metadata
    }

    /// Consumes this metadata, returning the underlying footer record.
    pub fn into_thrift(self) -> format::FileMetaData {
        self.metadata
    }
}

/// Metadata for a row group
///
/// Includes [`ColumnChunkMetaData`] for each column in the row group, the number of rows
/// the total byte size of the row group, and the [`SchemaDescriptor`] for the row group.
#[derive(Debug, Clone, Copy)]
pub struct RowGroupMetaData<'a> {
    row_group: &'a format::RowGroup,
    schema_descr: &'a SchemaDescPtr,
}

impl<'a> RowGroupMetaData<'a> {
    /// Number of columns in this row group.
    pub fn num_columns(&self) -> usize {
        self.row_group.columns.len()
    }

    /// Returns column chunk metadata for `i`th column.
    ///
    /// Fails with [`ParquetError::IndexOutOfBound`] if `i` is not less than
    /// [`Self::num_columns`].
    pub fn column(&self, i: usize) -> Result<ColumnChunkMetaData<'a>> {
        let chunk = self
            .row_group
            .columns
            .get(i)
            .ok_or(ParquetError::IndexOutOfBound(i, self.num_columns()))?;
        let descr = self
            .schema_descr
            .columns()
            .get(i)
            .ok_or(ParquetError::IndexOutOfBound(i, self.schema_descr.num_columns()))?;
        ColumnChunkMetaData::try_new(chunk, descr)
    }

    /// Returns the metadata of every column chunk, in schema order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = Result<ColumnChunkMetaData<'a>>> + 'a {
        let row_group = *self;
        (0..self.num_columns()).map(move |i| row_group.column(i))
    }

    /// Number of rows in this row group.
    pub fn num_rows(&self) -> i64 {
        self.row_group.num_rows
    }

    /// Total byte size of all the column chunks in this row group.
    pub fn total_byte_size(&self) -> i64 {
        self.row_group.total_byte_size
    }

    /// Returns reference of schema descriptor.
    pub fn schema_descr(&self) -> &'a SchemaDescriptor {
        self.schema_descr
    }

    /// Returns reference counted clone of schema descriptor.
    pub fn schema_descr_ptr(&self) -> SchemaDescPtr {
        self.schema_descr.clone()
    }
}

/// Metadata for a column chunk.
#[derive(Debug, Clone, Copy)]
pub struct ColumnChunkMetaData<'a> {
    chunk: &'a format::ColumnChunk,
    meta: &'a format::ColumnMetaData,
    descr: &'a ColumnDescPtr,
}

impl<'a> ColumnChunkMetaData<'a> {
    fn try_new(chunk: &'a format::ColumnChunk, descr: &'a ColumnDescPtr) -> Result<Self> {
        let meta = chunk
            .meta_data
            .as_ref()
            .ok_or_else(|| general_err!("Expected to have column metadata"))?;
        Ok(Self { chunk, meta, descr })
    }

    /// File where the column chunk is stored.
    ///
    /// If not set, assumed to belong to the same file as the metadata.
    /// This path is relative to the current file.
    pub fn file_path(&self) -> Option<&'a str> {
        self.chunk.file_path.as_deref().filter(|p| !p.is_empty())
    }

    /// Byte offset of `ColumnMetaData` in `file_path()`.
    ///
    /// Computed by the writer as the end of the column chunk: the first page
    /// offset plus the compressed size.
    pub fn file_offset(&self) -> i64 {
        self.chunk.file_offset
    }

    /// Type of this column. Must be primitive.
    pub fn column_type(&self) -> Type {
        self.meta.type_
    }

    /// Path (or identifier) of this column.
    pub fn column_path(&self) -> ColumnPath {
        ColumnPath::new(self.meta.path_in_schema.clone())
    }

    /// Descriptor for this column.
    pub fn column_descr(&self) -> &'a ColumnDescriptor {
        self.descr
    }

    /// Reference counted clone of descriptor for this column.
    pub fn column_descr_ptr(&self) -> ColumnDescPtr {
        self.descr.clone()
    }

    /// All encodings used for this column, in the order they were recorded.
    pub fn encodings(&self) -> &'a [Encoding] {
        &self.meta.encodings
    }

    /// Total number of values in this column chunk.
    pub fn num_values(&self) -> i64 {
        self.meta.num_values
    }

    /// Compression for this column.
    pub fn compression(&self) -> Compression {
        self.meta.codec
    }

    /// Returns the total compressed data size of this column chunk.
    pub fn compressed_size(&self) -> i64 {
        self.meta.total_compressed_size
    }

    /// Returns the total uncompressed data size of this column chunk.
    pub fn uncompressed_size(&self) -> i64 {
        self.meta.total_uncompressed_size
    }

    /// Returns the offset for the column data.
    pub fn data_page_offset(&self) -> i64 {
        self.meta.data_page_offset
    }

    /// Returns the offset for the index page.
    pub fn index_page_offset(&self) -> Option<i64> {
        self.meta.index_page_offset
    }

    /// Returns `true` if this column chunk has a dictionary page.
    ///
    /// A dictionary page at offset `0` still counts.
    pub fn has_dictionary_page(&self) -> bool {
        self.meta.dictionary_page_offset.is_some()
    }

    /// Returns the offset for the dictionary page, if any.
    pub fn dictionary_page_offset(&self) -> Option<i64> {
        self.meta.dictionary_page_offset
    }

    /// Returns `true` if statistics were recorded for this column chunk.
    pub fn is_stats_set(&self) -> bool {
        self.meta.statistics.is_some()
    }

    /// Returns statistics that are set for this column chunk, zeroed if
    /// [`Self::is_stats_set`] is `false`.
    pub fn statistics(&self) -> ColumnStatistics<'a> {
        ColumnStatistics::from_thrift(self.meta.statistics.as_ref())
    }

    /// Returns the key/value metadata attached to this column chunk.
    pub fn key_value_metadata(&self) -> Option<&'a Vec<KeyValue>> {
        self.meta.key_value_metadata.as_ref()
    }
}

/// Statistics of a column chunk.
///
/// `min` and `max` hold the plain encoded bounds and borrow from the record
/// they were read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnStatistics<'a> {
    /// Number of null values
    pub null_count: i64,
    /// Number of distinct values, `0` if unknown
    pub distinct_count: i64,
    /// Lower bound of the values
    pub min: Option<&'a [u8]>,
    /// Upper bound of the values
    pub max: Option<&'a [u8]>,
}

impl<'a> ColumnStatistics<'a> {
    /// Reads statistics from a footer record, zeroed when `stats` is `None`.
    ///
    /// The bounds written by this crate's builders are preferred, falling
    /// back to the sort-order aware `min_value`/`max_value` of newer writers.
    pub fn from_thrift(stats: Option<&'a format::Statistics>) -> Self {
        match stats {
            None => Self::default(),
            Some(stats) => Self {
                null_count: stats.null_count.unwrap_or(0),
                distinct_count: stats.distinct_count.unwrap_or(0),
                min: stats.min.as_deref().or(stats.min_value.as_deref()),
                max: stats.max.as_deref().or(stats.max_value.as_deref()),
            },
        }
    }

    /// Copies these statistics into a footer record.
    pub fn to_thrift(&self) -> format::Statistics {
        format::Statistics {
            max: self.max.map(|v| v.to_vec()),
            min: self.min.map(|v| v.to_vec()),
            null_count: Some(self.null_count),
            distinct_count: Some(self.distinct_count),
            max_value: None,
            min_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Repetition;
    use crate::format::{ColumnChunk, ColumnMetaData, RowGroup, SchemaElement};

    fn schema_elements() -> Vec<SchemaElement> {
        let mut root = SchemaElement::new("schema");
        root.num_children = Some(2);
        let mut a = SchemaElement::new("a");
        a.type_ = Some(Type::INT32);
        a.repetition_type = Some(Repetition::REQUIRED);
        let mut b = SchemaElement::new("b");
        b.type_ = Some(Type::BYTE_ARRAY);
        b.repetition_type = Some(Repetition::OPTIONAL);
        vec![root, a, b]
    }

    fn column(name: &str, type_: Type) -> ColumnChunk {
        let mut meta = ColumnMetaData::new(type_, vec![name.to_string()], Compression::GZIP);
        meta.encodings = vec![Encoding::RLE, Encoding::PLAIN];
        meta.num_values = 10;
        meta.total_compressed_size = 50;
        meta.total_uncompressed_size = 70;
        meta.data_page_offset = 4;
        ColumnChunk {
            file_path: None,
            file_offset: 54,
            meta_data: Some(meta),
        }
    }

    fn file_record() -> format::FileMetaData {
        format::FileMetaData {
            version: 1,
            schema: schema_elements(),
            num_rows: 10,
            row_groups: vec![RowGroup {
                columns: vec![column("a", Type::INT32), column("b", Type::BYTE_ARRAY)],
                total_byte_size: 100,
                num_rows: 10,
            }],
            key_value_metadata: None,
            created_by: Some("test".to_string()),
        }
    }

    #[test]
    fn test_file_metadata_accessors() {
        let metadata = FileMetaData::try_new(file_record()).unwrap();
        assert_eq!(metadata.version(), 1);
        assert_eq!(metadata.num_rows(), 10);
        assert_eq!(metadata.created_by(), Some("test"));
        assert_eq!(metadata.key_value_metadata(), None);
        assert_eq!(metadata.num_row_groups(), 1);
        assert_eq!(metadata.num_columns(), 2);
        assert_eq!(metadata.num_schema_elements(), 3);
        assert_eq!(metadata.schema().name(), "schema");
        assert_eq!(metadata.schema_descr().column(1).path().string(), "b");
    }

    #[test]
    fn test_row_group_out_of_bound() {
        let metadata = FileMetaData::try_new(file_record()).unwrap();
        let err = metadata.row_group(1).unwrap_err();
        assert!(matches!(err, ParquetError::IndexOutOfBound(1, 1)));

        let row_group = metadata.row_group(0).unwrap();
        let err = row_group.column(2).unwrap_err();
        assert!(matches!(err, ParquetError::IndexOutOfBound(2, 2)));
    }

    #[test]
    fn test_column_chunk_accessors() {
        let metadata = FileMetaData::try_new(file_record()).unwrap();
        let row_group = metadata.row_group(0).unwrap();
        assert_eq!(row_group.num_columns(), 2);
        assert_eq!(row_group.num_rows(), 10);
        assert_eq!(row_group.total_byte_size(), 100);

        let col = row_group.column(1).unwrap();
        assert_eq!(col.column_type(), Type::BYTE_ARRAY);
        assert_eq!(col.column_path().string(), "b");
        assert_eq!(col.column_descr().max_def_level(), 1);
        assert_eq!(col.file_path(), None);
        assert_eq!(col.file_offset(), 54);
        assert_eq!(col.num_values(), 10);
        assert_eq!(col.compression(), Compression::GZIP);
        assert_eq!(col.encodings(), &[Encoding::RLE, Encoding::PLAIN]);
        assert_eq!(col.compressed_size(), 50);
        assert_eq!(col.uncompressed_size(), 70);
        assert_eq!(col.data_page_offset(), 4);
        assert_eq!(col.index_page_offset(), None);
        assert!(!col.has_dictionary_page());
        assert_eq!(col.dictionary_page_offset(), None);
        assert!(!col.is_stats_set());
        assert_eq!(col.statistics(), ColumnStatistics::default());

        let paths: Vec<_> = row_group
            .columns()
            .map(|c| c.unwrap().column_path().string())
            .collect();
        assert_eq!(paths, vec!["a", "b"]);
    }

    #[test]
    fn test_dictionary_page_at_offset_zero() {
        let mut record = file_record();
        let meta = record.row_groups[0].columns[0].meta_data.as_mut().unwrap();
        meta.dictionary_page_offset = Some(0);
        let metadata = FileMetaData::try_new(record).unwrap();
        let col = metadata.row_group(0).unwrap().column(0).unwrap();
        assert!(col.has_dictionary_page());
        assert_eq!(col.dictionary_page_offset(), Some(0));
    }

    #[test]
    fn test_empty_file_path_is_unset() {
        let mut record = file_record();
        record.row_groups[0].columns[0].file_path = Some(String::new());
        record.row_groups[0].columns[1].file_path = Some("part-1.parquet".to_string());
        let metadata = FileMetaData::try_new(record).unwrap();
        let row_group = metadata.row_group(0).unwrap();
        assert_eq!(row_group.column(0).unwrap().file_path(), None);
        assert_eq!(
            row_group.column(1).unwrap().file_path(),
            Some("part-1.parquet")
        );
    }

    #[test]
    fn test_statistics_from_thrift() {
        assert_eq!(ColumnStatistics::from_thrift(None), ColumnStatistics::default());

        let stats = format::Statistics {
            min_value: Some(vec![1]),
            max_value: Some(vec![9]),
            null_count: Some(2),
            ..Default::default()
        };
        let read = ColumnStatistics::from_thrift(Some(&stats));
        assert_eq!(read.null_count, 2);
        assert_eq!(read.distinct_count, 0);
        assert_eq!(read.min, Some([1u8].as_slice()));
        assert_eq!(read.max, Some([9u8].as_slice()));

        let stats = format::Statistics {
            min: Some(vec![0]),
            min_value: Some(vec![1]),
            ..Default::default()
        };
        let read = ColumnStatistics::from_thrift(Some(&stats));
        assert_eq!(read.min, Some([0u8].as_slice()));
        assert_eq!(read.max, None);
    }

    #[test]
    fn test_column_count_mismatch() {
        let mut record = file_record();
        record.row_groups[0].columns.pop();
        let err = FileMetaData::try_new(record).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parquet error: Column count mismatch. Schema has 2 columns while Row Group 0 has 1"
        );
    }

    #[test]
    fn test_missing_column_metadata() {
        let mut record = file_record();
        record.row_groups[0].columns[1].meta_data = None;
        let err = FileMetaData::try_new(record).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parquet error: Column 1 of Row Group 0 has no column metadata"
        );
    }

    #[test]
    fn test_decode_group_without_repetition() {
        let mut root = SchemaElement::new("schema");
        root.num_children = Some(1);
        let mut group = SchemaElement::new("g");
        group.num_children = Some(1);
        let mut leaf = SchemaElement::new("x");
        leaf.type_ = Some(Type::INT32);
        leaf.repetition_type = Some(Repetition::REQUIRED);
        let record = format::FileMetaData {
            version: 1,
            schema: vec![root, group, leaf],
            num_rows: 0,
            row_groups: vec![],
            key_value_metadata: None,
            created_by: None,
        };

        let buf = format::serialize(&record, Vec::new()).unwrap();
        let err = FileMetaData::decode(&buf).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parquet error: Repetition level must be defined for non-root types"
        );
    }

    #[test]
    fn test_decode_write_to() {
        let metadata = FileMetaData::try_new(file_record()).unwrap();
        let mut sink = Vec::new();
        let written = metadata.write_to(&mut sink).unwrap();
        assert_eq!(written, sink.len());
        assert_eq!(sink, metadata.to_bytes().unwrap());

        let (decoded, len) = FileMetaData::decode_with_len(&sink).unwrap();
        assert_eq!(len, written);
        assert_eq!(decoded.as_thrift(), metadata.as_thrift());
        assert_eq!(decoded.schema(), metadata.schema());
    }
}
