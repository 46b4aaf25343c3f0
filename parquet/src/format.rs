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

//! Footer records of the Parquet file format and their Thrift compact
//! protocol encoding.
//!
//! These structs mirror the subset of `parquet.thrift` that describes the
//! physical layout of a file. Fields not modelled here are skipped when
//! decoding, so footers written by newer writers can still be read.

use std::io::Write;

use crate::basic::{Compression, Encoding, Repetition, Type};
use crate::errors::{ParquetError, Result};
use crate::parquet_thrift::{
    read_thrift_vec, ElementType, FieldType, ReadThrift, ThriftCompactOutputProtocol,
    ThriftSliceInputProtocol, WriteThrift, WriteThriftField,
};

/// Returns the value of a required field, or an error naming the field
macro_rules! required {
    ($field:ident) => {
        match $field {
            Some(v) => v,
            None => {
                return Err(general_err!(
                    "Required field {} is missing",
                    stringify!($field)
                ))
            }
        }
    };
}

/// Implements [`WriteThriftField`] for a struct that implements [`WriteThrift`]
macro_rules! write_struct_field {
    ($identifier:ident) => {
        impl WriteThriftField for $identifier {
            fn write_thrift_field<W: Write>(
                &self,
                writer: &mut ThriftCompactOutputProtocol<W>,
                field_id: i16,
                last_field_id: i16,
            ) -> Result<i16> {
                writer.write_field_begin(FieldType::Struct, field_id, last_field_id)?;
                self.write_thrift(writer)?;
                Ok(field_id)
            }
        }
    };
}

// ----------------------------------------------------------------------
// Statistics

/// Statistics of a column chunk as stored in the footer.
///
/// All values are optional; `min`/`max` hold the plain encoded bounds.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Statistics {
    /// Deprecated maximum, signed comparison
    pub max: Option<Vec<u8>>,
    /// Deprecated minimum, signed comparison
    pub min: Option<Vec<u8>>,
    /// Count of null values
    pub null_count: Option<i64>,
    /// Count of distinct values
    pub distinct_count: Option<i64>,
    /// Maximum according to the column's sort order
    pub max_value: Option<Vec<u8>>,
    /// Minimum according to the column's sort order
    pub min_value: Option<Vec<u8>>,
}

impl<'a> ReadThrift<'a> for Statistics {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        // struct Statistics {
        //   1: optional binary max;
        //   2: optional binary min;
        //   3: optional i64 null_count;
        //   4: optional i64 distinct_count;
        //   5: optional binary max_value;
        //   6: optional binary min_value;
        //   7: optional bool is_max_value_exact;
        //   8: optional bool is_min_value_exact;
        // }
        let mut stats = Statistics::default();
        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => stats.max = Some(Vec::<u8>::read_thrift(&mut *prot)?),
                2 => stats.min = Some(Vec::<u8>::read_thrift(&mut *prot)?),
                3 => stats.null_count = Some(i64::read_thrift(&mut *prot)?),
                4 => stats.distinct_count = Some(i64::read_thrift(&mut *prot)?),
                5 => stats.max_value = Some(Vec::<u8>::read_thrift(&mut *prot)?),
                6 => stats.min_value = Some(Vec::<u8>::read_thrift(&mut *prot)?),
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        Ok(stats)
    }
}

impl WriteThrift for Statistics {
    const ELEMENT_TYPE: ElementType = ElementType::Struct;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        let mut last_field_id = 0i16;
        if let Some(max) = &self.max {
            last_field_id = max.as_slice().write_thrift_field(writer, 1, last_field_id)?;
        }
        if let Some(min) = &self.min {
            last_field_id = min.as_slice().write_thrift_field(writer, 2, last_field_id)?;
        }
        if let Some(null_count) = self.null_count {
            last_field_id = null_count.write_thrift_field(writer, 3, last_field_id)?;
        }
        if let Some(distinct_count) = self.distinct_count {
            last_field_id = distinct_count.write_thrift_field(writer, 4, last_field_id)?;
        }
        if let Some(max_value) = &self.max_value {
            last_field_id = max_value
                .as_slice()
                .write_thrift_field(writer, 5, last_field_id)?;
        }
        if let Some(min_value) = &self.min_value {
            min_value
                .as_slice()
                .write_thrift_field(writer, 6, last_field_id)?;
        }
        writer.write_struct_end()
    }
}

write_struct_field!(Statistics);

// ----------------------------------------------------------------------
// KeyValue

/// Application defined key/value pair
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct KeyValue {
    /// Key name
    pub key: String,
    /// Value, may be unset
    pub value: Option<String>,
}

impl KeyValue {
    /// Creates a new key value pair
    pub fn new<F2>(key: String, value: F2) -> KeyValue
    where
        F2: Into<Option<String>>,
    {
        KeyValue {
            key,
            value: value.into(),
        }
    }
}

impl<'a> ReadThrift<'a> for KeyValue {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        let mut key: Option<String> = None;
        let mut value: Option<String> = None;
        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => key = Some(String::read_thrift(&mut *prot)?),
                2 => value = Some(String::read_thrift(&mut *prot)?),
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        let key = required!(key);
        Ok(KeyValue { key, value })
    }
}

impl WriteThrift for KeyValue {
    const ELEMENT_TYPE: ElementType = ElementType::Struct;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        let last_field_id = self.key.as_str().write_thrift_field(writer, 1, 0)?;
        if let Some(value) = &self.value {
            value.as_str().write_thrift_field(writer, 2, last_field_id)?;
        }
        writer.write_struct_end()
    }
}

// ----------------------------------------------------------------------
// SchemaElement

/// One node of the depth-first flattened schema tree.
///
/// Primitive leaves carry `type_`, groups carry `num_children`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SchemaElement {
    /// Physical type, set for leaves only
    pub type_: Option<Type>,
    /// Byte length of `FIXED_LEN_BYTE_ARRAY` values
    pub type_length: Option<i32>,
    /// Repetition of the field, unset for the root
    pub repetition_type: Option<Repetition>,
    /// Field name
    pub name: String,
    /// Number of children, set for groups only
    pub num_children: Option<i32>,
    /// Optional application assigned field id
    pub field_id: Option<i32>,
}

impl SchemaElement {
    /// Creates an element with only the name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            type_: None,
            type_length: None,
            repetition_type: None,
            name: name.into(),
            num_children: None,
            field_id: None,
        }
    }
}

impl<'a> ReadThrift<'a> for SchemaElement {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        // struct SchemaElement {
        //   1: optional Type type;
        //   2: optional i32 type_length;
        //   3: optional FieldRepetitionType repetition_type;
        //   4: required string name;
        //   5: optional i32 num_children;
        //   6: optional ConvertedType converted_type;
        //   7: optional i32 scale
        //   8: optional i32 precision
        //   9: optional i32 field_id;
        //   10: optional LogicalType logicalType
        // }
        let mut type_: Option<Type> = None;
        let mut type_length: Option<i32> = None;
        let mut repetition_type: Option<Repetition> = None;
        let mut name: Option<String> = None;
        let mut num_children: Option<i32> = None;
        let mut field_id: Option<i32> = None;
        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => type_ = Some(Type::read_thrift(&mut *prot)?),
                2 => type_length = Some(i32::read_thrift(&mut *prot)?),
                3 => repetition_type = Some(Repetition::read_thrift(&mut *prot)?),
                4 => name = Some(String::read_thrift(&mut *prot)?),
                5 => num_children = Some(i32::read_thrift(&mut *prot)?),
                9 => field_id = Some(i32::read_thrift(&mut *prot)?),
                // converted and logical type annotations are not modelled
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        let name = required!(name);
        Ok(SchemaElement {
            type_,
            type_length,
            repetition_type,
            name,
            num_children,
            field_id,
        })
    }
}

impl WriteThrift for SchemaElement {
    const ELEMENT_TYPE: ElementType = ElementType::Struct;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        let mut last_field_id = 0i16;
        if let Some(type_) = self.type_ {
            last_field_id = type_.write_thrift_field(writer, 1, last_field_id)?;
        }
        if let Some(type_length) = self.type_length {
            last_field_id = type_length.write_thrift_field(writer, 2, last_field_id)?;
        }
        if let Some(repetition_type) = self.repetition_type {
            last_field_id = repetition_type.write_thrift_field(writer, 3, last_field_id)?;
        }
        last_field_id = self.name.as_str().write_thrift_field(writer, 4, last_field_id)?;
        if let Some(num_children) = self.num_children {
            last_field_id = num_children.write_thrift_field(writer, 5, last_field_id)?;
        }
        if let Some(field_id) = self.field_id {
            field_id.write_thrift_field(writer, 9, last_field_id)?;
        }
        writer.write_struct_end()
    }
}

// ----------------------------------------------------------------------
// ColumnMetaData

/// Description of a column chunk: type, location and sizes
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ColumnMetaData {
    /// Physical type of the column
    pub type_: Type,
    /// Encodings used in the chunk, in the order they were recorded
    pub encodings: Vec<Encoding>,
    /// Components of the column's dotted path
    pub path_in_schema: Vec<String>,
    /// Compression codec of the pages
    pub codec: Compression,
    /// Number of values, nulls included
    pub num_values: i64,
    /// Size of all pages before compression, headers included
    pub total_uncompressed_size: i64,
    /// Size of all pages after compression, headers included
    pub total_compressed_size: i64,
    /// Column level key/value metadata
    pub key_value_metadata: Option<Vec<KeyValue>>,
    /// Offset of the first data page
    pub data_page_offset: i64,
    /// Offset of the index page
    pub index_page_offset: Option<i64>,
    /// Offset of the dictionary page
    pub dictionary_page_offset: Option<i64>,
    /// Statistics of the values in the chunk
    pub statistics: Option<Statistics>,
}

impl ColumnMetaData {
    /// Creates the record for a column chunk that has not been written yet
    pub fn new(type_: Type, path_in_schema: Vec<String>, codec: Compression) -> Self {
        Self {
            type_,
            encodings: vec![],
            path_in_schema,
            codec,
            num_values: 0,
            total_uncompressed_size: 0,
            total_compressed_size: 0,
            key_value_metadata: None,
            data_page_offset: 0,
            index_page_offset: None,
            dictionary_page_offset: None,
            statistics: None,
        }
    }
}

impl<'a> ReadThrift<'a> for ColumnMetaData {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        // struct ColumnMetaData {
        //   1: required Type type
        //   2: required list<Encoding> encodings
        //   3: required list<string> path_in_schema
        //   4: required CompressionCodec codec
        //   5: required i64 num_values
        //   6: required i64 total_uncompressed_size
        //   7: required i64 total_compressed_size
        //   8: optional list<KeyValue> key_value_metadata
        //   9: required i64 data_page_offset
        //   10: optional i64 index_page_offset
        //   11: optional i64 dictionary_page_offset
        //   12: optional Statistics statistics;
        // }
        let mut type_: Option<Type> = None;
        let mut encodings: Option<Vec<Encoding>> = None;
        let mut path_in_schema: Option<Vec<String>> = None;
        let mut codec: Option<Compression> = None;
        let mut num_values: Option<i64> = None;
        let mut total_uncompressed_size: Option<i64> = None;
        let mut total_compressed_size: Option<i64> = None;
        let mut key_value_metadata: Option<Vec<KeyValue>> = None;
        let mut data_page_offset: Option<i64> = None;
        let mut index_page_offset: Option<i64> = None;
        let mut dictionary_page_offset: Option<i64> = None;
        let mut statistics: Option<Statistics> = None;
        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => type_ = Some(Type::read_thrift(&mut *prot)?),
                2 => encodings = Some(read_thrift_vec(&mut *prot)?),
                3 => path_in_schema = Some(read_thrift_vec(&mut *prot)?),
                4 => codec = Some(Compression::read_thrift(&mut *prot)?),
                5 => num_values = Some(i64::read_thrift(&mut *prot)?),
                6 => total_uncompressed_size = Some(i64::read_thrift(&mut *prot)?),
                7 => total_compressed_size = Some(i64::read_thrift(&mut *prot)?),
                8 => key_value_metadata = Some(read_thrift_vec(&mut *prot)?),
                9 => data_page_offset = Some(i64::read_thrift(&mut *prot)?),
                10 => index_page_offset = Some(i64::read_thrift(&mut *prot)?),
                11 => dictionary_page_offset = Some(i64::read_thrift(&mut *prot)?),
                12 => statistics = Some(Statistics::read_thrift(&mut *prot)?),
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        let type_ = required!(type_);
        let encodings = required!(encodings);
        let path_in_schema = required!(path_in_schema);
        let codec = required!(codec);
        let num_values = required!(num_values);
        let total_uncompressed_size = required!(total_uncompressed_size);
        let total_compressed_size = required!(total_compressed_size);
        let data_page_offset = required!(data_page_offset);
        Ok(ColumnMetaData {
            type_,
            encodings,
            path_in_schema,
            codec,
            num_values,
            total_uncompressed_size,
            total_compressed_size,
            key_value_metadata,
            data_page_offset,
            index_page_offset,
            dictionary_page_offset,
            statistics,
        })
    }
}

impl WriteThrift for ColumnMetaData {
    const ELEMENT_TYPE: ElementType = ElementType::Struct;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        self.type_.write_thrift_field(writer, 1, 0)?;
        self.encodings.write_thrift_field(writer, 2, 1)?;
        self.path_in_schema.write_thrift_field(writer, 3, 2)?;
        self.codec.write_thrift_field(writer, 4, 3)?;
        self.num_values.write_thrift_field(writer, 5, 4)?;
        self.total_uncompressed_size.write_thrift_field(writer, 6, 5)?;
        let mut last_field_id = self.total_compressed_size.write_thrift_field(writer, 7, 6)?;
        if let Some(key_value_metadata) = &self.key_value_metadata {
            last_field_id = key_value_metadata.write_thrift_field(writer, 8, last_field_id)?;
        }
        last_field_id = self
            .data_page_offset
            .write_thrift_field(writer, 9, last_field_id)?;
        if let Some(index_page_offset) = self.index_page_offset {
            last_field_id = index_page_offset.write_thrift_field(writer, 10, last_field_id)?;
        }
        if let Some(dictionary_page_offset) = self.dictionary_page_offset {
            last_field_id = dictionary_page_offset.write_thrift_field(writer, 11, last_field_id)?;
        }
        if let Some(statistics) = &self.statistics {
            statistics.write_thrift_field(writer, 12, last_field_id)?;
        }
        writer.write_struct_end()
    }
}

write_struct_field!(ColumnMetaData);

// ----------------------------------------------------------------------
// ColumnChunk

/// Location of a column chunk plus its [`ColumnMetaData`]
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ColumnChunk {
    /// File where the column data is stored, `None` for the footer's own file
    pub file_path: Option<String>,
    /// Byte offset in `file_path` just past the column chunk. Zero until the
    /// chunk has been completed.
    pub file_offset: i64,
    /// Required on disk. `None` only while a slot is unwritten.
    pub meta_data: Option<ColumnMetaData>,
}

impl<'a> ReadThrift<'a> for ColumnChunk {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        // struct ColumnChunk {
        //   1: optional string file_path
        //   2: required i64 file_offset = 0
        //   3: optional ColumnMetaData meta_data
        //   4: optional i64 offset_index_offset
        //   5: optional i32 offset_index_length
        //   6: optional i64 column_index_offset
        //   7: optional i32 column_index_length
        //   8: optional ColumnCryptoMetaData crypto_metadata
        //   9: optional binary encrypted_column_metadata
        // }
        let mut file_path: Option<String> = None;
        let mut file_offset: Option<i64> = None;
        let mut meta_data: Option<ColumnMetaData> = None;
        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => file_path = Some(String::read_thrift(&mut *prot)?),
                2 => file_offset = Some(i64::read_thrift(&mut *prot)?),
                3 => meta_data = Some(ColumnMetaData::read_thrift(&mut *prot)?),
                9 => return Err(nyi_err!("Encrypted column metadata is not supported")),
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        let file_offset = required!(file_offset);
        Ok(ColumnChunk {
            file_path,
            file_offset,
            meta_data,
        })
    }
}

impl WriteThrift for ColumnChunk {
    const ELEMENT_TYPE: ElementType = ElementType::Struct;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        let mut last_field_id = 0i16;
        if let Some(file_path) = &self.file_path {
            last_field_id = file_path.as_str().write_thrift_field(writer, 1, last_field_id)?;
        }
        last_field_id = self.file_offset.write_thrift_field(writer, 2, last_field_id)?;
        if let Some(meta_data) = &self.meta_data {
            meta_data.write_thrift_field(writer, 3, last_field_id)?;
        }
        writer.write_struct_end()
    }
}

// ----------------------------------------------------------------------
// RowGroup

/// A horizontal partition of the rows, one column chunk per schema leaf
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct RowGroup {
    /// Column chunks in schema leaf order
    pub columns: Vec<ColumnChunk>,
    /// Sum of the compressed sizes of the column chunks
    pub total_byte_size: i64,
    /// Number of rows
    pub num_rows: i64,
}

impl<'a> ReadThrift<'a> for RowGroup {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        // struct RowGroup {
        //   1: required list<ColumnChunk> columns
        //   2: required i64 total_byte_size
        //   3: required i64 num_rows
        //   4: optional list<SortingColumn> sorting_columns
        //   5: optional i64 file_offset
        //   6: optional i64 total_compressed_size
        //   7: optional i16 ordinal
        // }
        let mut columns: Option<Vec<ColumnChunk>> = None;
        let mut total_byte_size: Option<i64> = None;
        let mut num_rows: Option<i64> = None;
        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => columns = Some(read_thrift_vec(&mut *prot)?),
                2 => total_byte_size = Some(i64::read_thrift(&mut *prot)?),
                3 => num_rows = Some(i64::read_thrift(&mut *prot)?),
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        let columns = required!(columns);
        let total_byte_size = required!(total_byte_size);
        let num_rows = required!(num_rows);
        Ok(RowGroup {
            columns,
            total_byte_size,
            num_rows,
        })
    }
}

impl WriteThrift for RowGroup {
    const ELEMENT_TYPE: ElementType = ElementType::Struct;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        self.columns.write_thrift_field(writer, 1, 0)?;
        self.total_byte_size.write_thrift_field(writer, 2, 1)?;
        self.num_rows.write_thrift_field(writer, 3, 2)?;
        writer.write_struct_end()
    }
}

// ----------------------------------------------------------------------
// FileMetaData

/// The footer record: schema, row groups and file level key/values
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct FileMetaData {
    /// Format version of the writer
    pub version: i32,
    /// Depth-first flattened schema, root first
    pub schema: Vec<SchemaElement>,
    /// Total number of rows
    pub num_rows: i64,
    /// Row groups in file order
    pub row_groups: Vec<RowGroup>,
    /// File level key/value metadata
    pub key_value_metadata: Option<Vec<KeyValue>>,
    /// Application that wrote the file
    pub created_by: Option<String>,
}

impl<'a> ReadThrift<'a> for FileMetaData {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        // struct FileMetaData {
        //   1: required i32 version
        //   2: required list<SchemaElement> schema;
        //   3: required i64 num_rows
        //   4: required list<RowGroup> row_groups
        //   5: optional list<KeyValue> key_value_metadata
        //   6: optional string created_by
        //   7: optional list<ColumnOrder> column_orders;
        //   8: optional EncryptionAlgorithm encryption_algorithm
        //   9: optional binary footer_signing_key_metadata
        // }
        let mut version: Option<i32> = None;
        let mut schema: Option<Vec<SchemaElement>> = None;
        let mut num_rows: Option<i64> = None;
        let mut row_groups: Option<Vec<RowGroup>> = None;
        let mut key_value_metadata: Option<Vec<KeyValue>> = None;
        let mut created_by: Option<String> = None;
        let mut last_field_id = 0i16;
        loop {
            let field_ident = prot.read_field_begin(last_field_id)?;
            if field_ident.field_type == FieldType::Stop {
                break;
            }
            match field_ident.id {
                1 => version = Some(i32::read_thrift(&mut *prot)?),
                2 => schema = Some(read_thrift_vec(&mut *prot)?),
                3 => num_rows = Some(i64::read_thrift(&mut *prot)?),
                4 => row_groups = Some(read_thrift_vec(&mut *prot)?),
                5 => key_value_metadata = Some(read_thrift_vec(&mut *prot)?),
                6 => created_by = Some(String::read_thrift(&mut *prot)?),
                _ => prot.skip(field_ident.field_type)?,
            }
            last_field_id = field_ident.id;
        }
        let version = required!(version);
        let schema = required!(schema);
        let num_rows = required!(num_rows);
        let row_groups = required!(row_groups);
        Ok(FileMetaData {
            version,
            schema,
            num_rows,
            row_groups,
            key_value_metadata,
            created_by,
        })
    }
}

impl WriteThrift for FileMetaData {
    const ELEMENT_TYPE: ElementType = ElementType::Struct;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        self.version.write_thrift_field(writer, 1, 0)?;
        self.schema.write_thrift_field(writer, 2, 1)?;
        self.num_rows.write_thrift_field(writer, 3, 2)?;
        let mut last_field_id = self.row_groups.write_thrift_field(writer, 4, 3)?;
        if let Some(key_value_metadata) = &self.key_value_metadata {
            last_field_id = key_value_metadata.write_thrift_field(writer, 5, last_field_id)?;
        }
        if let Some(created_by) = &self.created_by {
            created_by
                .as_str()
                .write_thrift_field(writer, 6, last_field_id)?;
        }
        writer.write_struct_end()
    }
}

/// Decodes a [`FileMetaData`] from the start of `buf`, returning the record
/// and the number of bytes consumed
pub fn deserialize(buf: &[u8]) -> Result<(FileMetaData, usize)> {
    let mut prot = ThriftSliceInputProtocol::new(buf);
    let metadata = FileMetaData::read_thrift(&mut prot)?;
    Ok((metadata, buf.len() - prot.as_slice().len()))
}

/// Encodes a [`FileMetaData`] to `sink`
pub fn serialize<W: Write>(metadata: &FileMetaData, sink: W) -> Result<W> {
    let mut prot = ThriftCompactOutputProtocol::new(sink);
    metadata.write_thrift(&mut prot)?;
    Ok(prot.into_inner())
}
