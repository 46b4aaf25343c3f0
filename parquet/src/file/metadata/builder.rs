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

//! Builders assembling [`FileMetaData`] while a file is written.
//!
//! Metadata is built in a single forward pass: one [`RowGroupMetaDataBuilder`]
//! per row group, and within it one [`ColumnChunkMetaDataBuilder`] per schema
//! leaf, handed out in schema order.

use tracing::{debug, trace, warn};

use super::{ColumnStatistics, FileMetaData};
use crate::basic::{Compression, Encoding, Type};
use crate::errors::{ParquetError, Result};
use crate::file::properties::{WriterProperties, WriterPropertiesPtr, WriterVersion};
use crate::format::{self, ColumnMetaData};
use crate::schema::types::{self, ColumnDescPtr, ColumnDescriptor, ColumnPath, SchemaDescPtr};

/// Life cycle of a [`RowGroupMetaDataBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// Accepting column chunks
    Open,
    /// Finished successfully, the row group can be added to a file
    Done,
    /// Finishing failed, the row group can not be used
    Rejected,
}

/// Builder for the metadata of a file being written.
///
/// Row groups are appended in file order with [`Self::append_row_group`];
/// every appended row group must be finished before [`Self::finish`].
pub struct FileMetaDataBuilder {
    schema_descr: SchemaDescPtr,
    props: WriterPropertiesPtr,
    row_groups: Vec<RowGroupMetaDataBuilder>,
}

impl FileMetaDataBuilder {
    /// Creates a builder for a file with the given schema and writer properties
    pub fn new(schema_descr: SchemaDescPtr, props: WriterPropertiesPtr) -> Self {
        Self {
            schema_descr,
            props,
            row_groups: Vec::new(),
        }
    }

    /// Appends a row group of `num_rows` rows, returning its builder
    pub fn append_row_group(&mut self, num_rows: i64) -> &mut RowGroupMetaDataBuilder {
        let ordinal = self.row_groups.len();
        trace!(ordinal, num_rows, "appending row group");
        self.row_groups.push(RowGroupMetaDataBuilder::new(
            num_rows,
            self.props.clone(),
            self.schema_descr.clone(),
        ));
        // just pushed
        let last = self.row_groups.len() - 1;
        &mut self.row_groups[last]
    }

    /// Number of row groups appended so far
    pub fn num_row_groups(&self) -> usize {
        self.row_groups.len()
    }

    /// Completes the file metadata.
    ///
    /// Fails with [`ParquetError::IncompleteState`] if any appended row
    /// group has not been finished successfully.
    pub fn finish(self) -> Result<FileMetaData> {
        let done = self
            .row_groups
            .iter()
            .filter(|rg| rg.state() == BuilderState::Done)
            .count();
        if done != self.row_groups.len() {
            let err = ParquetError::IncompleteState {
                expected: self.row_groups.len(),
                actual: done,
            };
            warn!(error = %err, "file metadata rejected");
            return Err(err);
        }

        let row_groups: Vec<format::RowGroup> =
            self.row_groups.into_iter().map(|rg| rg.row_group).collect();
        let num_rows = row_groups
            .iter()
            .try_fold(0i64, |acc, rg| acc.checked_add(rg.num_rows))
            .ok_or_else(|| {
                ParquetError::ConsistencyViolation(
                    "Row counts of row groups overflow i64".to_string(),
                )
            })?;

        let metadata = format::FileMetaData {
            version: self.props.writer_version().as_num(),
            schema: types::to_thrift(self.schema_descr.root_schema())?,
            num_rows,
            row_groups,
            key_value_metadata: self.props.key_value_metadata().cloned(),
            created_by: Some(self.props.created_by().to_string()),
        };
        debug!(
            num_rows,
            num_row_groups = metadata.row_groups.len(),
            num_columns = self.schema_descr.num_columns(),
            "finished file metadata"
        );
        FileMetaData::try_new(metadata)
    }
}

/// Builder for the metadata of a single row group.
///
/// The column collection is sized to the schema's leaf count up front. Column
/// chunk builders are handed out in schema order by
/// [`Self::next_column_chunk`], and [`Self::finish`] checks that every column
/// was completed.
#[derive(Debug)]
pub struct RowGroupMetaDataBuilder {
    row_group: format::RowGroup,
    schema_descr: SchemaDescPtr,
    props: WriterPropertiesPtr,
    current_column: usize,
    state: BuilderState,
}

impl RowGroupMetaDataBuilder {
    /// Creates a builder for a row group with `num_rows` rows
    pub fn new(num_rows: i64, props: WriterPropertiesPtr, schema_descr: SchemaDescPtr) -> Self {
        let row_group = format::RowGroup {
            columns: vec![format::ColumnChunk::default(); schema_descr.num_columns()],
            total_byte_size: 0,
            num_rows,
        };
        Self {
            row_group,
            schema_descr,
            props,
            current_column: 0,
            state: BuilderState::Open,
        }
    }

    /// Number of columns in this row group, equal to the schema's leaf count
    pub fn num_columns(&self) -> usize {
        self.row_group.columns.len()
    }

    /// Number of rows in this row group
    pub fn num_rows(&self) -> i64 {
        self.row_group.num_rows
    }

    /// Index of the next column to be handed out
    pub fn current_column(&self) -> usize {
        self.current_column
    }

    /// Current life cycle state
    pub fn state(&self) -> BuilderState {
        self.state
    }

    fn check_open(&self) -> Result<()> {
        match self.state {
            BuilderState::Open => Ok(()),
            state => Err(general_err!(
                "Row group metadata builder is {:?}, no further changes allowed",
                state
            )),
        }
    }

    /// Returns the builder for the next column chunk in schema order.
    ///
    /// Fails with [`ParquetError::IndexOutOfBound`] once every column has
    /// been handed out.
    pub fn next_column_chunk(&mut self) -> Result<ColumnChunkMetaDataBuilder<'_>> {
        self.check_open()?;
        let num_columns = self.num_columns();
        if self.current_column >= num_columns {
            return Err(ParquetError::IndexOutOfBound(
                self.current_column,
                num_columns,
            ));
        }
        let descr = self.schema_descr.column(self.current_column);
        let slot = &mut self.row_group.columns[self.current_column];
        self.current_column += 1;
        Ok(ColumnChunkMetaDataBuilder::new(slot, &self.props, descr))
    }

    /// Completes the row group.
    ///
    /// `total_bytes_written` must equal the sum of the compressed sizes of
    /// all column chunks. On success the state becomes [`BuilderState::Done`],
    /// on any failure [`BuilderState::Rejected`].
    pub fn finish(&mut self, total_bytes_written: i64) -> Result<()> {
        self.check_open()?;
        match self.validate(total_bytes_written) {
            Ok(()) => {
                self.row_group.total_byte_size = total_bytes_written;
                self.state = BuilderState::Done;
                debug!(
                    num_rows = self.row_group.num_rows,
                    num_columns = self.num_columns(),
                    total_byte_size = total_bytes_written,
                    "finished row group metadata"
                );
                Ok(())
            }
            Err(e) => {
                self.state = BuilderState::Rejected;
                warn!(error = %e, "row group metadata rejected");
                Err(e)
            }
        }
    }

    fn validate(&self, total_bytes_written: i64) -> Result<()> {
        let num_columns = self.num_columns();
        if self.current_column != num_columns {
            return Err(ParquetError::IncompleteState {
                expected: num_columns,
                actual: self.current_column,
            });
        }

        let finished = self
            .row_group
            .columns
            .iter()
            .filter(|c| c.file_offset > 0)
            .count();
        if finished != num_columns {
            return Err(ParquetError::IncompleteState {
                expected: num_columns,
                actual: finished,
            });
        }

        let total_compressed_size = self
            .row_group
            .columns
            .iter()
            .filter_map(|c| c.meta_data.as_ref())
            .try_fold(0i64, |acc, m| acc.checked_add(m.total_compressed_size))
            .ok_or_else(|| {
                ParquetError::ConsistencyViolation(
                    "Compressed sizes of columns overflow i64".to_string(),
                )
            })?;
        if total_compressed_size != total_bytes_written {
            return Err(ParquetError::ConsistencyViolation(format!(
                "Total bytes in this RowGroup ({}) does not match with compressed sizes of columns ({})",
                total_bytes_written, total_compressed_size
            )));
        }
        Ok(())
    }
}

/// Builder for the metadata of one column chunk.
///
/// Bound to the row group's slot for a single schema leaf. Physical type,
/// path and codec are recorded on construction; [`Self::finish`] records
/// the page offsets, sizes and encodings.
#[derive(Debug)]
pub struct ColumnChunkMetaDataBuilder<'a> {
    file_path: &'a mut Option<String>,
    file_offset: &'a mut i64,
    meta: &'a mut ColumnMetaData,
    props: &'a WriterProperties,
    descr: ColumnDescPtr,
}

impl<'a> ColumnChunkMetaDataBuilder<'a> {
    pub(crate) fn new(
        slot: &'a mut format::ColumnChunk,
        props: &'a WriterProperties,
        descr: ColumnDescPtr,
    ) -> Self {
        let path = descr.path();
        let meta = ColumnMetaData::new(
            descr.physical_type(),
            path.parts().to_vec(),
            props.compression(path),
        );
        let format::ColumnChunk {
            file_path,
            file_offset,
            meta_data,
        } = slot;
        Self {
            file_path,
            file_offset,
            meta: meta_data.insert(meta),
            props,
            descr,
        }
    }

    /// Descriptor of the column this chunk belongs to
    pub fn descr(&self) -> &ColumnDescriptor {
        &self.descr
    }

    /// Physical type recorded for this chunk
    pub fn column_type(&self) -> Type {
        self.meta.type_
    }

    /// Path recorded for this chunk
    pub fn column_path(&self) -> ColumnPath {
        ColumnPath::new(self.meta.path_in_schema.clone())
    }

    /// Compression codec recorded for this chunk
    pub fn compression(&self) -> Compression {
        self.meta.codec
    }

    /// Sets the file the column data is stored in, relative to the file
    /// holding the footer. An empty path clears it.
    pub fn set_file_path(&mut self, path: &str) {
        *self.file_path = if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        };
    }

    /// Sets the statistics of this column chunk, replacing any set before
    pub fn set_statistics(&mut self, stats: &ColumnStatistics<'_>) {
        self.meta.statistics = Some(stats.to_thrift());
    }

    /// Completes the column chunk.
    ///
    /// The file offset becomes the end of the chunk: the dictionary page
    /// offset (if positive, else the data page offset) plus the compressed
    /// size.
    #[allow(clippy::too_many_arguments)]
    pub fn finish(
        self,
        num_values: i64,
        dictionary_page_offset: Option<i64>,
        index_page_offset: Option<i64>,
        data_page_offset: i64,
        compressed_size: i64,
        uncompressed_size: i64,
        dictionary_fallback: bool,
    ) {
        let first_page_offset = match dictionary_page_offset {
            Some(offset) if offset > 0 => offset,
            _ => data_page_offset,
        };
        *self.file_offset = first_page_offset.wrapping_add(compressed_size);

        self.meta.num_values = num_values;
        self.meta.dictionary_page_offset = dictionary_page_offset;
        self.meta.index_page_offset = index_page_offset;
        self.meta.data_page_offset = data_page_offset;
        self.meta.total_compressed_size = compressed_size;
        self.meta.total_uncompressed_size = uncompressed_size;
        self.meta.encodings = self.encodings(dictionary_fallback);

        trace!(
            column = %self.descr.path(),
            file_offset = *self.file_offset,
            encodings = ?self.meta.encodings,
            "finished column chunk metadata"
        );
    }

    fn encodings(&self, dictionary_fallback: bool) -> Vec<Encoding> {
        let path = self.descr.path();
        let dictionary_enabled = self.props.dictionary_enabled(path);

        let mut encodings = vec![Encoding::RLE];
        if dictionary_enabled {
            encodings.push(self.props.dictionary_page_encoding());
            if self.props.writer_version() == WriterVersion::PARQUET_2_0 {
                encodings.push(self.props.dictionary_index_encoding());
            }
        }
        if !dictionary_enabled || dictionary_fallback {
            encodings.push(
                self.props
                    .column_encoding(path, self.descr.physical_type()),
            );
        }
        encodings
    }
}
