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

//! Framing of the serialized footer at the end of a Parquet file.
//!
//! A file ends with the Thrift encoded [`FileMetaData`], followed by the 4 byte
//! little-endian length of that metadata and the 4 byte `PAR1` magic:
//!
//! ```text
//! +--------------------+------------------+-------+
//! | metadata (thrift)  | metadata length  | PAR1  |
//! +--------------------+------------------+-------+
//!                        4 bytes            4 bytes
//! ```

use std::io::{Read, Write};

use tracing::trace;

use crate::errors::{ParquetError, Result};
use crate::file::metadata::FileMetaData;
use crate::file::reader::ChunkReader;
use crate::file::{FOOTER_SIZE, PARQUET_MAGIC};

/// Decodes the 8 byte footer, returning the metadata length in bytes.
pub fn decode_footer(slice: &[u8; FOOTER_SIZE]) -> Result<usize> {
    let magic = &slice[4..];
    if magic != PARQUET_MAGIC {
        return Err(general_err!("Invalid Parquet file. Corrupt footer"));
    }

    // get the metadata length from the footer
    let metadata_len = u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]);
    Ok(metadata_len as usize)
}

/// Decodes [`FileMetaData`] from the provided bytes.
///
/// `buf` holds the Thrift compact encoding only; it does **NOT** include the
/// 8 byte footer.
pub fn decode_metadata(buf: &[u8]) -> Result<FileMetaData> {
    FileMetaData::decode(buf)
}

/// Writes `metadata` followed by the footer to `sink`, returning the total
/// number of bytes written.
pub fn write_metadata<W: Write>(metadata: &FileMetaData, mut sink: W) -> Result<usize> {
    let metadata_len = metadata.write_to(&mut sink)?;
    let encoded_len = u32::try_from(metadata_len)
        .map_err(|_| general_err!("Metadata length {} exceeds u32", metadata_len))?;

    sink.write_all(&encoded_len.to_le_bytes())?;
    sink.write_all(&PARQUET_MAGIC)?;
    sink.flush()?;

    trace!(metadata_len, "wrote parquet footer");
    Ok(metadata_len + FOOTER_SIZE)
}

/// Reads the [`FileMetaData`] from the end of `chunk_reader`.
///
/// Returns [`ParquetError::NeedMoreData`] with the number of trailing bytes
/// required when the source is too short to hold the footer or the metadata
/// it announces.
pub fn read_metadata<R: ChunkReader>(chunk_reader: &R) -> Result<FileMetaData> {
    // check file is large enough to hold footer
    let file_size = chunk_reader.len();
    if file_size < FOOTER_SIZE as u64 {
        return Err(ParquetError::NeedMoreData(FOOTER_SIZE));
    }

    let mut footer = [0_u8; FOOTER_SIZE];
    chunk_reader
        .get_read(file_size - FOOTER_SIZE as u64)?
        .read_exact(&mut footer)?;

    let metadata_len = decode_footer(&footer)?;
    let footer_metadata_len = FOOTER_SIZE + metadata_len;
    if footer_metadata_len as u64 > file_size {
        return Err(ParquetError::NeedMoreData(footer_metadata_len));
    }

    let start = file_size - footer_metadata_len as u64;
    let bytes = chunk_reader.get_bytes(start, metadata_len)?;
    trace!(metadata_len, file_size, "read parquet footer");
    decode_metadata(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Type as PhysicalType;
    use crate::file::metadata::FileMetaDataBuilder;
    use crate::file::properties::WriterProperties;
    use crate::schema::types::{SchemaDescriptor, Type};
    use bytes::Bytes;
    use std::sync::Arc;

    fn sample_metadata() -> FileMetaData {
        let field = Type::primitive_type_builder("id", PhysicalType::INT64)
            .with_repetition(crate::basic::Repetition::REQUIRED)
            .build()
            .unwrap();
        let schema = Type::group_type_builder("schema")
            .with_fields(vec![Arc::new(field)])
            .build()
            .unwrap();
        let descr = Arc::new(SchemaDescriptor::new(Arc::new(schema)));
        let props = Arc::new(WriterProperties::default());

        let mut builder = FileMetaDataBuilder::new(descr, props);
        let row_group = builder.append_row_group(3);
        row_group
            .next_column_chunk()
            .unwrap()
            .finish(3, None, None, 4, 20, 24, false);
        row_group.finish(20).unwrap();
        builder.finish().unwrap()
    }

    #[test]
    fn test_decode_footer() {
        let footer = [0x2a, 0x01, 0, 0, b'P', b'A', b'R', b'1'];
        assert_eq!(decode_footer(&footer).unwrap(), 298);
    }

    #[test]
    fn test_decode_footer_corrupt() {
        let footer = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(
            decode_footer(&footer).unwrap_err().to_string(),
            "Parquet error: Invalid Parquet file. Corrupt footer"
        );
    }

    #[test]
    fn test_write_then_read_metadata() {
        let metadata = sample_metadata();
        let mut buf = b"PAR1".to_vec();
        let written = write_metadata(&metadata, &mut buf).unwrap();
        assert_eq!(written + 4, buf.len());
        assert_eq!(&buf[buf.len() - 4..], b"PAR1");

        let decoded = read_metadata(&Bytes::from(buf)).unwrap();
        assert_eq!(decoded.num_rows(), 3);
        assert_eq!(decoded.as_thrift(), metadata.as_thrift());
    }

    #[test]
    fn test_read_metadata_smaller_than_footer() {
        let data = Bytes::from_static(b"PAR1");
        let err = read_metadata(&data).unwrap_err();
        assert!(matches!(err, ParquetError::NeedMoreData(FOOTER_SIZE)));
    }

    #[test]
    fn test_read_metadata_invalid_start() {
        let data = Bytes::from(vec![255, 0, 0, 0, b'P', b'A', b'R', b'1']);
        let err = read_metadata(&data).unwrap_err();
        assert!(matches!(err, ParquetError::NeedMoreData(263)));
    }

    #[test]
    fn test_read_metadata_corrupt_footer() {
        let data = Bytes::from(vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            read_metadata(&data).unwrap_err().to_string(),
            "Parquet error: Invalid Parquet file. Corrupt footer"
        );
    }
}
