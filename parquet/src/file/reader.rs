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

//! Byte sources the footer can be read from.

use bytes::{Buf, Bytes};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};

use crate::errors::{ParquetError, Result};

/// Length should return the total number of bytes in the input source.
/// It's mainly used to read the metadata, which is at the end of the source.
#[allow(clippy::len_without_is_empty)]
pub trait Length {
    /// Returns the amount of bytes of the inner source.
    fn len(&self) -> u64;
}

/// The ChunkReader trait generates readers of chunks of a source.
///
/// For more information see [`File::try_clone`]
pub trait ChunkReader: Length + Send + Sync {
    type T: Read;

    /// Get a [`Read`] starting at the provided file offset
    ///
    /// Subsequent or concurrent calls to [`Self::get_read`] or [`Self::get_bytes`] may
    /// side-effect on previously returned [`Self::T`]. Care should be taken to avoid this
    ///
    /// See [`File::try_clone`] for more information
    fn get_read(&self, start: u64) -> Result<Self::T>;

    /// Get a range as bytes
    ///
    /// Concurrent calls to [`Self::get_bytes`] may result in interleaved output
    ///
    /// See [`File::try_clone`] for more information
    fn get_bytes(&self, start: u64, length: usize) -> Result<Bytes>;
}

impl Length for File {
    fn len(&self) -> u64 {
        self.metadata().map(|m| m.len()).unwrap_or(0u64)
    }
}

impl ChunkReader for File {
    type T = BufReader<File>;

    fn get_read(&self, start: u64) -> Result<Self::T> {
        let mut reader = self.try_clone()?;
        reader.seek(SeekFrom::Start(start))?;
        Ok(BufReader::new(reader))
    }

    fn get_bytes(&self, start: u64, length: usize) -> Result<Bytes> {
        let mut buffer = Vec::with_capacity(length);
        let mut reader = self.try_clone()?;
        reader.seek(SeekFrom::Start(start))?;
        let read = reader.take(length as _).read_to_end(&mut buffer)?;

        if read != length {
            return Err(eof_err!(
                "Expected to read {} bytes, read only {}",
                length,
                read
            ));
        }
        Ok(buffer.into())
    }
}

impl Length for Bytes {
    fn len(&self) -> u64 {
        self.len() as u64
    }
}

impl ChunkReader for Bytes {
    type T = bytes::buf::Reader<Bytes>;

    fn get_read(&self, start: u64) -> Result<Self::T> {
        let start = usize::try_from(start)?;
        if start > self.len() {
            return Err(eof_err!(
                "Expected to read at offset {}, source has only {} bytes",
                start,
                self.len()
            ));
        }
        Ok(self.slice(start..).reader())
    }

    fn get_bytes(&self, start: u64, length: usize) -> Result<Bytes> {
        let start = usize::try_from(start)?;
        match start.checked_add(length) {
            Some(end) if end <= self.len() => Ok(self.slice(start..end)),
            _ => Err(eof_err!(
                "Expected to read {} bytes at offset {}, source has only {} bytes",
                length,
                start,
                self.len()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bytes_chunk_reader() {
        let data = Bytes::from_static(b"0123456789");
        assert_eq!(Length::len(&data), 10);
        assert_eq!(data.get_bytes(2, 3).unwrap().as_ref(), b"234");
        assert_eq!(data.get_bytes(10, 0).unwrap().len(), 0);

        let mut rest = String::new();
        data.get_read(7).unwrap().read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "789");
    }

    #[test]
    fn test_bytes_chunk_reader_out_of_range() {
        let data = Bytes::from_static(b"0123456789");
        assert!(matches!(
            data.get_bytes(8, 3).unwrap_err(),
            ParquetError::EOF(_)
        ));
        assert!(matches!(data.get_read(11).unwrap_err(), ParquetError::EOF(_)));
    }

    #[test]
    fn test_file_chunk_reader() {
        let path = std::env::temp_dir().join(format!(
            "parquet-metadata-chunk-reader-{}",
            std::process::id()
        ));
        File::create(&path)
            .unwrap()
            .write_all(b"hello parquet")
            .unwrap();

        let file = File::open(&path).unwrap();
        assert_eq!(Length::len(&file), 13);
        assert_eq!(file.get_bytes(6, 7).unwrap().as_ref(), b"parquet");

        let mut head = [0u8; 5];
        file.get_read(0).unwrap().read_exact(&mut head).unwrap();
        assert_eq!(&head, b"hello");

        assert!(matches!(
            file.get_bytes(10, 10).unwrap_err(),
            ParquetError::EOF(_)
        ));
        std::fs::remove_file(&path).unwrap();
    }
}
