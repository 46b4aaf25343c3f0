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

//! Contains Rust mappings for the physical enums of the Parquet footer
//! (Type, Repetition, Encoding, Compression).
//!
//! The integer values match the Parquet Thrift definition and are what
//! gets written to and read from a serialized footer.

use std::str;

use crate::errors::{ParquetError, Result};

// ----------------------------------------------------------------------
// Types from the Thrift definition

thrift_enum!(
/// Types supported by Parquet.
///
/// These physical types are intended to be used in combination with the encodings to
/// control the on disk storage format.
/// For example INT16 is not included as a type since a good encoding of INT32
/// would handle this.
enum Type {
  BOOLEAN = 0;
  INT32 = 1;
  INT64 = 2;
  INT96 = 3;  // deprecated, only used by legacy implementations.
  FLOAT = 4;
  DOUBLE = 5;
  BYTE_ARRAY = 6;
  FIXED_LEN_BYTE_ARRAY = 7;
}
);

thrift_enum!(
/// Representation of field types in schema.
enum Repetition {
  /// Field is required (can not be null) and each record has exactly 1 value.
  REQUIRED = 0;
  /// Field is optional (can be null) and each record has 0 or 1 values.
  OPTIONAL = 1;
  /// Field is repeated and can contain 0 or more values.
  REPEATED = 2;
}
);

thrift_enum!(
/// Encodings supported by Parquet.
///
/// Not all encodings are valid for all types. These enums are also used to specify the
/// encoding of definition and repetition levels.
enum Encoding {
  /// Default byte encoding.
  PLAIN = 0;
  /// **Deprecated** dictionary encoding.
  ///
  /// Written as the dictionary page encoding by `PARQUET_1_0` writers.
  PLAIN_DICTIONARY = 2;
  /// Group packed run length encoding.
  ///
  /// Usable for definition/repetition levels encoding and boolean values.
  RLE = 3;
  /// Bit packed encoding.
  ///
  /// This can only be used if the data has a known max width.
  BIT_PACKED = 4;
  /// Delta encoding for integers, either INT32 or INT64.
  DELTA_BINARY_PACKED = 5;
  /// Encoding for byte arrays to separate the length values and the data.
  DELTA_LENGTH_BYTE_ARRAY = 6;
  /// Incremental encoding for byte arrays.
  DELTA_BYTE_ARRAY = 7;
  /// Dictionary encoding.
  ///
  /// The ids are encoded using the RLE encoding.
  RLE_DICTIONARY = 8;
  /// Encoding for fixed-width data, splitting values into K byte streams.
  BYTE_STREAM_SPLIT = 9;
}
);

impl Encoding {
    /// Returns true if the encoding references a dictionary page
    pub fn is_dictionary(&self) -> bool {
        matches!(self, Encoding::PLAIN_DICTIONARY | Encoding::RLE_DICTIONARY)
    }
}

thrift_enum!(
/// Supported compression algorithms.
///
/// Only the codec identifier is recorded in the footer; the codecs themselves
/// live with the page writers.
enum Compression {
  UNCOMPRESSED = 0;
  SNAPPY = 1;
  GZIP = 2;
  LZO = 3;
  BROTLI = 4;
  LZ4 = 5;
  ZSTD = 6;
  LZ4_RAW = 7;
}
);

// ----------------------------------------------------------------------
// String conversions for schema parsing.

impl str::FromStr for Repetition {
    type Err = ParquetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "REQUIRED" => Ok(Repetition::REQUIRED),
            "OPTIONAL" => Ok(Repetition::OPTIONAL),
            "REPEATED" => Ok(Repetition::REPEATED),
            other => Err(general_err!("Invalid parquet repetition {}", other)),
        }
    }
}

impl str::FromStr for Type {
    type Err = ParquetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BOOLEAN" => Ok(Type::BOOLEAN),
            "INT32" => Ok(Type::INT32),
            "INT64" => Ok(Type::INT64),
            "INT96" => Ok(Type::INT96),
            "FLOAT" => Ok(Type::FLOAT),
            "DOUBLE" => Ok(Type::DOUBLE),
            "BYTE_ARRAY" | "BINARY" => Ok(Type::BYTE_ARRAY),
            "FIXED_LEN_BYTE_ARRAY" => Ok(Type::FIXED_LEN_BYTE_ARRAY),
            other => Err(general_err!("Invalid parquet type {}", other)),
        }
    }
}

impl str::FromStr for Compression {
    type Err = ParquetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "UNCOMPRESSED" => Ok(Compression::UNCOMPRESSED),
            "SNAPPY" => Ok(Compression::SNAPPY),
            "GZIP" => Ok(Compression::GZIP),
            "LZO" => Ok(Compression::LZO),
            "BROTLI" => Ok(Compression::BROTLI),
            "LZ4" => Ok(Compression::LZ4),
            "ZSTD" => Ok(Compression::ZSTD),
            "LZ4_RAW" => Ok(Compression::LZ4_RAW),
            other => Err(general_err!("unknown compression codec: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parquet_thrift::tests::test_roundtrip;

    #[test]
    fn test_display_type() {
        assert_eq!(Type::BOOLEAN.to_string(), "BOOLEAN");
        assert_eq!(Type::INT96.to_string(), "INT96");
        assert_eq!(Type::BYTE_ARRAY.to_string(), "BYTE_ARRAY");
        assert_eq!(
            Type::FIXED_LEN_BYTE_ARRAY.to_string(),
            "FIXED_LEN_BYTE_ARRAY"
        );
    }

    #[test]
    fn test_type_thrift_values() {
        assert_eq!(Type::BOOLEAN.as_i32(), 0);
        assert_eq!(Type::DOUBLE.as_i32(), 5);
        assert_eq!(Type::FIXED_LEN_BYTE_ARRAY.as_i32(), 7);
        assert_eq!(Type::try_from(6).unwrap(), Type::BYTE_ARRAY);
        assert_eq!(
            Type::try_from(8).unwrap_err().to_string(),
            "Parquet error: Unexpected Type 8"
        );
    }

    #[test]
    fn test_from_string_into_type() {
        for t in [
            Type::BOOLEAN,
            Type::INT32,
            Type::INT64,
            Type::INT96,
            Type::FLOAT,
            Type::DOUBLE,
            Type::BYTE_ARRAY,
            Type::FIXED_LEN_BYTE_ARRAY,
        ] {
            assert_eq!(t.to_string().parse::<Type>().unwrap(), t);
        }
        assert_eq!("BINARY".parse::<Type>().unwrap(), Type::BYTE_ARRAY);
        assert!("INT16".parse::<Type>().is_err());
    }

    #[test]
    fn test_from_string_into_repetition() {
        assert_eq!(
            "REQUIRED".parse::<Repetition>().unwrap(),
            Repetition::REQUIRED
        );
        assert_eq!(
            "OPTIONAL".parse::<Repetition>().unwrap(),
            Repetition::OPTIONAL
        );
        assert_eq!(
            "REPEATED".parse::<Repetition>().unwrap(),
            Repetition::REPEATED
        );
        assert!("MAYBE".parse::<Repetition>().is_err());
    }

    #[test]
    fn test_encoding_thrift_values() {
        assert_eq!(Encoding::PLAIN.as_i32(), 0);
        assert_eq!(Encoding::PLAIN_DICTIONARY.as_i32(), 2);
        assert_eq!(Encoding::RLE.as_i32(), 3);
        assert_eq!(Encoding::RLE_DICTIONARY.as_i32(), 8);
        assert_eq!(Encoding::BYTE_STREAM_SPLIT.as_i32(), 9);
        // 1 was GROUP_VAR_INT, never written by any known writer
        assert!(Encoding::try_from(1).is_err());
    }

    #[test]
    fn test_encoding_is_dictionary() {
        assert!(Encoding::PLAIN_DICTIONARY.is_dictionary());
        assert!(Encoding::RLE_DICTIONARY.is_dictionary());
        assert!(!Encoding::RLE.is_dictionary());
        assert!(!Encoding::PLAIN.is_dictionary());
    }

    #[test]
    fn test_display_compression() {
        assert_eq!(Compression::UNCOMPRESSED.to_string(), "UNCOMPRESSED");
        assert_eq!(Compression::SNAPPY.to_string(), "SNAPPY");
        assert_eq!(Compression::LZ4_RAW.to_string(), "LZ4_RAW");
    }

    #[test]
    fn test_compression_from_str() {
        assert_eq!("snappy".parse::<Compression>().unwrap(), Compression::SNAPPY);
        assert_eq!("ZSTD".parse::<Compression>().unwrap(), Compression::ZSTD);
        assert!("xz".parse::<Compression>().is_err());
    }

    #[test]
    fn test_enum_roundtrip() {
        test_roundtrip(Type::INT96);
        test_roundtrip(Repetition::REPEATED);
        test_roundtrip(Encoding::DELTA_BYTE_ARRAY);
        test_roundtrip(Compression::LZ4_RAW);
    }
}
