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

//! Parquet schema printer.
//! Provides methods to print Parquet file schema and list file metadata.
//!
//! # Example
//!
//! ```rust
//! use parquet_metadata::{
//!     file::footer::read_metadata,
//!     schema::printer::{print_file_metadata, print_schema},
//! };
//! use std::{fs::File, path::Path};
//!
//! // Open a file
//! let path = Path::new("test.parquet");
//! if let Ok(file) = File::open(&path) {
//!     let metadata = read_metadata(&file).unwrap();
//!
//!     print_file_metadata(&mut std::io::stdout(), &metadata);
//!     print_schema(&mut std::io::stdout(), metadata.schema());
//! }
//! ```

use std::{fmt, io};

use crate::basic::Type as PhysicalType;
use crate::file::metadata::{ColumnChunkMetaData, FileMetaData, RowGroupMetaData};
use crate::schema::types::Type;

/// Prints [`FileMetaData`] information, including every row group and column chunk.
#[allow(unused_must_use)]
pub fn print_file_metadata(out: &mut dyn io::Write, file_metadata: &FileMetaData) {
    writeln!(out, "version: {}", file_metadata.version());
    writeln!(out, "num of rows: {}", file_metadata.num_rows());
    if let Some(created_by) = file_metadata.created_by() {
        writeln!(out, "created by: {created_by}");
    }
    if let Some(metadata) = file_metadata.key_value_metadata() {
        writeln!(out, "metadata:");
        for kv in metadata.iter() {
            writeln!(out, "  {}: {}", &kv.key, kv.value.as_deref().unwrap_or(""));
        }
    }
    print_schema(out, file_metadata.schema());
    writeln!(out);
    writeln!(out, "num of row groups: {}", file_metadata.num_row_groups());
    writeln!(out, "row groups:");
    writeln!(out);
    for (i, rg) in file_metadata.row_groups().enumerate() {
        writeln!(out, "row group {i}:");
        print_dashes(out, 80);
        print_row_group_metadata(out, &rg);
    }
}

/// Prints Parquet [`Type`] information.
#[allow(unused_must_use)]
pub fn print_schema(out: &mut dyn io::Write, tp: &Type) {
    let mut s = String::new();
    {
        let mut printer = Printer::new(&mut s);
        printer.print(tp);
    }
    writeln!(out, "{s}");
}

#[allow(unused_must_use)]
fn print_row_group_metadata(out: &mut dyn io::Write, rg_metadata: &RowGroupMetaData) {
    writeln!(out, "total byte size: {}", rg_metadata.total_byte_size());
    writeln!(out, "num of rows: {}", rg_metadata.num_rows());
    writeln!(out);
    writeln!(out, "num of columns: {}", rg_metadata.num_columns());
    writeln!(out, "columns: ");
    for (i, cc) in rg_metadata.columns().enumerate() {
        writeln!(out);
        writeln!(out, "column {i}:");
        print_dashes(out, 80);
        match cc {
            Ok(cc) => print_column_chunk_metadata(out, &cc),
            Err(e) => {
                writeln!(out, "error: {e}");
            }
        }
    }
}

fn print_optional(value: Option<i64>) -> String {
    match value {
        None => "N/A".to_owned(),
        Some(v) => v.to_string(),
    }
}

#[allow(unused_must_use)]
fn print_column_chunk_metadata(out: &mut dyn io::Write, cc_metadata: &ColumnChunkMetaData) {
    writeln!(out, "column type: {}", cc_metadata.column_type());
    writeln!(out, "column path: {}", cc_metadata.column_path());
    let encoding_strs: Vec<_> = cc_metadata
        .encodings()
        .iter()
        .map(|e| format!("{e}"))
        .collect();
    writeln!(out, "encodings: {}", encoding_strs.join(" "));
    let file_path_str = cc_metadata.file_path().unwrap_or("N/A");
    writeln!(out, "file path: {file_path_str}");
    writeln!(out, "file offset: {}", cc_metadata.file_offset());
    writeln!(out, "num of values: {}", cc_metadata.num_values());
    writeln!(out, "compression: {}", cc_metadata.compression());
    writeln!(
        out,
        "total compressed size (in bytes): {}",
        cc_metadata.compressed_size()
    );
    writeln!(
        out,
        "total uncompressed size (in bytes): {}",
        cc_metadata.uncompressed_size()
    );
    writeln!(out, "data page offset: {}", cc_metadata.data_page_offset());
    writeln!(
        out,
        "index page offset: {}",
        print_optional(cc_metadata.index_page_offset())
    );
    writeln!(
        out,
        "dictionary page offset: {}",
        print_optional(cc_metadata.dictionary_page_offset())
    );
    if cc_metadata.is_stats_set() {
        let stats = cc_metadata.statistics();
        writeln!(
            out,
            "statistics: {{null_count: {}, distinct_count: {}, min: {}, max: {}}}",
            stats.null_count,
            stats.distinct_count,
            print_bytes(stats.min),
            print_bytes(stats.max)
        );
    } else {
        writeln!(out, "statistics: N/A");
    }
    writeln!(out);
}

fn print_bytes(value: Option<&[u8]>) -> String {
    match value {
        None => "N/A".to_owned(),
        Some(bytes) => format!("{bytes:?}"),
    }
}

#[allow(unused_must_use)]
fn print_dashes(out: &mut dyn io::Write, num: i32) {
    for _ in 0..num {
        write!(out, "-");
    }
    writeln!(out);
}

const INDENT_WIDTH: i32 = 2;

/// Struct for printing Parquet message type.
struct Printer<'a> {
    output: &'a mut dyn fmt::Write,
    indent: i32,
}

#[allow(unused_must_use)]
impl<'a> Printer<'a> {
    fn new(output: &'a mut dyn fmt::Write) -> Self {
        Printer { output, indent: 0 }
    }

    fn print_indent(&mut self) {
        for _ in 0..self.indent {
            write!(self.output, " ");
        }
    }

    fn print(&mut self, tp: &Type) {
        self.print_indent();
        match *tp {
            Type::PrimitiveType {
                ref basic_info,
                physical_type,
                type_length,
            } => {
                let phys_type_str = match physical_type {
                    PhysicalType::FIXED_LEN_BYTE_ARRAY => {
                        // We need to include length for fixed byte array
                        format!("{physical_type} ({type_length})")
                    }
                    _ => format!("{physical_type}"),
                };
                write!(
                    self.output,
                    "{} {} {};",
                    basic_info.repetition(),
                    phys_type_str,
                    basic_info.name()
                );
            }
            Type::GroupType {
                ref basic_info,
                ref fields,
            } => {
                if basic_info.has_repetition() {
                    let r = basic_info.repetition();
                    writeln!(self.output, "{} group {} {{", r, basic_info.name());
                } else {
                    writeln!(self.output, "message {} {{", basic_info.name());
                }

                self.indent += INDENT_WIDTH;
                for c in fields {
                    self.print(c);
                    writeln!(self.output);
                }
                self.indent -= INDENT_WIDTH;
                self.print_indent();
                write!(self.output, "}}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::basic::Repetition;
    use crate::file::metadata::{ColumnStatistics, FileMetaDataBuilder};
    use crate::file::properties::WriterProperties;
    use crate::schema::types::SchemaDescriptor;

    fn print(tp: &Type) -> String {
        let mut s = String::new();
        {
            let mut p = Printer::new(&mut s);
            p.print(tp);
        }
        s
    }

    #[test]
    fn test_print_primitive_type() {
        let field = Type::primitive_type_builder("field", PhysicalType::INT32)
            .with_repetition(Repetition::REQUIRED)
            .build()
            .unwrap();
        assert_eq!(print(&field), "REQUIRED INT32 field;");
    }

    #[test]
    fn test_print_fixed_len_byte_array() {
        let field = Type::primitive_type_builder("uuid", PhysicalType::FIXED_LEN_BYTE_ARRAY)
            .with_repetition(Repetition::OPTIONAL)
            .with_length(16)
            .build()
            .unwrap();
        assert_eq!(print(&field), "OPTIONAL FIXED_LEN_BYTE_ARRAY (16) uuid;");
    }

    fn nested_schema() -> Type {
        let a = Type::primitive_type_builder("a", PhysicalType::INT64)
            .with_repetition(Repetition::REQUIRED)
            .build()
            .unwrap();
        let c = Type::primitive_type_builder("c", PhysicalType::BYTE_ARRAY)
            .with_repetition(Repetition::REPEATED)
            .build()
            .unwrap();
        let b = Type::group_type_builder("b")
            .with_repetition(Repetition::OPTIONAL)
            .with_fields(vec![Arc::new(c)])
            .build()
            .unwrap();
        Type::group_type_builder("schema")
            .with_fields(vec![Arc::new(a), Arc::new(b)])
            .build()
            .unwrap()
    }

    #[test]
    fn test_print_group_type() {
        let expected = "message schema {
  REQUIRED INT64 a;
  OPTIONAL group b {
    REPEATED BYTE_ARRAY c;
  }
}";
        assert_eq!(print(&nested_schema()), expected);
    }

    #[test]
    fn test_print_schema_appends_newline() {
        let mut out = Vec::new();
        print_schema(&mut out, &nested_schema());
        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("message schema {\n"));
        assert!(s.ends_with("}\n"));
    }

    #[test]
    fn test_print_file_metadata() {
        let descr = Arc::new(SchemaDescriptor::new(Arc::new(nested_schema())));
        let props = WriterProperties::builder()
            .set_created_by("printer test".to_owned())
            .build();
        let mut builder = FileMetaDataBuilder::new(descr, Arc::new(props));
        let row_group = builder.append_row_group(5);
        {
            let mut column = row_group.next_column_chunk().unwrap();
            column.set_statistics(&ColumnStatistics {
                null_count: 1,
                distinct_count: 4,
                min: Some([1u8].as_slice()),
                max: Some([9u8].as_slice()),
            });
            column.finish(5, None, None, 4, 40, 60, false);
        }
        row_group
            .next_column_chunk()
            .unwrap()
            .finish(5, Some(44), None, 60, 30, 30, false);
        row_group.finish(70).unwrap();
        let metadata = builder.finish().unwrap();

        let mut out = Vec::new();
        print_file_metadata(&mut out, &metadata);
        let s = String::from_utf8(out).unwrap();

        assert!(s.contains("num of rows: 5\n"));
        assert!(s.contains("created by: printer test\n"));
        assert!(s.contains("num of row groups: 1\n"));
        assert!(s.contains("column path: b.c\n"));
        assert!(s.contains("file offset: 74\n"));
        assert!(s.contains("dictionary page offset: 44\n"));
        assert!(s.contains("statistics: {null_count: 1, distinct_count: 4, min: [1], max: [9]}\n"));
        assert!(s.contains("statistics: N/A\n"));
    }
}
