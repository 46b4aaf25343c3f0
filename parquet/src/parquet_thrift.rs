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

//! Thrift compact protocol reader and writer used for the Parquet footer.
//!
//! The reader operates directly on a byte slice and hands out borrowed
//! strings and byte arrays, so decoding a footer does not allocate for
//! anything but the records themselves.

use std::io::Write;

use crate::errors::{ParquetError, Result};

// Thrift compact protocol types for struct fields.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FieldType {
    Stop = 0,
    BooleanTrue = 1,
    BooleanFalse = 2,
    Byte = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    Double = 7,
    Binary = 8,
    List = 9,
    Set = 10,
    Map = 11,
    Struct = 12,
}

impl TryFrom<u8> for FieldType {
    type Error = ParquetError;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Stop),
            1 => Ok(Self::BooleanTrue),
            2 => Ok(Self::BooleanFalse),
            3 => Ok(Self::Byte),
            4 => Ok(Self::I16),
            5 => Ok(Self::I32),
            6 => Ok(Self::I64),
            7 => Ok(Self::Double),
            8 => Ok(Self::Binary),
            9 => Ok(Self::List),
            10 => Ok(Self::Set),
            11 => Ok(Self::Map),
            12 => Ok(Self::Struct),
            _ => Err(general_err!("Unexpected struct field type {}", value)),
        }
    }
}

impl TryFrom<ElementType> for FieldType {
    type Error = ParquetError;
    fn try_from(value: ElementType) -> Result<Self> {
        match value {
            ElementType::Bool => Ok(Self::BooleanTrue),
            ElementType::Byte => Ok(Self::Byte),
            ElementType::I16 => Ok(Self::I16),
            ElementType::I32 => Ok(Self::I32),
            ElementType::I64 => Ok(Self::I64),
            ElementType::Double => Ok(Self::Double),
            ElementType::Binary => Ok(Self::Binary),
            ElementType::List => Ok(Self::List),
            ElementType::Struct => Ok(Self::Struct),
            _ => Err(general_err!("Unexpected list element type {:?}", value)),
        }
    }
}

// Thrift compact protocol types for list elements
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ElementType {
    Bool = 2,
    Byte = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    Double = 7,
    Binary = 8,
    List = 9,
    Set = 10,
    Map = 11,
    Struct = 12,
}

impl TryFrom<u8> for ElementType {
    type Error = ParquetError;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            // For historical and compatibility reasons, a reader should be capable to deal with both cases.
            // The only valid value in the first version of the compact protocol was 2, but due to an widespread implementation bug
            // the defacto standard across large parts of the library became 1 instead.
            // As a result, both values are now allowed.
            // https://github.com/apache/thrift/blob/master/doc/specs/thrift-compact-protocol.md#list-and-set
            1 | 2 => Ok(Self::Bool),
            3 => Ok(Self::Byte),
            4 => Ok(Self::I16),
            5 => Ok(Self::I32),
            6 => Ok(Self::I64),
            7 => Ok(Self::Double),
            8 => Ok(Self::Binary),
            9 => Ok(Self::List),
            10 => Ok(Self::Set),
            11 => Ok(Self::Map),
            12 => Ok(Self::Struct),
            _ => Err(general_err!("Unexpected list/set element type {}", value)),
        }
    }
}

pub(crate) struct FieldIdentifier {
    pub(crate) field_type: FieldType,
    pub(crate) id: i16,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ListIdentifier {
    pub(crate) element_type: ElementType,
    pub(crate) size: i32,
}

/// Maximum nesting depth followed when skipping unknown fields
const MAX_SKIP_DEPTH: i8 = 64;

/// Reads the Thrift compact protocol from a byte slice
pub(crate) struct ThriftSliceInputProtocol<'a> {
    buf: &'a [u8],
}

impl<'a> ThriftSliceInputProtocol<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Returns the bytes not yet consumed
    pub(crate) fn as_slice(&self) -> &'a [u8] {
        self.buf
    }

    fn read_vlq(&mut self) -> Result<u64> {
        let mut in_progress = 0;
        let mut shift = 0;
        loop {
            let byte = self.read_byte()?;
            in_progress |= ((byte & 0x7F) as u64).wrapping_shl(shift);
            shift += 7;
            if byte & 0x80 == 0 {
                return Ok(in_progress);
            }
        }
    }

    fn read_zig_zag(&mut self) -> Result<i64> {
        let val = self.read_vlq()?;
        Ok((val >> 1) as i64 ^ -((val & 1) as i64))
    }

    pub(crate) fn read_field_begin(&mut self, last_field_id: i16) -> Result<FieldIdentifier> {
        // we can read at least one byte, which is:
        // - the type
        // - the field delta and the type
        let field_type = self.read_byte()?;
        let field_delta = (field_type & 0xf0) >> 4;
        let field_type = FieldType::try_from(field_type & 0xf)?;

        if field_type == FieldType::Stop {
            return Ok(FieldIdentifier { field_type, id: 0 });
        }

        let id = if field_delta != 0 {
            last_field_id
                .checked_add(field_delta as i16)
                .ok_or_else(|| general_err!("cannot add {} to {}", field_delta, last_field_id))?
        } else {
            self.read_i16()?
        };

        Ok(FieldIdentifier { field_type, id })
    }

    pub(crate) fn read_list_begin(&mut self) -> Result<ListIdentifier> {
        let header = self.read_byte()?;
        let element_type = ElementType::try_from(header & 0x0f)?;

        let possible_element_count = (header & 0xF0) >> 4;
        let size = if possible_element_count != 15 {
            // high bits set high if count and type encoded separately
            possible_element_count as i32
        } else {
            self.read_vlq()? as _
        };
        if size < 0 {
            return Err(general_err!("Negative list size {}", size));
        }

        Ok(ListIdentifier { element_type, size })
    }

    pub(crate) fn read_bool(&mut self) -> Result<bool> {
        let b = self.read_byte()?;
        // Previous versions of the thrift specification said to use 0 and 1 inside collections,
        // but that differed from existing implementations.
        // The specification was updated in https://github.com/apache/thrift/commit/2c29c5665bc442e703480bb0ee60fe925ffe02e8.
        // At least the go implementation seems to have followed the previously documented values.
        match b {
            0x01 => Ok(true),
            0x00 | 0x02 => Ok(false),
            unkn => Err(general_err!("cannot convert {} into bool", unkn)),
        }
    }

    pub(crate) fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let len = self.read_vlq()? as usize;
        let ret = self.buf.get(..len).ok_or_else(eof_error)?;
        self.buf = &self.buf[len..];
        Ok(ret)
    }

    pub(crate) fn read_string(&mut self) -> Result<&'a str> {
        let slice = self.read_bytes()?;
        Ok(std::str::from_utf8(slice)?)
    }

    pub(crate) fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_byte()? as _)
    }

    pub(crate) fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_zig_zag()? as _)
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_zig_zag()? as _)
    }

    pub(crate) fn read_i64(&mut self) -> Result<i64> {
        self.read_zig_zag()
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8> {
        let ret = *self.buf.first().ok_or_else(eof_error)?;
        self.buf = &self.buf[1..];
        Ok(ret)
    }

    #[inline]
    fn skip_bytes(&mut self, n: usize) -> Result<()> {
        self.buf.get(..n).ok_or_else(eof_error)?;
        self.buf = &self.buf[n..];
        Ok(())
    }

    fn skip_vlq(&mut self) -> Result<()> {
        loop {
            let byte = self.read_byte()?;
            if byte & 0x80 == 0 {
                return Ok(());
            }
        }
    }

    fn skip_binary(&mut self) -> Result<()> {
        let len = self.read_vlq()? as usize;
        self.skip_bytes(len)
    }

    /// Skip a field with type `field_type` recursively until the default
    /// maximum skip depth is reached.
    pub(crate) fn skip(&mut self, field_type: FieldType) -> Result<()> {
        self.skip_till_depth(field_type, MAX_SKIP_DEPTH)
    }

    /// Skip a field with type `field_type` recursively up to `depth` levels.
    fn skip_till_depth(&mut self, field_type: FieldType, depth: i8) -> Result<()> {
        if depth == 0 {
            return Err(general_err!("cannot parse past {:?}", field_type));
        }

        match field_type {
            // the value of a boolean struct field lives in the field header
            FieldType::BooleanFalse | FieldType::BooleanTrue => Ok(()),
            FieldType::Byte => self.read_i8().map(|_| ()),
            FieldType::I16 | FieldType::I32 | FieldType::I64 => self.skip_vlq(),
            FieldType::Double => self.skip_bytes(8),
            FieldType::Binary => self.skip_binary(),
            FieldType::Struct => {
                let mut last_field_id = 0i16;
                loop {
                    let field_ident = self.read_field_begin(last_field_id)?;
                    if field_ident.field_type == FieldType::Stop {
                        break;
                    }
                    self.skip_till_depth(field_ident.field_type, depth - 1)?;
                    last_field_id = field_ident.id;
                }
                Ok(())
            }
            FieldType::List | FieldType::Set => {
                let list_ident = self.read_list_begin()?;
                for _ in 0..list_ident.size {
                    match list_ident.element_type {
                        // list elements of type bool occupy a full byte
                        ElementType::Bool => self.read_bool().map(|_| ())?,
                        element_type => {
                            self.skip_till_depth(FieldType::try_from(element_type)?, depth - 1)?
                        }
                    }
                }
                Ok(())
            }
            // no map types in the parquet footer
            u => Err(general_err!("cannot skip field type {:?}", u)),
        }
    }
}

fn eof_error() -> ParquetError {
    eof_err!("Unexpected EOF")
}

/// Decodes a value from the compact protocol
pub(crate) trait ReadThrift<'a>: Sized {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self>;
}

impl<'a> ReadThrift<'a> for bool {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        prot.read_bool()
    }
}

impl<'a> ReadThrift<'a> for i8 {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        prot.read_i8()
    }
}

impl<'a> ReadThrift<'a> for i16 {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        prot.read_i16()
    }
}

impl<'a> ReadThrift<'a> for i32 {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        prot.read_i32()
    }
}

impl<'a> ReadThrift<'a> for i64 {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        prot.read_i64()
    }
}

impl<'a> ReadThrift<'a> for &'a str {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        prot.read_string()
    }
}

impl<'a> ReadThrift<'a> for String {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        Ok(prot.read_string()?.to_owned())
    }
}

impl<'a> ReadThrift<'a> for &'a [u8] {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        prot.read_bytes()
    }
}

impl<'a> ReadThrift<'a> for Vec<u8> {
    fn read_thrift(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Self> {
        Ok(prot.read_bytes()?.to_vec())
    }
}

/// Reads a thrift `list<T>`
pub(crate) fn read_thrift_vec<'a, T>(prot: &mut ThriftSliceInputProtocol<'a>) -> Result<Vec<T>>
where
    T: ReadThrift<'a>,
{
    let list_ident = prot.read_list_begin()?;
    // never trust the declared size for the initial allocation
    let mut res = Vec::with_capacity((list_ident.size as usize).min(prot.as_slice().len()));
    for _ in 0..list_ident.size {
        res.push(T::read_thrift(prot)?);
    }
    Ok(res)
}

/////////////////////////
// thrift compact output

/// Writes the Thrift compact protocol to a [`Write`]
pub(crate) struct ThriftCompactOutputProtocol<W: Write> {
    writer: W,
}

impl<W: Write> ThriftCompactOutputProtocol<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer }
    }

    pub(crate) fn into_inner(self) -> W {
        self.writer
    }

    fn write_byte(&mut self, b: u8) -> Result<()> {
        self.writer.write_all(&[b])?;
        Ok(())
    }

    fn write_vlq(&mut self, val: u64) -> Result<()> {
        let mut v = val;
        while v > 0x7f {
            self.write_byte(v as u8 | 0x80)?;
            v >>= 7;
        }
        self.write_byte(v as u8)
    }

    fn write_zig_zag(&mut self, val: i64) -> Result<()> {
        let s = (val < 0) as i64;
        self.write_vlq((((val ^ -s) << 1) + s) as u64)
    }

    pub(crate) fn write_field_begin(
        &mut self,
        field_type: FieldType,
        field_id: i16,
        last_field_id: i16,
    ) -> Result<()> {
        let delta = field_id.wrapping_sub(last_field_id);
        if delta > 0 && delta <= 0xf {
            self.write_byte((delta as u8) << 4 | field_type as u8)
        } else {
            self.write_byte(field_type as u8)?;
            self.write_i16(field_id)
        }
    }

    pub(crate) fn write_list_begin(&mut self, element_type: ElementType, len: usize) -> Result<()> {
        if len < 15 {
            self.write_byte((len as u8) << 4 | element_type as u8)
        } else {
            self.write_byte(0xf0u8 | element_type as u8)?;
            self.write_vlq(len as _)
        }
    }

    pub(crate) fn write_struct_end(&mut self) -> Result<()> {
        self.write_byte(0)
    }

    pub(crate) fn write_bytes(&mut self, val: &[u8]) -> Result<()> {
        self.write_vlq(val.len() as u64)?;
        self.writer.write_all(val)?;
        Ok(())
    }

    pub(crate) fn write_bool(&mut self, val: bool) -> Result<()> {
        match val {
            true => self.write_byte(1),
            false => self.write_byte(2),
        }
    }

    pub(crate) fn write_i8(&mut self, val: i8) -> Result<()> {
        self.write_byte(val as u8)
    }

    pub(crate) fn write_i16(&mut self, val: i16) -> Result<()> {
        self.write_zig_zag(val as _)
    }

    pub(crate) fn write_i32(&mut self, val: i32) -> Result<()> {
        self.write_zig_zag(val as _)
    }

    pub(crate) fn write_i64(&mut self, val: i64) -> Result<()> {
        self.write_zig_zag(val as _)
    }
}

pub(crate) trait WriteThrift {
    const ELEMENT_TYPE: ElementType;

    // used to write generated enums and structs
    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()>;
}

impl<T: WriteThrift> WriteThrift for Vec<T> {
    const ELEMENT_TYPE: ElementType = ElementType::List;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        writer.write_list_begin(T::ELEMENT_TYPE, self.len())?;
        for item in self {
            item.write_thrift(writer)?;
        }
        Ok(())
    }
}

impl WriteThrift for bool {
    const ELEMENT_TYPE: ElementType = ElementType::Bool;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        writer.write_bool(*self)
    }
}

impl WriteThrift for i8 {
    const ELEMENT_TYPE: ElementType = ElementType::Byte;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        writer.write_i8(*self)
    }
}

impl WriteThrift for i16 {
    const ELEMENT_TYPE: ElementType = ElementType::I16;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        writer.write_i16(*self)
    }
}

impl WriteThrift for i32 {
    const ELEMENT_TYPE: ElementType = ElementType::I32;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        writer.write_i32(*self)
    }
}

impl WriteThrift for i64 {
    const ELEMENT_TYPE: ElementType = ElementType::I64;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        writer.write_i64(*self)
    }
}

impl WriteThrift for String {
    const ELEMENT_TYPE: ElementType = ElementType::Binary;

    fn write_thrift<W: Write>(&self, writer: &mut ThriftCompactOutputProtocol<W>) -> Result<()> {
        writer.write_bytes(self.as_bytes())
    }
}

pub(crate) trait WriteThriftField {
    // used to write struct fields (which may be basic types or generated types).
    // write the field header and field value. returns `field_id`.
    fn write_thrift_field<W: Write>(
        &self,
        writer: &mut ThriftCompactOutputProtocol<W>,
        field_id: i16,
        last_field_id: i16,
    ) -> Result<i16>;
}

impl WriteThriftField for bool {
    fn write_thrift_field<W: Write>(
        &self,
        writer: &mut ThriftCompactOutputProtocol<W>,
        field_id: i16,
        last_field_id: i16,
    ) -> Result<i16> {
        // boolean only writes the field header
        match *self {
            true => writer.write_field_begin(FieldType::BooleanTrue, field_id, last_field_id)?,
            false => writer.write_field_begin(FieldType::BooleanFalse, field_id, last_field_id)?,
        }
        Ok(field_id)
    }
}

impl WriteThriftField for i32 {
    fn write_thrift_field<W: Write>(
        &self,
        writer: &mut ThriftCompactOutputProtocol<W>,
        field_id: i16,
        last_field_id: i16,
    ) -> Result<i16> {
        writer.write_field_begin(FieldType::I32, field_id, last_field_id)?;
        writer.write_i32(*self)?;
        Ok(field_id)
    }
}

impl WriteThriftField for i64 {
    fn write_thrift_field<W: Write>(
        &self,
        writer: &mut ThriftCompactOutputProtocol<W>,
        field_id: i16,
        last_field_id: i16,
    ) -> Result<i16> {
        writer.write_field_begin(FieldType::I64, field_id, last_field_id)?;
        writer.write_i64(*self)?;
        Ok(field_id)
    }
}

impl WriteThriftField for str {
    fn write_thrift_field<W: Write>(
        &self,
        writer: &mut ThriftCompactOutputProtocol<W>,
        field_id: i16,
        last_field_id: i16,
    ) -> Result<i16> {
        writer.write_field_begin(FieldType::Binary, field_id, last_field_id)?;
        writer.write_bytes(self.as_bytes())?;
        Ok(field_id)
    }
}

impl WriteThriftField for [u8] {
    fn write_thrift_field<W: Write>(
        &self,
        writer: &mut ThriftCompactOutputProtocol<W>,
        field_id: i16,
        last_field_id: i16,
    ) -> Result<i16> {
        writer.write_field_begin(FieldType::Binary, field_id, last_field_id)?;
        writer.write_bytes(self)?;
        Ok(field_id)
    }
}

impl<T: WriteThrift> WriteThriftField for Vec<T> {
    fn write_thrift_field<W: Write>(
        &self,
        writer: &mut ThriftCompactOutputProtocol<W>,
        field_id: i16,
        last_field_id: i16,
    ) -> Result<i16> {
        writer.write_field_begin(FieldType::List, field_id, last_field_id)?;
        self.write_thrift(writer)?;
        Ok(field_id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fmt::Debug;

    pub(crate) fn test_roundtrip<T>(val: T)
    where
        T: for<'a> ReadThrift<'a> + WriteThrift + PartialEq + Debug,
    {
        let mut writer = ThriftCompactOutputProtocol::new(Vec::<u8>::new());
        val.write_thrift(&mut writer).unwrap();
        let buf = writer.into_inner();

        let mut prot = ThriftSliceInputProtocol::new(&buf);
        let read_val = T::read_thrift(&mut prot).unwrap();
        assert_eq!(val, read_val);
        assert!(prot.as_slice().is_empty());
    }

    #[test]
    fn test_zig_zag_integers() {
        for v in [0i64, 1, -1, 63, -64, 64, i32::MAX as i64, i64::MIN, i64::MAX] {
            test_roundtrip(v);
        }
        test_roundtrip(-300i32);
        test_roundtrip(i16::MIN);
    }

    #[test]
    fn test_long_list_header() {
        // 15 or more elements need a separate length
        let values: Vec<i32> = (0..20).collect();
        let mut writer = ThriftCompactOutputProtocol::new(Vec::<u8>::new());
        values.write_thrift(&mut writer).unwrap();
        let buf = writer.into_inner();
        assert_eq!(buf[0], 0xf5);
        assert_eq!(buf[1], 20);

        let mut prot = ThriftSliceInputProtocol::new(&buf);
        let read = read_thrift_vec::<i32>(&mut prot).unwrap();
        assert_eq!(read, values);
    }

    #[test]
    fn test_read_boolean_list_both_encodings() {
        // element type 1 with values 1/2 and element type 2 with values 1/0
        for bytes in [vec![0x21, 2, 1], vec![0x22, 0, 1]] {
            let mut prot = ThriftSliceInputProtocol::new(&bytes);
            let list = read_thrift_vec::<bool>(&mut prot).unwrap();
            assert_eq!(list, vec![false, true]);
        }
    }

    #[test]
    fn test_field_header_delta_and_long_form() {
        let mut writer = ThriftCompactOutputProtocol::new(Vec::<u8>::new());
        let last = 5i32.write_thrift_field(&mut writer, 1, 0).unwrap();
        // a delta larger than 15 uses the long form
        let last = 7i64.write_thrift_field(&mut writer, 20, last).unwrap();
        true.write_thrift_field(&mut writer, 21, last).unwrap();
        writer.write_struct_end().unwrap();
        let buf = writer.into_inner();

        let mut prot = ThriftSliceInputProtocol::new(&buf);
        let f = prot.read_field_begin(0).unwrap();
        assert_eq!((f.field_type, f.id), (FieldType::I32, 1));
        assert_eq!(prot.read_i32().unwrap(), 5);
        let f = prot.read_field_begin(1).unwrap();
        assert_eq!((f.field_type, f.id), (FieldType::I64, 20));
        assert_eq!(prot.read_i64().unwrap(), 7);
        let f = prot.read_field_begin(20).unwrap();
        // boolean fields carry their value in the field header
        assert_eq!((f.field_type, f.id), (FieldType::BooleanTrue, 21));
        let f = prot.read_field_begin(21).unwrap();
        assert_eq!(f.field_type, FieldType::Stop);
    }

    #[test]
    fn test_skip_nested_struct() {
        // struct { 1: i32, 2: struct { 1: binary }, 3: list<i64> } followed by a marker byte
        let mut writer = ThriftCompactOutputProtocol::new(Vec::<u8>::new());
        let last = 42i32.write_thrift_field(&mut writer, 1, 0).unwrap();
        writer.write_field_begin(FieldType::Struct, 2, last).unwrap();
        "nested".write_thrift_field(&mut writer, 1, 0).unwrap();
        writer.write_struct_end().unwrap();
        vec![1i64, 2, 3].write_thrift_field(&mut writer, 3, 2).unwrap();
        writer.write_struct_end().unwrap();
        let mut buf = writer.into_inner();
        buf.push(0xAB);

        let mut prot = ThriftSliceInputProtocol::new(&buf);
        prot.skip(FieldType::Struct).unwrap();
        assert_eq!(prot.as_slice(), &[0xAB]);
    }

    #[test]
    fn test_truncated_input() {
        let buf = [0x18, 10, b'a'];
        let mut prot = ThriftSliceInputProtocol::new(&buf);
        let f = prot.read_field_begin(0).unwrap();
        assert_eq!(f.field_type, FieldType::Binary);
        let err = prot.read_bytes().unwrap_err();
        assert!(matches!(err, ParquetError::EOF(_)));
    }
}
