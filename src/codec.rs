//! Big-endian primitives for the JDWP wire form.
//!
//! [`JdwpWriter`] grows an owned buffer and [`JdwpReader`] consumes the
//! front of a borrowed slice; both carry the connection's [`IdSizes`] so
//! the variable-width identifier codecs can look their widths up without
//! threading the table through every call site.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use crate::{error::Error, sizes::IdSizes, types::IdKind, Result};

#[derive(Debug)]
pub struct JdwpWriter {
    buf: Vec<u8>,
    sizes: IdSizes,
}

impl JdwpWriter {
    pub fn new(sizes: IdSizes) -> Self {
        JdwpWriter {
            buf: Vec::with_capacity(64),
            sizes,
        }
    }

    pub fn sizes(&self) -> &IdSizes {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.buf.write_u8(v)?;
        Ok(())
    }

    pub fn write_i8(&mut self, v: i8) -> Result<()> {
        self.buf.write_i8(v)?;
        Ok(())
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        self.buf.write_u16::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_i16(&mut self, v: i16) -> Result<()> {
        self.buf.write_i16::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_u32(&mut self, v: u32) -> Result<()> {
        self.buf.write_u32::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        self.buf.write_i32::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_u64(&mut self, v: u64) -> Result<()> {
        self.buf.write_u64::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_i64(&mut self, v: i64) -> Result<()> {
        self.buf.write_i64::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_f32(&mut self, v: f32) -> Result<()> {
        self.buf.write_f32::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_f64(&mut self, v: f64) -> Result<()> {
        self.buf.write_f64::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_bool(&mut self, v: bool) -> Result<()> {
        self.write_u8(u8::from(v))
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Writes the low `width_of(kind)` bytes of `value`, big-endian.
    ///
    /// Fails with [`Error::SizesUnknown`] before the table is populated
    /// and [`Error::IdTooWide`] when the value does not fit the width.
    pub fn write_id(&mut self, kind: IdKind, value: u64) -> Result<()> {
        let width = self.sizes.width_of(kind)?;
        if width < 8 && value >> (u32::from(width) * 8) != 0 {
            return Err(Error::IdTooWide { value, width });
        }
        self.buf.write_uint::<BigEndian>(value, width as usize)?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct JdwpReader<'a> {
    buf: &'a [u8],
    pos: usize,
    sizes: IdSizes,
}

impl<'a> JdwpReader<'a> {
    pub fn new(buf: &'a [u8], sizes: IdSizes) -> Self {
        JdwpReader { buf, pos: 0, sizes }
    }

    pub fn sizes(&self) -> &IdSizes {
        &self.sizes
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::Truncated)?;
        let buf = self.buf;
        match buf.get(self.pos..end) {
            Some(slice) => {
                self.pos = end;
                Ok(slice)
            }
            None => Err(Error::Truncated),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(BigEndian::read_u64(self.take(8)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(self.take(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(self.take(8)?))
    }

    /// Any non-zero byte reads as true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Reads `width_of(kind)` bytes and zero-extends to a u64.
    pub fn read_id(&mut self, kind: IdKind) -> Result<u64> {
        let width = self.sizes.width_of(kind)?;
        Ok(BigEndian::read_uint(
            self.take(width as usize)?,
            width as usize,
        ))
    }
}
