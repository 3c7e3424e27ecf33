//! Borsh-compatible primitives used by the program's accounts and instructions.
//!
//! Integers are little-endian, `bool` is one byte, strings are a `u32` length
//! followed by UTF-8 bytes, options are a one-byte tag followed by the value.

use bytes::{Buf, BufMut};

use super::layout::LayoutError;
use crate::ids::Address;

pub(crate) fn put_string(out: &mut Vec<u8>, value: &str) {
    out.put_u32_le(value.len() as u32);
    out.put_slice(value.as_bytes());
}

pub(crate) fn put_option_string(out: &mut Vec<u8>, value: Option<&str>) {
    match value {
        Some(value) => {
            out.put_u8(1);
            put_string(out, value);
        }
        None => out.put_u8(0),
    }
}

pub(crate) fn put_bool(out: &mut Vec<u8>, value: bool) {
    out.put_u8(u8::from(value));
}

pub(crate) fn put_address(out: &mut Vec<u8>, value: &Address) {
    out.put_slice(value.as_bytes());
}

/// Cursor over account data; every read names the field it decodes.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn need(&self, len: usize, field: &'static str) -> Result<(), LayoutError> {
        if self.buf.remaining() < len {
            return Err(LayoutError::UnexpectedEnd {
                field,
                needed: len,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    pub(crate) fn bytes(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], LayoutError> {
        self.need(len, field)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    pub(crate) fn u8(&mut self, field: &'static str) -> Result<u8, LayoutError> {
        self.need(1, field)?;
        Ok(self.buf.get_u8())
    }

    pub(crate) fn u32(&mut self, field: &'static str) -> Result<u32, LayoutError> {
        self.need(4, field)?;
        Ok(self.buf.get_u32_le())
    }

    pub(crate) fn u64(&mut self, field: &'static str) -> Result<u64, LayoutError> {
        self.need(8, field)?;
        Ok(self.buf.get_u64_le())
    }

    pub(crate) fn i64(&mut self, field: &'static str) -> Result<i64, LayoutError> {
        self.need(8, field)?;
        Ok(self.buf.get_i64_le())
    }

    pub(crate) fn bool(&mut self, field: &'static str) -> Result<bool, LayoutError> {
        match self.u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(LayoutError::InvalidBool { field, value: other }),
        }
    }

    pub(crate) fn address(&mut self, field: &'static str) -> Result<Address, LayoutError> {
        let bytes = self.bytes(32, field)?;
        // Length checked by `bytes`.
        Address::from_slice(bytes).map_err(|_| LayoutError::UnexpectedEnd {
            field,
            needed: 32,
            remaining: bytes.len(),
        })
    }

    pub(crate) fn string(&mut self, field: &'static str) -> Result<String, LayoutError> {
        let len = self.u32(field)? as usize;
        let bytes = self.bytes(len, field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| LayoutError::InvalidUtf8 { field })
    }

    pub(crate) fn option_string(&mut self, field: &'static str) -> Result<Option<String>, LayoutError> {
        match self.u8(field)? {
            0 => Ok(None),
            1 => self.string(field).map(Some),
            other => Err(LayoutError::InvalidOptionTag { field, value: other }),
        }
    }
}
