//! SVL binary container: a flat run of tagged, big-endian arrays.
//!
//! Each array is one tag byte, a `u32` element count and the payload. Int
//! arrays hold `i32` values, float arrays IEEE-754 doubles, token arrays a
//! `u32` byte length followed by the raw bytes of every token.

use std::fs;
use std::path::Path;
use thiserror::Error;

pub const SVL_TAG_INT: u8 = 2;
pub const SVL_TAG_FLOAT: u8 = 3;
pub const SVL_TAG_TOKEN: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SvlError {
    #[error("{what} of {len} does not fit a 32-bit SVL length")]
    LengthOverflow { what: &'static str, len: usize },
    #[error("SVL data ended at byte {offset} while reading {what}")]
    UnexpectedEnd { offset: usize, what: &'static str },
    #[error("unknown SVL tag {tag} at byte {offset}")]
    UnknownTag { offset: usize, tag: u8 },
    #[error("SVL token at byte {offset} is not valid UTF-8")]
    InvalidToken { offset: usize },
}

pub type SvlResult<T> = Result<T, SvlError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SvlArray {
    Int(Vec<i32>),
    Float(Vec<f64>),
    Token(Vec<String>),
}

impl SvlArray {
    pub const fn tag(&self) -> u8 {
        match self {
            Self::Int(_) => SVL_TAG_INT,
            Self::Float(_) => SVL_TAG_FLOAT,
            Self::Token(_) => SVL_TAG_TOKEN,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int(values) => values.len(),
            Self::Float(values) => values.len(),
            Self::Token(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct SvlEncoder {
    buffer: Vec<u8>,
}

impl SvlEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_int(&mut self, values: &[i32]) -> SvlResult<()> {
        self.buffer.push(SVL_TAG_INT);
        push_u32(&mut self.buffer, length_u32("int array length", values.len())?);
        for value in values {
            push_i32(&mut self.buffer, *value);
        }
        Ok(())
    }

    /// Length-1 int array, used for the leading scalar counts.
    pub fn write_int_scalar(&mut self, what: &'static str, value: usize) -> SvlResult<()> {
        let value =
            i32::try_from(value).map_err(|_| SvlError::LengthOverflow { what, len: value })?;
        self.write_int(&[value])
    }

    pub fn write_float(&mut self, values: &[f64]) -> SvlResult<()> {
        self.buffer.push(SVL_TAG_FLOAT);
        push_u32(&mut self.buffer, length_u32("float array length", values.len())?);
        for value in values {
            push_f64(&mut self.buffer, *value);
        }
        Ok(())
    }

    pub fn write_token<S: AsRef<str>>(&mut self, tokens: &[S]) -> SvlResult<()> {
        self.buffer.push(SVL_TAG_TOKEN);
        push_u32(&mut self.buffer, length_u32("token array length", tokens.len())?);
        for token in tokens {
            let bytes = token.as_ref().as_bytes();
            push_u32(&mut self.buffer, length_u32("token byte length", bytes.len())?);
            self.buffer.extend_from_slice(bytes);
        }
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

fn length_u32(what: &'static str, len: usize) -> SvlResult<u32> {
    u32::try_from(len).map_err(|_| SvlError::LengthOverflow { what, len })
}

fn push_u32(bytes: &mut Vec<u8>, value: u32) {
    bytes.extend_from_slice(&value.to_be_bytes());
}

fn push_i32(bytes: &mut Vec<u8>, value: i32) {
    bytes.extend_from_slice(&value.to_be_bytes());
}

fn push_f64(bytes: &mut Vec<u8>, value: f64) {
    bytes.extend_from_slice(&value.to_be_bytes());
}

/// Reads a complete SVL container back into typed arrays.
pub fn decode_svl(bytes: &[u8]) -> SvlResult<Vec<SvlArray>> {
    let mut arrays = Vec::new();
    let mut offset = 0usize;
    while offset < bytes.len() {
        let tag_offset = offset;
        let tag = bytes[offset];
        offset += 1;
        let count = take_u32(bytes, &mut offset).ok_or(SvlError::UnexpectedEnd {
            offset,
            what: "array length",
        })? as usize;

        let array = match tag {
            SVL_TAG_INT => {
                let mut values = Vec::with_capacity(count.min(bytes.len() / 4));
                for _ in 0..count {
                    values.push(take_i32(bytes, &mut offset).ok_or(SvlError::UnexpectedEnd {
                        offset,
                        what: "int value",
                    })?);
                }
                SvlArray::Int(values)
            }
            SVL_TAG_FLOAT => {
                let mut values = Vec::with_capacity(count.min(bytes.len() / 8));
                for _ in 0..count {
                    values.push(take_f64(bytes, &mut offset).ok_or(SvlError::UnexpectedEnd {
                        offset,
                        what: "float value",
                    })?);
                }
                SvlArray::Float(values)
            }
            SVL_TAG_TOKEN => {
                let mut values = Vec::with_capacity(count.min(bytes.len() / 4));
                for _ in 0..count {
                    let token_offset = offset;
                    let len = take_u32(bytes, &mut offset).ok_or(SvlError::UnexpectedEnd {
                        offset,
                        what: "token length",
                    })? as usize;
                    let raw = take_bytes(bytes, &mut offset, len).ok_or(SvlError::UnexpectedEnd {
                        offset,
                        what: "token bytes",
                    })?;
                    let token = std::str::from_utf8(raw)
                        .map_err(|_| SvlError::InvalidToken {
                            offset: token_offset,
                        })?
                        .to_string();
                    values.push(token);
                }
                SvlArray::Token(values)
            }
            _ => {
                return Err(SvlError::UnknownTag {
                    offset: tag_offset,
                    tag,
                });
            }
        };
        arrays.push(array);
    }
    Ok(arrays)
}

fn take_bytes<'a>(bytes: &'a [u8], offset: &mut usize, len: usize) -> Option<&'a [u8]> {
    let end = offset.checked_add(len)?;
    let slice = bytes.get(*offset..end)?;
    *offset = end;
    Some(slice)
}

fn take_u32(bytes: &[u8], offset: &mut usize) -> Option<u32> {
    let raw: [u8; 4] = take_bytes(bytes, offset, 4)?.try_into().ok()?;
    Some(u32::from_be_bytes(raw))
}

fn take_i32(bytes: &[u8], offset: &mut usize) -> Option<i32> {
    let raw: [u8; 4] = take_bytes(bytes, offset, 4)?.try_into().ok()?;
    Some(i32::from_be_bytes(raw))
}

fn take_f64(bytes: &[u8], offset: &mut usize) -> Option<f64> {
    let raw: [u8; 8] = take_bytes(bytes, offset, 8)?.try_into().ok()?;
    Some(f64::from_be_bytes(raw))
}

pub fn write_binary_artifact(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(path, bytes)
}
