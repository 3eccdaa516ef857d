//! List-level RLP helpers over `alloy-rlp`.
//!
//! Transaction layouts are fixed per type, so decoding never builds a
//! generic item tree. A [`ListDecoder`] walks one list at a time and the
//! caller names the type of every item it reads. Nesting in the input is
//! only followed where a layout expects a nested list, which bounds the
//! depth of any decode to the depth of the layout itself.

use alloy_rlp::{BufMut, Decodable, Encodable, Header};

pub use alloy_rlp::Error as RlpError;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Accumulates the payload of one RLP list.
#[derive(Debug, Clone, Default)]
pub struct ListEncoder {
    payload: Vec<u8>,
}

impl ListEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one item using its own RLP encoding.
    pub fn item<T: Encodable + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.encode(&mut self.payload);
        self
    }

    /// Appends a byte string.
    ///
    /// `Vec<u8>` encodes as a list of integers under `alloy-rlp`; byte
    /// payloads always go through here as slices.
    pub fn bytes(&mut self, value: &[u8]) -> &mut Self {
        value.encode(&mut self.payload);
        self
    }

    /// Appends an item that is already RLP-encoded.
    pub fn raw(&mut self, encoded: &[u8]) -> &mut Self {
        self.payload.put_slice(encoded);
        self
    }

    /// Closes the list: header followed by the accumulated payload.
    pub fn finish(&self) -> Vec<u8> {
        let header = Header {
            list: true,
            payload_length: self.payload.len(),
        };
        let mut out = Vec::with_capacity(header.length() + self.payload.len());
        header.encode(&mut out);
        out.put_slice(&self.payload);
        out
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Reads the items of one RLP list in order.
#[derive(Debug, Clone, Copy)]
pub struct ListDecoder<'a> {
    payload: &'a [u8],
}

impl<'a> ListDecoder<'a> {
    /// Opens the list at the start of `buf` and advances `buf` past it.
    pub fn open(buf: &mut &'a [u8]) -> Result<Self, RlpError> {
        let payload = Header::decode_bytes(buf, true)?;
        Ok(Self { payload })
    }

    /// Counts the items left in the list by skipping over their headers.
    /// Nested lists are stepped over, not entered.
    pub fn remaining(&self) -> Result<usize, RlpError> {
        let mut rest = self.payload;
        let mut count = 0;
        while !rest.is_empty() {
            let header = Header::decode(&mut rest)?;
            rest = rest
                .get(header.payload_length..)
                .ok_or(RlpError::InputTooShort)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Decodes the next item as `T`.
    pub fn next<T: Decodable>(&mut self) -> Result<T, RlpError> {
        T::decode(&mut self.payload)
    }

    /// The next item, which must be a byte string.
    pub fn next_bytes(&mut self) -> Result<&'a [u8], RlpError> {
        Header::decode_bytes(&mut self.payload, false)
    }

    /// The next item, which must be a list.
    pub fn next_list(&mut self) -> Result<ListDecoder<'a>, RlpError> {
        ListDecoder::open(&mut self.payload)
    }

    /// Fails if any item is left unread.
    pub fn finish(self) -> Result<(), RlpError> {
        if self.payload.is_empty() {
            Ok(())
        } else {
            Err(RlpError::UnexpectedLength)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
