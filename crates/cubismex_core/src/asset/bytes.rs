use crate::asset::{AssetError, Result};

/// Simple bounded cursor over an immutable little-endian byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(AssetError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Advance by `n` bytes without inspecting them.
	pub fn skip(&mut self, n: usize) -> Result<()> {
		let _ = self.read_exact(n)?;
		Ok(())
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		let raw = self.read_exact(4)?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		Ok(i32::from_le_bytes(buf))
	}

	/// Read an `i32` length prefix followed by that many bytes.
	pub fn read_len_prefixed(&mut self) -> Result<&'a [u8]> {
		let at = self.pos;
		let len = self.read_i32_le()?;
		let len = usize::try_from(len).map_err(|_| AssetError::NegativeLength { len, at })?;
		self.read_exact(len)
	}

	/// Read a length-prefixed string body and realign to 4 bytes.
	pub fn read_aligned_bytes(&mut self) -> Result<&'a [u8]> {
		let out = self.read_len_prefixed()?;
		self.align4()?;
		Ok(out)
	}

	/// Advance to the next 4-byte aligned position.
	pub fn align4(&mut self) -> Result<()> {
		let aligned = (self.pos + 3) & !3;
		let skip = aligned.saturating_sub(self.pos);
		self.skip(skip)
	}
}
