//! Session dumps arrive either as a plain JSON document or as a single zstd
//! frame wrapping one. Anything else, such as a raw `UnityFS` bundle, is
//! rejected before parsing.

use std::io::Read;

use crate::asset::{AssetError, Result};

/// Ceiling on the inflated size of a compressed dump.
const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// Leading bytes of a zstd-wrapped session dump.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// How a session dump was stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// The dump is the JSON document itself.
	None,
	/// The JSON document sits inside one zstd frame.
	Zstd,
}

impl Compression {
	/// Label used by `cubismex info`.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Unwrap a dump read from disk into JSON text.
///
/// Input whose first non-blank byte is `{` is returned as is. A zstd frame is
/// inflated and must itself hold a JSON object.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	if looks_like_json(&raw) {
		return Ok((Compression::None, raw));
	}

	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw)?;
		return Ok((Compression::Zstd, out));
	}

	Err(AssetError::UnknownMagic { magic: first4(&raw) })
}

fn looks_like_json(bytes: &[u8]) -> bool {
	bytes.iter().find(|byte| !byte.is_ascii_whitespace()).is_some_and(|byte| *byte == b'{')
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(AssetError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	if !looks_like_json(&out) {
		return Err(AssetError::NotDumpAfterDecompress);
	}

	Ok(out)
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut magic = [0_u8; 4];
	let take = bytes.len().min(4);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}
