use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Errors produced while loading sessions, resolving references, and exporting models.
#[derive(Debug, Error)]
pub enum AssetError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Session dump JSON could not be parsed.
	#[error("session dump: {0}")]
	Json(#[from] serde_json::Error),
	/// Unknown leading stream magic.
	#[error("unsupported compression or not a session dump (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompressed stream did not look like a JSON document.
	#[error("decompressed data is not a JSON session dump")]
	NotDumpAfterDecompress,
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Length prefix inside a raw record was negative.
	#[error("negative length prefix {len} at offset {at}")]
	NegativeLength {
		/// Parsed signed length.
		len: i32,
		/// Byte offset of the length prefix.
		at: usize,
	},
	/// Object identity was not present in the session table.
	#[error("object not found: file={file}, path_id={path_id}")]
	ObjectNotFound {
		/// Source file index.
		file: u32,
		/// Local object id.
		path_id: i64,
	},
	/// Transform parent chain revisited an object.
	#[error("transform parent cycle detected at file={file}, path_id={path_id}")]
	ParentCycle {
		/// Source file index of the revisited game object.
		file: u32,
		/// Local id of the revisited game object.
		path_id: i64,
	},
	/// Type-tree body of a script record could not be matched to its schema.
	#[error("{class} record \"{name}\" is not readable")]
	UnreadableRecord {
		/// Script class name.
		class: &'static str,
		/// Record name.
		name: String,
	},
	/// No `CubismMoc` records were present in the session.
	#[error("Live2D Cubism models were not found")]
	NoModelRoots,
	/// Model roots exist but none has a container path.
	#[error("no model-identifying containers found")]
	NoModelContainers,
	/// Export was cancelled between units of work.
	#[error("export cancelled")]
	Cancelled,
}
