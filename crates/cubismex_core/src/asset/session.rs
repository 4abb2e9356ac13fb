use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::asset::compression::decode_bytes;
use crate::asset::{Compression, ContainerIndex, MonoBehaviour, ObjectId, ObjectRecord, RecordKind, Result, WeakRef};

/// Decoded record stream produced by the external byte-layout decoder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionDump {
	/// Source files in load order.
	#[serde(default)]
	pub files: Vec<DumpFile>,
}

/// One source file inside a session dump.
#[derive(Debug, Clone, Deserialize)]
pub struct DumpFile {
	/// Source file name.
	pub name: String,
	/// Records in file order.
	#[serde(default)]
	pub objects: Vec<DumpObject>,
}

/// One record inside a dump file.
#[derive(Debug, Clone, Deserialize)]
pub struct DumpObject {
	/// Local object id.
	pub path_id: i64,
	/// Kind tag and kind-specific fields.
	#[serde(flatten)]
	pub kind: RecordKind,
}

/// Identity table keyed by `ObjectId`.
#[derive(Debug, Clone, Default)]
pub struct ObjectTable {
	records: Vec<ObjectRecord>,
	by_id: HashMap<ObjectId, usize>,
}

impl ObjectTable {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a record, keeping the first record for a duplicated identity.
	///
	/// Returns `false` when the identity was already present.
	pub fn insert(&mut self, record: ObjectRecord) -> bool {
		if self.by_id.contains_key(&record.id) {
			return false;
		}
		self.by_id.insert(record.id, self.records.len());
		self.records.push(record);
		true
	}

	/// Resolve a weak reference; dangling and null references yield `None`.
	pub fn resolve(&self, reference: WeakRef) -> Option<&ObjectRecord> {
		self.get(reference.target()?)
	}

	/// Look up a record by identity.
	pub fn get(&self, id: ObjectId) -> Option<&ObjectRecord> {
		let idx = self.by_id.get(&id)?;
		self.records.get(*idx)
	}

	/// All records in insertion order.
	pub fn records(&self) -> &[ObjectRecord] {
		&self.records
	}

	/// Return number of records.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Return whether the table is empty.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

/// One loaded source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
	/// Source file name.
	pub name: Arc<str>,
	/// Record identities in file order.
	pub objects: Vec<ObjectId>,
}

/// Load-phase accumulator; consumed by [`SessionBuilder::finish`].
#[derive(Debug, Default)]
pub struct SessionBuilder {
	files: Vec<SourceFile>,
	table: ObjectTable,
	compression: Option<Compression>,
}

impl SessionBuilder {
	/// Create an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register one source file and its records, returning the file index.
	pub fn add_file(&mut self, name: &str, objects: impl IntoIterator<Item = (i64, RecordKind)>) -> u32 {
		let file = u32::try_from(self.files.len()).unwrap_or(u32::MAX);
		let mut ids = Vec::new();

		for (path_id, kind) in objects {
			let id = ObjectId::new(file, path_id);
			if self.table.insert(ObjectRecord { id, kind }) {
				ids.push(id);
			} else {
				tracing::warn!(file = name, path_id, "duplicate object identity, keeping first record");
			}
		}

		tracing::info!(file = name, objects = ids.len(), "loaded source file");
		self.files.push(SourceFile {
			name: Arc::<str>::from(name),
			objects: ids,
		});
		file
	}

	/// Build the container index and freeze the session.
	pub fn finish(self) -> Session {
		let containers = ContainerIndex::build(&self.table);
		tracing::info!(files = self.files.len(), objects = self.table.len(), containers = containers.len(), "session loaded");

		Session {
			files: self.files,
			table: self.table,
			containers,
			compression: self.compression.unwrap_or(Compression::None),
		}
	}
}

/// Read-only session: identity table plus container index.
#[derive(Debug, Clone)]
pub struct Session {
	/// Source files in load order.
	pub files: Vec<SourceFile>,
	/// Compression of the dump this session was read from.
	pub compression: Compression,
	table: ObjectTable,
	containers: ContainerIndex,
}

impl Session {
	/// Open a session dump from disk (plain or zstd-compressed JSON).
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		let (compression, bytes) = decode_bytes(raw)?;
		let dump: SessionDump = serde_json::from_slice(&bytes)?;

		let mut builder = Self::builder_from_dump(dump);
		builder.compression = Some(compression);
		Ok(builder.finish())
	}

	/// Build a session from an in-memory dump.
	pub fn from_dump(dump: SessionDump) -> Self {
		Self::builder_from_dump(dump).finish()
	}

	fn builder_from_dump(dump: SessionDump) -> SessionBuilder {
		let mut builder = SessionBuilder::new();
		for file in dump.files {
			builder.add_file(&file.name, file.objects.into_iter().map(|item| (item.path_id, item.kind)));
		}
		builder
	}

	/// Resolve a weak reference against the identity table.
	pub fn resolve(&self, reference: WeakRef) -> Option<&ObjectRecord> {
		self.table.resolve(reference)
	}

	/// Look up a record by identity.
	pub fn get(&self, id: ObjectId) -> Option<&ObjectRecord> {
		self.table.get(id)
	}

	/// Borrow the identity table.
	pub fn table(&self) -> &ObjectTable {
		&self.table
	}

	/// Borrow the container index.
	pub fn containers(&self) -> &ContainerIndex {
		&self.containers
	}

	/// Resolve the script class name of a script component.
	pub fn script_class(&self, item: &MonoBehaviour) -> Option<&str> {
		match &self.resolve(item.script)?.kind {
			RecordKind::MonoScript(script) => Some(script.class_name.as_str()),
			_ => None,
		}
	}

	/// Name of a source file by index.
	pub fn file_name(&self, file: u32) -> Option<&str> {
		self.files.get(file as usize).map(|item| item.name.as_ref())
	}
}

#[cfg(test)]
mod tests {
	use super::{Session, SessionBuilder, SessionDump};
	use crate::asset::{GameObject, ObjectId, RecordKind, WeakRef};

	#[test]
	fn resolve_returns_inserted_record_and_none_otherwise() {
		let mut builder = SessionBuilder::new();
		builder.add_file(
			"level0",
			vec![(
				7,
				RecordKind::GameObject(GameObject {
					name: "Root".to_owned(),
					components: Vec::new(),
				}),
			)],
		);
		let session = builder.finish();

		let hit = session.resolve(WeakRef::new(0, 7)).expect("inserted ref resolves");
		assert_eq!(hit.id, ObjectId::new(0, 7));
		assert_eq!(hit.name(), Some("Root"));
		assert!(session.resolve(WeakRef::new(0, 8)).is_none());
		assert!(session.resolve(WeakRef::new(3, 7)).is_none());
		assert!(session.resolve(WeakRef::NULL).is_none());
	}

	#[test]
	fn duplicate_identity_keeps_first_record() {
		let mut builder = SessionBuilder::new();
		builder.add_file(
			"level0",
			vec![
				(1, RecordKind::GameObject(GameObject { name: "first".to_owned(), components: Vec::new() })),
				(1, RecordKind::GameObject(GameObject { name: "second".to_owned(), components: Vec::new() })),
			],
		);
		let session = builder.finish();

		assert_eq!(session.table().len(), 1);
		assert_eq!(session.files[0].objects.len(), 1);
		assert_eq!(session.get(ObjectId::new(0, 1)).and_then(|item| item.name()), Some("first"));
	}

	#[test]
	fn dump_json_decodes_known_and_unknown_kinds() {
		let dump: SessionDump = serde_json::from_str(
			r#"{"files":[{"name":"a.assets","objects":[
				{"path_id":1,"kind":"GameObject","name":"Go","components":[{"file":0,"path_id":2}]},
				{"path_id":2,"kind":"RectTransform","game_object":{"file":0,"path_id":1}},
				{"path_id":3,"kind":"AudioClip","name":"bgm"}
			]}]}"#,
		)
		.expect("dump parses");
		let session = Session::from_dump(dump);

		assert_eq!(session.get(ObjectId::new(0, 1)).map(|item| item.kind_name()), Some("GameObject"));
		assert_eq!(session.get(ObjectId::new(0, 2)).map(|item| item.kind_name()), Some("Transform"));
		assert_eq!(session.get(ObjectId::new(0, 3)).map(|item| item.kind_name()), Some("Other"));
	}
}
