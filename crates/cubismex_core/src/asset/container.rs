use std::collections::HashMap;
use std::sync::Arc;

use crate::asset::{ObjectId, ObjectRecord, ObjectTable, RecordKind};

/// Object identity to logical container path map.
///
/// Entries keep their first-insertion position; a later assignment to the same
/// identity replaces the path in place.
#[derive(Debug, Clone, Default)]
pub struct ContainerIndex {
	entries: Vec<(ObjectId, Arc<str>)>,
	by_object: HashMap<ObjectId, usize>,
}

/// Pairs contributed by one container record.
#[derive(Debug, Clone, Default)]
pub struct ContainerEntries {
	/// Resolved `(object, path)` assignments in table order.
	pub pairs: Vec<(ObjectId, Arc<str>)>,
	/// Bundle entries whose preload range did not fit the table.
	pub skipped: Vec<SkippedRange>,
}

/// One bundle entry dropped for an out-of-range preload span.
#[derive(Debug, Clone)]
pub struct SkippedRange {
	/// Bundle record that declared the entry.
	pub owner: ObjectId,
	/// Container path of the entry.
	pub path: Arc<str>,
	/// Declared first preload index.
	pub preload_index: i32,
	/// Declared preload span length.
	pub preload_size: i32,
	/// Actual preload table length.
	pub table_len: usize,
}

/// Expand one container record into `(object, path)` pairs.
///
/// Non-container records contribute nothing. Dangling references are dropped
/// silently; out-of-range bundle spans are reported in `skipped`.
pub fn container_entries(table: &ObjectTable, record: &ObjectRecord) -> ContainerEntries {
	let mut out = ContainerEntries::default();

	match &record.kind {
		RecordKind::AssetBundle(bundle) => {
			for entry in &bundle.container {
				let path = Arc::<str>::from(entry.path.as_str());
				let Some(span) = preload_span(entry.preload_index, entry.preload_size, bundle.preload_table.len()) else {
					out.skipped.push(SkippedRange {
						owner: record.id,
						path,
						preload_index: entry.preload_index,
						preload_size: entry.preload_size,
						table_len: bundle.preload_table.len(),
					});
					continue;
				};

				for reference in &bundle.preload_table[span] {
					if let Some(target) = table.resolve(*reference) {
						out.pairs.push((target.id, path.clone()));
					}
				}
			}
		}
		RecordKind::ResourceManager(manager) => {
			for entry in &manager.container {
				if let Some(target) = table.resolve(entry.asset) {
					out.pairs.push((target.id, Arc::<str>::from(entry.path.as_str())));
				}
			}
		}
		RecordKind::GameObject(_)
		| RecordKind::Transform(_)
		| RecordKind::MeshFilter(_)
		| RecordKind::SkinnedMeshRenderer(_)
		| RecordKind::Mesh(_)
		| RecordKind::Texture2D(_)
		| RecordKind::MonoScript(_)
		| RecordKind::MonoBehaviour(_)
		| RecordKind::AnimationClip(_)
		| RecordKind::Other => {}
	}

	out
}

fn preload_span(index: i32, size: i32, table_len: usize) -> Option<std::ops::Range<usize>> {
	let start = usize::try_from(index).ok()?;
	let size = usize::try_from(size).ok()?;
	let end = start.checked_add(size)?;
	if end > table_len {
		return None;
	}
	Some(start..end)
}

impl ContainerIndex {
	/// Create an empty index.
	pub fn new() -> Self {
		Self::default()
	}

	/// Index every container record of a table in insertion order.
	pub fn build(table: &ObjectTable) -> Self {
		let mut index = Self::new();
		for record in table.records() {
			index.index_record(table, record);
		}
		index
	}

	/// Apply one container record, returning the number of assignments made.
	pub fn index_record(&mut self, table: &ObjectTable, record: &ObjectRecord) -> usize {
		let entries = container_entries(table, record);

		for skipped in &entries.skipped {
			tracing::warn!(
				bundle = %skipped.owner,
				path = %skipped.path,
				preload_index = skipped.preload_index,
				preload_size = skipped.preload_size,
				table_len = skipped.table_len,
				"preload range out of bounds, skipping container entry"
			);
		}

		let count = entries.pairs.len();
		for (id, path) in entries.pairs {
			self.insert(id, path);
		}
		count
	}

	/// Assign a path to an identity, returning the replaced path if any.
	pub fn insert(&mut self, id: ObjectId, path: Arc<str>) -> Option<Arc<str>> {
		if let Some(idx) = self.by_object.get(&id) {
			return Some(std::mem::replace(&mut self.entries[*idx].1, path));
		}

		self.by_object.insert(id, self.entries.len());
		self.entries.push((id, path));
		None
	}

	/// Container path assigned to an identity.
	pub fn path_of(&self, id: ObjectId) -> Option<&str> {
		let idx = self.by_object.get(&id)?;
		self.entries.get(*idx).map(|(_, path)| path.as_ref())
	}

	/// Iterate `(object, path)` pairs in first-insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &str)> + '_ {
		self.entries.iter().map(|(id, path)| (*id, path.as_ref()))
	}

	/// Return number of indexed objects.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Return whether no object has a container path.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
