use serde::{Deserialize, Serialize};

use crate::asset::{MotionEvent, Track};

/// Stable session-scoped identity of one decoded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
	/// Index of the source file inside the session.
	pub file: u32,
	/// Local object id within the source file.
	pub path_id: i64,
}

impl ObjectId {
	/// Build an identity from its parts.
	pub fn new(file: u32, path_id: i64) -> Self {
		Self { file, path_id }
	}
}

impl std::fmt::Display for ObjectId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.file, self.path_id)
	}
}

/// Possibly-dangling `(file, path_id)` reference handle stored inside records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WeakRef {
	/// Session file index the reference points into.
	pub file: u32,
	/// Local object id; `0` is the null reference.
	pub path_id: i64,
}

impl WeakRef {
	/// The null reference.
	pub const NULL: Self = Self { file: 0, path_id: 0 };

	/// Build a reference from its parts.
	pub fn new(file: u32, path_id: i64) -> Self {
		Self { file, path_id }
	}

	/// Return whether this reference is the null handle.
	pub fn is_null(self) -> bool {
		self.path_id == 0
	}

	/// Identity this reference names, or `None` for the null handle.
	///
	/// A returned identity may still be absent from the session table.
	pub fn target(self) -> Option<ObjectId> {
		if self.is_null() {
			return None;
		}
		Some(ObjectId::new(self.file, self.path_id))
	}
}

impl From<ObjectId> for WeakRef {
	fn from(id: ObjectId) -> Self {
		Self::new(id.file, id.path_id)
	}
}

/// One decoded record owned by the session.
#[derive(Debug, Clone)]
pub struct ObjectRecord {
	/// Session identity.
	pub id: ObjectId,
	/// Kind-specific decoded fields.
	pub kind: RecordKind,
}

impl ObjectRecord {
	/// Stable kind label.
	pub fn kind_name(&self) -> &'static str {
		self.kind.name()
	}

	/// Record name for kinds that carry one.
	pub fn name(&self) -> Option<&str> {
		match &self.kind {
			RecordKind::AssetBundle(item) => Some(&item.name),
			RecordKind::GameObject(item) => Some(&item.name),
			RecordKind::Mesh(item) => Some(&item.name),
			RecordKind::Texture2D(item) => Some(&item.name),
			RecordKind::MonoScript(item) => Some(&item.class_name),
			RecordKind::MonoBehaviour(item) => Some(&item.name),
			RecordKind::AnimationClip(item) => Some(&item.name),
			RecordKind::ResourceManager(_)
			| RecordKind::Transform(_)
			| RecordKind::MeshFilter(_)
			| RecordKind::SkinnedMeshRenderer(_)
			| RecordKind::Other => None,
		}
	}

	/// Borrow as a game object.
	pub fn as_game_object(&self) -> Option<&GameObject> {
		match &self.kind {
			RecordKind::GameObject(item) => Some(item),
			_ => None,
		}
	}

	/// Borrow as a transform.
	pub fn as_transform(&self) -> Option<&Transform> {
		match &self.kind {
			RecordKind::Transform(item) => Some(item),
			_ => None,
		}
	}

	/// Borrow as a script component.
	pub fn as_mono_behaviour(&self) -> Option<&MonoBehaviour> {
		match &self.kind {
			RecordKind::MonoBehaviour(item) => Some(item),
			_ => None,
		}
	}
}

/// Closed set of record kinds consumed by the core.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum RecordKind {
	/// Bundle container with a preload table.
	AssetBundle(AssetBundle),
	/// Resource-manager container with direct path entries.
	ResourceManager(ResourceManager),
	/// Hierarchy node record.
	GameObject(GameObject),
	/// Transform component linking a game object to its parent.
	#[serde(alias = "RectTransform")]
	Transform(Transform),
	/// Static mesh component.
	MeshFilter(MeshComponent),
	/// Skinned mesh component.
	SkinnedMeshRenderer(MeshComponent),
	/// Mesh asset.
	Mesh(NamedRecord),
	/// Texture with pre-encoded image bytes.
	Texture2D(Texture2D),
	/// Script class descriptor.
	MonoScript(MonoScript),
	/// Script component with a type-tree body.
	MonoBehaviour(MonoBehaviour),
	/// Animation clip with adapter-baked tracks.
	AnimationClip(AnimationClip),
	/// Any kind the core does not consume.
	#[serde(other)]
	Other,
}

impl RecordKind {
	/// Stable kind label.
	pub fn name(&self) -> &'static str {
		match self {
			Self::AssetBundle(_) => "AssetBundle",
			Self::ResourceManager(_) => "ResourceManager",
			Self::GameObject(_) => "GameObject",
			Self::Transform(_) => "Transform",
			Self::MeshFilter(_) => "MeshFilter",
			Self::SkinnedMeshRenderer(_) => "SkinnedMeshRenderer",
			Self::Mesh(_) => "Mesh",
			Self::Texture2D(_) => "Texture2D",
			Self::MonoScript(_) => "MonoScript",
			Self::MonoBehaviour(_) => "MonoBehaviour",
			Self::AnimationClip(_) => "AnimationClip",
			Self::Other => "Other",
		}
	}
}

/// Bundle-style container record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssetBundle {
	/// Bundle name.
	pub name: String,
	/// Flat preload table indexed by container entries.
	pub preload_table: Vec<WeakRef>,
	/// `(path, preload range)` container entries.
	pub container: Vec<BundleEntry>,
}

/// One bundle container entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BundleEntry {
	/// Logical container path.
	pub path: String,
	/// First preload-table index covered by this entry.
	pub preload_index: i32,
	/// Number of preload-table slots covered by this entry.
	pub preload_size: i32,
}

/// Resource-manager container record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResourceManager {
	/// Direct `(path, reference)` pairs.
	pub container: Vec<ResourceEntry>,
}

/// One resource-manager container entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResourceEntry {
	/// Logical container path.
	pub path: String,
	/// Referenced asset.
	pub asset: WeakRef,
}

/// Game object record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameObject {
	/// Game object name.
	pub name: String,
	/// Attached component references, transform included.
	pub components: Vec<WeakRef>,
}

/// Transform record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Transform {
	/// Owning game object.
	pub game_object: WeakRef,
	/// Parent transform, null at the top of a chain.
	pub father: WeakRef,
}

/// Mesh-bearing component record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MeshComponent {
	/// Owning game object.
	pub game_object: WeakRef,
	/// Referenced mesh asset.
	pub mesh: WeakRef,
}

/// Record that only carries a name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedRecord {
	/// Record name.
	pub name: String,
}

/// Texture record with pre-encoded image bytes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Texture2D {
	/// Texture name.
	pub name: String,
	/// PNG-encoded image bytes produced by the texture converter.
	pub png: Vec<u8>,
}

/// Script class descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MonoScript {
	/// Script class name.
	pub class_name: String,
}

/// Script component record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MonoBehaviour {
	/// Record name.
	pub name: String,
	/// Owning game object.
	pub game_object: WeakRef,
	/// Script class descriptor.
	pub script: WeakRef,
	/// Verbatim record bytes.
	pub raw: Vec<u8>,
	/// Type-tree decoded body; `None` when no schema matched.
	pub data: Option<serde_json::Value>,
}

/// Animation clip record carrying adapter-baked tracks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnimationClip {
	/// Clip name.
	pub name: String,
	/// Samples per second.
	pub sample_rate: f32,
	/// Clip length in seconds.
	pub duration: f32,
	/// Named keyframe tracks.
	pub tracks: Vec<Track>,
	/// Discrete event markers.
	pub events: Vec<MotionEvent>,
}
