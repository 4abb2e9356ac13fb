mod animation;
mod bytes;
mod cluster;
mod compression;
mod container;
mod error;
mod export;
mod hierarchy;
mod live2d;
mod motion;
mod physics;
mod record;
mod session;
#[cfg(test)]
mod test_support;

/// Animation adapter seam and its baked-clip implementation.
pub use animation::{AnimationAdapter, BakedClipAdapter, KeyframedAnimation, MotionEvent, Track};
/// Bounded byte cursor used for raw record payloads.
pub use bytes::Cursor;
/// Model clustering types and entry points.
pub use cluster::{ClusterMode, ClusterPlan, ModelCluster, base_path, cluster_models, find_model_roots, matches_key};
/// Session dump compression detection.
pub use compression::Compression;
/// Container path index and per-record expansion.
pub use container::{ContainerEntries, ContainerIndex, SkippedRange, container_entries};
/// Error and result aliases.
pub use error::{AssetError, Result};
/// Per-model export pipeline and sinks.
pub use export::{ExportOptions, ExportSink, ExportSummary, ExportedModel, FailedModel, MemorySink, ModelExport, MotionMode, export_model, export_models};
/// Game-object forest and parent-chain helpers.
pub use hierarchy::{FileRoot, Hierarchy, HierarchyNode, NodeId, RejectedBranch, parent_game_object, top_ancestor, transform_of};
/// Live2D roles, moc extraction and output schemas.
pub use live2d::{
	AnimationCurve, BlendMode, CubismRole, Expression3Json, Expression3Parameter, ExpressionData, ExpressionParameter, ExpressionRef, FadeMotionData,
	FileReferences, Group, Model3Json, Motion3Curve, Motion3Json, Motion3Meta, Motion3UserData, MotionFileRef, ParameterBindings, build_groups, extract_moc,
	read_script_data,
};
/// Motion curve reconstruction.
pub use motion::{CurveReconstruction, Keyframe, Segment, classify_pair, reconstruct_curve};
/// Physics rig input and physics3 output schemas.
pub use physics::{
	EffectiveForces, NormalizationRange, ParameterTarget, Physics3Json, Physics3Meta, PhysicsController, PhysicsDictionaryEntry, PhysicsInput,
	PhysicsNormalization, PhysicsOutput, PhysicsRig, PhysicsSetting, PhysicsVertex, RigInput, RigNormalization, RigOutput, RigParticle, RigVector,
	SourceComponent, SubRig, Vector2,
};
/// Decoded record types and reference handles.
pub use record::{
	AnimationClip, AssetBundle, BundleEntry, GameObject, MeshComponent, MonoBehaviour, MonoScript, NamedRecord, ObjectId, ObjectRecord, RecordKind,
	ResourceEntry, ResourceManager, Texture2D, Transform, WeakRef,
};
/// Session loading and identity table.
pub use session::{DumpFile, DumpObject, ObjectTable, Session, SessionBuilder, SessionDump, SourceFile};
