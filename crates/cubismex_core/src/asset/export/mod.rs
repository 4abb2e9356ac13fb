use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::asset::{
	AnimationAdapter, AssetError, ClusterMode, CubismRole, Expression3Json, ExpressionData, ExpressionRef, FadeMotionData, FileReferences, Model3Json,
	ModelCluster, Motion3Json, MotionFileRef, MonoBehaviour, ObjectId, ParameterBindings, Physics3Json, PhysicsController, RecordKind, Result, Session,
	build_groups, cluster_models, extract_moc, find_model_roots, read_script_data, top_ancestor,
};

/// Where motions are taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MotionMode {
	/// Prefer precomputed fade-motion records, falling back to clips when none exist.
	#[default]
	MonoBehaviour,
	/// Always bake motions from animation clips.
	AnimationClip,
}

/// Knobs for one export run.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
	/// Motion source.
	pub motion_mode: MotionMode,
	/// Emit bezier segments where linear ones would do.
	pub force_bezier: bool,
	/// Cooperative cancellation flag checked between models and motion channels.
	pub cancel: Option<Arc<AtomicBool>>,
}

impl ExportOptions {
	fn check_cancelled(&self) -> Result<()> {
		match &self.cancel {
			Some(flag) if flag.load(Ordering::Relaxed) => Err(AssetError::Cancelled),
			_ => Ok(()),
		}
	}
}

/// One model, fully materialized in memory.
#[derive(Debug, Clone)]
pub struct ModelExport {
	/// Model name.
	pub name: String,
	/// Output directory relative to the export base.
	pub dest_dir: String,
	/// Raw moc payload.
	pub moc: Vec<u8>,
	/// Texture name to PNG bytes.
	pub textures: BTreeMap<String, Vec<u8>>,
	/// Motion name to motion document.
	pub motions: BTreeMap<String, Motion3Json>,
	/// Expression name and document, in record order.
	pub expressions: Vec<(String, Expression3Json)>,
	/// Physics document, when the model has a readable rig.
	pub physics: Option<Physics3Json>,
	/// Manifest.
	pub model3: Model3Json,
}

impl ModelExport {
	/// Files of this model as `(path relative to dest_dir, bytes)`.
	pub fn files(&self) -> Result<Vec<(String, Vec<u8>)>> {
		let mut out = vec![(format!("{}.moc3", self.name), self.moc.clone())];

		for (name, png) in &self.textures {
			out.push((texture_path(name), png.clone()));
		}
		for (name, motion) in &self.motions {
			out.push((motion_path(name), serde_json::to_vec_pretty(motion)?));
		}
		for (name, expression) in &self.expressions {
			out.push((expression_path(name), serde_json::to_vec_pretty(expression)?));
		}
		if let Some(physics) = &self.physics {
			out.push((physics_path(&self.name), serde_json::to_vec_pretty(physics)?));
		}
		out.push((format!("{}.model3.json", self.name), serde_json::to_vec_pretty(&self.model3)?));

		Ok(out)
	}
}

fn texture_path(name: &str) -> String {
	format!("textures/{name}.png")
}

fn motion_path(name: &str) -> String {
	format!("motions/{name}.motion3.json")
}

fn expression_path(name: &str) -> String {
	format!("expressions/{name}.exp3.json")
}

fn physics_path(model: &str) -> String {
	format!("{model}.physics3.json")
}

/// Destination for exported files.
pub trait ExportSink {
	/// Write one file at a path relative to the export base.
	fn write_file(&mut self, path: &str, bytes: &[u8]) -> Result<()>;
}

/// Sink that keeps every file in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
	/// Written files keyed by path.
	pub files: BTreeMap<String, Vec<u8>>,
}

impl ExportSink for MemorySink {
	fn write_file(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
		self.files.insert(path.to_owned(), bytes.to_vec());
		Ok(())
	}
}

/// Model written by an export run.
#[derive(Debug, Clone)]
pub struct ExportedModel {
	/// Model name.
	pub name: String,
	/// Output directory.
	pub dest_dir: String,
	/// Number of files handed to the sink.
	pub files: usize,
}

/// Model whose export failed.
#[derive(Debug, Clone)]
pub struct FailedModel {
	/// Cluster key identifying the model.
	pub key: String,
	/// Rendered error.
	pub error: String,
}

/// Outcome of [`export_models`].
#[derive(Debug, Clone)]
pub struct ExportSummary {
	/// Cluster key mode in effect.
	pub mode: ClusterMode,
	/// Successfully written models.
	pub exported: Vec<ExportedModel>,
	/// Models that failed, with their errors.
	pub failed: Vec<FailedModel>,
	/// Whether the run stopped early on the cancellation flag.
	pub cancelled: bool,
	/// Container-indexed objects no model claimed.
	pub unassigned: usize,
}

/// Cluster the session and export every model to `sink`.
///
/// Failures inside one model are logged and recorded; only the terminal
/// clustering conditions are returned as errors.
pub fn export_models(session: &Session, options: &ExportOptions, adapter: &impl AnimationAdapter, sink: &mut impl ExportSink) -> Result<ExportSummary> {
	let roots = find_model_roots(session);
	let plan = cluster_models(session, &roots)?;
	tracing::info!(models = plan.clusters.len(), mode = plan.mode.as_str(), "clustered models");

	let mut summary = ExportSummary {
		mode: plan.mode,
		exported: Vec::new(),
		failed: Vec::new(),
		cancelled: false,
		unassigned: plan.unassigned,
	};

	for cluster in &plan.clusters {
		if options.check_cancelled().is_err() {
			summary.cancelled = true;
			break;
		}

		let outcome = export_model(session, cluster, options, adapter).and_then(|model| write_model(&model, sink));
		match outcome {
			Ok(files) => {
				tracing::info!(model = %cluster.model_name, dir = %cluster.dest_dir, files, "exported model");
				summary.exported.push(ExportedModel {
					name: cluster.model_name.clone(),
					dest_dir: cluster.dest_dir.clone(),
					files,
				});
			}
			Err(AssetError::Cancelled) => {
				summary.cancelled = true;
				break;
			}
			Err(err) => {
				tracing::error!(model = %cluster.key, error = %err, "model export failed");
				summary.failed.push(FailedModel {
					key: cluster.key.to_string(),
					error: err.to_string(),
				});
			}
		}
	}

	Ok(summary)
}

fn write_model(model: &ModelExport, sink: &mut impl ExportSink) -> Result<usize> {
	let files = model.files()?;
	for (path, bytes) in &files {
		sink.write_file(&join_dest(&model.dest_dir, path), bytes)?;
	}
	Ok(files.len())
}

fn join_dest(dest_dir: &str, path: &str) -> String {
	if dest_dir.is_empty() { path.to_owned() } else { format!("{dest_dir}/{path}") }
}

#[derive(Default)]
struct Members<'a> {
	moc: Option<&'a MonoBehaviour>,
	physics: Option<&'a MonoBehaviour>,
	expressions: Vec<&'a MonoBehaviour>,
	fade_motions: Vec<(ObjectId, &'a MonoBehaviour)>,
	eye_blink: BTreeSet<String>,
	lip_sync: BTreeSet<String>,
	textures: BTreeMap<String, Vec<u8>>,
	game_objects: Vec<ObjectId>,
	clips: Vec<ObjectId>,
}

impl<'a> Members<'a> {
	fn sort(session: &'a Session, cluster: &ModelCluster) -> Self {
		let mut out = Self::default();

		for id in &cluster.members {
			let Some(record) = session.get(*id) else {
				continue;
			};
			match &record.kind {
				RecordKind::MonoBehaviour(item) => out.add_script(session, *id, item),
				RecordKind::Texture2D(texture) => {
					out.textures.insert(texture.name.clone(), texture.png.clone());
				}
				RecordKind::GameObject(_) => out.game_objects.push(*id),
				RecordKind::AnimationClip(_) => out.clips.push(*id),
				RecordKind::AssetBundle(_)
				| RecordKind::ResourceManager(_)
				| RecordKind::Transform(_)
				| RecordKind::MeshFilter(_)
				| RecordKind::SkinnedMeshRenderer(_)
				| RecordKind::Mesh(_)
				| RecordKind::MonoScript(_)
				| RecordKind::Other => {}
			}
		}

		out
	}

	fn add_script(&mut self, session: &Session, id: ObjectId, item: &'a MonoBehaviour) {
		let Some(role) = session.script_class(item).and_then(CubismRole::from_class_name) else {
			return;
		};
		let owner_name = || session.resolve(item.game_object).and_then(|owner| owner.name()).map(str::to_owned);

		match role {
			CubismRole::Moc => {
				self.moc.get_or_insert(item);
			}
			CubismRole::PhysicsController => {
				self.physics.get_or_insert(item);
			}
			CubismRole::ExpressionData => self.expressions.push(item),
			CubismRole::FadeMotionData => self.fade_motions.push((id, item)),
			CubismRole::EyeBlinkParameter => self.eye_blink.extend(owner_name()),
			CubismRole::MouthParameter => self.lip_sync.extend(owner_name()),
		}
	}
}

/// Build the in-memory export of one cluster.
pub fn export_model(session: &Session, cluster: &ModelCluster, options: &ExportOptions, adapter: &impl AnimationAdapter) -> Result<ModelExport> {
	let members = Members::sort(session, cluster);
	let name = cluster.model_name.clone();

	let Some(moc_record) = members.moc else {
		return Err(AssetError::ObjectNotFound {
			file: cluster.root.file,
			path_id: cluster.root.path_id,
		});
	};
	let moc = extract_moc(&moc_record.raw)?;

	if members.textures.is_empty() {
		tracing::warn!(model = %name, "no textures found");
	}

	let physics = members.physics.and_then(|item| match read_script_data::<PhysicsController>(item, CubismRole::PhysicsController) {
		Ok(controller) => Some(Physics3Json::from_rig(&controller.rig)),
		Err(err) => {
			tracing::warn!(model = %name, error = %err, "physics rig skipped");
			None
		}
	});

	let motions = collect_motions(session, &members, options, adapter, &name)?;
	let expressions = collect_expressions(&members);

	let game_object_names: Vec<String> = members
		.game_objects
		.iter()
		.filter_map(|id| session.get(*id).and_then(|item| item.name()))
		.map(str::to_owned)
		.collect();
	let groups = build_groups(members.eye_blink.clone(), members.lip_sync.clone(), &game_object_names);

	let model3 = Model3Json {
		version: 3,
		name: name.clone(),
		file_references: FileReferences {
			moc: format!("{name}.moc3"),
			textures: members.textures.keys().map(|item| texture_path(item)).collect(),
			physics: physics.as_ref().map(|_| physics_path(&name)),
			motions: motions.keys().map(|item| (item.clone(), vec![MotionFileRef { file: motion_path(item) }])).collect(),
			expressions: expressions
				.iter()
				.map(|(item, _)| ExpressionRef {
					name: item.clone(),
					file: expression_path(item),
				})
				.collect(),
		},
		groups,
	};

	Ok(ModelExport {
		name,
		dest_dir: cluster.dest_dir.clone(),
		moc,
		textures: members.textures,
		motions,
		expressions,
		physics,
		model3,
	})
}

fn collect_motions(
	session: &Session,
	members: &Members<'_>,
	options: &ExportOptions,
	adapter: &impl AnimationAdapter,
	model: &str,
) -> Result<BTreeMap<String, Motion3Json>> {
	let mut motions = BTreeMap::new();

	if options.motion_mode == MotionMode::MonoBehaviour && !members.fade_motions.is_empty() {
		let bindings = ParameterBindings::collect(session, &members.game_objects);
		for (id, item) in &members.fade_motions {
			options.check_cancelled()?;
			let data = match read_script_data::<FadeMotionData>(item, CubismRole::FadeMotionData) {
				Ok(data) => data,
				Err(err) => {
					tracing::warn!(model, error = %err, "fade motion skipped");
					continue;
				}
			};
			if data.parameter_ids.is_empty() {
				continue;
			}
			let motion = Motion3Json::from_fade_motion(&data, &bindings, options.force_bezier);
			insert_motion(&mut motions, file_stem(&data.name).to_owned(), id.path_id, motion);
		}
	} else if let Some(first) = members.game_objects.first() {
		let root = top_ancestor(session, *first)?;
		for (idx, animation) in adapter.animations(session, root, &members.clips).iter().enumerate() {
			options.check_cancelled()?;
			let motion = Motion3Json::from_keyframed(animation, options.force_bezier);
			let disambiguator = animation.source.map_or(idx as i64, |source| source.path_id);
			insert_motion(&mut motions, animation.name.clone(), disambiguator, motion);
		}
	} else {
		tracing::warn!(model, "no motions found");
	}

	Ok(motions)
}

/// Insert under `name`, retrying once with a `_<disambiguator>` suffix.
fn insert_motion(motions: &mut BTreeMap<String, Motion3Json>, name: String, disambiguator: i64, motion: Motion3Json) {
	let name = if motions.contains_key(&name) { format!("{name}_{disambiguator}") } else { name };
	if motions.contains_key(&name) {
		tracing::warn!(motion = %name, "duplicate motion name, dropping");
		return;
	}
	motions.insert(name, motion);
}

fn collect_expressions(members: &Members<'_>) -> Vec<(String, Expression3Json)> {
	let mut out = Vec::new();
	for item in &members.expressions {
		let name = Expression3Json::name_from_record(&item.name);
		match read_script_data::<ExpressionData>(item, CubismRole::ExpressionData) {
			Ok(data) => out.push((name, Expression3Json::from_data(&data))),
			Err(err) => tracing::warn!(expression = %name, error = %err, "expression skipped"),
		}
	}
	out
}

fn file_stem(name: &str) -> &str {
	let tail = name.rsplit('/').next().unwrap_or(name);
	match tail.rfind('.') {
		Some(idx) => &tail[..idx],
		None => tail,
	}
}
