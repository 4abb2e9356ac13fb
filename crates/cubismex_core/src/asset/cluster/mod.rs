use std::collections::HashSet;
use std::sync::Arc;

use crate::asset::{AssetError, CubismRole, ObjectId, Result, Session};

/// Key derivation mode chosen for one clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterMode {
	/// Keys are the directory of each root's container path.
	BasePath,
	/// Keys are each root's full container path; used when directories collide.
	FullPath,
}

impl ClusterMode {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::BasePath => "base_path",
			Self::FullPath => "full_path",
		}
	}
}

/// Objects attributed to one exported model.
#[derive(Debug, Clone)]
pub struct ModelCluster {
	/// Cluster key derived from the root's container path.
	pub key: Arc<str>,
	/// Model root that produced the key.
	pub root: ObjectId,
	/// Output model name.
	pub model_name: String,
	/// Output directory relative to the export base.
	pub dest_dir: String,
	/// Member objects in container-index order.
	pub members: Vec<ObjectId>,
}

/// Result of partitioning the container index by model.
#[derive(Debug, Clone)]
pub struct ClusterPlan {
	/// Key mode in effect.
	pub mode: ClusterMode,
	/// Non-empty clusters in root order.
	pub clusters: Vec<ModelCluster>,
	/// Roots skipped because they had no container path.
	pub pathless_roots: Vec<ObjectId>,
	/// Container-indexed objects that matched no key.
	pub unassigned: usize,
}

/// Script components whose class is `CubismMoc`, in table order.
pub fn find_model_roots(session: &Session) -> Vec<ObjectId> {
	session
		.table()
		.records()
		.iter()
		.filter(|record| {
			record
				.as_mono_behaviour()
				.and_then(|item| session.script_class(item))
				.is_some_and(|class| CubismRole::from_class_name(class) == Some(CubismRole::Moc))
		})
		.map(|record| record.id)
		.collect()
}

/// Partition container-indexed objects into one cluster per model root.
pub fn cluster_models(session: &Session, roots: &[ObjectId]) -> Result<ClusterPlan> {
	if roots.is_empty() {
		return Err(AssetError::NoModelRoots);
	}

	let containers = session.containers();
	let mut usable = Vec::new();
	let mut pathless_roots = Vec::new();
	for root in roots {
		match containers.path_of(*root) {
			Some(path) => usable.push((*root, path)),
			None => {
				tracing::warn!(root = %root, "model root has no container path, skipping");
				pathless_roots.push(*root);
			}
		}
	}

	if usable.is_empty() {
		return Err(AssetError::NoModelContainers);
	}

	let distinct_bases: HashSet<&str> = usable.iter().map(|(_, path)| base_path(path)).collect();
	let mode = if distinct_bases.len() < usable.len() {
		tracing::debug!("model roots share a directory, switching to full container paths");
		ClusterMode::FullPath
	} else {
		ClusterMode::BasePath
	};

	let mut clusters: Vec<ModelCluster> = Vec::new();
	for (root, path) in usable {
		let key = match mode {
			ClusterMode::BasePath => base_path(path),
			ClusterMode::FullPath => path,
		};
		if clusters.iter().any(|item| item.key.as_ref() == key) {
			continue;
		}

		let model_name = match mode {
			ClusterMode::BasePath => last_segment(key).to_owned(),
			ClusterMode::FullPath => file_stem(last_segment(key)).to_owned(),
		};
		clusters.push(ModelCluster {
			key: Arc::<str>::from(key),
			root,
			model_name,
			dest_dir: strip_extension(key).to_owned(),
			members: Vec::new(),
		});
	}

	let mut unassigned = 0;
	for (id, path) in containers.iter() {
		match clusters.iter_mut().find(|cluster| matches_key(path, &cluster.key)) {
			Some(cluster) => cluster.members.push(id),
			None => unassigned += 1,
		}
	}
	clusters.retain(|cluster| !cluster.members.is_empty());

	Ok(ClusterPlan {
		mode,
		clusters,
		pathless_roots,
		unassigned,
	})
}

/// Whether a container path belongs to a cluster key.
///
/// The key must occur in the path and the key's final segment must equal one
/// of the path's `/`-delimited components.
pub fn matches_key(path: &str, key: &str) -> bool {
	if !path.contains(key) {
		return false;
	}
	let tail = last_segment(key);
	path.split('/').any(|segment| segment == tail)
}

/// Container path with its final segment removed; paths without `/` are returned whole.
pub fn base_path(path: &str) -> &str {
	match path.rfind('/') {
		Some(idx) => &path[..idx],
		None => path,
	}
}

fn last_segment(path: &str) -> &str {
	match path.rfind('/') {
		Some(idx) => &path[idx + 1..],
		None => path,
	}
}

fn file_stem(name: &str) -> &str {
	match name.rfind('.') {
		Some(idx) => &name[..idx],
		None => name,
	}
}

fn strip_extension(path: &str) -> &str {
	let tail = last_segment(path);
	match tail.rfind('.') {
		Some(idx) => &path[..path.len() - tail.len() + idx],
		None => path,
	}
}

#[cfg(test)]
mod tests;
