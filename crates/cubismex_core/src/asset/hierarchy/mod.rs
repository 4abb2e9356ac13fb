use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::asset::{AssetError, GameObject, ObjectId, RecordKind, Result, Session, Transform};

/// Arena index of one hierarchy node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// One game object placed in the forest.
#[derive(Debug, Clone)]
pub struct HierarchyNode {
	/// Wrapped game object.
	pub game_object: ObjectId,
	/// Game object name.
	pub name: Arc<str>,
	/// Child nodes in discovery order.
	pub children: Vec<NodeId>,
	/// Directly attached components (lookup only).
	pub components: Vec<ObjectId>,
	/// Meshes referenced by attached mesh components (lookup only).
	pub meshes: Vec<ObjectId>,
	/// Whether a `MeshFilter` or `SkinnedMeshRenderer` is attached.
	pub has_mesh_component: bool,
}

/// Synthetic root owning the top-level nodes of one source file.
#[derive(Debug, Clone)]
pub struct FileRoot {
	/// Source file index.
	pub file: u32,
	/// Source file name.
	pub name: Arc<str>,
	/// Top-level nodes in file order.
	pub children: Vec<NodeId>,
}

/// Game object excluded because its parent chain loops.
#[derive(Debug, Clone, Copy)]
pub struct RejectedBranch {
	/// Game object whose chain was walked.
	pub game_object: ObjectId,
	/// First game object revisited on the walk.
	pub cycle_at: ObjectId,
}

/// Rooted forest over the session's game objects.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
	nodes: Vec<HierarchyNode>,
	by_game_object: HashMap<ObjectId, NodeId>,
	attached: HashMap<ObjectId, NodeId>,
	roots: Vec<FileRoot>,
	rejected: Vec<RejectedBranch>,
}

#[derive(Debug, Clone, Copy)]
enum Reach {
	Rooted,
	Cyclic(ObjectId),
}

impl Hierarchy {
	/// Build the forest in one pass over every source file.
	pub fn build(session: &Session) -> Self {
		let limit = session.table().records().iter().filter(|item| item.as_game_object().is_some()).count();
		let mut out = Self::default();
		let mut reach = HashMap::new();

		for (file_idx, file) in session.files.iter().enumerate() {
			let file_idx = u32::try_from(file_idx).unwrap_or(u32::MAX);
			let mut top = Vec::new();

			for id in &file.objects {
				let Some(game_object) = session.get(*id).and_then(|item| item.as_game_object()) else {
					continue;
				};

				if let Reach::Cyclic(cycle_at) = classify(session, *id, &mut reach, limit) {
					tracing::warn!(game_object = %id, cycle_at = %cycle_at, "transform parent cycle, dropping branch");
					out.rejected.push(RejectedBranch { game_object: *id, cycle_at });
					continue;
				}

				let node = out.find_or_create(*id, &game_object.name);
				out.attach_components(session, node, game_object);

				match parent_game_object(session, *id) {
					Some(parent) => {
						let parent_name = session.get(parent).and_then(|item| item.name()).unwrap_or_default();
						let parent_node = out.find_or_create(parent, parent_name);
						out.nodes[parent_node.0].children.push(node);
					}
					None => top.push(node),
				}
			}

			if !top.is_empty() {
				out.roots.push(FileRoot {
					file: file_idx,
					name: file.name.clone(),
					children: top,
				});
			}
		}

		out
	}

	fn find_or_create(&mut self, game_object: ObjectId, name: &str) -> NodeId {
		if let Some(node) = self.by_game_object.get(&game_object) {
			return *node;
		}

		let node = NodeId(self.nodes.len());
		self.nodes.push(HierarchyNode {
			game_object,
			name: Arc::<str>::from(name),
			children: Vec::new(),
			components: Vec::new(),
			meshes: Vec::new(),
			has_mesh_component: false,
		});
		self.by_game_object.insert(game_object, node);
		node
	}

	fn attach_components(&mut self, session: &Session, node: NodeId, game_object: &GameObject) {
		for reference in &game_object.components {
			let Some(component) = session.resolve(*reference) else {
				continue;
			};
			self.attached.insert(component.id, node);
			self.nodes[node.0].components.push(component.id);

			let mesh = match &component.kind {
				RecordKind::MeshFilter(item) | RecordKind::SkinnedMeshRenderer(item) => {
					self.nodes[node.0].has_mesh_component = true;
					session.resolve(item.mesh)
				}
				_ => None,
			};
			if let Some(mesh) = mesh {
				self.attached.insert(mesh.id, node);
				self.nodes[node.0].meshes.push(mesh.id);
			}
		}
	}

	/// Synthetic per-file roots, only for files with top-level nodes.
	pub fn roots(&self) -> &[FileRoot] {
		&self.roots
	}

	/// Borrow one node.
	pub fn node(&self, id: NodeId) -> &HierarchyNode {
		&self.nodes[id.0]
	}

	/// Return number of placed nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Return whether no node was placed.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Game objects dropped for cyclic parent chains.
	pub fn rejected(&self) -> &[RejectedBranch] {
		&self.rejected
	}

	/// Node wrapping a game object.
	pub fn node_of_game_object(&self, game_object: ObjectId) -> Option<NodeId> {
		self.by_game_object.get(&game_object).copied()
	}

	/// Node a game object, attached component, or attached mesh belongs to.
	pub fn node_for_object(&self, id: ObjectId) -> Option<NodeId> {
		self.node_of_game_object(id).or_else(|| self.attached.get(&id).copied())
	}

	/// Depth-first pre-order collection of a node and its descendants.
	pub fn subtree(&self, root: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack = vec![root];
		while let Some(node) = stack.pop() {
			out.push(node);
			stack.extend(self.nodes[node.0].children.iter().rev().copied());
		}
		out
	}

	/// Top-level nodes whose subtree carries at least one mesh component.
	///
	/// `names` filters by case-insensitive substring of the top-level name.
	pub fn split_candidates(&self, names: &[String]) -> Vec<NodeId> {
		let needles: Vec<String> = names.iter().map(|item| item.to_lowercase()).collect();
		let mut out = Vec::new();

		for root in &self.roots {
			for node in &root.children {
				let name = self.nodes[node.0].name.to_lowercase();
				if !needles.is_empty() && !needles.iter().any(|needle| name.contains(needle.as_str())) {
					continue;
				}
				if self.subtree(*node).iter().any(|item| self.nodes[item.0].has_mesh_component) {
					out.push(*node);
				}
			}
		}

		out
	}
}

fn classify(session: &Session, start: ObjectId, reach: &mut HashMap<ObjectId, Reach>, limit: usize) -> Reach {
	let mut walk = Vec::new();
	let mut on_walk = HashSet::new();
	let mut current = start;

	let outcome = loop {
		if let Some(known) = reach.get(&current) {
			break *known;
		}
		if !on_walk.insert(current) || walk.len() > limit {
			break Reach::Cyclic(current);
		}
		walk.push(current);

		match parent_game_object(session, current) {
			Some(parent) => current = parent,
			None => break Reach::Rooted,
		}
	};

	for id in walk {
		reach.insert(id, outcome);
	}
	outcome
}

/// First attached component that is a transform.
pub fn transform_of<'a>(session: &'a Session, game_object: &GameObject) -> Option<&'a Transform> {
	game_object
		.components
		.iter()
		.filter_map(|reference| session.resolve(*reference))
		.find_map(|item| item.as_transform())
}

/// Game object owning the parent transform, when every link resolves.
pub fn parent_game_object(session: &Session, game_object: ObjectId) -> Option<ObjectId> {
	let item = session.get(game_object)?.as_game_object()?;
	let transform = transform_of(session, item)?;
	let father = session.resolve(transform.father)?.as_transform()?;
	let parent = session.resolve(father.game_object)?;
	parent.as_game_object()?;
	Some(parent.id)
}

/// Walk to the topmost game object of a transform chain.
pub fn top_ancestor(session: &Session, game_object: ObjectId) -> Result<ObjectId> {
	let mut visited = HashSet::new();
	let mut current = game_object;

	while let Some(parent) = parent_game_object(session, current) {
		if !visited.insert(current) {
			return Err(AssetError::ParentCycle {
				file: current.file,
				path_id: current.path_id,
			});
		}
		current = parent;
	}

	Ok(current)
}
