use std::path::PathBuf;

use cubismex::asset::{Hierarchy, NodeId, Result, Session};

use crate::cmd::util::{emit_json, id_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Print only top-level nodes that carry a mesh somewhere below them.
	#[arg(long)]
	pub split: bool,
	/// Case-insensitive substring filter on top-level names for `--split`.
	#[arg(long = "name")]
	pub names: Vec<String>,
	#[arg(long)]
	pub json: bool,
}

/// Print the per-file game-object forest.
pub fn run(args: Args) -> Result<()> {
	let Args { path, split, names, json } = args;

	let session = Session::open(&path)?;
	let tree = Hierarchy::build(&session);

	if split {
		let candidates = tree.split_candidates(&names);
		if json {
			let payload = SplitJson {
				path: path.display().to_string(),
				candidates: candidates.iter().map(|node| node_json(&tree, *node)).collect(),
			};
			emit_json(&payload);
			return Ok(());
		}

		println!("path: {}", path.display());
		println!("split_candidates: {}", candidates.len());
		for node in candidates {
			let item = tree.node(node);
			println!("  {} ({})", item.name, id_label(item.game_object));
		}
		return Ok(());
	}

	if json {
		let payload = TreeJson {
			path: path.display().to_string(),
			nodes: tree.len(),
			roots: tree
				.roots()
				.iter()
				.map(|root| RootJson {
					file: root.file,
					name: root.name.to_string(),
					children: root.children.iter().map(|node| node_json(&tree, *node)).collect(),
				})
				.collect(),
			rejected: tree
				.rejected()
				.iter()
				.map(|item| RejectedJson {
					game_object: id_label(item.game_object),
					cycle_at: id_label(item.cycle_at),
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("nodes: {}", tree.len());
	for root in tree.roots() {
		println!("[{}] {}", root.file, root.name);
		for node in &root.children {
			print_node(&tree, *node, 1);
		}
	}
	if !tree.rejected().is_empty() {
		println!("rejected:");
		for item in tree.rejected() {
			println!("  {} (cycle at {})", id_label(item.game_object), id_label(item.cycle_at));
		}
	}

	Ok(())
}

fn print_node(tree: &Hierarchy, node: NodeId, depth: usize) {
	let item = tree.node(node);
	let mesh = if item.has_mesh_component { " [mesh]" } else { "" };
	println!("{}{} ({}){mesh}", "  ".repeat(depth), item.name, id_label(item.game_object));
	for child in &item.children {
		print_node(tree, *child, depth + 1);
	}
}

fn node_json(tree: &Hierarchy, node: NodeId) -> NodeJson {
	let item = tree.node(node);
	NodeJson {
		game_object: id_label(item.game_object),
		name: item.name.to_string(),
		components: item.components.len(),
		meshes: item.meshes.iter().map(|id| id_label(*id)).collect(),
		has_mesh_component: item.has_mesh_component,
		children: item.children.iter().map(|child| node_json(tree, *child)).collect(),
	}
}

#[derive(serde::Serialize)]
struct TreeJson {
	path: String,
	nodes: usize,
	roots: Vec<RootJson>,
	rejected: Vec<RejectedJson>,
}

#[derive(serde::Serialize)]
struct SplitJson {
	path: String,
	candidates: Vec<NodeJson>,
}

#[derive(serde::Serialize)]
struct RootJson {
	file: u32,
	name: String,
	children: Vec<NodeJson>,
}

#[derive(serde::Serialize)]
struct NodeJson {
	game_object: String,
	name: String,
	components: usize,
	meshes: Vec<String>,
	has_mesh_component: bool,
	children: Vec<NodeJson>,
}

#[derive(serde::Serialize)]
struct RejectedJson {
	game_object: String,
	cycle_at: String,
}

#[cfg(test)]
mod tests;
