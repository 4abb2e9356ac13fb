use std::path::PathBuf;

use cubismex::asset::{Result, Session};

use crate::cmd::util::{emit_json, file_label, id_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Keep only container paths starting with this prefix.
	#[arg(long)]
	pub prefix: Option<String>,
	#[arg(long)]
	pub limit: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// List `(object, container path)` assignments in index order.
pub fn run(args: Args) -> Result<()> {
	let Args { path, prefix, limit, json } = args;

	let session = Session::open(&path)?;
	let containers = session.containers();

	let mut rows: Vec<ContainerJson> = containers
		.iter()
		.filter(|(_, container)| prefix.as_deref().is_none_or(|prefix| container.starts_with(prefix)))
		.map(|(id, container)| ContainerJson {
			object: id_label(id),
			file: file_label(&session, id).to_owned(),
			kind: session.get(id).map(|item| item.kind_name()).unwrap_or("-"),
			name: session.get(id).and_then(|item| item.name()).map(str::to_owned),
			container: container.to_owned(),
		})
		.collect();
	let matched = rows.len();
	if let Some(limit) = limit {
		rows.truncate(limit);
	}

	if json {
		let payload = ContainersJson {
			path: path.display().to_string(),
			total: containers.len(),
			matched,
			containers: rows,
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("containers: {} (matched {matched})", containers.len());
	println!("object\tfile\tkind\tname\tcontainer");
	for row in &rows {
		println!("{}\t{}\t{}\t{}\t{}", row.object, row.file, row.kind, row.name.as_deref().unwrap_or("-"), row.container);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct ContainersJson {
	path: String,
	total: usize,
	matched: usize,
	containers: Vec<ContainerJson>,
}

#[derive(serde::Serialize)]
struct ContainerJson {
	object: String,
	file: String,
	kind: &'static str,
	name: Option<String>,
	container: String,
}
