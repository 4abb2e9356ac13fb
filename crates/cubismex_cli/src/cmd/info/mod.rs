use std::collections::BTreeMap;
use std::path::PathBuf;

use cubismex::asset::{Result, Session, find_model_roots};

use crate::cmd::util::{emit_json, id_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print session-level file, record kind, and container statistics.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let session = Session::open(&path)?;
	let roots = find_model_roots(&session);

	let mut kinds: BTreeMap<&'static str, usize> = BTreeMap::new();
	for record in session.table().records() {
		*kinds.entry(record.kind_name()).or_default() += 1;
	}
	let mut kinds: Vec<_> = kinds.into_iter().collect();
	kinds.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			compression: session.compression.as_str(),
			files: session
				.files
				.iter()
				.map(|file| FileJson {
					name: file.name.to_string(),
					objects: file.objects.len(),
				})
				.collect(),
			records: session.table().len(),
			containers: session.containers().len(),
			model_roots: roots.iter().map(|id| id_label(*id)).collect(),
			kinds: kinds.iter().map(|(kind, count)| KindCountJson { kind: *kind, count: *count }).collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", session.compression.as_str());
	println!("files: {}", session.files.len());
	for (idx, file) in session.files.iter().enumerate() {
		println!("  [{idx}] {}: {} objects", file.name, file.objects.len());
	}
	println!("records: {}", session.table().len());
	println!("containers: {}", session.containers().len());
	println!("model_roots: {}", roots.len());
	println!("kinds:");
	for (kind, count) in kinds {
		println!("  {kind}: {count}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	files: Vec<FileJson>,
	records: usize,
	containers: usize,
	model_roots: Vec<String>,
	kinds: Vec<KindCountJson>,
}

#[derive(serde::Serialize)]
struct FileJson {
	name: String,
	objects: usize,
}

#[derive(serde::Serialize)]
struct KindCountJson {
	kind: &'static str,
	count: usize,
}
