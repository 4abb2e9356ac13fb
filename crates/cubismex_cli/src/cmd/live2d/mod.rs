use std::path::{Path, PathBuf};

use cubismex::asset::{BakedClipAdapter, ExportOptions, ExportSink, MotionMode, Result, Session, export_models};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Output base directory; each model lands under its container directory.
	#[arg(long, short)]
	pub out: PathBuf,
	#[arg(long, value_enum, default_value_t = MotionSource::Monobehaviour)]
	pub motion_mode: MotionSource,
	/// Emit bezier segments where linear ones would do.
	#[arg(long)]
	pub force_bezier: bool,
	#[arg(long)]
	pub json: bool,
}

/// Motion source selectable on the command line.
#[derive(Clone, Copy, clap::ValueEnum)]
pub enum MotionSource {
	/// Precomputed fade-motion records, falling back to clips.
	Monobehaviour,
	/// Animation clips baked through the clip adapter.
	Animationclip,
}

impl From<MotionSource> for MotionMode {
	fn from(value: MotionSource) -> Self {
		match value {
			MotionSource::Monobehaviour => Self::MonoBehaviour,
			MotionSource::Animationclip => Self::AnimationClip,
		}
	}
}

/// Export every Live2D model of a session into a directory tree.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		out,
		motion_mode,
		force_bezier,
		json,
	} = args;

	let session = Session::open(&path)?;
	let options = ExportOptions {
		motion_mode: motion_mode.into(),
		force_bezier,
		cancel: None,
	};
	let mut sink = DirSink::new(&out);
	let summary = export_models(&session, &options, &BakedClipAdapter, &mut sink)?;

	if json {
		let payload = Live2dJson {
			path: path.display().to_string(),
			out: out.display().to_string(),
			mode: summary.mode.as_str(),
			files_written: sink.written,
			exported: summary
				.exported
				.iter()
				.map(|item| ExportedJson {
					name: item.name.clone(),
					dest_dir: item.dest_dir.clone(),
					files: item.files,
				})
				.collect(),
			failed: summary
				.failed
				.iter()
				.map(|item| FailedJson {
					key: item.key.clone(),
					error: item.error.clone(),
				})
				.collect(),
			cancelled: summary.cancelled,
			unassigned: summary.unassigned,
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("out: {}", out.display());
	println!("cluster_mode: {}", summary.mode.as_str());
	println!("exported: {}", summary.exported.len());
	for item in &summary.exported {
		println!("  {}\t{}\t{} files", item.name, item.dest_dir, item.files);
	}
	if !summary.failed.is_empty() {
		println!("failed: {}", summary.failed.len());
		for item in &summary.failed {
			println!("  {}\t{}", item.key, item.error);
		}
	}
	if summary.cancelled {
		println!("cancelled: true");
	}
	println!("unassigned: {}", summary.unassigned);

	Ok(())
}

/// Sink writing each file below a base directory, creating parents on demand.
struct DirSink {
	base: PathBuf,
	written: usize,
}

impl DirSink {
	fn new(base: &Path) -> Self {
		Self {
			base: base.to_path_buf(),
			written: 0,
		}
	}
}

impl ExportSink for DirSink {
	fn write_file(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
		let mut target = self.base.clone();
		target.extend(path.split('/').filter(|segment| !segment.is_empty() && *segment != "." && *segment != ".."));

		if let Some(parent) = target.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&target, bytes)?;
		tracing::debug!(path = %target.display(), bytes = bytes.len(), "wrote file");
		self.written += 1;
		Ok(())
	}
}

#[derive(serde::Serialize)]
struct Live2dJson {
	path: String,
	out: String,
	mode: &'static str,
	files_written: usize,
	exported: Vec<ExportedJson>,
	failed: Vec<FailedJson>,
	cancelled: bool,
	unassigned: usize,
}

#[derive(serde::Serialize)]
struct ExportedJson {
	name: String,
	dest_dir: String,
	files: usize,
}

#[derive(serde::Serialize)]
struct FailedJson {
	key: String,
	error: String,
}
