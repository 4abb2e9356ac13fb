use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// `model3.json` manifest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Model3Json {
	/// Format version, always 3.
	pub version: u32,
	/// Model name.
	pub name: String,
	/// Files the model consists of.
	pub file_references: FileReferences,
	/// Named parameter groups.
	pub groups: Vec<Group>,
}

/// model3 `FileReferences` block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileReferences {
	/// Moc file name.
	pub moc: String,
	/// Texture paths, sorted.
	pub textures: Vec<String>,
	/// Physics file name, when the model has a rig.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub physics: Option<String>,
	/// Motion name to motion files.
	pub motions: BTreeMap<String, Vec<MotionFileRef>>,
	/// Expression entries.
	pub expressions: Vec<ExpressionRef>,
}

/// Motion file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MotionFileRef {
	/// Path relative to the model directory.
	pub file: String,
}

/// Expression entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExpressionRef {
	/// Expression name.
	pub name: String,
	/// Path relative to the model directory.
	pub file: String,
}

/// Named parameter group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Group {
	/// Always `Parameter`.
	pub target: String,
	/// `EyeBlink` or `LipSync`.
	pub name: String,
	/// Parameter ids in sorted order.
	pub ids: Vec<String>,
}

/// Build the `EyeBlink` and `LipSync` groups.
///
/// When a set is empty, ids are guessed from the model's game-object names.
pub fn build_groups(eye_blink: BTreeSet<String>, lip_sync: BTreeSet<String>, game_object_names: &[String]) -> Vec<Group> {
	let eye_blink = if eye_blink.is_empty() { guess(game_object_names, looks_like_eye_blink) } else { eye_blink };
	let lip_sync = if lip_sync.is_empty() { guess(game_object_names, looks_like_lip_sync) } else { lip_sync };

	vec![
		Group {
			target: "Parameter".to_owned(),
			name: "EyeBlink".to_owned(),
			ids: eye_blink.into_iter().collect(),
		},
		Group {
			target: "Parameter".to_owned(),
			name: "LipSync".to_owned(),
			ids: lip_sync.into_iter().collect(),
		},
	]
}

fn guess(names: &[String], pred: fn(&str) -> bool) -> BTreeSet<String> {
	names.iter().filter(|name| pred(&name.to_lowercase())).cloned().collect()
}

fn looks_like_eye_blink(name: &str) -> bool {
	name.contains("eye") && name.contains("open") && (name.contains('l') || name.contains('r'))
}

fn looks_like_lip_sync(name: &str) -> bool {
	name.contains("mouth") && name.contains("open") && name.contains('y')
}
