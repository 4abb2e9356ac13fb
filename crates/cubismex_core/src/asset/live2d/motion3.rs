use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::asset::{CurveReconstruction, Keyframe, KeyframedAnimation, ObjectId, Session, parent_game_object, reconstruct_curve};

/// `motion3.json` document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Motion3Json {
	/// Format version, always 3.
	pub version: u32,
	/// Aggregate metadata.
	pub meta: Motion3Meta,
	/// One entry per non-empty channel.
	pub curves: Vec<Motion3Curve>,
	/// Event markers.
	pub user_data: Vec<Motion3UserData>,
}

/// motion3 `Meta` block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Motion3Meta {
	/// Length in seconds.
	pub duration: f32,
	/// Frames per second.
	pub fps: f32,
	/// Whether playback loops.
	#[serde(rename = "Loop")]
	pub looped: bool,
	/// Whether bezier handles are restricted in X.
	pub are_beziers_restricted: bool,
	/// Overall fade-in time.
	pub fade_in_time: f32,
	/// Overall fade-out time.
	pub fade_out_time: f32,
	/// Number of curves.
	pub curve_count: usize,
	/// Segments across all curves, starting from 1.
	pub total_segment_count: usize,
	/// Points across all curves, starting from 1.
	pub total_point_count: usize,
	/// Number of user-data entries.
	pub user_data_count: usize,
	/// Summed UTF-16 length of user-data values.
	pub total_user_data_size: usize,
}

/// motion3 curve.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Motion3Curve {
	/// `Model`, `Parameter` or `PartOpacity`.
	pub target: String,
	/// Channel id.
	pub id: String,
	/// Per-curve fade-in time.
	pub fade_in_time: f32,
	/// Per-curve fade-out time.
	pub fade_out_time: f32,
	/// Flat segment floats.
	pub segments: Vec<f32>,
}

/// motion3 user-data entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Motion3UserData {
	/// Event time in seconds.
	pub time: f32,
	/// Event payload.
	pub value: String,
}

/// Decoded `CubismFadeMotionData` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FadeMotionData {
	/// Record name, usually `<motion>.fade.asset`.
	#[serde(rename = "m_Name")]
	pub name: String,
	/// Motion display name.
	pub motion_name: String,
	/// Overall fade-in time.
	pub fade_in_time: f32,
	/// Overall fade-out time.
	pub fade_out_time: f32,
	/// Channel ids, parallel to `parameter_curves`.
	pub parameter_ids: Vec<String>,
	/// Keyframe channels.
	pub parameter_curves: Vec<AnimationCurve>,
	/// Per-channel fade-in times.
	pub parameter_fade_in_times: Vec<f32>,
	/// Per-channel fade-out times.
	pub parameter_fade_out_times: Vec<f32>,
	/// Length in seconds.
	pub motion_length: f32,
}

/// Serialized engine animation curve.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnimationCurve {
	/// Time-ordered keyframes.
	#[serde(rename = "m_Curve")]
	pub curve: Vec<Keyframe>,
}

/// Known parameter and part names of one model.
#[derive(Debug, Clone, Default)]
pub struct ParameterBindings {
	/// Game objects parented under `Parameters`.
	pub parameters: HashSet<String>,
	/// Game objects parented under `Parts`.
	pub parts: HashSet<String>,
}

impl ParameterBindings {
	/// Collect names from game objects whose parent is named `Parameters` or `Parts`.
	pub fn collect(session: &Session, game_objects: &[ObjectId]) -> Self {
		let mut out = Self::default();

		for id in game_objects {
			let Some(name) = session.get(*id).and_then(|item| item.as_game_object()).map(|item| item.name.clone()) else {
				continue;
			};
			let parent = parent_game_object(session, *id).and_then(|parent| session.get(parent)).and_then(|item| item.name());
			match parent {
				Some("Parameters") => {
					out.parameters.insert(name);
				}
				Some("Parts") => {
					out.parts.insert(name);
				}
				_ => {}
			}
		}

		out
	}

	fn target_for(&self, id: &str, motion: &str) -> &'static str {
		match id {
			"Opacity" | "EyeBlink" | "LipSync" => "Model",
			_ if self.parameters.contains(id) => "Parameter",
			_ if self.parts.contains(id) => "PartOpacity",
			_ => {
				tracing::warn!(motion, id, "binding not found among model parts/parameters");
				if id.to_lowercase().contains("part") { "PartOpacity" } else { "Parameter" }
			}
		}
	}
}

struct Totals {
	segments: usize,
	points: usize,
}

impl Totals {
	fn new() -> Self {
		Self { segments: 1, points: 1 }
	}

	fn add(&mut self, curve: &CurveReconstruction) {
		self.segments += curve.segment_count();
		self.points += curve.point_count();
	}
}

impl Motion3Json {
	/// Convert a fade-motion record.
	pub fn from_fade_motion(motion: &FadeMotionData, bindings: &ParameterBindings, force_bezier: bool) -> Self {
		let mut totals = Totals::new();
		let mut curves = Vec::new();

		for (idx, channel) in motion.parameter_curves.iter().enumerate() {
			let Some(curve) = reconstruct_curve(&channel.curve, force_bezier) else {
				continue;
			};
			let Some(id) = motion.parameter_ids.get(idx) else {
				tracing::warn!(motion = %motion.name, channel = idx, "curve has no parameter id, skipping");
				continue;
			};

			totals.add(&curve);
			curves.push(Motion3Curve {
				target: bindings.target_for(id, &motion.name).to_owned(),
				id: id.clone(),
				fade_in_time: motion.parameter_fade_in_times.get(idx).copied().unwrap_or(-1.0),
				fade_out_time: motion.parameter_fade_out_times.get(idx).copied().unwrap_or(-1.0),
				segments: curve.flatten(),
			});
		}

		Self {
			version: 3,
			meta: Motion3Meta {
				duration: motion.motion_length,
				fps: 30.0,
				looped: true,
				are_beziers_restricted: true,
				fade_in_time: motion.fade_in_time,
				fade_out_time: motion.fade_out_time,
				curve_count: curves.len(),
				total_segment_count: totals.segments,
				total_point_count: totals.points,
				user_data_count: 0,
				total_user_data_size: 0,
			},
			curves,
			user_data: Vec::new(),
		}
	}

	/// Convert an adapter-produced keyframed animation.
	pub fn from_keyframed(animation: &KeyframedAnimation, force_bezier: bool) -> Self {
		let mut totals = Totals::new();
		let mut curves = Vec::new();

		for track in &animation.tracks {
			let Some(mut curve) = reconstruct_curve(&track.keyframes, force_bezier) else {
				continue;
			};
			curve.start[0] = 0.0;

			totals.add(&curve);
			curves.push(Motion3Curve {
				target: track.target.clone(),
				id: track.name.clone(),
				fade_in_time: -1.0,
				fade_out_time: -1.0,
				segments: curve.flatten(),
			});
		}

		let user_data: Vec<Motion3UserData> = animation
			.events
			.iter()
			.map(|event| Motion3UserData {
				time: event.time,
				value: event.value.clone(),
			})
			.collect();

		Self {
			version: 3,
			meta: Motion3Meta {
				duration: animation.duration,
				fps: animation.sample_rate,
				looped: true,
				are_beziers_restricted: true,
				fade_in_time: 0.0,
				fade_out_time: 0.0,
				curve_count: curves.len(),
				total_segment_count: totals.segments,
				total_point_count: totals.points,
				user_data_count: user_data.len(),
				total_user_data_size: user_data.iter().map(|item| item.value.encode_utf16().count()).sum(),
			},
			curves,
			user_data,
		}
	}
}
