use serde::Deserialize;

use crate::asset::{Keyframe, ObjectId, RecordKind, Session};

/// One named keyframe channel produced by the animation adapter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Track {
	/// Channel id (parameter or part name).
	pub name: String,
	/// Target kind string, for example `Parameter` or `PartOpacity`.
	pub target: String,
	/// Time-ordered keyframes.
	#[serde(alias = "curve")]
	pub keyframes: Vec<Keyframe>,
}

/// Discrete `(time, string)` event marker.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MotionEvent {
	/// Event time in seconds.
	pub time: f32,
	/// Event payload.
	pub value: String,
}

/// Adapter output for one animation rooted at a model's top game object.
#[derive(Debug, Clone, Default)]
pub struct KeyframedAnimation {
	/// Animation name.
	pub name: String,
	/// Record the animation was baked from.
	pub source: Option<ObjectId>,
	/// Length in seconds.
	pub duration: f32,
	/// Samples per second.
	pub sample_rate: f32,
	/// Channels in adapter order.
	pub tracks: Vec<Track>,
	/// Event markers in time order.
	pub events: Vec<MotionEvent>,
}

/// Source of keyframed animations for models without fade-motion records.
pub trait AnimationAdapter {
	/// Produce animations for `root`, drawing on the model's clip records.
	fn animations(&self, session: &Session, root: ObjectId, clips: &[ObjectId]) -> Vec<KeyframedAnimation>;
}

/// Adapter that reads tracks already baked into `AnimationClip` records by the decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct BakedClipAdapter;

impl AnimationAdapter for BakedClipAdapter {
	fn animations(&self, session: &Session, root: ObjectId, clips: &[ObjectId]) -> Vec<KeyframedAnimation> {
		tracing::debug!(root = %root, clips = clips.len(), "baking clip animations");
		let mut out = Vec::new();

		for id in clips {
			let Some(record) = session.get(*id) else {
				continue;
			};
			let RecordKind::AnimationClip(clip) = &record.kind else {
				tracing::warn!(object = %id, kind = record.kind_name(), "expected an animation clip");
				continue;
			};

			let tracks: Vec<Track> = clip
				.tracks
				.iter()
				.filter(|track| {
					let keep = !track.keyframes.is_empty();
					if !keep {
						tracing::warn!(clip = %clip.name, track = %track.name, "empty track, skipping");
					}
					keep
				})
				.cloned()
				.collect();

			out.push(KeyframedAnimation {
				name: clip.name.clone(),
				source: Some(*id),
				duration: clip.duration,
				sample_rate: clip.sample_rate,
				tracks,
				events: clip.events.clone(),
			});
		}

		out
	}
}
