use serde::{Deserialize, Deserializer};

/// Spacing of the near-zero step the engine bakes for same-value holds.
const INVERSE_STEP_SPAN: f32 = 0.01;
/// Tolerance used for both the hold span and the flat-slope test.
const EPSILON: f32 = 0.0001;

/// One sampled control point of an animation curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Keyframe {
	/// Keyframe time in seconds.
	#[serde(deserialize_with = "lenient_f32")]
	pub time: f32,
	/// Curve value at `time`.
	#[serde(deserialize_with = "lenient_f32")]
	pub value: f32,
	/// Inbound tangent slope.
	#[serde(rename = "inSlope", deserialize_with = "lenient_f32")]
	pub in_slope: f32,
	/// Outbound tangent slope.
	#[serde(rename = "outSlope", deserialize_with = "lenient_f32")]
	pub out_slope: f32,
	/// Tangent weighting mode.
	#[serde(rename = "weightedMode")]
	pub weighted_mode: i32,
	/// Inbound tangent weight.
	#[serde(rename = "inWeight", deserialize_with = "lenient_f32")]
	pub in_weight: f32,
	/// Outbound tangent weight.
	#[serde(rename = "outWeight", deserialize_with = "lenient_f32")]
	pub out_weight: f32,
}

impl Keyframe {
	/// Build an unweighted keyframe.
	pub fn new(time: f32, value: f32, in_slope: f32, out_slope: f32) -> Self {
		Self {
			time,
			value,
			in_slope,
			out_slope,
			..Self::default()
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientFloat {
	Number(f64),
	Text(String),
}

/// Accept JSON numbers plus the non-finite spellings JSON cannot carry natively.
fn lenient_f32<'de, D>(deserializer: D) -> std::result::Result<f32, D::Error>
where
	D: Deserializer<'de>,
{
	match LenientFloat::deserialize(deserializer)? {
		LenientFloat::Number(value) => Ok(value as f32),
		LenientFloat::Text(text) => match text.as_str() {
			"Infinity" | "+Infinity" | "inf" => Ok(f32::INFINITY),
			"-Infinity" | "-inf" => Ok(f32::NEG_INFINITY),
			"NaN" | "nan" => Ok(f32::NAN),
			other => Err(serde::de::Error::custom(format!("invalid float literal {other:?}"))),
		},
	}
}

/// One reconstructed interpolation span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
	/// Straight line to the endpoint.
	Linear {
		/// Endpoint time.
		time: f32,
		/// Endpoint value.
		value: f32,
	},
	/// Cubic span with two control points.
	Bezier {
		/// First control point `(time, value)`.
		c1: [f32; 2],
		/// Second control point `(time, value)`.
		c2: [f32; 2],
		/// Endpoint `(time, value)`.
		end: [f32; 2],
	},
	/// Hold the previous value, then jump at the endpoint.
	Stepped {
		/// Endpoint time.
		time: f32,
		/// Endpoint value.
		value: f32,
	},
	/// Jump immediately, then hold until the endpoint.
	InverseStepped {
		/// Endpoint time.
		time: f32,
		/// Endpoint value.
		value: f32,
	},
}

impl Segment {
	/// Segment-type tag written ahead of the control floats.
	pub fn type_tag(&self) -> f32 {
		match self {
			Self::Linear { .. } => 0.0,
			Self::Bezier { .. } => 1.0,
			Self::Stepped { .. } => 2.0,
			Self::InverseStepped { .. } => 3.0,
		}
	}

	/// Points this segment contributes to `TotalPointCount`.
	pub fn point_count(&self) -> usize {
		match self {
			Self::Bezier { .. } => 3,
			Self::Linear { .. } | Self::Stepped { .. } | Self::InverseStepped { .. } => 1,
		}
	}

	/// Append the tag and control floats in motion3 order.
	pub fn push_flat(&self, out: &mut Vec<f32>) {
		out.push(self.type_tag());
		match *self {
			Self::Linear { time, value } | Self::Stepped { time, value } | Self::InverseStepped { time, value } => {
				out.extend_from_slice(&[time, value]);
			}
			Self::Bezier { c1, c2, end } => {
				out.extend_from_slice(&c1);
				out.extend_from_slice(&c2);
				out.extend_from_slice(&end);
			}
		}
	}
}

/// Typed segments reconstructed from one keyframe channel.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveReconstruction {
	/// Leading `(time, value)` point.
	pub start: [f32; 2],
	/// Segments in emission order.
	pub segments: Vec<Segment>,
}

impl CurveReconstruction {
	/// Points contributed by the segments, excluding the leading point.
	pub fn point_count(&self) -> usize {
		self.segments.iter().map(Segment::point_count).sum()
	}

	/// Number of emitted segments.
	pub fn segment_count(&self) -> usize {
		self.segments.len()
	}

	/// Flat motion3 `Segments` array.
	pub fn flatten(&self) -> Vec<f32> {
		let mut out = Vec::with_capacity(2 + self.segments.len() * 7);
		out.extend_from_slice(&self.start);
		for segment in &self.segments {
			segment.push_flat(&mut out);
		}
		out
	}
}

/// Classify one `(prev, curr)` pair, looking ahead to `next`.
///
/// Returns the segment and whether it consumed `next` as well. A `+inf`
/// slope on either side of the pair is a constant step, and a Bezier whose
/// control points would not be finite degrades to a step as well.
pub fn classify_pair(prev: &Keyframe, curr: &Keyframe, next: &Keyframe, force_bezier: bool) -> (Segment, bool) {
	if (curr.time - prev.time - INVERSE_STEP_SPAN).abs() < EPSILON && next.value == curr.value {
		let segment = Segment::InverseStepped {
			time: next.time,
			value: next.value,
		};
		return (segment, true);
	}

	let stepped = Segment::Stepped {
		time: curr.time,
		value: curr.value,
	};
	if curr.in_slope == f32::INFINITY || prev.out_slope == f32::INFINITY {
		return (stepped, false);
	}

	if prev.out_slope == 0.0 && curr.in_slope.abs() < EPSILON && !force_bezier {
		let segment = Segment::Linear {
			time: curr.time,
			value: curr.value,
		};
		return (segment, false);
	}

	let tangent = (curr.time - prev.time) / 3.0;
	let c1 = [prev.time + tangent, prev.out_slope * tangent + prev.value];
	let c2 = [curr.time - tangent, curr.value - curr.in_slope * tangent];
	// JSON has no encoding for non-finite control points.
	if c1.iter().chain(&c2).any(|coord| !coord.is_finite()) {
		return (stepped, false);
	}

	let segment = Segment::Bezier {
		c1,
		c2,
		end: [curr.time, curr.value],
	};
	(segment, false)
}

/// Rebuild typed segments from a time-ordered keyframe list.
///
/// Returns `None` for an empty channel. A missing lookahead keyframe is
/// treated as an all-zero keyframe.
pub fn reconstruct_curve(keys: &[Keyframe], force_bezier: bool) -> Option<CurveReconstruction> {
	let first = keys.first()?;
	let mut out = CurveReconstruction {
		start: [first.time, first.value],
		segments: Vec::new(),
	};

	let mut idx = 1;
	while idx < keys.len() {
		let next = keys.get(idx + 1).copied().unwrap_or_default();
		let (segment, consumed_next) = classify_pair(&keys[idx - 1], &keys[idx], &next, force_bezier);
		out.segments.push(segment);
		idx += if consumed_next { 2 } else { 1 };
	}

	Some(out)
}

#[cfg(test)]
mod tests;
