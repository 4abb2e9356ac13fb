use super::{CurveReconstruction, Keyframe, Segment, reconstruct_curve};

fn keys(items: &[(f32, f32, f32, f32)]) -> Vec<Keyframe> {
	items.iter().map(|(time, value, in_slope, out_slope)| Keyframe::new(*time, *value, *in_slope, *out_slope)).collect()
}

fn rebuild(items: &[(f32, f32, f32, f32)], force_bezier: bool) -> CurveReconstruction {
	reconstruct_curve(&keys(items), force_bezier).expect("non-empty channel")
}

#[test]
fn infinite_inbound_slope_emits_one_stepped_segment() {
	let curve = rebuild(&[(0.0, 0.0, 0.0, 0.0), (1.0, 5.0, f32::INFINITY, f32::INFINITY)], false);

	assert_eq!(curve.segments, vec![Segment::Stepped { time: 1.0, value: 5.0 }]);
	assert_eq!(curve.point_count(), 1);
	assert_eq!(curve.flatten(), vec![0.0, 0.0, 2.0, 1.0, 5.0]);
}

#[test]
fn infinite_outbound_slope_on_previous_key_emits_stepped_segment() {
	let curve = rebuild(&[(0.0, 0.0, 0.0, f32::INFINITY), (1.0, 5.0, 0.0, 0.0)], false);

	assert_eq!(curve.segments, vec![Segment::Stepped { time: 1.0, value: 5.0 }]);
	assert_eq!(curve.point_count(), 1);
	assert_eq!(curve.flatten(), vec![0.0, 0.0, 2.0, 1.0, 5.0]);
}

#[test]
fn non_finite_bezier_controls_degrade_to_stepped() {
	let curve = rebuild(
		&[(0.0, 0.0, 0.0, f32::NEG_INFINITY), (1.0, 5.0, 0.0, 0.0), (2.0, 1.0, f32::NAN, 0.0)],
		true,
	);

	assert_eq!(
		curve.segments,
		vec![Segment::Stepped { time: 1.0, value: 5.0 }, Segment::Stepped { time: 2.0, value: 1.0 }]
	);
	assert!(curve.flatten().iter().all(|value| value.is_finite()));
}

#[test]
fn flat_slopes_emit_linear_segment() {
	let curve = rebuild(&[(0.0, 0.0, 0.0, 0.0), (1.0, 5.0, 0.0, 0.0)], false);

	assert_eq!(curve.segments, vec![Segment::Linear { time: 1.0, value: 5.0 }]);
	assert_eq!(curve.point_count(), 1);
	assert_eq!(curve.segment_count(), 1);
}

#[test]
fn force_bezier_overrides_linear() {
	let curve = rebuild(&[(0.0, 0.0, 0.0, 0.0), (1.0, 5.0, 0.0, 0.0)], true);

	assert!(matches!(curve.segments[0], Segment::Bezier { .. }));
	assert_eq!(curve.point_count(), 3);
}

#[test]
fn generic_slopes_emit_bezier_with_third_tangents() {
	let curve = rebuild(&[(0.0, 0.0, 0.0, 2.0), (1.0, 5.0, 3.0, 0.0)], false);

	let tangent = (1.0_f32 - 0.0) / 3.0;
	let expected = Segment::Bezier {
		c1: [0.0 + tangent, 2.0 * tangent + 0.0],
		c2: [1.0 - tangent, 5.0 - 3.0 * tangent],
		end: [1.0, 5.0],
	};
	assert_eq!(curve.segments, vec![expected]);
	assert_eq!(curve.point_count(), 3);

	let flat = curve.flatten();
	assert_eq!(flat.len(), 2 + 7);
	assert_eq!(flat[2], 1.0);
	assert!((flat[4] - 0.666_666_7).abs() < 1e-6);
	assert!((flat[6] - 4.0).abs() < 1e-6);
}

#[test]
fn near_zero_hold_emits_inverse_stepped_and_consumes_lookahead() {
	let curve = rebuild(&[(0.0, 0.0, 0.0, 0.0), (0.01, 1.0, 0.0, 0.0), (1.0, 1.0, 0.0, 0.0)], false);

	assert_eq!(curve.segments, vec![Segment::InverseStepped { time: 1.0, value: 1.0 }]);
	assert_eq!(curve.point_count(), 1);
	assert_eq!(curve.flatten(), vec![0.0, 0.0, 3.0, 1.0, 1.0]);
}

#[test]
fn near_zero_pair_without_matching_value_falls_through() {
	let curve = rebuild(&[(0.0, 0.0, 0.0, 0.0), (0.01, 1.0, 0.0, 0.0), (1.0, 2.0, 0.0, 0.0)], false);

	assert_eq!(
		curve.segments,
		vec![Segment::Linear { time: 0.01, value: 1.0 }, Segment::Linear { time: 1.0, value: 2.0 }]
	);
}

#[test]
fn near_zero_last_pair_compares_against_zero_sentinel() {
	let curve = rebuild(&[(0.0, 3.0, 0.0, 0.0), (0.01, 0.0, 0.0, 0.0)], false);

	assert_eq!(curve.segments, vec![Segment::InverseStepped { time: 0.0, value: 0.0 }]);
}

#[test]
fn single_keyframe_has_only_start_point() {
	let curve = rebuild(&[(0.5, 2.0, 0.0, 0.0)], false);

	assert!(curve.segments.is_empty());
	assert_eq!(curve.flatten(), vec![0.5, 2.0]);
	assert!(reconstruct_curve(&[], false).is_none());
}

#[test]
fn keyframe_json_accepts_non_finite_spellings() {
	let key: Keyframe = serde_json::from_str(r#"{"time":1,"value":5,"inSlope":"Infinity","outSlope":"-Infinity","weightedMode":0}"#)
		.expect("keyframe parses");

	assert_eq!(key.in_slope, f32::INFINITY);
	assert_eq!(key.out_slope, f32::NEG_INFINITY);
	assert_eq!(key.in_weight, 0.0);
	assert!(serde_json::from_str::<Keyframe>(r#"{"time":"soon"}"#).is_err());
}
