use serde::{Deserialize, Serialize};

/// Decoded `CubismPhysicsController` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PhysicsController {
	/// Simulation rig.
	#[serde(rename = "_rig")]
	pub rig: PhysicsRig,
}

/// Decoded simulation rig.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PhysicsRig {
	/// Independently simulated groups.
	pub sub_rigs: Vec<SubRig>,
	/// Gravity vector.
	pub gravity: RigVector,
	/// Wind vector.
	pub wind: RigVector,
}

/// Engine-side 2D vector (lowercase components).
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RigVector {
	/// Horizontal component.
	pub x: f32,
	/// Vertical component.
	pub y: f32,
}

/// One sub-rig: inputs, outputs, particles, normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SubRig {
	/// Parameter inputs.
	pub input: Vec<RigInput>,
	/// Parameter outputs.
	pub output: Vec<RigOutput>,
	/// Pendulum particles.
	pub particles: Vec<RigParticle>,
	/// Input normalization ranges.
	pub normalization: RigNormalization,
}

/// Which component of the particle motion a parameter binds to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i32")]
pub enum SourceComponent {
	/// Horizontal translation.
	#[default]
	X,
	/// Vertical translation.
	Y,
	/// Rotation.
	Angle,
}

impl SourceComponent {
	/// physics3 `Type` string.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::X => "X",
			Self::Y => "Y",
			Self::Angle => "Angle",
		}
	}
}

impl TryFrom<i32> for SourceComponent {
	type Error = String;

	fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
		match value {
			0 => Ok(Self::X),
			1 => Ok(Self::Y),
			2 => Ok(Self::Angle),
			other => Err(format!("unknown physics source component {other}")),
		}
	}
}

/// Rig input entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RigInput {
	/// Source parameter id.
	pub source_id: String,
	/// Influence weight.
	pub weight: f32,
	/// Bound motion component.
	pub source_component: SourceComponent,
	/// Whether the input is mirrored.
	pub is_inverted: bool,
}

/// Rig output entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RigOutput {
	/// Destination parameter id.
	pub destination_id: String,
	/// Particle the output samples.
	pub particle_index: i32,
	/// Angle scale.
	pub angle_scale: f32,
	/// Influence weight.
	pub weight: f32,
	/// Bound motion component.
	pub source_component: SourceComponent,
	/// Whether the output is mirrored.
	pub is_inverted: bool,
}

/// Rig particle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RigParticle {
	/// Rest position.
	pub initial_position: RigVector,
	/// Mobility factor.
	pub mobility: f32,
	/// Delay factor.
	pub delay: f32,
	/// Acceleration factor.
	pub acceleration: f32,
	/// Pendulum radius.
	pub radius: f32,
}

/// Normalization ranges for one sub-rig.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RigNormalization {
	/// Translation range.
	pub position: NormalizationRange,
	/// Angle range.
	pub angle: NormalizationRange,
}

/// `Minimum`/`Default`/`Maximum` triple, shared by the input and output schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct NormalizationRange {
	/// Lower bound.
	pub minimum: f32,
	/// Rest value.
	pub default: f32,
	/// Upper bound.
	pub maximum: f32,
}

/// `physics3.json` document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Physics3Json {
	/// Format version, always 3.
	pub version: u32,
	/// Aggregate counts and forces.
	pub meta: Physics3Meta,
	/// One block per sub-rig.
	pub physics_settings: Vec<PhysicsSetting>,
}

/// physics3 `Meta` block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Physics3Meta {
	/// Number of sub-rigs.
	pub physics_setting_count: usize,
	/// Inputs across all sub-rigs.
	pub total_input_count: usize,
	/// Outputs across all sub-rigs.
	pub total_output_count: usize,
	/// Particles across all sub-rigs.
	pub vertex_count: usize,
	/// Gravity and wind.
	pub effective_forces: EffectiveForces,
	/// Synthetic display names.
	pub physics_dictionary: Vec<PhysicsDictionaryEntry>,
}

/// Global forces.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EffectiveForces {
	/// Gravity vector.
	pub gravity: Vector2,
	/// Wind vector.
	pub wind: Vector2,
}

/// physics3 vector (`X`/`Y`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vector2 {
	/// Horizontal component.
	pub x: f32,
	/// Vertical component.
	pub y: f32,
}

impl From<RigVector> for Vector2 {
	fn from(value: RigVector) -> Self {
		Self { x: value.x, y: value.y }
	}
}

/// Dictionary entry pairing a setting id with its display name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhysicsDictionaryEntry {
	/// `PhysicsSetting{n}`.
	pub id: String,
	/// `Dummy{n}`.
	pub name: String,
}

/// One converted sub-rig.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhysicsSetting {
	/// `PhysicsSetting{n}`, 1-based.
	pub id: String,
	/// Converted inputs.
	pub input: Vec<PhysicsInput>,
	/// Converted outputs.
	pub output: Vec<PhysicsOutput>,
	/// Converted particles.
	pub vertices: Vec<PhysicsVertex>,
	/// Normalization ranges.
	pub normalization: PhysicsNormalization,
}

/// Parameter reference inside an input or output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterTarget {
	/// Target kind, always `Parameter`.
	pub target: &'static str,
	/// Parameter id.
	pub id: String,
}

/// Converted input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhysicsInput {
	/// Source parameter.
	pub source: ParameterTarget,
	/// Influence weight.
	pub weight: f32,
	/// `X`, `Y` or `Angle`.
	#[serde(rename = "Type")]
	pub kind: &'static str,
	/// Mirror flag.
	pub reflect: bool,
}

/// Converted output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhysicsOutput {
	/// Destination parameter.
	pub destination: ParameterTarget,
	/// Sampled particle.
	pub vertex_index: i32,
	/// Angle scale.
	pub scale: f32,
	/// Influence weight.
	pub weight: f32,
	/// `X`, `Y` or `Angle`.
	#[serde(rename = "Type")]
	pub kind: &'static str,
	/// Mirror flag.
	pub reflect: bool,
}

/// Converted particle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhysicsVertex {
	/// Rest position.
	pub position: Vector2,
	/// Mobility factor.
	pub mobility: f32,
	/// Delay factor.
	pub delay: f32,
	/// Acceleration factor.
	pub acceleration: f32,
	/// Pendulum radius.
	pub radius: f32,
}

/// Converted normalization block.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhysicsNormalization {
	/// Translation range.
	pub position: NormalizationRange,
	/// Angle range.
	pub angle: NormalizationRange,
}

const PARAMETER_TARGET: &str = "Parameter";

impl Physics3Json {
	/// Re-shape a decoded rig into the physics3 schema.
	pub fn from_rig(rig: &PhysicsRig) -> Self {
		let physics_settings: Vec<PhysicsSetting> = rig.sub_rigs.iter().enumerate().map(|(idx, sub)| convert_sub_rig(idx + 1, sub)).collect();

		let physics_dictionary = (1..=physics_settings.len())
			.map(|n| PhysicsDictionaryEntry {
				id: setting_id(n),
				name: format!("Dummy{n}"),
			})
			.collect();

		Self {
			version: 3,
			meta: Physics3Meta {
				physics_setting_count: rig.sub_rigs.len(),
				total_input_count: rig.sub_rigs.iter().map(|sub| sub.input.len()).sum(),
				total_output_count: rig.sub_rigs.iter().map(|sub| sub.output.len()).sum(),
				vertex_count: rig.sub_rigs.iter().map(|sub| sub.particles.len()).sum(),
				effective_forces: EffectiveForces {
					gravity: rig.gravity.into(),
					wind: rig.wind.into(),
				},
				physics_dictionary,
			},
			physics_settings,
		}
	}
}

fn setting_id(n: usize) -> String {
	format!("PhysicsSetting{n}")
}

fn convert_sub_rig(n: usize, sub: &SubRig) -> PhysicsSetting {
	PhysicsSetting {
		id: setting_id(n),
		input: sub
			.input
			.iter()
			.map(|item| PhysicsInput {
				source: ParameterTarget {
					target: PARAMETER_TARGET,
					id: item.source_id.clone(),
				},
				weight: item.weight,
				kind: item.source_component.as_str(),
				reflect: item.is_inverted,
			})
			.collect(),
		output: sub
			.output
			.iter()
			.map(|item| PhysicsOutput {
				destination: ParameterTarget {
					target: PARAMETER_TARGET,
					id: item.destination_id.clone(),
				},
				vertex_index: item.particle_index,
				scale: item.angle_scale,
				weight: item.weight,
				kind: item.source_component.as_str(),
				reflect: item.is_inverted,
			})
			.collect(),
		vertices: sub
			.particles
			.iter()
			.map(|item| PhysicsVertex {
				position: item.initial_position.into(),
				mobility: item.mobility,
				delay: item.delay,
				acceleration: item.acceleration,
				radius: item.radius,
			})
			.collect(),
		normalization: PhysicsNormalization {
			position: sub.normalization.position,
			angle: sub.normalization.angle,
		},
	}
}
