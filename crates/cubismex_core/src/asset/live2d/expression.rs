use serde::{Deserialize, Serialize};

/// Decoded `CubismExpressionData` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ExpressionData {
	/// Fade-in time in seconds.
	pub fade_in_time: f32,
	/// Fade-out time in seconds.
	pub fade_out_time: f32,
	/// Parameter overrides.
	pub parameters: Vec<ExpressionParameter>,
}

/// One parameter override inside an expression.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ExpressionParameter {
	/// Parameter id.
	pub id: String,
	/// Override value.
	pub value: f32,
	/// How the value combines with the current one.
	pub blend: BlendMode,
}

/// Expression blend mode, stored as an integer by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i32")]
pub enum BlendMode {
	/// Add to the current value.
	#[default]
	Add,
	/// Multiply the current value.
	Multiply,
	/// Replace the current value.
	Overwrite,
}

impl BlendMode {
	/// exp3 `Blend` string.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Add => "Add",
			Self::Multiply => "Multiply",
			Self::Overwrite => "Overwrite",
		}
	}
}

impl TryFrom<i32> for BlendMode {
	type Error = String;

	fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
		match value {
			0 => Ok(Self::Overwrite),
			1 => Ok(Self::Add),
			2 => Ok(Self::Multiply),
			other => Err(format!("unknown expression blend {other}")),
		}
	}
}

/// `exp3.json` document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Expression3Json {
	/// Always `Live2D Expression`.
	#[serde(rename = "Type")]
	pub kind: &'static str,
	/// Fade-in time in seconds.
	pub fade_in_time: f32,
	/// Fade-out time in seconds.
	pub fade_out_time: f32,
	/// Parameter overrides.
	pub parameters: Vec<Expression3Parameter>,
}

/// exp3 parameter entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Expression3Parameter {
	/// Parameter id.
	pub id: String,
	/// Override value.
	pub value: f32,
	/// `Add`, `Multiply` or `Overwrite`.
	pub blend: &'static str,
}

impl Expression3Json {
	/// Convert a decoded expression record.
	pub fn from_data(data: &ExpressionData) -> Self {
		Self {
			kind: "Live2D Expression",
			fade_in_time: data.fade_in_time,
			fade_out_time: data.fade_out_time,
			parameters: data
				.parameters
				.iter()
				.map(|item| Expression3Parameter {
					id: item.id.clone(),
					value: item.value,
					blend: item.blend.as_str(),
				})
				.collect(),
		}
	}

	/// Expression name from its record name (`.exp3` removed).
	pub fn name_from_record(record_name: &str) -> String {
		record_name.replace(".exp3", "")
	}
}
