use serde::de::DeserializeOwned;

use crate::asset::bytes::Cursor;
use crate::asset::{AssetError, MonoBehaviour, Result};

mod expression;
mod model3;
mod motion3;

pub use expression::{BlendMode, Expression3Json, Expression3Parameter, ExpressionData, ExpressionParameter};
pub use model3::{ExpressionRef, FileReferences, Group, Model3Json, MotionFileRef, build_groups};
pub use motion3::{AnimationCurve, FadeMotionData, Motion3Curve, Motion3Json, Motion3Meta, Motion3UserData, ParameterBindings};

/// Script classes the exporter gives a role to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubismRole {
	/// Compiled model payload; marks a model root.
	Moc,
	/// Physics rig.
	PhysicsController,
	/// Expression record.
	ExpressionData,
	/// Precomputed fade-motion record.
	FadeMotionData,
	/// Marks a parameter as an eye-blink driver.
	EyeBlinkParameter,
	/// Marks a parameter as a lip-sync driver.
	MouthParameter,
}

impl CubismRole {
	/// Map a script class name to its role.
	pub fn from_class_name(name: &str) -> Option<Self> {
		match name {
			"CubismMoc" => Some(Self::Moc),
			"CubismPhysicsController" => Some(Self::PhysicsController),
			"CubismExpressionData" => Some(Self::ExpressionData),
			"CubismFadeMotionData" => Some(Self::FadeMotionData),
			"CubismEyeBlinkParameter" => Some(Self::EyeBlinkParameter),
			"CubismMouthParameter" => Some(Self::MouthParameter),
			_ => None,
		}
	}

	/// Script class name.
	pub fn class_name(self) -> &'static str {
		match self {
			Self::Moc => "CubismMoc",
			Self::PhysicsController => "CubismPhysicsController",
			Self::ExpressionData => "CubismExpressionData",
			Self::FadeMotionData => "CubismFadeMotionData",
			Self::EyeBlinkParameter => "CubismEyeBlinkParameter",
			Self::MouthParameter => "CubismMouthParameter",
		}
	}
}

/// Leading script-record header: game-object ref, enabled flag, script ref.
const MOC_HEADER_LEN: usize = 28;

/// Copy the moc payload out of a raw `CubismMoc` record.
pub fn extract_moc(raw: &[u8]) -> Result<Vec<u8>> {
	let mut cursor = Cursor::new(raw);
	cursor.skip(MOC_HEADER_LEN)?;
	let _name = cursor.read_aligned_bytes()?;
	Ok(cursor.read_len_prefixed()?.to_vec())
}

/// Deserialize a script record's type-tree body into a concrete schema.
///
/// A missing body or a schema mismatch both surface as `UnreadableRecord`.
pub fn read_script_data<T: DeserializeOwned>(item: &MonoBehaviour, role: CubismRole) -> Result<T> {
	let unreadable = || AssetError::UnreadableRecord {
		class: role.class_name(),
		name: item.name.clone(),
	};

	let Some(data) = &item.data else {
		return Err(unreadable());
	};
	serde_json::from_value(data.clone()).map_err(|err| {
		tracing::debug!(record = %item.name, error = %err, "type-tree body did not match schema");
		unreadable()
	})
}
