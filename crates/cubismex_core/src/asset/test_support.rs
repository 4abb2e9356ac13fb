use crate::asset::{
	AssetBundle, BundleEntry, GameObject, MeshComponent, MonoBehaviour, MonoScript, NamedRecord, RecordKind, Session, SessionBuilder, Texture2D, Transform,
	WeakRef,
};

pub(crate) fn r(path_id: i64) -> WeakRef {
	WeakRef::new(0, path_id)
}

pub(crate) fn session(files: Vec<(&str, Vec<(i64, RecordKind)>)>) -> Session {
	let mut builder = SessionBuilder::new();
	for (name, objects) in files {
		builder.add_file(name, objects);
	}
	builder.finish()
}

pub(crate) fn game_object(name: &str, components: &[WeakRef]) -> RecordKind {
	RecordKind::GameObject(GameObject {
		name: name.to_owned(),
		components: components.to_vec(),
	})
}

pub(crate) fn transform(game_object: WeakRef, father: WeakRef) -> RecordKind {
	RecordKind::Transform(Transform {
		game_object,
		father,
	})
}

pub(crate) fn mesh_filter(game_object: WeakRef, mesh: WeakRef) -> RecordKind {
	RecordKind::MeshFilter(MeshComponent { game_object, mesh })
}

pub(crate) fn mesh(name: &str) -> RecordKind {
	RecordKind::Mesh(NamedRecord { name: name.to_owned() })
}

pub(crate) fn script(class_name: &str) -> RecordKind {
	RecordKind::MonoScript(MonoScript {
		class_name: class_name.to_owned(),
	})
}

pub(crate) fn mono(name: &str, game_object: WeakRef, script: WeakRef, data: Option<serde_json::Value>) -> RecordKind {
	RecordKind::MonoBehaviour(MonoBehaviour {
		name: name.to_owned(),
		game_object,
		script,
		raw: Vec::new(),
		data,
	})
}

pub(crate) fn texture(name: &str) -> RecordKind {
	RecordKind::Texture2D(Texture2D {
		name: name.to_owned(),
		png: vec![0x89, b'P', b'N', b'G'],
	})
}

pub(crate) fn bundle(preload: &[i64], entries: &[(&str, i32, i32)]) -> RecordKind {
	RecordKind::AssetBundle(AssetBundle {
		name: "bundle".to_owned(),
		preload_table: preload.iter().map(|id| r(*id)).collect(),
		container: entries
			.iter()
			.map(|(path, index, size)| BundleEntry {
				path: (*path).to_owned(),
				preload_index: *index,
				preload_size: *size,
			})
			.collect(),
	})
}

/// Raw moc script record: game-object ref, enabled flag, script ref, name, payload.
pub(crate) fn moc_raw(name: &str, payload: &[u8]) -> Vec<u8> {
	let mut out = vec![0_u8; 28];
	out.extend_from_slice(&(name.len() as i32).to_le_bytes());
	out.extend_from_slice(name.as_bytes());
	while out.len() % 4 != 0 {
		out.push(0);
	}
	out.extend_from_slice(&(payload.len() as i32).to_le_bytes());
	out.extend_from_slice(payload);
	out
}

pub(crate) fn moc(script: WeakRef, payload: &[u8]) -> RecordKind {
	RecordKind::MonoBehaviour(MonoBehaviour {
		name: "moc".to_owned(),
		game_object: WeakRef::NULL,
		script,
		raw: moc_raw("moc", payload),
		data: None,
	})
}
