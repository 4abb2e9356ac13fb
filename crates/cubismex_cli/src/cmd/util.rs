use cubismex::asset::{ObjectId, Session};

/// Print a payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to render json: {err}"),
	}
}

/// Render an object identity as `file:path_id`.
pub(crate) fn id_label(id: ObjectId) -> String {
	format!("{}:{}", id.file, id.path_id)
}

/// Source file name of an identity, or `-` when out of range.
pub(crate) fn file_label(session: &Session, id: ObjectId) -> &str {
	session.file_name(id.file).unwrap_or("-")
}
