use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use cubismex_testkit::{fixture_path as shared_fixture_path, target_dir as workspace_target_dir};

static CUBISMEX_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_path(name: &str) -> PathBuf {
	shared_fixture_path(name)
}

pub(crate) fn session_fixture() -> String {
	fixture_path("live2d_session.json").to_string_lossy().into_owned()
}

pub(crate) fn run_cubismex(args: &[&str]) -> Output {
	Command::new(cubismex_bin()).args(args).output().expect("cubismex command executes")
}

pub(crate) fn run_cubismex_json(args: &[&str]) -> serde_json::Value {
	let output = run_cubismex(args);
	assert!(
		output.status.success(),
		"cubismex command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn cubismex_bin() -> &'static PathBuf {
	CUBISMEX_BIN.get_or_init(resolve_cubismex_bin)
}

fn resolve_cubismex_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_cubismex") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "cubismex.exe" } else { "cubismex" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "cubismex"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build cubismex binary at {}", bin.display());

	bin
}
