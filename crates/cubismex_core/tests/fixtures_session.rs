#![allow(missing_docs)]

use cubismex::asset::{Compression, Hierarchy, ObjectId, Session, WeakRef, container_entries, top_ancestor};
use cubismex_testkit::{fixture_path, read_fixture_json, write_zstd_fixture};

const FIXTURE: &str = "live2d_session.json";

fn open() -> Session {
	Session::open(fixture_path(FIXTURE)).expect("fixture opens")
}

#[test]
fn fixture_loads_both_files_and_resolves_cross_file_refs() {
	let session = open();

	assert_eq!(session.compression, Compression::None);
	assert_eq!(session.files.len(), 2);
	assert_eq!(session.file_name(1), Some("resources.assets"));

	let texture = session.resolve(WeakRef::new(1, 5)).expect("cross-file texture resolves");
	assert_eq!(texture.kind_name(), "Texture2D");
	assert!(session.resolve(WeakRef::new(1, 404)).is_none());
	assert_eq!(session.get(ObjectId::new(0, 70)).map(|item| item.kind_name()), Some("Other"));
}

#[test]
fn object_table_holds_every_dumped_record() {
	let session = open();
	let dump = read_fixture_json(FIXTURE);
	let files = dump["files"].as_array().expect("dump lists files");

	let names: Vec<&str> = files.iter().map(|file| file["name"].as_str().expect("file name")).collect();
	assert_eq!(names, vec!["live2d.bundle", "resources.assets"]);
	let dumped: usize = files.iter().map(|file| file["objects"].as_array().expect("objects").len()).sum();
	assert_eq!(dumped, 43);
	assert_eq!(session.table().len(), dumped);
}

#[test]
fn container_index_covers_bundle_and_resource_entries() {
	let session = open();
	let containers = session.containers();

	assert_eq!(containers.len(), 18 + 5 + 1);
	assert_eq!(containers.path_of(ObjectId::new(0, 10)), Some("live2d/hiyori/hiyori.model3"));
	assert_eq!(containers.path_of(ObjectId::new(1, 5)), Some("live2d/mark/mark.model3"));
	assert_eq!(containers.path_of(ObjectId::new(1, 9)), Some("ui/icon.png"));
	assert_eq!(containers.path_of(ObjectId::new(0, 21)), None);
	assert!(containers.iter().all(|(_, path)| !path.starts_with("live2d/broken")));

	let bundle = session.get(ObjectId::new(0, 100)).expect("bundle present");
	let entries = container_entries(session.table(), bundle);
	assert_eq!(entries.skipped.len(), 1);
	assert_eq!(entries.skipped[0].path.as_ref(), "live2d/broken/broken.model3");
}

#[test]
fn zstd_dump_opens_like_plain_json() {
	let dir = tempdir();
	let packed = write_zstd_fixture(FIXTURE, &dir);

	let session = Session::open(&packed).expect("compressed fixture opens");
	assert_eq!(session.compression, Compression::Zstd);
	assert_eq!(session.table().len(), open().table().len());
	let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn hierarchy_places_both_models_under_bundle_root() {
	let session = open();
	let tree = Hierarchy::build(&session);

	assert_eq!(tree.roots().len(), 1);
	assert_eq!(tree.roots()[0].name.as_ref(), "live2d.bundle");
	let tops: Vec<&str> = tree.roots()[0].children.iter().map(|node| tree.node(*node).name.as_ref()).collect();
	assert_eq!(tops, vec!["hiyori", "mark"]);
	assert_eq!(tree.len(), 9);
	assert!(tree.rejected().is_empty());

	let arm = tree.node_for_object(ObjectId::new(0, 37)).expect("mesh attached");
	assert_eq!(tree.node(arm).name.as_ref(), "PartArmA");

	let candidates: Vec<&str> = tree.split_candidates(&[]).iter().map(|node| tree.node(*node).name.as_ref()).collect();
	assert_eq!(candidates, vec!["hiyori"]);

	assert_eq!(top_ancestor(&session, ObjectId::new(0, 34)).expect("walk succeeds"), ObjectId::new(0, 20));
}

fn tempdir() -> std::path::PathBuf {
	let dir = cubismex_testkit::target_dir().join("test-tmp").join(format!("zstd-{}", std::process::id()));
	std::fs::create_dir_all(&dir).expect("temp dir creates");
	dir
}
