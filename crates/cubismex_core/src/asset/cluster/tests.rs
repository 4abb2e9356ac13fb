use super::{ClusterMode, base_path, cluster_models, find_model_roots, matches_key};
use crate::asset::test_support::{bundle, mesh, mono, r, script, session, texture};
use crate::asset::{AssetError, ObjectId, RecordKind, Session, WeakRef};

fn id(path_id: i64) -> ObjectId {
	ObjectId::new(0, path_id)
}

/// Session with moc roots at `roots[i]` (path ids 10, 11, ..) and extra textures at `others[j]` (path ids 20, 21, ..).
fn layout(roots: &[&str], others: &[&str]) -> Session {
	let mut objects: Vec<(i64, RecordKind)> = vec![(1, script("CubismMoc"))];
	let mut preload = Vec::new();
	let mut entries = Vec::new();

	for (idx, path) in roots.iter().enumerate() {
		let path_id = 10 + idx as i64;
		objects.push((path_id, mono("moc", WeakRef::NULL, r(1), None)));
		entries.push((*path, preload.len() as i32, 1));
		preload.push(path_id);
	}
	for (idx, path) in others.iter().enumerate() {
		let path_id = 20 + idx as i64;
		objects.push((path_id, texture("tex")));
		entries.push((*path, preload.len() as i32, 1));
		preload.push(path_id);
	}
	objects.push((100, bundle(&preload, &entries)));

	session(vec![("bundle", objects)])
}

#[test]
fn distinct_directories_use_base_path_mode() {
	let session = layout(&["a/m1/m1.model3", "a/m2/m2.model3"], &["a/m1/tex.png", "a/m2/tex.png", "b/other.png"]);
	let roots = find_model_roots(&session);
	assert_eq!(roots, vec![id(10), id(11)]);

	let plan = cluster_models(&session, &roots).expect("clusters");
	assert_eq!(plan.mode, ClusterMode::BasePath);
	assert_eq!(plan.clusters.len(), 2);
	assert_eq!(plan.clusters[0].model_name, "m1");
	assert_eq!(plan.clusters[0].dest_dir, "a/m1");
	assert_eq!(plan.clusters[0].members, vec![id(10), id(20)]);
	assert_eq!(plan.clusters[1].members, vec![id(11), id(21)]);
	assert_eq!(plan.unassigned, 1);
}

#[test]
fn shared_directory_switches_to_full_path_mode() {
	let session = layout(&["a/x.model3", "a/y.model3"], &["a/x.model3", "a/other.png"]);
	let plan = cluster_models(&session, &find_model_roots(&session)).expect("clusters");

	assert_eq!(plan.mode, ClusterMode::FullPath);
	assert_eq!(plan.clusters[0].key.as_ref(), "a/x.model3");
	assert_eq!(plan.clusters[0].model_name, "x");
	assert_eq!(plan.clusters[0].dest_dir, "a/x");
	assert_eq!(plan.clusters[0].members, vec![id(10), id(20)]);
	assert_eq!(plan.clusters[1].model_name, "y");
	assert_eq!(plan.clusters[1].members, vec![id(11)]);
	assert_eq!(plan.unassigned, 1);
}

#[test]
fn substring_directory_names_do_not_steal_members() {
	let session = layout(&["chars/miku/miku.model3", "chars/mikudayo/m.model3"], &["chars/mikudayo/tex.png"]);
	let plan = cluster_models(&session, &find_model_roots(&session)).expect("clusters");

	assert_eq!(plan.clusters[0].members, vec![id(10)]);
	assert_eq!(plan.clusters[1].members, vec![id(11), id(20)]);
}

#[test]
fn pathless_roots_are_skipped_but_others_proceed() {
	let session = layout(&["a/m1/m1.model3"], &[]);
	let roots = vec![id(10), id(55)];

	let plan = cluster_models(&session, &roots).expect("partial success");
	assert_eq!(plan.pathless_roots, vec![id(55)]);
	assert_eq!(plan.clusters.len(), 1);
}

#[test]
fn empty_inputs_are_terminal_errors() {
	let session = layout(&[], &["a/tex.png"]);
	assert!(matches!(cluster_models(&session, &[]), Err(AssetError::NoModelRoots)));
	assert!(matches!(cluster_models(&session, &[id(55)]), Err(AssetError::NoModelContainers)));
}

#[test]
fn root_without_slash_uses_whole_path() {
	assert_eq!(base_path("model.model3"), "model.model3");
	assert_eq!(base_path("a/b/c.png"), "a/b");

	let session = session(vec![(
		"bundle",
		vec![
			(1, script("CubismMoc")),
			(10, mono("moc", WeakRef::NULL, r(1), None)),
			(11, mesh("m")),
			(100, bundle(&[10, 11], &[("solo", 0, 2)])),
		],
	)]);
	let plan = cluster_models(&session, &find_model_roots(&session)).expect("clusters");
	assert_eq!(plan.clusters[0].model_name, "solo");
	assert_eq!(plan.clusters[0].members.len(), 2);
}

#[test]
fn key_match_requires_whole_segment() {
	assert!(matches_key("a/m1/tex.png", "a/m1"));
	assert!(!matches_key("a/m10/tex.png", "a/m1"));
	assert!(!matches_key("b/tex.png", "a/m1"));
}
