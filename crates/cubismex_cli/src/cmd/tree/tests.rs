use crate::cmd::test_support::{run_cubismex_json, session_fixture};

#[test]
fn tree_json_nests_game_objects_under_file_root() {
	let fixture = session_fixture();
	let json = run_cubismex_json(&["tree", &fixture, "--json"]);

	assert_eq!(json["nodes"], 9);
	assert_eq!(json["rejected"], serde_json::json!([]));
	let roots = json["roots"].as_array().expect("roots array");
	assert_eq!(roots.len(), 1);
	assert_eq!(roots[0]["name"], "live2d.bundle");

	let hiyori = &roots[0]["children"][0];
	assert_eq!(hiyori["name"], "hiyori");
	let children: Vec<&str> = hiyori["children"]
		.as_array()
		.expect("children array")
		.iter()
		.map(|child| child["name"].as_str().expect("name"))
		.collect();
	assert_eq!(children, vec!["Parameters", "Parts"]);

	let arm = &hiyori["children"][1]["children"][0];
	assert_eq!(arm["name"], "PartArmA");
	assert_eq!(arm["has_mesh_component"], true);
	assert_eq!(arm["meshes"], serde_json::json!(["0:37"]));
}

#[test]
fn tree_split_lists_mesh_bearing_top_level_nodes() {
	let fixture = session_fixture();
	let json = run_cubismex_json(&["tree", &fixture, "--split", "--json"]);
	let names: Vec<&str> = json["candidates"]
		.as_array()
		.expect("candidates array")
		.iter()
		.map(|node| node["name"].as_str().expect("name"))
		.collect();
	assert_eq!(names, vec!["hiyori"]);

	let filtered = run_cubismex_json(&["tree", &fixture, "--split", "--name", "MARK", "--json"]);
	assert_eq!(filtered["candidates"], serde_json::json!([]));
}
