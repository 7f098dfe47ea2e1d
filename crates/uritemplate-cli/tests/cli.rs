use assert_cmd::Command;

fn uritemplate() -> Command {
    Command::cargo_bin("uritemplate").unwrap()
}

#[test]
fn expand_with_set_bindings() {
    uritemplate()
        .args(["expand", "https://example.com/{id}", "--set", "id=42"])
        .assert()
        .success()
        .stdout("https://example.com/42\n");
}

#[test]
fn expand_with_json_bindings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vars.json");
    std::fs::write(
        &path,
        r#"{"segments": ["a", "b"], "page": 7, "skip": null}"#,
    )
    .unwrap();

    uritemplate()
        .args(["expand", "{/segments*}{?page,skip}"])
        .arg("--variables")
        .arg(&path)
        .assert()
        .success()
        .stdout("/a/b?page=7\n");
}

#[test]
fn set_overrides_json_bindings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vars.json");
    std::fs::write(&path, r#"{"id": "from-json"}"#).unwrap();

    uritemplate()
        .args(["expand", "{id}", "--set", "id=from-flag"])
        .arg("--variables")
        .arg(&path)
        .assert()
        .success()
        .stdout("from-flag\n");
}

#[test]
fn expand_reports_malformed_templates() {
    let assert = uritemplate()
        .args(["expand", "https://example.com/{}"])
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Empty Variable Name"), "stderr: {stderr}");
    assert!(stderr.contains("21"), "stderr: {stderr}");
}

#[test]
fn check_accepts_valid_files_and_rejects_invalid_ones() {
    let dir = tempfile::tempdir().unwrap();

    let good = dir.path().join("good.txt");
    std::fs::write(&good, "https://example.com/{id}\n{/list*}{?q}\n\n").unwrap();
    uritemplate().arg("check").arg(&good).assert().success();

    let bad = dir.path().join("bad.txt");
    std::fs::write(&bad, "https://example.com/{id}\n{unterminated\n").unwrap();
    let assert = uritemplate().arg("check").arg(&bad).assert().failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("bad.txt:2:"), "stderr: {stderr}");
    assert!(stderr.contains("Unterminated Expression"), "stderr: {stderr}");
}

#[test]
fn variables_lists_names_in_order() {
    uritemplate()
        .args(["variables", "{id}/x{?id,page}"])
        .assert()
        .success()
        .stdout("id\nid\npage\n");
}
