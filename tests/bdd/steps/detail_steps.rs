use cucumber::{then, when};

use crate::BoardWorld;
use crate::steps::common_steps::{last_json, run_td};

/// Bytes of a tiny image written for upload steps.
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 1, 2, 3, 4];

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when(expr = "I show the task {string}")]
async fn i_show_the_task(world: &mut BoardWorld, alias: String) {
    let id = world.task_id(&alias).to_string();
    run_td(world, &["--json", "show", &id]).await;
}

#[when(expr = "I edit the task {string} with memo {string}")]
async fn i_edit_the_task_with_memo(world: &mut BoardWorld, alias: String, memo: String) {
    let id = world.task_id(&alias).to_string();
    run_td(world, &["--json", "edit", &id, "--memo", &memo]).await;
}

#[when(expr = "I rename the task {string} to {string}")]
async fn i_rename_the_task(world: &mut BoardWorld, alias: String, name: String) {
    let id = world.task_id(&alias).to_string();
    run_td(world, &["--json", "edit", &id, "--name", &name]).await;
}

#[when(expr = "I attach an image to the task {string}")]
async fn i_attach_an_image(world: &mut BoardWorld, alias: String) {
    let id = world.task_id(&alias).to_string();
    let dir = tempfile::TempDir::new().expect("create temp dir");
    let path = dir.path().join("pill.png");
    std::fs::write(&path, PNG_BYTES).expect("write image file");
    let path_str = path.to_string_lossy().into_owned();
    // Keep the TempDir alive for the lifetime of the scenario.
    world.scratch_dir = Some(dir);
    run_td(world, &["--json", "edit", &id, "--image", &path_str]).await;
}

#[when(expr = "I attach a missing image file to the task {string}")]
async fn i_attach_a_missing_image(world: &mut BoardWorld, alias: String) {
    let id = world.task_id(&alias).to_string();
    run_td(world, &["edit", &id, "--image", "/nonexistent/pill.png"]).await;
}

#[when(expr = "I delete the task {string}")]
async fn i_delete_the_task(world: &mut BoardWorld, alias: String) {
    let id = world.task_id(&alias).to_string();
    run_td(world, &["--json", "delete", &id]).await;
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then(expr = "the task details show name {string}")]
async fn the_task_details_show_name(world: &mut BoardWorld, expected: String) {
    let json = last_json(world);
    assert_eq!(json["name"].as_str(), Some(expected.as_str()), "task: {json}");
}

#[then(expr = "the task details show memo {string}")]
async fn the_task_details_show_memo(world: &mut BoardWorld, expected: String) {
    let json = last_json(world);
    assert_eq!(json["memo"].as_str(), Some(expected.as_str()), "task: {json}");
}

#[then("the task details show no memo and no image")]
async fn the_task_details_show_no_memo(world: &mut BoardWorld) {
    let json = last_json(world);
    assert!(json["memo"].is_null(), "task: {json}");
    assert!(json["imageUrl"].is_null(), "task: {json}");
}

#[then("the task details show it is done")]
async fn the_task_details_show_done(world: &mut BoardWorld) {
    let json = last_json(world);
    assert_eq!(json["isCompleted"].as_bool(), Some(true), "task: {json}");
}

#[then("the task image can be downloaded")]
async fn the_task_image_can_be_downloaded(world: &mut BoardWorld) {
    let json = last_json(world);
    let url = json["imageUrl"]
        .as_str()
        .unwrap_or_else(|| panic!("task has no imageUrl: {json}"))
        .to_string();
    let resp = world
        .http_client
        .get(&url)
        .send()
        .await
        .unwrap_or_else(|e| panic!("GET {url} failed: {e}"));
    assert_eq!(resp.status().as_u16(), 200, "GET {url}");
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "image/png", "GET {url}");
    let bytes = resp.bytes().await.expect("read image body");
    assert_eq!(bytes.as_ref(), PNG_BYTES);
}
