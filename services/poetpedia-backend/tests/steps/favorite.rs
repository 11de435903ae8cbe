use cucumber::{given, when};
use poetpedia_common::FAVORITE_PATH;
use serde_json::json;

use crate::state::TestWorld;

async fn toggle(world: &mut TestWorld, id: &str, title: &str) {
    let request = json!({
        "title": title,
        "author": "Carl Sandburg",
        "lines": "The fog comes\non little cat feet.",
        "id": id,
    });
    let resp = world.app().post_json(FAVORITE_PATH, &request).await;
    world.status_code = Some(resp.status());
    world.body = Some(resp.text().await.expect("favorite body"));
}

#[given(regex = r#"^the poem "(.+)" with id "(\S+)" is marked favorite$"#)]
async fn poem_is_favorite(world: &mut TestWorld, title: String, id: String) {
    toggle(world, &id, &title).await;
}

#[when(regex = r#"^the user toggles the poem "(.+)" with id "(\S+)"$"#)]
async fn user_toggles(world: &mut TestWorld, title: String, id: String) {
    toggle(world, &id, &title).await;
}

#[when("the user sends a favorite request with a blank title")]
async fn user_sends_blank_title(world: &mut TestWorld) {
    toggle(world, "1", "   ").await;
}

#[when("the user lists favorites")]
async fn user_lists_favorites(world: &mut TestWorld) {
    let resp = world.app().get("/api/poems/favorites").await;
    world.status_code = Some(resp.status());
    world.body = Some(resp.text().await.expect("favorites body"));
}
