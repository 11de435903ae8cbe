use cucumber::{given, when};

use crate::state::{poetrydb_poem, TestWorld};

#[given(regex = r#"^PoetryDB has the poem "(.+)" by "(.+)"$"#)]
async fn poetrydb_has_poem(world: &mut TestWorld, title: String, author: String) {
    let poem = poetrydb_poem(&title, &author, &["The fog comes", "on little cat feet."]);
    let app = world.app();
    app.poetry_answers("title", &title.replace(' ', "%20"), serde_json::json!([poem.clone()]))
        .await;
    app.poetry_answers("author", &author.replace(' ', "%20"), serde_json::json!([poem]))
        .await;
}

#[given("PoetryDB finds nothing")]
async fn poetrydb_finds_nothing(world: &mut TestWorld) {
    world.app().poetry_finds_nothing().await;
}

#[when(regex = r#"^the user searches poems by (\S+) for "(.*)"$"#)]
async fn search(world: &mut TestWorld, criteria: String, query: String) {
    let path = format!("/welcome?criteria={criteria}&query={}", query.replace(' ', "+"));
    let resp = world.app().get(&path).await;
    world.status_code = Some(resp.status());
    world.body = Some(resp.text().await.expect("search body"));
}

#[when(regex = r#"^the user opens the poem "(.+)"$"#)]
async fn open_poem(world: &mut TestWorld, title: String) {
    let path = format!("/poem/{}", title.replace(' ', "%20"));
    let resp = world.app().get(&path).await;
    world.status_code = Some(resp.status());
    world.body = Some(resp.text().await.expect("poem body"));
}
