use cucumber::{given, when};

use crate::state::{spawn_app, TestWorld};

#[given("the application is running")]
async fn application_is_running(world: &mut TestWorld) {
    world.app = Some(spawn_app().await);
}

#[when("the user requests a health check")]
async fn health_check(world: &mut TestWorld) {
    let resp = world.app().get("/api/health").await;
    world.status_code = Some(resp.status());
    world.body = Some(resp.text().await.expect("health check body"));
}
