use cucumber::then;
use reqwest::StatusCode;
use speculoos::prelude::*;

use crate::state::TestWorld;

#[then(regex = r#"^the response is (\d{3})$"#)]
fn response_status_is(world: &mut TestWorld, status: String) {
    let status: u16 = status.parse().expect("numeric status code");
    let expected = StatusCode::from_u16(status).expect("valid status code");
    assert_that(&world.status_code).is_equal_to(Some(expected));
}

#[then(regex = r#"^the response contains '(.*)'$"#)]
fn response_contains(world: &mut TestWorld, text: String) {
    assert_that(&world.body.as_deref().unwrap_or_default()).contains(text.as_str());
}

#[then(regex = r#"^the response does not contain '(.*)'$"#)]
fn response_does_not_contain(world: &mut TestWorld, text: String) {
    assert_that(&world.body.as_deref().unwrap_or_default()).does_not_contain(text.as_str());
}

#[then(regex = r#"^the json field "(\S+)" is "(.*)"$"#)]
fn json_field_is(world: &mut TestWorld, field: String, value: String) {
    let json = world.json();
    let actual = match &json[field.as_str()] {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    assert_that(&actual).is_equal_to(value);
}
