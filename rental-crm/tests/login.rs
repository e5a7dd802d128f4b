mod common;

use rental_security::{AuthenticatedUser, SessionAttributes, AUTHENTICATION_EXCEPTION};
use serde_json::Value;

use common::setup;

#[tokio::test]
async fn user_lands_on_user_home() {
    let (app, _) = setup().await;
    app.get("/login/success")
        .as_user(AuthenticatedUser::new("alice", ["USER"]))
        .send()
        .await
        .assert_redirect("/userHome");
}

#[tokio::test]
async fn manager_and_admin_homes_are_relative() {
    let (app, _) = setup().await;
    app.get("/login/success")
        .as_user(AuthenticatedUser::new("bob", ["ROLE_MANAGER"]))
        .send()
        .await
        .assert_redirect("managerHome");
    app.get("/login/success")
        .as_user(AuthenticatedUser::new("carol", ["ADMIN"]))
        .send()
        .await
        .assert_redirect("adminHome");
}

#[tokio::test]
async fn user_role_takes_priority() {
    let (app, _) = setup().await;
    app.get("/login/success")
        .as_user(AuthenticatedUser::new("dave", ["ADMIN", "USER"]))
        .send()
        .await
        .assert_redirect("/userHome");
}

#[tokio::test]
async fn forwarded_headers_are_honoured() {
    let (app, _) = setup().await;
    app.get("/login/success")
        .header("x-authenticated-user", "erin")
        .header("x-authenticated-roles", "MANAGER")
        .send()
        .await
        .assert_redirect("managerHome");
}

#[tokio::test]
async fn role_without_home_is_server_error() {
    let (app, _) = setup().await;
    app.get("/login/success")
        .as_user(AuthenticatedUser::new("frank", ["GUEST"]))
        .send()
        .await
        .assert_status(rental_core::http::StatusCode::INTERNAL_SERVER_ERROR)
        .assert_json_path("error", "No home page for the granted roles");
}

#[tokio::test]
async fn anonymous_is_unauthorized() {
    let (app, _) = setup().await;
    app.get("/login/success").send().await.assert_unauthorized();
}

#[tokio::test]
async fn previous_failure_is_cleared_from_session() {
    let (app, state) = setup().await;
    let id = {
        let mut session = state.sessions.create();
        session.set_attribute(AUTHENTICATION_EXCEPTION, Value::from("Bad credentials"));
        session.id().to_string()
    };

    app.get("/login/success")
        .session(&id)
        .as_user(AuthenticatedUser::new("gina", ["USER"]))
        .send()
        .await
        .assert_redirect("/userHome");

    let session = state.sessions.get(&id).unwrap();
    assert!(session.attribute(AUTHENTICATION_EXCEPTION).is_none());
}

#[tokio::test]
async fn unknown_session_cookie_is_ignored() {
    let (app, state) = setup().await;
    app.get("/login/success")
        .session("does-not-exist")
        .as_user(AuthenticatedUser::new("hank", ["ADMIN"]))
        .send()
        .await
        .assert_redirect("adminHome");
    assert!(state.sessions.is_empty());
}

fn session_from_set_cookie(resp: &rental_test::TestResponse) -> String {
    let cookie = resp.header("set-cookie").expect("no Set-Cookie header");
    assert!(cookie.contains("HttpOnly"));
    cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("SESSION="))
        .expect("no SESSION cookie")
        .to_string()
}

#[tokio::test]
async fn failure_opens_session_and_redirects_to_login() {
    let (app, state) = setup().await;
    let resp = app
        .get("/login/failure?reason=Bad%20credentials")
        .send()
        .await
        .assert_redirect("/login?error");
    let id = session_from_set_cookie(&resp);

    assert_eq!(state.sessions.len(), 1);
    assert_eq!(
        state.sessions.get(&id).unwrap().attribute(AUTHENTICATION_EXCEPTION),
        Some(&Value::from("Bad credentials"))
    );
}

#[tokio::test]
async fn failure_reuses_existing_session() {
    let (app, state) = setup().await;
    let id = state.sessions.create().id().to_string();

    let resp = app
        .get("/login/failure?reason=Account%20locked")
        .session(&id)
        .send()
        .await
        .assert_redirect("/login?error");

    assert_eq!(session_from_set_cookie(&resp), id);
    assert_eq!(state.sessions.len(), 1);
    assert_eq!(
        state.sessions.get(&id).unwrap().attribute(AUTHENTICATION_EXCEPTION),
        Some(&Value::from("Account locked"))
    );
}

#[tokio::test]
async fn failure_then_success_over_http_clears_reason() {
    let (app, state) = setup().await;
    let resp = app.get("/login/failure").send().await.assert_redirect("/login?error");
    let id = session_from_set_cookie(&resp);
    assert_eq!(
        state.sessions.get(&id).unwrap().attribute(AUTHENTICATION_EXCEPTION),
        Some(&Value::from("Bad credentials"))
    );

    app.get("/login/success")
        .session(&id)
        .as_user(AuthenticatedUser::new("ivy", ["ROLE_MANAGER"]))
        .send()
        .await
        .assert_redirect("managerHome");

    assert!(state
        .sessions
        .get(&id)
        .unwrap()
        .attribute(AUTHENTICATION_EXCEPTION)
        .is_none());
}
