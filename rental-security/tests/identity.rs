use axum::http::Request;
use http_body_util::BodyExt;
use rental_core::http::{middleware, routing::get, Body, Json, Router, StatusCode};
use rental_security::{
    determine_target_url, forwarded_identity, AuthenticatedUser, IdentityHeaders, RoleBasedIdentity,
};
use serde_json::Value;
use tower::util::ServiceExt;

async fn whoami(user: AuthenticatedUser) -> Json<AuthenticatedUser> {
    Json(user)
}

fn app(headers: IdentityHeaders) -> Router {
    Router::new()
        .route("/me", get(whoami))
        .layer(middleware::from_fn_with_state(headers, forwarded_identity))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn missing_principal_is_unauthorized() {
    let router = Router::new().route("/me", get(whoami));
    let request = Request::builder().uri("/me").body(Body::empty()).unwrap();

    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn principal_from_extensions() {
    let router = Router::new().route("/me", get(whoami));
    let mut request = Request::builder().uri("/me").body(Body::empty()).unwrap();
    request
        .extensions_mut()
        .insert(AuthenticatedUser::new("alice", ["USER"]));

    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], "alice");
    assert_eq!(body["roles"][0], "USER");
}

#[tokio::test]
async fn forwarded_headers_become_principal() {
    let request = Request::builder()
        .uri("/me")
        .header("x-authenticated-user", "bob")
        .header("x-authenticated-roles", "ROLE_MANAGER, USER,")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(IdentityHeaders::default()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], "bob");
    assert_eq!(body["roles"], serde_json::json!(["ROLE_MANAGER", "USER"]));
}

#[tokio::test]
async fn forwarded_principal_without_roles() {
    let request = Request::builder()
        .uri("/me")
        .header("x-authenticated-user", "carol")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(IdentityHeaders::default()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"], serde_json::json!([]));
}

#[tokio::test]
async fn blank_forwarded_principal_is_ignored() {
    let request = Request::builder()
        .uri("/me")
        .header("x-authenticated-user", "   ")
        .header("x-authenticated-roles", "ADMIN")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app(IdentityHeaders::default()), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn custom_header_names() {
    let headers = IdentityHeaders {
        principal: "x-user".to_string(),
        roles: "x-roles".to_string(),
    };
    let request = Request::builder()
        .uri("/me")
        .header("x-user", "dave")
        .header("x-roles", "ADMIN")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(headers), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], "dave");
}

#[test]
fn prefixed_and_bare_labels_route_alike() {
    let prefixed = AuthenticatedUser::new("erin", ["ROLE_USER"]);
    let bare = AuthenticatedUser::new("erin", ["USER"]);
    assert_eq!(
        determine_target_url(RoleBasedIdentity::roles(&prefixed)),
        Ok("/userHome")
    );
    assert_eq!(
        determine_target_url(RoleBasedIdentity::roles(&prefixed)),
        determine_target_url(RoleBasedIdentity::roles(&bare))
    );
}
