//! Router Assembly

use std::sync::Arc;

use auth::AuthConfig;
use auth::handlers::AuthAppState;
use auth::middleware::{AuthMiddlewareState, with_session};
use auth::store::AccountRepository;
use axum::Router;
use phonebook::PhoneAppState;
use phonebook::store::PhoneRepository;

/// All `/user` routes. Everything except register, auth and logout sits
/// behind the session middleware.
pub fn build_router<A, P>(accounts: Arc<A>, phones: Arc<P>, config: Arc<AuthConfig>) -> Router
where
    A: AccountRepository + Clone + Send + Sync + 'static,
    P: PhoneRepository + Clone + Send + Sync + 'static,
{
    let auth_state = AuthAppState {
        repo: accounts.clone(),
        config: config.clone(),
    };
    let session = AuthMiddlewareState {
        repo: accounts,
        config,
    };

    let protected = auth::protected_router(auth_state.clone())
        .merge(phonebook::phonebook_router(PhoneAppState { repo: phones }));

    Router::new().nest(
        "/user",
        auth::public_router(auth_state).merge(with_session(protected, session)),
    )
}

#[cfg(test)]
mod tests {
    use auth::MemoryAuthRepository;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use phonebook::MemoryPhoneRepository;
    use platform::password::HashCost;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    struct TestApp {
        router: Router,
    }

    struct Reply {
        status: StatusCode,
        set_cookie: Option<String>,
        raw: String,
        json: Value,
    }

    impl TestApp {
        fn new() -> Self {
            let config = AuthConfig::development().with_password_hashing(HashCost::testing(), None);
            Self {
                router: build_router(
                    Arc::new(MemoryAuthRepository::new()),
                    Arc::new(MemoryPhoneRepository::new()),
                    Arc::new(config),
                ),
            }
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            cookie: Option<&str>,
            body: Option<Value>,
        ) -> Reply {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(cookie) = cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            let body = match body {
                Some(value) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(serde_json::to_vec(&value).unwrap())
                }
                None => Body::empty(),
            };

            let response = self
                .router
                .clone()
                .oneshot(builder.body(body).unwrap())
                .await
                .unwrap();

            let status = response.status();
            let set_cookie = response
                .headers()
                .get(header::SET_COOKIE)
                .map(|v| v.to_str().unwrap().to_string());
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let raw = String::from_utf8(bytes.to_vec()).unwrap();
            let json = serde_json::from_str(&raw).unwrap_or(Value::Null);

            Reply {
                status,
                set_cookie,
                raw,
                json,
            }
        }

        async fn register(&self, login: &str, password: &str, name: &str) -> Reply {
            self.send(
                Method::POST,
                "/user/register",
                None,
                Some(json!({"login": login, "password": password, "name": name, "age": 30})),
            )
            .await
        }

        /// Returns the `SESSTOKEN=...` pair to send back as a Cookie header
        async fn sign_in(&self, login: &str, password: &str) -> String {
            let reply = self
                .send(
                    Method::POST,
                    "/user/auth",
                    None,
                    Some(json!({"login": login, "password": password})),
                )
                .await;
            assert_eq!(reply.status, StatusCode::OK);
            cookie_pair(&reply)
        }
    }

    fn cookie_pair(reply: &Reply) -> String {
        let header = reply.set_cookie.as_deref().unwrap();
        header.split(';').next().unwrap().trim().to_string()
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let app = TestApp::new();

        let reply = app.register("alice", "p@ss1", "Alice").await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.json["message"], "User registered successfully");

        let reply = app
            .send(
                Method::POST,
                "/user/auth",
                None,
                Some(json!({"login": "alice", "password": "p@ss1"})),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.json["message"], "Authentication successful");

        let header = reply.set_cookie.unwrap();
        assert!(header.starts_with("SESSTOKEN="));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("Path=/"));
    }

    #[tokio::test]
    async fn test_register_conflict_and_bad_credentials() {
        let app = TestApp::new();
        app.register("alice", "p@ss1", "Alice").await;

        let reply = app.register("alice", "other", "Impostor").await;
        assert_eq!(reply.status, StatusCode::CONFLICT);
        assert_eq!(reply.json["error"], "User with this login already exists");

        let reply = app
            .send(
                Method::POST,
                "/user/register",
                None,
                Some(json!({"login": "bob"})),
            )
            .await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);

        let wrong = app
            .send(
                Method::POST,
                "/user/auth",
                None,
                Some(json!({"login": "alice", "password": "wrong"})),
            )
            .await;
        let unknown = app
            .send(
                Method::POST,
                "/user/auth",
                None,
                Some(json!({"login": "nobody", "password": "wrong"})),
            )
            .await;
        assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.raw, unknown.raw);
        assert!(wrong.set_cookie.is_none());
    }

    #[tokio::test]
    async fn test_protected_routes_require_session() {
        let app = TestApp::new();

        for (method, uri) in [
            (Method::GET, "/user/phone"),
            (Method::GET, "/user/alice"),
            (Method::DELETE, "/user/phone/1"),
        ] {
            let reply = app.send(method, uri, None, None).await;
            assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
            assert_eq!(reply.json["error"], "Unauthorized");
        }

        let reply = app
            .send(
                Method::GET,
                "/user/phone",
                Some("SESSTOKEN=garbage-token"),
                None,
            )
            .await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
        assert_eq!(reply.json["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_phone_lifecycle() {
        let app = TestApp::new();
        app.register("alice", "p@ss1", "Alice").await;
        let cookie = app.sign_in("alice", "p@ss1").await;

        let reply = app
            .send(
                Method::POST,
                "/user/phone",
                Some(&cookie),
                Some(json!({"phone_number": "555-0100", "description": "office", "is_fax": false, "user_id": 99})),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.json["message"], "Phone added successfully");

        let reply = app
            .send(Method::GET, "/user/phone?q=0100", Some(&cookie), None)
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        let phones = reply.json.as_array().unwrap();
        assert_eq!(phones.len(), 1);
        assert_eq!(phones[0]["phone_number"], "555-0100");
        assert_eq!(phones[0]["user_id"], 1);
        let id = phones[0]["id"].as_i64().unwrap();

        let reply = app
            .send(
                Method::PUT,
                "/user/phone",
                Some(&cookie),
                Some(json!({"id": id, "phone_number": "555-0199", "description": "fax", "is_fax": true})),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.json["message"], "Phone updated successfully");

        let reply = app
            .send(
                Method::DELETE,
                &format!("/user/phone/{id}"),
                Some(&cookie),
                None,
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.json["message"], "Phone deleted successfully");

        let reply = app.send(Method::GET, "/user/phone", Some(&cookie), None).await;
        assert_eq!(reply.json, json!([]));
    }

    #[tokio::test]
    async fn test_other_users_phone_is_forbidden() {
        let app = TestApp::new();
        app.register("alice", "p@ss1", "Alice").await;
        app.register("bob", "hunter2", "Bob").await;
        let alice = app.sign_in("alice", "p@ss1").await;
        let bob = app.sign_in("bob", "hunter2").await;

        app.send(
            Method::POST,
            "/user/phone",
            Some(&alice),
            Some(json!({"phone_number": "555-0100", "description": "home"})),
        )
        .await;

        let reply = app
            .send(
                Method::PUT,
                "/user/phone",
                Some(&bob),
                Some(json!({"id": 1, "phone_number": "555-0666", "description": "mine"})),
            )
            .await;
        assert_eq!(reply.status, StatusCode::FORBIDDEN);
        assert_eq!(reply.json["error"], "Phone does not belong to user");

        let reply = app
            .send(Method::DELETE, "/user/phone/1", Some(&bob), None)
            .await;
        assert_eq!(reply.status, StatusCode::FORBIDDEN);

        let reply = app.send(Method::GET, "/user/phone", Some(&bob), None).await;
        assert_eq!(reply.json, json!([]));

        let reply = app
            .send(
                Method::POST,
                "/user/phone",
                Some(&bob),
                Some(json!({"phone_number": "555-0100", "description": "dup"})),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CONFLICT);
        assert_eq!(reply.json["error"], "Phone number already exists");
    }

    #[tokio::test]
    async fn test_profile_never_exposes_password_hash() {
        let app = TestApp::new();
        app.register("alice", "p@ss1", "Alice").await;
        let cookie = app.sign_in("alice", "p@ss1").await;

        let reply = app.send(Method::GET, "/user/Alice", Some(&cookie), None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.json, json!({"id": 1, "name": "Alice", "age": 30}));
        assert!(!reply.raw.contains("argon2"));
        assert!(!reply.raw.contains("password"));

        let reply = app
            .send(Method::GET, "/user/Nobody", Some(&cookie), None)
            .await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let app = TestApp::new();

        let reply = app.send(Method::POST, "/user/logout", None, None).await;
        assert_eq!(reply.status, StatusCode::NO_CONTENT);

        let header = reply.set_cookie.unwrap();
        assert!(header.starts_with("SESSTOKEN=;"));
        assert!(header.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_login_change_invalidates_old_cookie() {
        let app = TestApp::new();
        app.register("alice", "p@ss1", "Alice").await;
        let old = app.sign_in("alice", "p@ss1").await;

        let reply = app
            .send(
                Method::PUT,
                "/user/login",
                Some(&old),
                Some(json!({"login": "alice2"})),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        let fresh = cookie_pair(&reply);

        let reply = app.send(Method::GET, "/user/phone", Some(&old), None).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

        let reply = app.send(Method::GET, "/user/phone", Some(&fresh), None).await;
        assert_eq!(reply.status, StatusCode::OK);

        app.sign_in("alice2", "p@ss1").await;
    }
}
