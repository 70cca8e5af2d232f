#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;
    use warp::http::StatusCode;

    use crate::configuration::types::ProvisionedCredentials;
    use crate::controller::dispatcher::Dispatcher;
    use crate::session_management::session_manager::SessionManager;
    use crate::session_management::SessionState;
    use crate::web_interface::routes::{gate_routes, MAX_BODY_BYTES};

    const API_KEY: &str = "qazWSXedc";
    const TOKEN: &str = "AAAABBBBCCCCDDDDEEEEFFFF12345678";

    // Helper bundling a fresh gate with a handle on its session slot
    struct Gate {
        dispatcher: Arc<Dispatcher>,
    }

    impl Gate {
        fn new() -> Self {
            Self {
                dispatcher: Arc::new(Dispatcher::new(
                    ProvisionedCredentials::new(API_KEY, TOKEN),
                    Arc::new(SessionManager::new()),
                )),
            }
        }

        fn state(&self) -> SessionState {
            self.dispatcher.sessions().state()
        }

        async fn send(&self, builder: warp::test::RequestBuilder) -> (StatusCode, Value) {
            let filter = gate_routes(self.dispatcher.clone());
            let res = builder.reply(&filter).await;
            let body: Value = serde_json::from_slice(res.body()).unwrap();
            (res.status(), body)
        }

        async fn post_action(&self, token: &str, action: &str) -> (StatusCode, Value) {
            self.send(standard_post(&form(&[("token", token), ("action", action)])))
                .await
        }
    }

    fn form(fields: &[(&str, &str)]) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish()
    }

    fn standard_post(body: &str) -> warp::test::RequestBuilder {
        warp::test::request()
            .method("POST")
            .path("/endpoint")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .header("X-Api-Key", API_KEY)
            .body(body.to_string())
    }

    fn ok_body() -> Value {
        serde_json::json!({ "result": "OK" })
    }

    fn error_body(message: &str) -> Value {
        serde_json::json!({ "error": message })
    }

    #[tokio::test]
    async fn test_scenario_a_login_succeeds() {
        let gate = Gate::new();
        let (status, body) = gate.post_action(TOKEN, "LOGIN").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, ok_body());
        assert_eq!(gate.state(), SessionState::LoggedIn);
    }

    #[tokio::test]
    async fn test_scenario_b_second_login_rejected() {
        let gate = Gate::new();
        gate.post_action(TOKEN, "LOGIN").await;

        let (status, body) = gate.post_action(TOKEN, "LOGIN").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, error_body("Unauthorized"));
        assert_eq!(gate.state(), SessionState::LoggedIn);
    }

    #[tokio::test]
    async fn test_scenario_c_action_without_login() {
        let gate = Gate::new();
        let (status, _) = gate.post_action(TOKEN, "ACTION").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(gate.state(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_scenario_d_empty_token() {
        let gate = Gate::new();
        let (status, body) = gate.post_action("", "LOGIN").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, error_body("Bad Request"));
    }

    #[tokio::test]
    async fn test_scenario_e_incorrect_action() {
        let gate = Gate::new();
        let (status, body) = gate.post_action(TOKEN, "INCORRECT").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, error_body("Bad Request"));
    }

    #[tokio::test]
    async fn test_scenario_f_actions_then_double_logout() {
        let gate = Gate::new();
        assert_eq!(gate.post_action(TOKEN, "LOGIN").await.0, StatusCode::OK);

        for _ in 0..3 {
            let (status, body) = gate.post_action(TOKEN, "ACTION").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, ok_body());
        }

        assert_eq!(gate.post_action(TOKEN, "LOGOUT").await.0, StatusCode::OK);
        let (status, body) = gate.post_action(TOKEN, "LOGOUT").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, error_body("Unauthorized"));
    }

    #[tokio::test]
    async fn test_non_post_methods_on_endpoint() {
        let gate = Gate::new();
        for method in ["GET", "PUT", "DELETE", "PATCH"] {
            let builder = standard_post(&form(&[("token", TOKEN), ("action", "LOGIN")])).method(method);
            let (status, body) = gate.send(builder).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "method {}", method);
            assert_eq!(body, error_body("Method Not Allowed"));
        }
        assert_eq!(gate.state(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_unknown_paths_are_not_found() {
        let gate = Gate::new();
        for path in ["/", "/qwerty", "/incorrect", "/endpoint/extra", "/Endpoint"] {
            let builder = standard_post(&form(&[("token", TOKEN), ("action", "LOGIN")])).path(path);
            let (status, body) = gate.send(builder).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "path {}", path);
            assert_eq!(body, error_body("Not Found"));
        }

        // Route is checked before the method
        let (status, _) = gate.send(warp::test::request().method("GET").path("/qwerty")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_query_string_is_ignored() {
        let gate = Gate::new();
        let builder = standard_post(&form(&[("token", TOKEN), ("action", "LOGIN")])).path("/endpoint?debug=1");
        let (status, _) = gate.send(builder).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_headers() {
        let gate = Gate::new();
        let builder = warp::test::request()
            .method("POST")
            .path("/endpoint")
            .body(form(&[("token", TOKEN), ("action", "LOGIN")]));
        let (status, body) = gate.send(builder).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, error_body("Unauthorized"));
        assert_eq!(gate.state(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_bad_content_headers_with_valid_key() {
        let gate = Gate::new();
        let cases = [
            ("text/plain", Some("application/json")),
            ("application/x-www-form-urlencoded", Some("text/html")),
            ("application/x-www-form-urlencoded", None),
        ];
        for (content_type, accept) in cases {
            let mut builder = warp::test::request()
                .method("POST")
                .path("/endpoint")
                .header("Content-Type", content_type)
                .header("X-Api-Key", API_KEY);
            if let Some(accept) = accept {
                builder = builder.header("Accept", accept);
            }
            let builder = builder.body(form(&[("token", TOKEN), ("action", "LOGIN")]));

            let (status, body) = gate.send(builder).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} / {:?}", content_type, accept);
            assert_eq!(body, error_body("Bad Request"));
        }
        assert_eq!(gate.state(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_incorrect_headers_rejected() {
        let gate = Gate::new();
        let builder = warp::test::request()
            .method("POST")
            .path("/endpoint")
            .header("Content-Type", "text/plain")
            .header("X-Api-Key", "incorrect-key")
            .header("Accept", "text/html")
            .body(form(&[("token", TOKEN), ("action", "LOGIN")]));
        let (status, body) = gate.send(builder).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, error_body("Unauthorized"));
        assert_eq!(gate.state(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_empty_and_incorrect_api_key() {
        let gate = Gate::new();
        for key in ["", "incorrect-key"] {
            let builder = warp::test::request()
                .method("POST")
                .path("/endpoint")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .header("Accept", "application/json")
                .header("X-Api-Key", key)
                .body(form(&[("token", TOKEN), ("action", "LOGIN")]));
            let (status, body) = gate.send(builder).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "key {:?}", key);
            assert_eq!(body, error_body("Unauthorized"));
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_header() {
        let gate = Gate::new();
        let builder = warp::test::request()
            .method("POST")
            .path("/endpoint")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .body(form(&[("token", TOKEN), ("action", "LOGIN")]));
        let (status, _) = gate.send(builder).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_empty_body_fields() {
        let gate = Gate::new();
        let cases = [("", "LOGIN"), (TOKEN, ""), ("", "")];
        for (token, action) in cases {
            let (status, _) = gate.post_action(token, action).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "token {:?} action {:?}", token, action);
        }

        let (status, _) = gate.send(standard_post("")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(gate.state(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_token_variants_never_succeed() {
        let gate = Gate::new();
        let tokens = [
            "incorrect-token",
            "AAAABBBBCCCCDDDDEEEEFFFF12345678EXTRA",
            "AAAABBBBCCCC1234",
            "ABCDEFGHIJKLMNOPQRSTUVWXYZABCDEF",
            "12345678901234567890123456789012",
            "abcdefghijklmnopqrstuvwxyzabcdef",
            "AaBbCcDdEeFfGgHhIiJjKkLlMmNnOoPp",
        ];
        for token in tokens {
            for action in ["LOGIN", "INCORRECT", ""] {
                let (status, _) = gate.post_action(token, action).await;
                assert_ne!(status, StatusCode::OK, "token {} action {:?}", token, action);
                assert!(status.is_client_error());
            }
            assert_eq!(gate.post_action(token, "LOGIN").await.0, StatusCode::UNAUTHORIZED);
        }
        assert_eq!(gate.state(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_login_logout_cycles_indefinitely() {
        let gate = Gate::new();
        for _ in 0..5 {
            assert_eq!(gate.post_action(TOKEN, "LOGIN").await.0, StatusCode::OK);
            assert_eq!(gate.post_action(TOKEN, "ACTION").await.0, StatusCode::OK);
            assert_eq!(gate.post_action(TOKEN, "LOGOUT").await.0, StatusCode::OK);
        }
        assert_eq!(gate.state(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_oversized_body_is_bad_request() {
        let gate = Gate::new();
        let padding = "x".repeat(MAX_BODY_BYTES as usize);
        let body = form(&[("token", TOKEN), ("action", "LOGIN"), ("padding", padding.as_str())]);

        let (status, body) = gate.send(standard_post(&body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, error_body("Bad Request"));
        assert_eq!(gate.state(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_responses_are_json() {
        let gate = Gate::new();
        let filter = gate_routes(gate.dispatcher.clone());
        let res = standard_post(&form(&[("token", TOKEN), ("action", "LOGIN")]))
            .reply(&filter)
            .await;
        assert_eq!(res.headers()["content-type"], "application/json");
    }
}
