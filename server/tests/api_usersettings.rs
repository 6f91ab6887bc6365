//! Integration tests per gli endpoints delle preferenze
//!
//! Test per:
//! - GET /usersettings
//! - POST /usersettings/record
//! - POST /usersettings/reset

mod common;

#[cfg(test)]
mod usersettings_tests {
    use super::common::*;
    use axum_test::http::HeaderName;
    use serde_json::{Value, json};

    fn settings(past: i64, future: i64, basic: i64, completion: i64, post: i64) -> Value {
        json!({
            "userid": 1,
            "timefilterpast": past,
            "timefilterfuture": future,
            "basicletter": basic,
            "completionletter": completion,
            "postletter": post,
        })
    }

    #[tokio::test]
    async fn test_record_twice_keeps_one_row() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state.clone());

        let response = server
            .post("/usersettings/record")
            .add_header(HeaderName::from_static("authorization"), bearer(1, "alice"))
            .json(&settings(432000, 2592000, 0, 1, 1))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!(true));

        server
            .post("/usersettings/record")
            .add_header(HeaderName::from_static("authorization"), bearer(1, "alice"))
            .json(&settings(604800, 0, 1, 0, 1))
            .await
            .assert_status_ok();

        assert_eq!(state.preference.count_for_user(&1).await.unwrap(), 1);

        let response = server
            .get("/usersettings")
            .add_header(HeaderName::from_static("authorization"), bearer(1, "alice"))
            .await;
        response.assert_status_ok();
        response.assert_json(&settings(604800, 0, 1, 0, 1));
    }

    #[tokio::test]
    async fn test_saved_settings_are_returned_with_the_feed() {
        let server = create_test_server(create_test_state(create_test_pool().await));

        server
            .post("/usersettings/record")
            .add_header(HeaderName::from_static("authorization"), bearer(1, "alice"))
            .json(&settings(432000, 2592000, 0, 1, 1))
            .await
            .assert_status_ok();

        let body: Value = server
            .get("/feed")
            .add_header(HeaderName::from_static("authorization"), bearer(1, "alice"))
            .await
            .json();
        assert_eq!(body["settings"], settings(432000, 2592000, 0, 1, 1));
    }

    #[tokio::test]
    async fn test_reset_removes_the_preference() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state.clone());

        server
            .post("/usersettings/record")
            .add_header(HeaderName::from_static("authorization"), bearer(1, "alice"))
            .json(&settings(432000, 2592000, 0, 1, 1))
            .await
            .assert_status_ok();

        let response = server
            .post("/usersettings/reset")
            .add_header(HeaderName::from_static("authorization"), bearer(1, "alice"))
            .json(&json!({ "userid": 1 }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!(true));
        assert_eq!(state.preference.count_for_user(&1).await.unwrap(), 0);

        // Reset senza righe: resta idempotente
        server
            .post("/usersettings/reset")
            .add_header(HeaderName::from_static("authorization"), bearer(1, "alice"))
            .json(&json!({ "userid": 1 }))
            .await
            .assert_status_ok();

        let response = server
            .get("/usersettings")
            .add_header(HeaderName::from_static("authorization"), bearer(1, "alice"))
            .await;
        response.assert_json(&Value::Null);
    }

    #[tokio::test]
    async fn test_reset_clears_duplicate_rows() {
        let pool = create_test_pool().await;
        sqlx::raw_sql(
            r#"
            INSERT INTO user_filter_preferences (userid, timefilterpast, timefilterfuture, basicletter, completionletter, postletter)
            VALUES (1, 0, 0, 1, 1, 1), (1, 3600, 0, 0, 1, 1), (1, 0, 60, 1, 0, 0);
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        server
            .post("/usersettings/reset")
            .add_header(HeaderName::from_static("authorization"), bearer(1, "alice"))
            .json(&json!({ "userid": 1 }))
            .await
            .assert_status_ok();

        assert_eq!(state.preference.count_for_user(&1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cannot_touch_another_users_settings() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state.clone());

        let response = server
            .post("/usersettings/record")
            .add_header(HeaderName::from_static("authorization"), bearer(2, "bob"))
            .json(&settings(432000, 2592000, 0, 1, 1))
            .await;
        response.assert_status_forbidden();

        let response = server
            .post("/usersettings/reset")
            .add_header(HeaderName::from_static("authorization"), bearer(2, "bob"))
            .json(&json!({ "userid": 1 }))
            .await;
        response.assert_status_forbidden();

        assert_eq!(state.preference.count_for_user(&1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_flags_are_rejected() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state.clone());

        let response = server
            .post("/usersettings/record")
            .add_header(HeaderName::from_static("authorization"), bearer(1, "alice"))
            .json(&settings(-1, 0, 2, 1, 1))
            .await;
        response.assert_status_bad_request();

        assert_eq!(state.preference.count_for_user(&1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_settings_require_token() {
        let server = create_test_server(create_test_state(create_test_pool().await));
        server
            .post("/usersettings/record")
            .json(&settings(0, 0, 1, 1, 1))
            .await
            .assert_status_forbidden();
    }
}
