//! Integration tests per l'endpoint del feed
//!
//! Test per:
//! - GET /
//! - GET /feed

mod common;

#[cfg(test)]
mod feed_tests {
    use super::common::*;
    use async_trait::async_trait;
    use axum_test::http::{HeaderName, StatusCode};
    use coursefeed_server::entities::AnonymityLevel;
    use coursefeed_server::feed::{Event, EventKind, EventSource, FetchScope, PostEvent};
    use serde_json::Value;
    use std::sync::Arc;

    /// Sorgente che produce un post di un modulo di forum non supportato
    struct UnsupportedForumSource;

    #[async_trait]
    impl EventSource for UnsupportedForumSource {
        fn name(&self) -> &'static str {
            "hsuforum"
        }

        async fn fetch(&self, scope: &FetchScope) -> Result<Vec<Event>, sqlx::Error> {
            Ok(vec![Event {
                courseid: 1,
                modulename: "hsuforum".to_string(),
                kind: EventKind::Post(PostEvent {
                    postid: 1,
                    discussionid: 1,
                    discussionname: "Welcome".to_string(),
                    instanceid: 1,
                    cmid: 1,
                    authorid: 2,
                    subject: "Welcome".to_string(),
                    message: "Hello".to_string(),
                    postcreated: scope.now - 60,
                    anonymity: AnonymityLevel::NotAnonymous,
                    first_post: true,
                }),
            }])
        }
    }

    const AUTH: HeaderName = HeaderName::from_static("authorization");

    fn summary(letters: &[Value]) -> Vec<(String, String)> {
        letters
            .iter()
            .map(|l| {
                let lettertype = l["lettertype"].as_str().unwrap_or_default().to_string();
                let label = l["name"]
                    .as_str()
                    .or_else(|| l["subject"].as_str())
                    .unwrap_or("")
                    .to_string();
                (lettertype, label)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_root_health_check() {
        let server = create_test_server(create_test_state(create_test_pool().await));
        let response = server.get("/").await;
        response.assert_status_ok();
        response.assert_text("Server is running!");
    }

    #[tokio::test]
    async fn test_feed_requires_token() {
        let server = create_test_server(create_test_state(create_test_pool().await));
        let response = server.get("/feed").await;
        response.assert_status(StatusCode::FORBIDDEN);

        let response = server
            .get("/feed")
            .add_header(AUTH, "Bearer not-a-token")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deleted_user_is_rejected() {
        let server = create_test_server(create_test_state(create_test_pool().await));
        let response = server
            .get("/feed")
            .add_header(AUTH, bearer(4, "ghost"))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_feed_orders_letters_around_the_marker() {
        let server = create_test_server(create_test_state(create_test_pool().await));

        let response = server
            .get("/feed")
            .add_header(AUTH, bearer(1, "alice"))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        let letters = body["letters"].as_array().cloned().unwrap_or_default();

        let expected: Vec<(String, String)> = [
            ("basic", "Lab report is due"),
            ("activitycompletion", "Lab report"),
            ("basic", "Course meeting"),
            ("orientationmarker", ""),
            ("post", "Re: Welcome"),
            ("post", "Welcome"),
            ("activitycompletion", "Reading"),
            ("post", "Homework question"),
            ("post", "Homework question"),
        ]
        .iter()
        .map(|(t, l)| (t.to_string(), l.to_string()))
        .collect();
        assert_eq!(summary(&letters), expected);

        for (i, letter) in letters.iter().enumerate() {
            assert_eq!(letter["contentid"], i);
        }
        assert_eq!(letters[3]["timestamp"], body["now"]);

        // Corsi visibili soltanto, ordinati per nome
        let courses: Vec<&str> = body["courses"]
            .as_array()
            .map(|c| c.iter().filter_map(|c| c["shortname"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(courses, vec!["MATH101", "PHYS201"]);
        assert!(body["settings"].is_null());
    }

    #[tokio::test]
    async fn test_feed_letter_exports() {
        let server = create_test_server(create_test_state(create_test_pool().await));
        let body: Value = server
            .get("/feed")
            .add_header(AUTH, bearer(1, "alice"))
            .await
            .json();
        let letters = body["letters"].as_array().cloned().unwrap_or_default();

        // Post del forum con autore visibile e immagine di profilo
        let reply = &letters[4];
        assert_eq!(reply["authorname"], "Alice Rossi");
        assert_eq!(reply["anonymous"], false);
        assert_eq!(
            reply["authorpicture"],
            "http://localhost/user/pix.php/1/f1.jpg"
        );
        assert_eq!(
            reply["postlink"],
            "http://localhost/mod/forum/discuss.php?d=1#p2"
        );

        // Bob non ha immagine di profilo
        let welcome = &letters[5];
        assert_eq!(welcome["authorname"], "Bob Bianchi");
        assert!(welcome.get("authorpicture").is_none());

        // Attivita' senza autore
        let reading = &letters[6];
        assert!(reading.get("authorname").is_none());
        assert_eq!(
            reading["activitylink"],
            "http://localhost/mod/page/view.php?id=7"
        );

        // moodleoverflow completamente anonimo: studente e docente redatti
        for letter in &letters[7..] {
            assert_eq!(letter["modulename"], "moodleoverflow");
            assert_eq!(letter["authorname"], "anonymous");
            assert_eq!(letter["anonymous"], true);
            assert!(letter.get("authorid").is_none());
            assert!(letter.get("authorpicture").is_none());
        }
    }

    #[tokio::test]
    async fn test_missing_module_contributes_nothing() {
        let pool = create_test_pool().await;
        sqlx::raw_sql(
            "DROP TABLE moodleoverflow_posts; DROP TABLE moodleoverflow_discussions; DROP TABLE moodleoverflow;",
        )
        .execute(&pool)
        .await
        .unwrap();
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/feed")
            .add_header(AUTH, bearer(1, "alice"))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        let letters = body["letters"].as_array().cloned().unwrap_or_default();

        assert_eq!(letters.len(), 7);
        assert!(
            letters
                .iter()
                .all(|l| l["modulename"] != "moodleoverflow")
        );
    }

    #[tokio::test]
    async fn test_user_without_enrolments_gets_empty_feed() {
        let pool = create_test_pool().await;
        sqlx::query("DELETE FROM enrolments WHERE user_id = 3")
            .execute(&pool)
            .await
            .unwrap();
        let server = create_test_server(create_test_state(pool));

        let body: Value = server
            .get("/feed")
            .add_header(AUTH, bearer(3, "carol"))
            .await
            .json();

        assert_eq!(body["letters"], Value::Array(vec![]));
        assert_eq!(body["courses"], Value::Array(vec![]));
    }

    #[tokio::test]
    async fn test_unsupported_post_module_is_a_server_error() {
        let state = create_test_state_with_source(
            create_test_pool().await,
            Arc::new(UnsupportedForumSource),
        );
        let server = create_test_server(state);

        let response = server
            .get("/feed")
            .add_header(AUTH, bearer(1, "alice"))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "Feed configuration error");
        assert_eq!(body["details"], "unsupported module `hsuforum` on post event");
    }
}
