use serde_json::json;

use crate::common::{TestApp, routes};

mod public_search {
    use super::*;

    /// Three fixtures: a public analyzed post, a private analyzed post, and a
    /// public post without analysis.
    async fn seed(app: &TestApp) -> (i32, i32, i32) {
        let (owner_id, _) = app.create_user("alice", "member").await;

        let public_id = app.insert_content(owner_id, "Rust news", true).await;
        app.insert_analysis(public_id, "Weekly language roundup", "rust, news")
            .await;

        let private_id = app.insert_content(owner_id, "rusty secrets", false).await;
        app.insert_analysis(private_id, "Personal notes", "rust, notes")
            .await;

        let unanalyzed_id = app.insert_content(owner_id, "rust adventure", true).await;

        (public_id, private_id, unanalyzed_id)
    }

    #[tokio::test]
    async fn matches_only_public_analyzed_content() {
        let app = TestApp::spawn().await;
        let (public_id, _, _) = seed(&app).await;

        let res = app.get_without_token(&routes::search_public("rust")).await;

        assert_eq!(res.status, 200);
        let rows = res.body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], public_id);
        assert_eq!(rows[0]["summary"], "Weekly language roundup");
    }

    #[tokio::test]
    async fn matching_is_case_insensitive() {
        let app = TestApp::spawn().await;
        let (public_id, _, _) = seed(&app).await;

        let res = app.get_without_token(&routes::search_public("RUST")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap()[0]["id"], public_id);
    }

    #[tokio::test]
    async fn matches_against_summary_and_topics() {
        let app = TestApp::spawn().await;
        let (public_id, _, _) = seed(&app).await;

        let by_summary = app.get_without_token(&routes::search_public("roundup")).await;
        assert_eq!(by_summary.body.as_array().unwrap()[0]["id"], public_id);

        let by_topic = app.get_without_token(&routes::search_public("news")).await;
        assert_eq!(by_topic.body.as_array().unwrap()[0]["id"], public_id);
    }

    #[tokio::test]
    async fn unmatched_query_returns_empty_list() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get_without_token(&routes::search_public("quantum")).await;

        assert_eq!(res.status, 200);
        assert!(res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn short_query_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::search_public("a")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod user_search {
    use super::*;

    #[tokio::test]
    async fn finds_own_content_regardless_of_visibility() {
        let app = TestApp::spawn().await;
        let (alice_id, alice_token) = app.create_user("alice", "member").await;
        let (bob_id, _) = app.create_user("bob", "member").await;

        let public_id = app.insert_content(alice_id, "Rust news", true).await;
        app.insert_analysis(public_id, "Roundup", "rust, news").await;

        let private_id = app.insert_content(alice_id, "Drafts", false).await;
        app.insert_analysis(private_id, "Ideas about rust macros", "rust, macros")
            .await;

        // Someone else's content never shows up in a user search.
        let bobs_id = app.insert_content(bob_id, "Bob on rust", true).await;
        app.insert_analysis(bobs_id, "Bob's take", "rust").await;

        let res = app
            .get_with_token(&routes::search_user("rust"), &alice_token)
            .await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![public_id as i64, private_id as i64]);
    }

    #[tokio::test]
    async fn content_without_analysis_is_not_matched() {
        let app = TestApp::spawn().await;
        let (alice_id, alice_token) = app.create_user("alice", "member").await;

        app.insert_content(alice_id, "rust adventure", true).await;

        let res = app
            .get_with_token(&routes::search_user("rust"), &alice_token)
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::search_user("rust")).await;

        assert_eq!(res.status, 401);
    }
}

mod recommendations {
    use super::*;

    /// Insert a public content item with an analysis and return its id.
    async fn seed_analyzed(app: &TestApp, user_id: i32, title: &str, topics: &str) -> i32 {
        let id = app.insert_content(user_id, title, true).await;
        app.insert_analysis(id, "summary", topics).await;
        id
    }

    #[tokio::test]
    async fn content_with_one_shared_topic_recommend_each_other_once() {
        let app = TestApp::spawn().await;
        let (user_id, _) = app.create_user("alice", "member").await;

        let a = seed_analyzed(&app, user_id, "Content A", "cats, dogs").await;
        let b = seed_analyzed(&app, user_id, "Content B", "dogs, birds").await;

        let res = app.get_without_token(&routes::recommend(a, 10)).await;
        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![b as i64]);

        let res = app.get_without_token(&routes::recommend(b, 10)).await;
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![a as i64]);
    }

    #[tokio::test]
    async fn never_returns_self_duplicates_or_more_than_limit() {
        let app = TestApp::spawn().await;
        let (user_id, _) = app.create_user("alice", "member").await;

        let target = seed_analyzed(&app, user_id, "Target", "rust, tokio, async").await;
        // Matches every one of the three topics; must appear exactly once.
        let multi = seed_analyzed(&app, user_id, "Multi", "rust, tokio, async").await;
        seed_analyzed(&app, user_id, "One", "rust").await;
        seed_analyzed(&app, user_id, "Two", "tokio").await;
        seed_analyzed(&app, user_id, "Three", "async").await;

        let res = app.get_without_token(&routes::recommend(target, 2)).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&(target as i64)));
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(deduped, ids);
        // Topic order puts the first rust match first.
        assert_eq!(ids[0], multi as i64);
    }

    #[tokio::test]
    async fn only_the_first_three_topics_are_used() {
        let app = TestApp::spawn().await;
        let (user_id, _) = app.create_user("alice", "member").await;

        let target = seed_analyzed(&app, user_id, "Target", "alpha, beta, gamma, delta").await;
        let via_first = seed_analyzed(&app, user_id, "First match", "alpha").await;
        let via_fourth = seed_analyzed(&app, user_id, "Fourth match", "delta").await;

        let res = app.get_without_token(&routes::recommend(target, 10)).await;

        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_i64().unwrap())
            .collect();
        assert!(ids.contains(&(via_first as i64)));
        assert!(!ids.contains(&(via_fourth as i64)));
    }

    #[tokio::test]
    async fn private_content_is_never_recommended() {
        let app = TestApp::spawn().await;
        let (user_id, _) = app.create_user("alice", "member").await;

        let target = seed_analyzed(&app, user_id, "Target", "cats").await;
        let private_id = app.insert_content(user_id, "Hidden", false).await;
        app.insert_analysis(private_id, "summary", "cats").await;

        let res = app.get_without_token(&routes::recommend(target, 10)).await;

        assert!(res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn title_only_matches_surface_content_without_analysis() {
        let app = TestApp::spawn().await;
        let (user_id, _) = app.create_user("alice", "member").await;

        let target = seed_analyzed(&app, user_id, "Target", "cats, dogs").await;
        let by_title = app.insert_content(user_id, "All about cats", true).await;

        let res = app.get_without_token(&routes::recommend(target, 10)).await;

        let rows = res.body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], by_title);
        assert!(rows[0]["ai_analysis"].is_null());
    }

    #[tokio::test]
    async fn target_without_analysis_yields_empty_list() {
        let app = TestApp::spawn().await;
        let (user_id, _) = app.create_user("alice", "member").await;

        let target = app.insert_content(user_id, "Unanalyzed", true).await;
        seed_analyzed(&app, user_id, "Unanalyzed twin", "anything").await;

        let res = app.get_without_token(&routes::recommend(target, 10)).await;

        assert_eq!(res.status, 200);
        assert!(res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_target_yields_empty_list() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::recommend(987_654, 10)).await;

        assert_eq!(res.status, 200);
        assert!(res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn limit_outside_bounds_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::recommend(1, 0)).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let res = app.get_without_token(&routes::recommend(1, 21)).await;
        assert_eq!(res.status, 400);
    }
}
