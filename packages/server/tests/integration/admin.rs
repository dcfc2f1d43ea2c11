use crate::common::{TestApp, routes};

mod admin_listing {
    use super::*;

    #[tokio::test]
    async fn admin_sees_everything_regardless_of_visibility() {
        let app = TestApp::spawn().await;
        let (alice_id, _) = app.create_user("alice", "member").await;
        let (bob_id, _) = app.create_user("bob", "member").await;
        let (_, admin_token) = app.create_user("root", "admin").await;

        let public_id = app.insert_content(alice_id, "Public post", true).await;
        let private_id = app.insert_content(bob_id, "Private notes", false).await;
        app.insert_analysis(private_id, "summary", "notes").await;

        let res = app.get_with_token(routes::ADMIN_CONTENT, &admin_token).await;

        assert_eq!(res.status, 200);
        let data = res.body["data"].as_array().unwrap();
        let ids: Vec<i64> = data.iter().map(|row| row["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![public_id as i64, private_id as i64]);
        assert!(data[1]["ai_analysis"].is_object());
        assert_eq!(res.body["pagination"]["total"], 2);
    }

    #[tokio::test]
    async fn listing_is_paginated() {
        let app = TestApp::spawn().await;
        let (alice_id, _) = app.create_user("alice", "member").await;
        let (_, admin_token) = app.create_user("root", "admin").await;

        for i in 0..3 {
            app.insert_content(alice_id, &format!("Post {i}"), i % 2 == 0)
                .await;
        }

        let res = app
            .get_with_token(
                &format!("{}?page=2&per_page=2", routes::ADMIN_CONTENT),
                &admin_token,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 1);
        assert_eq!(res.body["pagination"]["total_pages"], 2);
    }

    #[tokio::test]
    async fn non_admin_cannot_list() {
        let app = TestApp::spawn().await;
        let (_, token) = app.create_user("alice", "member").await;

        let res = app.get_with_token(routes::ADMIN_CONTENT, &token).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn listing_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ADMIN_CONTENT).await;

        assert_eq!(res.status, 401);
    }
}

mod admin_deletion {
    use super::*;

    #[tokio::test]
    async fn admin_deletes_another_users_private_content() {
        let app = TestApp::spawn().await;
        let (alice_id, _) = app.create_user("alice", "member").await;
        let (_, admin_token) = app.create_user("root", "admin").await;

        let id = app.insert_content(alice_id, "Private notes", false).await;
        app.insert_analysis(id, "summary", "notes").await;

        let res = app.delete_with_token(&routes::admin_content(id), &admin_token).await;

        assert_eq!(res.status, 204);
        assert_eq!(app.content_count().await, 0);
        // Cascade: no orphan analysis survives.
        assert_eq!(app.analysis_count().await, 0);
    }

    #[tokio::test]
    async fn non_admin_cannot_use_the_admin_delete() {
        let app = TestApp::spawn().await;
        let (alice_id, _) = app.create_user("alice", "member").await;
        let (_, bob_token) = app.create_user("bob", "member").await;

        let id = app.insert_content(alice_id, "Private notes", false).await;

        let res = app.delete_with_token(&routes::admin_content(id), &bob_token).await;

        assert_eq!(res.status, 403);
        assert_eq!(app.content_count().await, 1);
    }

    #[tokio::test]
    async fn deleting_missing_content_is_404() {
        let app = TestApp::spawn().await;
        let (_, admin_token) = app.create_user("root", "admin").await;

        let res = app
            .delete_with_token(&routes::admin_content(31_337), &admin_token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
