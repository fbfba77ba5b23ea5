//! Concurrent mutation checks for the shared store.

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use movie_api::movies::IdStrategy;
use movie_api::{Director, Movie, MovieServer, MovieStore, ServiceConfig};
use tower::ServiceExt;

mod common;

async fn concurrent_creates(strategy: IdStrategy) {
    let mut config = ServiceConfig::default();
    config.api.id_strategy = strategy;
    let server = common::start_server(config).await;
    let client = common::client();

    let concurrency = 20;
    let requests_per_task = 25;

    let mut handles = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        let url = server.url("/api/movies");
        handles.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for i in 0..requests_per_task {
                let body = serde_json::json!({ "title": format!("movie {task}-{i}") });
                let created: Movie = client
                    .post(&url)
                    .json(&body)
                    .send()
                    .await
                    .unwrap()
                    .json()
                    .await
                    .unwrap();
                ids.push(created.id);
            }
            ids
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.await.unwrap() {
            assert!(ids.insert(id), "duplicate id handed out");
        }
    }
    assert_eq!(ids.len(), concurrency * requests_per_task);

    let movies: Vec<Movie> = client
        .get(server.url("/api/movies"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(movies.len(), 4 + concurrency * requests_per_task);

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_creates_counter() {
    concurrent_creates(IdStrategy::Counter).await;
}

#[tokio::test]
async fn test_concurrent_creates_random() {
    concurrent_creates(IdStrategy::Random).await;
}

#[tokio::test]
async fn test_concurrent_update_and_delete() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let mut handles = Vec::new();
    for round in 0..10 {
        let client = client.clone();
        let put_url = server.url("/api/movies/1");
        handles.push(tokio::spawn(async move {
            let body = serde_json::json!({ "title": format!("Spider Man {round}") });
            client.put(&put_url).json(&body).send().await.unwrap().status()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_success());
    }

    let movies: Vec<Movie> = client
        .get(server.url("/api/movies"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(movies.len(), 4);
    assert_eq!(movies.iter().filter(|m| m.id == "1").count(), 1);

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_deletes_report_consistent_lists() {
    let count = 32;

    for _ in 0..200 {
        let movies = (0..count)
            .map(|i| Movie::new(i.to_string(), "", format!("movie {i}"), Director::default()))
            .collect();
        let store = Arc::new(MovieStore::with_movies(IdStrategy::Counter, movies));
        let server = MovieServer::with_store(ServiceConfig::default(), store.clone());

        let mut handles = Vec::new();
        for i in 0..count {
            let router = server.router();
            handles.push(tokio::spawn(async move {
                let request = Request::delete(format!("/api/movies/{i}"))
                    .body(Body::empty())
                    .unwrap();
                let response = router.oneshot(request).await.unwrap();
                assert!(response.status().is_success());
                let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                    .await
                    .unwrap();
                serde_json::from_slice::<Vec<Movie>>(&bytes).unwrap().len()
            }));
        }

        let mut lengths = Vec::new();
        for handle in handles {
            lengths.push(handle.await.unwrap());
        }
        lengths.sort_unstable();

        // Each delete sees the store right after its own removal, so the
        // remaining lengths form an exact serial order.
        assert_eq!(lengths, (0..count).collect::<Vec<usize>>());
        assert!(store.is_empty());
    }
}
