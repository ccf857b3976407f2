#![cfg(feature = "test-utils")]

// Full-rebuild synchronizer against a real Neo4j and an in-memory SQLite
// source, including the end-to-end recommendation scenario.
//
// Requirements: Docker (for Neo4j via testcontainers)
//
// Run with: cargo test -p eventure-graph --features test-utils --test sync_test

use eventure_core::Interaction;
use eventure_graph::{mutate, queries, run_full_sync, testutil, Engine, GraphClient, SqliteSource};

async fn setup() -> (impl std::any::Any, GraphClient) {
    testutil::neo4j_container().await
}

/// The shared scenario: u1 and u2 prefer c1, e1 is in c1, u3 is idle.
fn scenario_source() -> SqliteSource {
    let source = SqliteSource::open_in_memory().expect("open source");
    source.ensure_schema().expect("source schema");
    source
        .seed(
            &["u1", "u2", "u3"],
            &["e1"],
            &["c1"],
            &[("e1", "c1")],
            &[("u1", "c1"), ("u2", "c1")],
        )
        .expect("seed source");
    source
}

#[tokio::test]
async fn sync_seeds_viewed_edges_from_interests() {
    let (_guard, client) = setup().await;
    let source = scenario_source();

    let report = run_full_sync(&client, &source).await.expect("sync");
    assert_eq!(report.users, 3);
    assert_eq!(report.events, 1);
    assert_eq!(report.categories, 1);
    assert_eq!(report.in_category_edges, 1);
    assert_eq!(report.preferred_edges, 2);
    // Both interested users gain an initial view of e1.
    assert_eq!(report.viewed_edges, 2);

    assert_eq!(client.count_label("User").await.expect("users"), 3);
    assert_eq!(client.count_edge_type("VIEWED").await.expect("viewed"), 2);
}

#[tokio::test]
async fn synced_graph_recommends_through_shared_neighbors() {
    let (_guard, client) = setup().await;
    let source = scenario_source();
    run_full_sync(&client, &source).await.expect("sync");

    // u3 shares no neighbor with anyone.
    let for_u3 = queries::get_recommendation(&client, "u3", 20)
        .await
        .expect("rec u3");
    assert!(for_u3.is_empty());

    // u1 and u2 share c1 and e1; u2's history yields e1.
    let for_u1 = queries::get_recommendation(&client, "u1", 20)
        .await
        .expect("rec u1");
    let ids: Vec<&str> = for_u1.iter().map(|e| e.event_id.as_str()).collect();
    assert_eq!(ids, vec!["e1"]);
}

#[tokio::test]
async fn rerunning_sync_is_idempotent_and_destroys_interim_activity() {
    let (_guard, client) = setup().await;
    let source = scenario_source();

    run_full_sync(&client, &source).await.expect("first sync");
    let first = client.counts().await.expect("counts");

    // Live activity between runs.
    mutate::like_event(
        &client,
        &Interaction {
            user_id: "u3".to_string(),
            event_id: "e1".to_string(),
        },
    )
    .await
    .expect("like");
    assert_eq!(client.count_edge_type("LIKED").await.expect("liked"), 1);

    run_full_sync(&client, &source).await.expect("second sync");
    let second = client.counts().await.expect("counts");

    assert_eq!(first, second);
    assert_eq!(client.count_edge_type("LIKED").await.expect("liked"), 0);
}

#[tokio::test]
async fn engine_facade_wraps_sync_and_recommendation_in_envelopes() {
    let (_guard, client) = setup().await;
    let engine = Engine::new(client);
    let source = scenario_source();

    let sync_resp = engine.run_full_sync(&source).await;
    assert!(sync_resp.is_success());
    assert_eq!(sync_resp.content.expect("report").users, 3);

    let rec_resp = engine.get_recommendation("u1", None).await;
    assert!(rec_resp.is_success());
    let events = rec_resp.content.expect("events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_id, "e1");

    // Validation failures come back as failure envelopes, not errors.
    let bad = engine.get_recommendation("  ", None).await;
    assert!(!bad.is_success());
}
