mod common;

use assert2::check;
use common::{Reply, ScriptedBackend, deal_json, session};
use deal_discovery::{Endpoint, OutcomeStatus, SearchRequest};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn newer_search_supersedes_pending_one() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .reply(
                Endpoint::MarketSizing,
                Reply::Delayed(Duration::from_secs(20), json!({"marketSizing": [{"market": "Oat milk"}]})),
            )
            .reply(
                Endpoint::DealsSearch,
                Reply::Json(json!({"deals": [deal_json("d1", "CTV Reach", "ctv", "CTV")]})),
            ),
    );
    let session = session(&backend);

    let slow = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.search(SearchRequest::new("tam for oat milk")).await }
    });
    // Let the slow search register before the next one starts
    tokio::time::sleep(Duration::from_secs(1)).await;

    let fast = session.search(SearchRequest::new("ctv")).await;

    check!(slow.await.unwrap().is_none());
    let fast = fast.expect("latest search publishes");
    check!(fast.results.deals.len() == 1);

    let state = session.state();
    check!(state.generation == 2);
    check!(!state.searching);
    let shown = state.outcome.expect("outcome stored");
    check!(shown.results.market_sizing.is_empty());
    check!(shown.results.deals.len() == 1);
}

#[tokio::test(start_paused = true)]
async fn timeout_clears_the_searching_indicator() {
    let backend = Arc::new(
        ScriptedBackend::new().reply(Endpoint::MarketSizing, Reply::Stall(Duration::from_secs(300))),
    );
    let session = session(&backend);
    let mut updates = session.subscribe();

    let outcome = session
        .search(SearchRequest::new("market size of pet food"))
        .await
        .expect("search completes");

    check!(outcome.is_failure());
    check!(!session.state().searching);
    check!(updates.has_changed().unwrap());
    check!(!updates.borrow_and_update().searching);
}

#[tokio::test]
async fn indicator_is_set_while_search_is_in_flight() {
    let backend = Arc::new(ScriptedBackend::new().reply(
        Endpoint::DealsSearch,
        Reply::Delayed(Duration::from_millis(200), json!({"deals": []})),
    ));
    let session = session(&backend);
    let mut updates = session.subscribe();

    let pending = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.search(SearchRequest::new("anything at all")).await }
    });

    updates.changed().await.unwrap();
    check!(updates.borrow_and_update().searching);

    let outcome = pending.await.unwrap().expect("search completes");
    check!(outcome.status == OutcomeStatus::NoResults);
    check!(!session.state().searching);
}

#[tokio::test]
async fn cancel_abandons_the_search() {
    let backend = Arc::new(
        ScriptedBackend::new().reply(Endpoint::DealsSearch, Reply::Stall(Duration::from_secs(3600))),
    );
    let session = session(&backend);

    let pending = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.search(SearchRequest::new("find deals for gamers")).await }
    });
    let mut updates = session.subscribe();
    updates.wait_for(|state| state.searching).await.unwrap();

    session.cancel();

    check!(pending.await.unwrap().is_none());
    check!(!session.state().searching);
    check!(session.state().outcome.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_searches_leave_the_latest_published() {
    for _ in 0..50 {
        let backend = Arc::new(ScriptedBackend::new().reply(
            Endpoint::DealsSearch,
            Reply::Delayed(
                Duration::from_millis(10),
                json!({"deals": [deal_json("d1", "CTV Reach", "ctv", "CTV")]}),
            ),
        ));
        let session = session(&backend);
        let barrier = Arc::new(tokio::sync::Barrier::new(2));

        let spawn_search = |query: &'static str| {
            let session = Arc::clone(&session);
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                barrier.wait().await;
                session.search(SearchRequest::new(query)).await
            })
        };
        let first = spawn_search("ctv");
        let second = spawn_search("ctv reach");

        let published: Vec<_> = [first.await.unwrap(), second.await.unwrap()]
            .into_iter()
            .flatten()
            .collect();

        let state = session.state();
        check!(state.generation == 2);
        check!(!state.searching);
        check!(!published.is_empty());
        check!(state.outcome.is_some(), "latest search must publish its outcome");
    }
}
