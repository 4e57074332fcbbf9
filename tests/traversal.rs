use ledger_measurement_bot::config::{Dimensions, ErrorPolicy, WriteMode};
use ledger_measurement_bot::graph;
use ledger_measurement_bot::ledger::{LedgerApi, LedgerError, MemoryLedger};
use ledger_measurement_bot::replay;
use ledger_measurement_bot::run_benchmarks;
use ledger_measurement_bot::traversal::TraversalRunner;
use ledger_measurement_bot::types::{Model, ModelId, Party, Template};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn dims(n: usize, l: usize, d: usize, m: usize, t: usize) -> Dimensions {
    Dimensions {
        parties: n,
        licenses_per_party: l,
        datasets_per_party: d,
        models_per_party: m,
        datasets_per_model: t,
    }
}

#[tokio::test]
async fn end_to_end_write_then_query() {
    let mut rng = StdRng::seed_from_u64(1);
    let g = graph::generate(&dims(2, 2, 4, 1, 2), "ns", &mut rng).unwrap();
    assert_eq!(g.all_licenses().len(), 4);
    assert_eq!(g.all_datasets().len(), 8);
    assert_eq!(g.all_models().len(), 2);

    let ledger = MemoryLedger::new();
    let outcome = replay::write_graph(&ledger, &g, WriteMode::Sequential, ErrorPolicy::Strict)
        .await
        .unwrap();
    assert_eq!(outcome.attempted, 14);
    assert_eq!(outcome.failed, 0);
    assert_eq!(ledger.create_count(), 14);

    for model in g.all_models() {
        let payload = ledger
            .query_by_id(Template::ModelMeta, &model.id.0, &model.model_owner)
            .await
            .unwrap()
            .expect("written model is queryable");
        let fetched: Model = serde_json::from_value(payload).unwrap();
        assert_eq!(fetched.dataset_list.len(), 2);
        assert_eq!(fetched.model_owner, model.model_owner);
    }
}

#[tokio::test]
async fn fan_out_replay_writes_everything() {
    let mut rng = StdRng::seed_from_u64(2);
    let g = graph::generate(&dims(3, 2, 5, 2, 3), "ns", &mut rng).unwrap();

    let ledger = MemoryLedger::new();
    let outcome = replay::write_graph(&ledger, &g, WriteMode::FanOut, ErrorPolicy::Strict)
        .await
        .unwrap();
    assert_eq!(outcome.attempted, 3 * (2 + 5 + 2));
    assert_eq!(outcome.failed, 0);
}

#[tokio::test]
async fn model_datasets_without_predecessor_stops_after_one_hop() {
    let mut rng = StdRng::seed_from_u64(3);
    let g = graph::generate(&dims(1, 2, 4, 1, 2), "ns", &mut rng).unwrap();
    let ledger = MemoryLedger::new();
    replay::write_graph(&ledger, &g, WriteMode::Sequential, ErrorPolicy::Strict)
        .await
        .unwrap();
    ledger.reset_query_counts();

    let runner = TraversalRunner::new(&ledger, ErrorPolicy::Strict);
    let model = g.all_models()[0];
    runner
        .model_datasets(&model.id, &model.model_owner)
        .await
        .unwrap();

    assert_eq!(ledger.query_count(Template::ModelMeta), 1);
    assert_eq!(ledger.query_count(Template::DatasetMeta), 2);
    assert_eq!(ledger.query_count(Template::License), 0);
}

#[tokio::test]
async fn predecessor_walk_covers_the_chain() {
    let mut rng = StdRng::seed_from_u64(4);
    let g = graph::generate(&dims(1, 2, 4, 3, 2), "ns", &mut rng).unwrap();
    let ledger = MemoryLedger::new();
    replay::write_graph(&ledger, &g, WriteMode::Sequential, ErrorPolicy::Strict)
        .await
        .unwrap();
    ledger.reset_query_counts();

    // Start at the end of the chain; the walk must cover all three models.
    let last = *g.all_models().last().unwrap();
    let runner = TraversalRunner::new(&ledger, ErrorPolicy::Strict);
    runner
        .model_licenses(&last.id, &last.model_owner)
        .await
        .unwrap();

    assert_eq!(ledger.query_count(Template::ModelMeta), 3);
    assert_eq!(ledger.query_count(Template::DatasetMeta), 6);
    assert_eq!(ledger.query_count(Template::License), 6);
}

#[tokio::test]
async fn successor_expansion_visits_each_model_once() {
    let mut rng = StdRng::seed_from_u64(5);
    // A single license owns every dataset, so the expansion reaches all models.
    let g = graph::generate(&dims(1, 1, 4, 3, 2), "ns", &mut rng).unwrap();
    let ledger = MemoryLedger::new();
    replay::write_graph(&ledger, &g, WriteMode::Sequential, ErrorPolicy::Strict)
        .await
        .unwrap();
    ledger.reset_query_counts();

    let license = g.all_licenses()[0];
    let runner = TraversalRunner::new(&ledger, ErrorPolicy::Strict);
    runner
        .models_by_license(&license.id, &license.model_owner)
        .await
        .unwrap();

    assert_eq!(ledger.query_count(Template::License), 1);
    assert_eq!(ledger.query_count(Template::DatasetMeta), 4);
    // The visited set keeps each model to a single fetch despite duplicate
    // mentions across dataset model-lists and successor links.
    assert_eq!(ledger.query_count(Template::ModelMeta), 3);
}

#[tokio::test]
async fn strict_replay_aborts_on_first_failure() {
    let mut rng = StdRng::seed_from_u64(6);
    let g = graph::generate(&dims(1, 2, 4, 1, 2), "ns", &mut rng).unwrap();

    let ledger = MemoryLedger::new();
    ledger.reject_creates_for(Template::DatasetMeta);
    let err = replay::write_graph(&ledger, &g, WriteMode::Sequential, ErrorPolicy::Strict).await;
    assert!(err.is_err());
    assert_eq!(ledger.create_count(), 0);
}

#[tokio::test]
async fn lenient_replay_continues_past_failures() {
    let mut rng = StdRng::seed_from_u64(7);
    let g = graph::generate(&dims(1, 2, 4, 1, 2), "ns", &mut rng).unwrap();

    let ledger = MemoryLedger::new();
    ledger.reject_creates_for(Template::DatasetMeta);
    let outcome = replay::write_graph(&ledger, &g, WriteMode::Sequential, ErrorPolicy::Lenient)
        .await
        .unwrap();
    assert_eq!(outcome.attempted, 7);
    assert_eq!(outcome.failed, 4);
    // Licenses and models still land.
    assert_eq!(ledger.create_count(), 3);
}

#[tokio::test]
async fn missing_record_is_strict_error_but_lenient_skip() {
    let ledger = MemoryLedger::new();
    let unknown = ModelId("M:nobody:0".to_string());
    let owner = Party("Party1::ns".to_string());

    let strict = TraversalRunner::new(&ledger, ErrorPolicy::Strict);
    let err = strict.model_datasets(&unknown, &owner).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));

    let lenient = TraversalRunner::new(&ledger, ErrorPolicy::Lenient);
    lenient.model_datasets(&unknown, &owner).await.unwrap();
}

#[tokio::test]
async fn benchmark_reports_cover_three_traversals() {
    let mut rng = StdRng::seed_from_u64(8);
    let g = graph::generate(&dims(2, 2, 4, 1, 2), "ns", &mut rng).unwrap();
    let ledger = MemoryLedger::new();
    replay::write_graph(&ledger, &g, WriteMode::FanOut, ErrorPolicy::Strict)
        .await
        .unwrap();

    let reports = run_benchmarks(&ledger, &g, ErrorPolicy::Strict, 10, &mut rng)
        .await
        .unwrap();

    let names: Vec<_> = reports.iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec!["model_licenses", "models_by_license", "model_datasets"]
    );
    // Sample clamps to the population: 2 models, 4 licenses.
    assert_eq!(reports[0].calls, 2);
    assert_eq!(reports[1].calls, 4);
    assert_eq!(reports[2].calls, 2);
}
