//! End-to-end tests for rendering a story and driving it with scroll events.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use scrollyteller_core::detector::ObserverOptions;
use scrollyteller_core::direction::Direction;
use scrollyteller_core::error::StoryError;
use scrollyteller_core::graph::{DedupedGraph, Dimensions, GraphHandle, RenderRequest};
use scrollyteller_orchestrator::{
    Collaborators, Orchestrator, OrchestratorConfig, SectionConfig, StepContext,
};
use scrollyteller_scroller::ScrollEvent;
use scrollyteller_source::Source;
use scrollyteller_test_support::{
    GraphCall, GraphLog, InMemoryFetcher, RecordedBinding, RecordingDetector, RecordingScaffolder,
};
use serde_json::{Value, json};

const NARRATION_CSV: &str = "trigger,text\nyear:1950,Before the boom\nyear:2008,After the crash\n";
const REGIONS_JSON: &str = r#"[{"region": "Asia", "1950": 1.4}, {"region": "Europe", "1950": 0.5}]"#;

type Seen = Arc<Mutex<Vec<(&'static str, usize, f64, Direction)>>>;

struct Harness {
    orchestrator: Orchestrator,
    scaffolder: Arc<RecordingScaffolder>,
    detector: Arc<RecordingDetector>,
    fetcher: Arc<InMemoryFetcher>,
}

fn harness(fetcher: InMemoryFetcher, sections: Vec<SectionConfig>) -> Harness {
    let scaffolder = Arc::new(RecordingScaffolder::new());
    let detector = Arc::new(RecordingDetector::new());
    let fetcher = Arc::new(fetcher);
    let collaborators = Collaborators {
        fetcher: Arc::clone(&fetcher) as _,
        scaffolder: Arc::clone(&scaffolder) as _,
        detector: Arc::clone(&detector) as _,
    };
    let orchestrator =
        Orchestrator::new(OrchestratorConfig::new("story", sections), collaborators).unwrap();

    Harness {
        orchestrator,
        scaffolder,
        detector,
        fetcher,
    }
}

fn recording_section(id: &str, log: &GraphLog, seen: &Seen) -> SectionConfig {
    let log = log.clone();
    let on_scroll = Arc::clone(seen);
    let on_activate = Arc::clone(seen);
    SectionConfig::new(id)
        .convert_trigger_to_object(true)
        .with_graph(move |_, _| Box::new(log.graph()) as Box<dyn GraphHandle>)
        .on_scroll(move |ctx: StepContext<'_>| {
            on_scroll
                .lock()
                .unwrap()
                .push(("scroll", ctx.index, ctx.progress, ctx.direction));
        })
        .on_activate_narration(move |ctx: StepContext<'_>| {
            on_activate
                .lock()
                .unwrap()
                .push(("activate", ctx.index, ctx.progress, ctx.direction));
            if let Some(year) = ctx.state_value("year") {
                ctx.graph.render(&RenderRequest::on_activate(year.to_owned()));
            }
        })
}

fn enter(index: usize, direction: Direction) -> ScrollEvent {
    ScrollEvent::StepEnter { index, direction }
}

fn progress(index: usize, progress: f64) -> ScrollEvent {
    ScrollEvent::StepProgress {
        index,
        direction: Direction::Down,
        progress,
    }
}

#[tokio::test]
async fn test_story_renders_and_dispatches_in_scroll_order() {
    // Arrange
    let log = GraphLog::new();
    let seen = Seen::default();
    let context_log = GraphLog::new();
    let context_seen = Seen::default();
    let fetcher = InMemoryFetcher::new()
        .with_file("data/narration.csv", NARRATION_CSV)
        .with_file("data/regions.json", REGIONS_JSON)
        .with_file("data/context.csv", "trigger\nyear:1900\nyear:1925\n");
    let mut h = harness(
        fetcher,
        vec![
            recording_section("growth", &log, &seen)
                .with_narration("data/narration.csv")
                .with_data("data/regions.json"),
            recording_section("context", &context_log, &context_seen)
                .with_narration("data/context.csv"),
        ],
    );

    // Act
    h.orchestrator.render().await.unwrap();
    h.orchestrator.handle_scroll_event("growth", enter(0, Direction::Down)).unwrap();
    h.orchestrator.handle_scroll_event("growth", progress(0, 0.25)).unwrap();
    h.orchestrator.handle_scroll_event("growth", progress(0, 0.75)).unwrap();
    h.orchestrator.handle_scroll_event("growth", enter(1, Direction::Down)).unwrap();
    h.orchestrator.handle_scroll_event("growth", enter(0, Direction::Up)).unwrap();

    // Assert
    let section = h.orchestrator.section("growth").unwrap();
    assert_eq!(section.narration().len(), 2);
    assert_eq!(section.data().len(), 2);
    assert_eq!(section.narration()[1].state_value("year"), Some("2008"));
    assert_eq!(section.graph_id(), "story__growth__graph");

    let seen = seen.lock().unwrap().clone();
    let labels: Vec<(&str, usize)> = seen.iter().map(|(label, i, _, _)| (*label, *i)).collect();
    assert_eq!(
        labels,
        vec![
            ("activate", 0),
            ("scroll", 0),
            ("scroll", 0),
            ("activate", 1),
            ("activate", 0),
        ]
    );
    assert!(seen[0].2.abs() < 1e-9);
    assert!(seen[1].2 < seen[2].2);
    assert_eq!(seen[4].3, Direction::Up);

    assert_eq!(
        log.renders(),
        vec![
            RenderRequest::on_activate("1950"),
            RenderRequest::on_activate("2008"),
            RenderRequest::on_activate("1950"),
        ]
    );
    assert_eq!(h.scaffolder.active_steps("growth"), vec![0]);

    let context = h.orchestrator.section("context").unwrap();
    assert_eq!(context.position(), 1);
    assert_eq!(context.narration().len(), 2);
    assert_eq!(context.scroller().active_index(), None);
    assert!(h.scaffolder.active_steps("context").is_empty());
    assert!(context_seen.lock().unwrap().is_empty());
    assert!(context_log.calls().is_empty());
}

#[tokio::test]
async fn test_failing_data_source_fails_whole_render_after_siblings_settle() {
    // Arrange
    let log = GraphLog::new();
    let seen = Seen::default();
    let fetcher = InMemoryFetcher::new()
        .with_file("a.csv", NARRATION_CSV)
        .with_file("b.csv", NARRATION_CSV)
        .with_failure("a.json")
        .with_delayed_file("b.json", REGIONS_JSON, Duration::from_millis(20));
    let mut h = harness(
        fetcher,
        vec![
            recording_section("a", &log, &seen)
                .with_narration("a.csv")
                .with_data("a.json"),
            recording_section("b", &log, &seen)
                .with_narration("b.csv")
                .with_data("b.json"),
        ],
    );

    // Act
    let result = h.orchestrator.render().await;

    // Assert
    assert!(matches!(result, Err(StoryError::Fetch { ref path, .. }) if path == "a.json"));
    assert!(h.fetcher.completed_paths().contains(&"b.json".to_owned()));
    assert!(h.orchestrator.sections().is_empty());
    assert!(h.scaffolder.scaffolded_sections().is_empty());
    assert!(h.detector.bindings().is_empty());
}

#[tokio::test]
async fn test_data_resolution_waits_for_all_narration() {
    // Arrange
    let log = GraphLog::new();
    let seen = Seen::default();
    let fetcher = InMemoryFetcher::new()
        .with_delayed_file("slow.csv", NARRATION_CSV, Duration::from_millis(30))
        .with_file("fast.csv", NARRATION_CSV)
        .with_file("fast.json", REGIONS_JSON);
    let mut h = harness(
        fetcher,
        vec![
            recording_section("slow", &log, &seen).with_narration("slow.csv"),
            recording_section("fast", &log, &seen)
                .with_narration("fast.csv")
                .with_data("fast.json"),
        ],
    );

    // Act
    h.orchestrator.render().await.unwrap();

    // Assert
    let requested = h.fetcher.requested_paths();
    let completed = h.fetcher.completed_paths();
    let data_requested_at = requested.iter().position(|p| p == "fast.json").unwrap();
    assert_eq!(data_requested_at, requested.len() - 1);
    assert_eq!(&completed[..2], &["fast.csv".to_owned(), "slow.csv".to_owned()]);
    assert_eq!(completed.last().map(String::as_str), Some("fast.json"));
}

#[tokio::test]
async fn test_narration_failure_never_starts_data_resolution() {
    // Arrange
    let log = GraphLog::new();
    let seen = Seen::default();
    let fetcher = InMemoryFetcher::new()
        .with_failure("a.csv")
        .with_file("b.csv", NARRATION_CSV)
        .with_file("a.json", REGIONS_JSON)
        .with_file("b.json", REGIONS_JSON);
    let mut h = harness(
        fetcher,
        vec![
            recording_section("a", &log, &seen)
                .with_narration("a.csv")
                .with_data("a.json"),
            recording_section("b", &log, &seen)
                .with_narration("b.csv")
                .with_data("b.json"),
        ],
    );

    // Act
    let result = h.orchestrator.render().await;

    // Assert
    assert!(matches!(result, Err(StoryError::Fetch { ref path, .. }) if path == "a.csv"));
    let requested = h.fetcher.requested_paths();
    assert!(!requested.iter().any(|p| p.ends_with(".json")));
    assert!(h.orchestrator.sections().is_empty());
}

#[tokio::test]
async fn test_pending_and_inline_sources_resolve() {
    // Arrange
    let log = GraphLog::new();
    let seen = Seen::default();
    let pending = Source::pending(async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok(json!([{"trigger": "step:one"}, {"trigger": "step:two"}, {"trigger": "step:three"}]))
    });
    let mut h = harness(
        InMemoryFetcher::new(),
        vec![
            recording_section("pending", &log, &seen).with_narration(pending),
            recording_section("inline", &log, &seen)
                .with_narration(vec![json!({"trigger": "step:only"})])
                .with_data(vec![json!({"value": 1})]),
        ],
    );

    // Act
    h.orchestrator.render().await.unwrap();

    // Assert
    let sections = h.orchestrator.sections();
    assert_eq!(sections[0].id(), "pending");
    assert_eq!(sections[0].step_count(), 3);
    assert!(sections[0].data().is_empty());
    assert_eq!(sections[1].position(), 1);
    assert_eq!(sections[1].data(), &[json!({"value": 1})]);
    assert!(h.fetcher.requested_paths().is_empty());
}

#[tokio::test]
async fn test_reshaped_data_is_visible_to_graph_constructor_and_callbacks() {
    // Arrange
    let built_with: Arc<Mutex<Option<Value>>> = Arc::default();
    let seen_total: Arc<Mutex<Option<Value>>> = Arc::default();
    let log = GraphLog::new();
    let section = {
        let built_with = Arc::clone(&built_with);
        let seen_total = Arc::clone(&seen_total);
        let log = log.clone();
        SectionConfig::new("totals")
            .with_narration(vec![json!({"trigger": "a"})])
            .with_data(vec![json!({"n": 2}), json!({"n": 3})])
            .with_reshape(|rows| {
                json!({"total": rows.iter().filter_map(|row| row["n"].as_i64()).sum::<i64>()})
            })
            .with_graph(move |graph_id, view| {
                *built_with.lock().unwrap() = view.derived.cloned();
                assert_eq!(graph_id, view.graph_id);
                Box::new(log.graph()) as Box<dyn GraphHandle>
            })
            .on_activate_narration(move |ctx: StepContext<'_>| {
                *seen_total.lock().unwrap() = ctx.section.derived.cloned();
            })
    };
    let mut h = harness(InMemoryFetcher::new(), vec![section]);

    // Act
    h.orchestrator.render().await.unwrap();
    h.orchestrator.handle_scroll_event("totals", enter(0, Direction::Down)).unwrap();

    // Assert
    assert_eq!(built_with.lock().unwrap().clone(), Some(json!({"total": 5})));
    assert_eq!(seen_total.lock().unwrap().clone(), Some(json!({"total": 5})));
    assert_eq!(
        h.orchestrator.section("totals").unwrap().derived(),
        Some(&json!({"total": 5}))
    );
}

#[tokio::test]
async fn test_only_one_step_active_per_section() {
    // Arrange
    let log = GraphLog::new();
    let seen = Seen::default();
    let rows = vec![json!({"trigger": "a"}), json!({"trigger": "b"}), json!({"trigger": "c"})];
    let mut h = harness(
        InMemoryFetcher::new(),
        vec![
            recording_section("left", &log, &seen).with_narration(rows.clone()),
            recording_section("right", &log, &seen).with_narration(rows),
        ],
    );
    h.orchestrator.render().await.unwrap();

    // Act
    h.orchestrator.handle_scroll_event("left", enter(0, Direction::Down)).unwrap();
    h.orchestrator.handle_scroll_event("left", enter(2, Direction::Down)).unwrap();
    h.orchestrator.handle_scroll_event("right", enter(1, Direction::Down)).unwrap();

    // Assert
    assert_eq!(h.scaffolder.active_steps("left"), vec![2]);
    assert_eq!(h.scaffolder.active_steps("right"), vec![1]);
    assert_eq!(h.orchestrator.section("left").unwrap().scroller().active_index(), Some(2));
}

#[tokio::test]
async fn test_out_of_range_step_is_rejected() {
    // Arrange
    let log = GraphLog::new();
    let seen = Seen::default();
    let mut h = harness(
        InMemoryFetcher::new(),
        vec![recording_section("a", &log, &seen).with_narration(vec![json!({"trigger": "x"})])],
    );
    h.orchestrator.render().await.unwrap();

    // Act
    let result = h.orchestrator.handle_scroll_event("a", enter(5, Direction::Down));

    // Assert
    assert!(matches!(
        result,
        Err(StoryError::UnknownStep { ref section_id, index: 5 }) if section_id == "a"
    ));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_resize_defaults_to_ninety_percent_of_container() {
    // Arrange
    let log = GraphLog::new();
    let seen = Seen::default();
    let mut h = harness(
        InMemoryFetcher::new(),
        vec![recording_section("a", &log, &seen).with_narration(vec![json!({"trigger": "x"})])],
    );
    h.orchestrator.render().await.unwrap();

    // Act
    h.orchestrator.handle_resize(Dimensions::new(1000.0, 500.0)).unwrap();

    // Assert
    assert_eq!(log.calls(), vec![GraphCall::Resize(Dimensions::new(900.0, 450.0))]);
}

#[tokio::test]
async fn test_resize_callback_replaces_default_resize() {
    // Arrange
    let log = GraphLog::new();
    let seen = Seen::default();
    let received: Arc<Mutex<Vec<(Dimensions, Dimensions)>>> = Arc::default();
    let section = {
        let received = Arc::clone(&received);
        recording_section("a", &log, &seen)
            .with_narration(vec![json!({"trigger": "x"})])
            .on_resize(move |ctx| {
                received
                    .lock()
                    .unwrap()
                    .push((ctx.container, ctx.graph_dimensions));
                ctx.graph.render(&RenderRequest::new("resized", 0));
            })
    };
    let mut h = harness(InMemoryFetcher::new(), vec![section]);
    h.orchestrator.render().await.unwrap();

    // Act
    h.orchestrator.handle_resize(Dimensions::new(200.0, 100.0)).unwrap();

    // Assert
    assert_eq!(
        received.lock().unwrap().clone(),
        vec![(Dimensions::new(200.0, 100.0), Dimensions::new(180.0, 90.0))]
    );
    assert!(log.resizes().is_empty());
    assert_eq!(log.renders(), vec![RenderRequest::new("resized", 0)]);
}

#[tokio::test]
async fn test_deduped_graph_skips_repeated_cursor() {
    // Arrange
    let log = GraphLog::new();
    let section = {
        let log = log.clone();
        SectionConfig::new("a")
            .with_narration(vec![json!({"trigger": "x"})])
            .with_graph(move |_, _| Box::new(DedupedGraph::new(log.graph())) as Box<dyn GraphHandle>)
            .on_scroll(|ctx: StepContext<'_>| {
                ctx.graph.render(&RenderRequest::on_scroll("same"));
            })
    };
    let mut h = harness(InMemoryFetcher::new(), vec![section]);
    h.orchestrator.render().await.unwrap();
    h.orchestrator.handle_scroll_event("a", enter(0, Direction::Down)).unwrap();

    // Act
    h.orchestrator.handle_scroll_event("a", progress(0, 0.1)).unwrap();
    h.orchestrator.handle_scroll_event("a", progress(0, 0.2)).unwrap();
    h.orchestrator.handle_scroll_event("a", progress(0, 0.3)).unwrap();

    // Assert
    assert_eq!(log.renders(), vec![RenderRequest::on_scroll("same")]);
}

#[tokio::test]
async fn test_detector_receives_each_section_with_its_options() {
    // Arrange
    let log = GraphLog::new();
    let seen = Seen::default();
    let tuned = ObserverOptions {
        offset: 0.8,
        progress: false,
    };
    let mut h = harness(
        InMemoryFetcher::new(),
        vec![
            recording_section("a", &log, &seen).with_narration(vec![json!({"trigger": "x"})]),
            recording_section("b", &log, &seen)
                .with_narration(vec![json!({"trigger": "x"}), json!({"trigger": "y"})])
                .with_observer_options(tuned),
        ],
    );

    // Act
    h.orchestrator.render().await.unwrap();

    // Assert
    assert_eq!(
        h.detector.bindings(),
        vec![
            RecordedBinding {
                section_id: "a".to_owned(),
                graph_id: "story__a__graph".to_owned(),
                step_count: 1,
                options: ObserverOptions::default(),
            },
            RecordedBinding {
                section_id: "b".to_owned(),
                graph_id: "story__b__graph".to_owned(),
                step_count: 2,
                options: tuned,
            },
        ]
    );
}
