use chart_binding::api::{
    ChartComponent, ChartComponentConfig, ComponentLifecycle, ConfigChange, ConfigChanges,
    ReconcileOutcome,
};
use chart_binding::core::{ChartConfiguration, ChartOptions, ChartType, Dataset, SurfaceSize};
use chart_binding::engine::{
    EngineCallKind, RecordingEngine, RecordingHandle, RedrawRequest, SurfaceHandle, SurfaceId,
};
use serde_json::json;

fn mounted(config: ChartConfiguration) -> (ChartComponent<RecordingEngine>, RecordingHandle) {
    let engine = RecordingEngine::new();
    let handle = engine.handle();
    let surface = SurfaceHandle::new(SurfaceId(1), SurfaceSize::new(400, 300));
    let mut component = ChartComponent::new(engine, surface, ChartComponentConfig::new(config));
    component.on_mount().expect("mount");
    handle.clear_calls();
    (component, handle)
}

fn line_chart() -> ChartConfiguration {
    ChartConfiguration::new(ChartType::Line)
        .with_labels(["x"])
        .with_datasets(vec![Dataset::new("sales", vec![1.0])])
}

#[test]
fn unchanged_configuration_makes_no_engine_call() {
    let (mut component, handle) = mounted(line_chart());

    for _ in 0..5 {
        let outcome = component.on_check().expect("check");
        assert_eq!(outcome, ReconcileOutcome::Unchanged);
    }
    assert_eq!(handle.call_count(), 0);
}

#[test]
fn second_reconcile_after_label_change_is_noop() {
    let (mut component, handle) = mounted(line_chart());

    component.labels = vec!["a".to_owned(), "b".to_owned()];
    let first = component.reconcile().expect("first reconcile");
    assert_eq!(
        first,
        ReconcileOutcome::Updated(ConfigChanges::from_change(ConfigChange::Labels))
    );
    assert_eq!(
        handle.call_kinds(),
        vec![
            EngineCallKind::SetLabels { count: 2 },
            EngineCallKind::Update(RedrawRequest::default()),
        ]
    );

    handle.clear_calls();
    let second = component.reconcile().expect("second reconcile");
    assert_eq!(second, ReconcileOutcome::Unchanged);
    assert_eq!(handle.call_count(), 0);
}

#[test]
fn freshly_reassigned_equal_values_are_not_a_change() {
    let (mut component, handle) = mounted(
        line_chart().with_options(ChartOptions::new().with("legend", json!({"display": true}))),
    );

    component.datasets = component.datasets.clone();
    component.labels = component.labels.iter().cloned().collect();
    component.options = ChartOptions::new().with("legend", json!({"display": true}));

    assert_eq!(
        component.reconcile().expect("reconcile"),
        ReconcileOutcome::Unchanged
    );
    assert_eq!(handle.call_count(), 0);
}

#[test]
fn nan_gaps_do_not_make_datasets_dirty() {
    let (mut component, handle) = mounted(
        ChartConfiguration::new(ChartType::Line)
            .with_labels(["a", "b", "c"])
            .with_datasets(vec![Dataset::new("gappy", vec![1.0, f64::NAN, 3.0])]),
    );

    component.datasets = vec![Dataset::new("gappy", vec![1.0, f64::NAN, 3.0])];
    assert_eq!(
        component.reconcile().expect("reconcile"),
        ReconcileOutcome::Unchanged
    );
    assert_eq!(handle.call_count(), 0);
}

#[test]
fn reverting_a_change_before_the_check_is_a_noop() {
    let (mut component, handle) = mounted(line_chart());

    component.labels.push("y".to_owned());
    component.labels.pop();
    component.chart_type = ChartType::Bar;
    component.chart_type = ChartType::Line;

    assert_eq!(
        component.reconcile().expect("reconcile"),
        ReconcileOutcome::Unchanged
    );
    assert_eq!(handle.call_count(), 0);
}

#[test]
fn reconcile_uses_configured_redraw_request() {
    let (mut component, handle) = mounted(line_chart());
    component.set_reconcile_redraw(RedrawRequest::animated(250, true));

    component.datasets[0].data.push(2.0);
    component.reconcile().expect("reconcile");

    assert_eq!(
        handle.call_kinds().last(),
        Some(&EngineCallKind::Update(RedrawRequest::animated(250, true)))
    );
    let drawn = handle.drawn_configuration().expect("drawn configuration");
    assert_eq!(drawn.data.datasets[0].data, vec![1.0, 2.0]);
}
