use chart_binding::ChartError;
use chart_binding::api::{ChartComponent, ChartComponentConfig, ComponentLifecycle};
use chart_binding::core::{
    ChartConfiguration, ChartElement, ChartType, Dataset, Point, SurfaceSize,
};
use chart_binding::engine::{
    EngineCallKind, RecordingEngine, RecordingHandle, RedrawRequest, SurfaceHandle, SurfaceId,
};

fn mounted() -> (ChartComponent<RecordingEngine>, RecordingHandle) {
    let engine = RecordingEngine::new();
    let handle = engine.handle();
    let surface = SurfaceHandle::new(SurfaceId(1), SurfaceSize::new(400, 300));
    let config = ChartComponentConfig::new(
        ChartConfiguration::new(ChartType::Bar)
            .with_labels(["a", "b", "c", "d"])
            .with_datasets(vec![
                Dataset::new("Sales & Co", vec![1.0, f64::NAN, 3.0, 4.0])
                    .with_background_color("red"),
                Dataset::new("<b>costs</b>", vec![5.0, 6.0, 7.0, 8.0]),
            ]),
    );
    let mut component = ChartComponent::new(engine, surface, config);
    component.on_mount().expect("mount");
    handle.clear_calls();
    (component, handle)
}

fn assert_no_instance<T: std::fmt::Debug>(result: Result<T, ChartError>, expected: &str) {
    match result {
        Err(ChartError::NoInstance { operation }) => assert_eq!(operation, expected),
        other => panic!("expected NoInstance for {expected}, got {other:?}"),
    }
}

#[test]
fn redraw_operations_forward_arguments() {
    let (mut component, handle) = mounted();

    component
        .render(RedrawRequest::animated(400, true))
        .expect("render");
    assert!(component.chart().expect("instance").is_animating());
    component.stop().expect("stop");
    assert!(!component.chart().expect("instance").is_animating());
    component.update(RedrawRequest::immediate()).expect("update");
    component.clear().expect("clear");

    assert_eq!(
        handle.call_kinds(),
        vec![
            EngineCallKind::Render(RedrawRequest::animated(400, true)),
            EngineCallKind::Stop,
            EngineCallKind::Update(RedrawRequest::immediate()),
            EngineCallKind::Clear,
        ]
    );
}

#[test]
fn manual_update_does_not_advance_snapshot() {
    let (mut component, _handle) = mounted();

    component.labels.push("e".to_owned());
    component.update(RedrawRequest::default()).expect("update");
    assert!(component.pending_diff().is_some_and(|diff| !diff.is_unchanged()));
}

#[test]
fn hit_testing_maps_points_to_label_columns() {
    let (component, _handle) = mounted();

    assert_eq!(
        component
            .element_at_point(Point::new(150.0, 10.0))
            .expect("element"),
        Some(ChartElement::new(1, 1))
    );
    assert_eq!(
        component
            .elements_at_point(Point::new(50.0, 10.0))
            .expect("elements")
            .as_slice(),
        &[ChartElement::new(0, 0), ChartElement::new(1, 0)]
    );
    assert_eq!(
        component
            .dataset_at_point(Point::new(50.0, 10.0))
            .expect("dataset")
            .as_slice(),
        &[
            ChartElement::new(0, 0),
            ChartElement::new(0, 2),
            ChartElement::new(0, 3),
        ]
    );
    assert_eq!(
        component
            .element_at_point(Point::new(500.0, 10.0))
            .expect("outside"),
        None
    );
    assert!(
        component
            .elements_at_point(Point::new(-1.0, 10.0))
            .expect("outside")
            .is_empty()
    );
}

#[test]
fn dataset_meta_describes_drawn_elements() {
    let (component, _handle) = mounted();

    let meta = component
        .dataset_meta(0)
        .expect("meta call")
        .expect("dataset 0");
    assert_eq!(meta.label, "Sales & Co");
    assert_eq!(meta.chart_type, ChartType::Bar);
    assert_eq!(meta.elements.len(), 3);
    assert_eq!(component.dataset_meta(5).expect("meta call"), None);
}

#[test]
fn legend_and_image_export_come_from_the_engine() {
    let (component, handle) = mounted();

    let legend = component.generate_legend().expect("legend");
    assert!(legend.starts_with("<ul class=\""));
    assert!(legend.contains("background-color:red"));
    assert!(legend.contains("Sales &amp; Co"));
    assert!(legend.contains("&lt;b&gt;costs&lt;/b&gt;"));

    let image = component.to_base64_image().expect("image");
    assert!(image.starts_with("data:"));
    assert_eq!(
        handle.call_kinds(),
        vec![EngineCallKind::GenerateLegend, EngineCallKind::ToBase64Image]
    );
}

#[test]
fn every_operation_fails_with_no_instance_after_unmount() {
    let (mut component, handle) = mounted();
    component.on_unmount();
    handle.clear_calls();

    assert_no_instance(component.update(RedrawRequest::default()), "update");
    assert_no_instance(component.render(RedrawRequest::default()), "render");
    assert_no_instance(component.stop(), "stop");
    assert_no_instance(component.resize(), "resize");
    assert_no_instance(component.clear(), "clear");
    assert_no_instance(component.to_base64_image(), "to_base64_image");
    assert_no_instance(component.generate_legend(), "generate_legend");
    let point = Point::new(10.0, 10.0);
    assert_no_instance(component.element_at_point(point), "element_at_point");
    assert_no_instance(component.elements_at_point(point), "elements_at_point");
    assert_no_instance(component.dataset_at_point(point), "dataset_at_point");
    assert_no_instance(component.dataset_meta(0), "dataset_meta");
    assert!(!component.destroy());
    assert!(component.chart().is_none());

    assert_eq!(handle.call_count(), 0);
}

#[test]
fn explicit_destroy_keeps_component_mounted_but_inert() {
    let (mut component, handle) = mounted();

    assert!(component.destroy());
    assert_eq!(handle.destroy_count(), 1);
    component.labels.clear();
    assert_eq!(
        component.reconcile().expect("reconcile"),
        chart_binding::ReconcileOutcome::Skipped
    );
    assert_no_instance(component.clear(), "clear");
}
