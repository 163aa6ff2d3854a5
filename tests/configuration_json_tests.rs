use chart_binding::ChartError;
use chart_binding::api::ChartComponentConfig;
use chart_binding::core::{
    ChartConfiguration, ChartOptions, ChartType, Dataset, LegendConfiguration,
    PanZoomConfiguration, StyleValue, TitleConfiguration,
};
use chart_binding::engine::RedrawRequest;
use serde_json::json;

const POLAR_CHART_JSON: &str = r##"{
  "type": "polarArea",
  "data": {
    "labels": ["north", "south"],
    "datasets": [
      {
        "label": "wind",
        "data": [4, 7.5],
        "backgroundColor": ["#f00", "#0f0"],
        "borderWidth": 2,
        "xAxisID": "x-main",
        "spanGaps": true
      }
    ]
  },
  "options": {
    "responsive": false,
    "legend": { "display": true, "position": "bottom" },
    "title": { "display": true, "text": "Wind" }
  }
}"##;

#[test]
fn chart_configuration_parses_engine_wire_shape() {
    let config = ChartConfiguration::from_json_str(POLAR_CHART_JSON).expect("parse");

    assert_eq!(config.chart_type, ChartType::PolarArea);
    assert_eq!(config.data.labels, vec!["north", "south"]);
    let dataset = &config.data.datasets[0];
    assert_eq!(dataset.data, vec![4.0, 7.5]);
    assert_eq!(
        dataset.style.background_color,
        Some(StyleValue::PerPoint(vec!["#f00".to_owned(), "#0f0".to_owned()]))
    );
    assert_eq!(dataset.style.border_width, Some(StyleValue::Scalar(2.0)));
    assert_eq!(dataset.style.x_axis_id.as_deref(), Some("x-main"));
    assert_eq!(dataset.style.span_gaps, Some(true));

    assert_eq!(config.options.responsive(), Some(false));
    let legend = config.options.legend().expect("decode").expect("legend");
    assert_eq!(legend.position.as_deref(), Some("bottom"));
    let title = config.options.title().expect("decode").expect("title");
    assert_eq!(title.text.as_deref(), Some("Wind"));
}

#[test]
fn chart_configuration_json_roundtrip_is_stable() {
    let config = ChartConfiguration::from_json_str(POLAR_CHART_JSON).expect("parse");
    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"type\": \"polarArea\""));
    assert!(json.contains("\"xAxisID\": \"x-main\""));
    assert!(!json.contains("pointRadius"));

    let reparsed = ChartConfiguration::from_json_str(&json).expect("reparse");
    assert_eq!(reparsed, config);
}

#[test]
fn unknown_chart_type_is_rejected() {
    let err = ChartConfiguration::from_json_str(r#"{"type": "bubble"}"#)
        .expect_err("bubble is not supported");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!("bubble".parse::<ChartType>().is_err());
    assert_eq!("doughnut".parse::<ChartType>().expect("parse"), ChartType::Doughnut);
    assert_eq!(ChartType::PolarArea.to_string(), "polarArea");
}

#[test]
fn missing_sections_default_to_empty() {
    let config = ChartConfiguration::from_json_str(r#"{"type": "pie"}"#).expect("parse");
    assert!(config.data.labels.is_empty());
    assert!(config.data.datasets.is_empty());
    assert!(config.options.is_empty());
}

#[test]
fn component_config_loads_with_defaults() {
    let empty = ChartComponentConfig::from_json_str("{}").expect("parse empty");
    assert_eq!(empty, ChartComponentConfig::default());
    assert_eq!(empty.configuration.chart_type, ChartType::Line);

    let config = ChartComponentConfig::from_json_str(
        r#"{
            "configuration": {"type": "bar", "data": {"labels": ["a"]}},
            "reconcile_redraw": {"duration_ms": 0, "lazy": true}
        }"#,
    )
    .expect("parse");
    assert_eq!(config.configuration.chart_type, ChartType::Bar);
    assert_eq!(
        config.reconcile_redraw,
        RedrawRequest {
            duration_ms: Some(0),
            lazy: true,
        }
    );

    let json = config.to_json_pretty().expect("serialize");
    assert_eq!(
        ChartComponentConfig::from_json_str(&json).expect("reparse"),
        config
    );
}

#[test]
fn typed_option_sections_write_recognized_keys() {
    let options = ChartOptions::new()
        .with_responsive(true)
        .with_maintain_aspect_ratio(false)
        .with_responsive_animation_duration(150)
        .with_title(&TitleConfiguration {
            display: Some(true),
            text: Some("Revenue".to_owned()),
            ..TitleConfiguration::default()
        })
        .expect("title")
        .with_legend(&LegendConfiguration {
            display: Some(false),
            ..LegendConfiguration::default()
        })
        .expect("legend")
        .with_zoom(&PanZoomConfiguration {
            enabled: Some(true),
            mode: Some("xy".to_owned()),
        })
        .expect("zoom")
        .with_events(["click", "mousemove"])
        .expect("events");

    assert_eq!(
        options.to_value(),
        json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "responsiveAnimationDuration": 150,
            "title": {"display": true, "text": "Revenue"},
            "legend": {"display": false},
            "zoom": {"enabled": true, "mode": "xy"},
            "events": ["click", "mousemove"]
        })
    );
    assert_eq!(
        options.events().expect("decode"),
        Some(vec!["click".to_owned(), "mousemove".to_owned()])
    );
    assert_eq!(options.pan().expect("decode"), None);
}

#[test]
fn malformed_typed_section_reports_key() {
    let options = ChartOptions::new().with("title", json!("not an object"));
    let err = options.title().expect_err("title must be an object");
    assert!(format!("{err}").contains("`title`"));

    let err = ChartOptions::from_value(json!([1, 2])).expect_err("array is not a bag");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn datasets_serialize_only_set_style_attributes() {
    let dataset = Dataset::new("s", vec![1.0]).with_fill(false);
    let value = serde_json::to_value(&dataset).expect("serialize");
    assert_eq!(value, json!({"label": "s", "data": [1.0], "fill": false}));
}

#[test]
fn data_gaps_survive_json_round_trip() {
    let configuration = ChartConfiguration::new(ChartType::Line)
        .with_labels(["a", "b", "c"])
        .with_datasets(vec![Dataset::new("s", vec![1.0, f64::NAN, 3.0])]);

    let encoded = configuration.to_json_pretty().expect("encode");
    let decoded = ChartConfiguration::from_json_str(&encoded).expect("decode");

    assert_eq!(decoded, configuration);
    assert!(decoded.data.datasets[0].data[1].is_nan());
}

#[test]
fn null_data_points_decode_as_gaps() {
    let decoded = ChartConfiguration::from_json_str(
        r#"{"type":"line","data":{"labels":["a","b"],"datasets":[{"label":"s","data":[1,null]}]}}"#,
    )
    .expect("decode");

    let data = &decoded.data.datasets[0].data;
    assert_eq!(data[0], 1.0);
    assert!(data[1].is_nan());
}
