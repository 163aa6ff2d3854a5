use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tracing::debug;

use crate::core::{
    ChartConfiguration, ChartElement, ChartOptions, ChartType, Dataset, DatasetMeta, ElementList,
    Point, SurfaceSize,
};
use crate::error::{ChartError, ChartResult};

use super::{
    ChartEvent, ChartInstance, DrawingEngine, EventSink, InstanceId, RedrawRequest, ResizePayload,
    SurfaceHandle, SurfaceId,
};

/// Engine operation observed by `RecordingEngine`.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCallKind {
    Construct {
        surface: SurfaceId,
        chart_type: ChartType,
    },
    Destroy,
    SetLabels {
        count: usize,
    },
    SetDatasets {
        count: usize,
    },
    SetOptions,
    Update(RedrawRequest),
    Render(RedrawRequest),
    Stop,
    Resize,
    Clear,
    ToBase64Image,
    GenerateLegend,
    ElementAtPoint(Point),
    ElementsAtPoint(Point),
    DatasetAtPoint(Point),
    DatasetMeta(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineCall {
    pub instance: InstanceId,
    pub kind: EngineCallKind,
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<EngineCall>,
    fail_next_construct: Option<String>,
    fail_next_update: Option<String>,
    rejected_chart_types: Vec<ChartType>,
    drawn: Option<ChartConfiguration>,
    last_sink: Option<EventSink>,
}

impl RecordingState {
    fn record(&mut self, instance: InstanceId, kind: EngineCallKind) {
        self.calls.push(EngineCall { instance, kind });
    }
}

/// Headless drawing engine that records every call it receives.
///
/// Draws nothing. Hit-testing lays labels out as equal-width columns across
/// the surface, which is enough for deterministic host-side tests and for
/// running the binding without a real canvas.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    state: Rc<RefCell<RecordingState>>,
}

impl RecordingEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared inspection/control handle; stays valid after the engine moves
    /// into a component.
    #[must_use]
    pub fn handle(&self) -> RecordingHandle {
        RecordingHandle {
            state: Rc::clone(&self.state),
        }
    }
}

impl DrawingEngine for RecordingEngine {
    type Instance = RecordingInstance;

    fn construct(
        &mut self,
        instance_id: InstanceId,
        surface: &SurfaceHandle,
        configuration: &ChartConfiguration,
        events: EventSink,
    ) -> ChartResult<Self::Instance> {
        let mut state = self.state.borrow_mut();
        state.record(
            instance_id,
            EngineCallKind::Construct {
                surface: surface.id(),
                chart_type: configuration.chart_type,
            },
        );
        if let Some(reason) = state.fail_next_construct.take() {
            return Err(ChartError::EngineConstruction { reason });
        }
        if state
            .rejected_chart_types
            .contains(&configuration.chart_type)
        {
            return Err(ChartError::EngineConstruction {
                reason: format!(
                    "chart type `{}` is not registered",
                    configuration.chart_type
                ),
            });
        }
        debug!(
            instance = %instance_id,
            surface = %surface.id(),
            chart_type = %configuration.chart_type,
            "recording engine constructed instance"
        );
        state.drawn = Some(configuration.clone());
        state.last_sink = Some(events.clone());
        drop(state);

        Ok(RecordingInstance {
            id: instance_id,
            surface: surface.clone(),
            configuration: configuration.clone(),
            events,
            animating: false,
            state: Rc::clone(&self.state),
        })
    }
}

pub struct RecordingInstance {
    id: InstanceId,
    surface: SurfaceHandle,
    configuration: ChartConfiguration,
    events: EventSink,
    animating: bool,
    state: Rc<RefCell<RecordingState>>,
}

impl RecordingInstance {
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Configuration as currently assigned on the instance, including
    /// assignments not yet picked up by `update`.
    #[must_use]
    pub fn configuration(&self) -> &ChartConfiguration {
        &self.configuration
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    fn record(&self, kind: EngineCallKind) {
        self.state.borrow_mut().record(self.id, kind);
    }

    fn column_at(&self, point: Point) -> Option<usize> {
        let size = self.surface.size();
        let columns = if self.configuration.data.labels.is_empty() {
            self.configuration
                .data
                .datasets
                .iter()
                .map(Dataset::len)
                .max()
                .unwrap_or(0)
        } else {
            self.configuration.data.labels.len()
        };
        if columns == 0 || !size.is_valid() {
            return None;
        }
        let width = f64::from(size.width);
        let height = f64::from(size.height);
        if !(0.0..width).contains(&point.x) || !(0.0..height).contains(&point.y) {
            return None;
        }
        let column_width = width / columns as f64;
        Some(((point.x / column_width) as usize).min(columns - 1))
    }

    fn drawn_elements(&self, dataset_index: usize) -> Vec<ChartElement> {
        self.configuration
            .data
            .datasets
            .get(dataset_index)
            .map(|dataset| {
                dataset
                    .data
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| value.is_finite())
                    .map(|(index, _)| ChartElement::new(dataset_index, index))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn hits_in_column(&self, column: usize) -> ElementList {
        self.configuration
            .data
            .datasets
            .iter()
            .enumerate()
            .filter(|(_, dataset)| dataset.data.get(column).is_some_and(|v| v.is_finite()))
            .map(|(dataset_index, _)| ChartElement::new(dataset_index, column))
            .collect()
    }

    fn legend_color(dataset: &Dataset) -> &str {
        dataset
            .style
            .background_color
            .as_ref()
            .and_then(|color| color.resolve(0))
            .map_or("transparent", String::as_str)
    }
}

impl ChartInstance for RecordingInstance {
    fn set_labels(&mut self, labels: &[String]) {
        self.record(EngineCallKind::SetLabels {
            count: labels.len(),
        });
        self.configuration.data.labels = labels.to_vec();
    }

    fn set_datasets(&mut self, datasets: &[Dataset]) {
        self.record(EngineCallKind::SetDatasets {
            count: datasets.len(),
        });
        self.configuration.data.datasets = datasets.to_vec();
    }

    fn set_options(&mut self, options: &ChartOptions) {
        self.record(EngineCallKind::SetOptions);
        self.configuration.options = options.clone();
    }

    fn update(&mut self, request: RedrawRequest) -> ChartResult<()> {
        let mut state = self.state.borrow_mut();
        state.record(self.id, EngineCallKind::Update(request));
        if let Some(reason) = state.fail_next_update.take() {
            return Err(ChartError::EngineCall {
                operation: "update",
                reason,
            });
        }
        state.drawn = Some(self.configuration.clone());
        self.animating = request.duration_ms.is_none_or(|duration| duration > 0);
        Ok(())
    }

    fn render(&mut self, request: RedrawRequest) -> ChartResult<()> {
        self.record(EngineCallKind::Render(request));
        self.animating = request.duration_ms.is_none_or(|duration| duration > 0);
        Ok(())
    }

    fn stop(&mut self) -> ChartResult<()> {
        self.record(EngineCallKind::Stop);
        self.animating = false;
        Ok(())
    }

    fn resize(&mut self) -> ChartResult<()> {
        self.record(EngineCallKind::Resize);
        let size: SurfaceSize = self.surface.size();
        self.events.resize(ResizePayload { size });
        Ok(())
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.record(EngineCallKind::Clear);
        Ok(())
    }

    fn to_base64_image(&self) -> ChartResult<String> {
        self.record(EngineCallKind::ToBase64Image);

        #[derive(Serialize)]
        struct ImageSummary<'a> {
            chart_type: ChartType,
            size: SurfaceSize,
            labels: usize,
            datasets: usize,
            options: &'a ChartOptions,
        }

        let summary = ImageSummary {
            chart_type: self.configuration.chart_type,
            size: self.surface.size(),
            labels: self.configuration.data.labels.len(),
            datasets: self.configuration.data.datasets.len(),
            options: &self.configuration.options,
        };
        let body = serde_json::to_string(&summary).map_err(|e| ChartError::EngineCall {
            operation: "to_base64_image",
            reason: e.to_string(),
        })?;
        Ok(format!("data:application/vnd.chart-binding.recording+json,{body}"))
    }

    fn generate_legend(&self) -> ChartResult<String> {
        self.record(EngineCallKind::GenerateLegend);
        let mut html = format!(
            "<ul class=\"{}-legend\">",
            escape_html(&self.id.0.to_string())
        );
        for dataset in &self.configuration.data.datasets {
            html.push_str(&format!(
                "<li><span style=\"background-color:{}\"></span>{}</li>",
                escape_html(Self::legend_color(dataset)),
                escape_html(&dataset.label)
            ));
        }
        html.push_str("</ul>");
        Ok(html)
    }

    fn element_at_point(&self, point: Point) -> Option<ChartElement> {
        self.record(EngineCallKind::ElementAtPoint(point));
        let column = self.column_at(point)?;
        self.hits_in_column(column).first().copied()
    }

    fn elements_at_point(&self, point: Point) -> ElementList {
        self.record(EngineCallKind::ElementsAtPoint(point));
        self.column_at(point)
            .map(|column| self.hits_in_column(column))
            .unwrap_or_default()
    }

    fn dataset_at_point(&self, point: Point) -> ElementList {
        self.record(EngineCallKind::DatasetAtPoint(point));
        let Some(first) = self
            .column_at(point)
            .and_then(|column| self.hits_in_column(column).first().copied())
        else {
            return ElementList::new();
        };
        self.drawn_elements(first.dataset_index)
            .into_iter()
            .collect()
    }

    fn dataset_meta(&self, index: usize) -> Option<DatasetMeta> {
        self.record(EngineCallKind::DatasetMeta(index));
        let dataset = self.configuration.data.datasets.get(index)?;
        Some(DatasetMeta {
            index,
            chart_type: self.configuration.chart_type,
            label: dataset.label.clone(),
            hidden: false,
            elements: self.drawn_elements(index),
        })
    }

    fn destroy(self) {
        self.record(EngineCallKind::Destroy);
        debug!(instance = %self.id, "recording engine destroyed instance");
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Inspection and fault-injection handle for a `RecordingEngine`.
#[derive(Debug, Clone)]
pub struct RecordingHandle {
    state: Rc<RefCell<RecordingState>>,
}

impl RecordingHandle {
    #[must_use]
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.borrow().calls.clone()
    }

    #[must_use]
    pub fn call_kinds(&self) -> Vec<EngineCallKind> {
        self.state
            .borrow()
            .calls
            .iter()
            .map(|call| call.kind.clone())
            .collect()
    }

    #[must_use]
    pub fn count(&self, matches: impl Fn(&EngineCallKind) -> bool) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| matches(&call.kind))
            .count()
    }

    #[must_use]
    pub fn construct_count(&self) -> usize {
        self.count(|kind| matches!(kind, EngineCallKind::Construct { .. }))
    }

    #[must_use]
    pub fn update_count(&self) -> usize {
        self.count(|kind| matches!(kind, EngineCallKind::Update(_)))
    }

    #[must_use]
    pub fn destroy_count(&self) -> usize {
        self.count(|kind| matches!(kind, EngineCallKind::Destroy))
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.borrow().calls.len()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Configuration last drawn by a successful construct or update.
    #[must_use]
    pub fn drawn_configuration(&self) -> Option<ChartConfiguration> {
        self.state.borrow().drawn.clone()
    }

    pub fn fail_next_construct(&self, reason: impl Into<String>) {
        self.state.borrow_mut().fail_next_construct = Some(reason.into());
    }

    pub fn fail_next_update(&self, reason: impl Into<String>) {
        self.state.borrow_mut().fail_next_update = Some(reason.into());
    }

    /// Makes every later construction with `chart_type` fail.
    pub fn reject_chart_type(&self, chart_type: ChartType) {
        let mut state = self.state.borrow_mut();
        if !state.rejected_chart_types.contains(&chart_type) {
            state.rejected_chart_types.push(chart_type);
        }
    }

    /// Sink handed to the most recently constructed instance.
    #[must_use]
    pub fn last_sink(&self) -> Option<EventSink> {
        self.state.borrow().last_sink.clone()
    }

    /// Simulates an engine callback on the most recent instance.
    ///
    /// Returns `false` when no instance was built or its sink is detached.
    pub fn emit(&self, event: ChartEvent) -> bool {
        let sink = self.last_sink();
        sink.is_some_and(|sink| sink.emit(event))
    }
}
