use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::config::DashboardConfig;
use crate::api::state::AppState;
use crate::core::{
    ChartLayout, LayoutEngine, LayoutInputs, ScreenCategory, Segment, TickSet, TimeScale,
    ValueDomain, ValueScale, build_time_scale, build_value_scale,
};
use crate::error::ChartResult;
use crate::render::{
    AreaOptions, AreaRenderer, DiamondRenderer, DrawRequest, LineRenderer, PointRenderer,
    ReconcileSummary, RectRenderer, Renderer, Scene, SceneFrame, SegmentRenderer,
};

/// Mark family used to draw one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkLayer {
    Lines,
    Points,
    Areas(AreaOptions),
    Rects,
    Diamonds,
}

/// Segments of one data kind drawn with one mark family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRequest {
    pub layer: MarkLayer,
    pub data_kind: String,
    pub segments: Vec<Segment>,
    pub visible: bool,
}

impl LayerRequest {
    #[must_use]
    pub fn new(layer: MarkLayer, data_kind: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            layer,
            data_kind: data_kind.into(),
            segments,
            visible: true,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Inputs for one chart draw.
#[derive(Debug, Clone, Copy)]
pub struct ChartFrameRequest<'a> {
    /// Width of the chart container, when it has been measured.
    pub container_width: Option<f64>,
    pub viewport_width: f64,
    pub time_domain: Option<(NaiveDateTime, NaiveDateTime)>,
    pub result_domain: Option<ValueDomain>,
    pub reverse_range: bool,
    pub layers: &'a [LayerRequest],
    pub now_ms: f64,
}

/// Derived values of one draw, read by axis and status-bar components.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub layout: ChartLayout,
    pub screen: ScreenCategory,
    pub x_scale: TimeScale,
    pub y_scale: ValueScale,
    /// `None` while no result domain is known.
    pub ticks: Option<TickSet>,
    pub summary: ReconcileSummary,
}

/// Time-series chart view owning the retained scene.
#[derive(Debug)]
pub struct TimeSeriesChart {
    config: DashboardConfig,
    enable_clip: bool,
    clip_id_key: Option<String>,
    layout_engine: LayoutEngine,
    scene: Scene,
}

impl TimeSeriesChart {
    pub fn new(config: DashboardConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            enable_clip: false,
            clip_id_key: None,
            layout_engine: LayoutEngine::new(config.layout_profile),
            scene: Scene::new(),
        })
    }

    /// Clips every layer to `url(#{key}-chart-clip)`.
    #[must_use]
    pub fn with_clip(mut self, clip_id_key: impl Into<String>) -> Self {
        self.enable_clip = true;
        self.clip_id_key = Some(clip_id_key.into());
        self
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout_engine.layout()
    }

    #[must_use]
    pub fn layout_engine(&self) -> &LayoutEngine {
        &self.layout_engine
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Recomputes layout, scales and ticks, then draws every layer.
    pub fn draw(&mut self, state: &AppState, request: &ChartFrameRequest<'_>) -> ChartFrame {
        let screen = ScreenCategory::classify(request.viewport_width, &self.config.breakpoints);
        let layout = self.layout_engine.update(LayoutInputs {
            container_width: request.container_width,
            result_domain: request.result_domain,
            scale_kind: state.scale_kind,
            screen,
        });

        let x_scale = build_time_scale(
            request.time_domain,
            layout.width - layout.margin.left - layout.margin.right,
        );
        let y_scale = build_value_scale(
            request.result_domain,
            layout.height - layout.margin.top - layout.margin.bottom,
            state.scale_kind.uses_symlog(),
            request.reverse_range,
        );
        let ticks = request.result_domain.map(|domain| {
            self.layout_engine
                .ticks(domain, state.scale_kind, request.reverse_range)
        });

        let mut summary = ReconcileSummary::default();
        for layer in request.layers {
            let draw = DrawRequest {
                visible: layer.visible,
                segments: &layer.segments,
                data_kind: &layer.data_kind,
                x_scale,
                y_scale,
                transition_length_ms: state.transition_length_ms,
                enable_clip: self.enable_clip,
                clip_id_key: self.clip_id_key.as_deref(),
                now_ms: request.now_ms,
            };
            let layer_summary = match &layer.layer {
                MarkLayer::Lines => LineRenderer.draw(&mut self.scene, &draw),
                MarkLayer::Points => PointRenderer.draw(&mut self.scene, &draw),
                MarkLayer::Areas(options) => {
                    AreaRenderer::new(options.clone()).draw(&mut self.scene, &draw)
                }
                MarkLayer::Rects => RectRenderer.draw(&mut self.scene, &draw),
                MarkLayer::Diamonds => DiamondRenderer.draw(&mut self.scene, &draw),
            };
            summary.absorb(layer_summary);
        }

        debug!(
            screen = screen.as_str(),
            layers = request.layers.len(),
            marks = self.scene.mark_count(),
            ops = summary.total(),
            "chart drawn"
        );
        ChartFrame {
            layout,
            screen,
            x_scale,
            y_scale,
            ticks,
            summary,
        }
    }

    #[must_use]
    pub fn frame_at(&self, now_ms: f64) -> SceneFrame {
        self.scene.frame_at(now_ms)
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R, now_ms: f64) -> ChartResult<()> {
        renderer.render(&self.frame_at(now_ms))
    }
}
