use serde::{Deserialize, Serialize};

use crate::render::primitives::MarkGeometry;

/// Cubic ease-in-out over `t` in `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Time-based interpolation of one mark's geometry.
///
/// The clock is supplied by the caller in milliseconds. Retargeting starts
/// from the geometry displayed at that instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    from: MarkGeometry,
    to: MarkGeometry,
    started_at_ms: f64,
    duration_ms: f64,
}

impl Transition {
    #[must_use]
    pub fn new(from: MarkGeometry, to: MarkGeometry, now_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            started_at_ms: now_ms,
            duration_ms: duration_ms.max(0.0),
        }
    }

    /// A transition already at rest on `geometry`.
    #[must_use]
    pub fn settled(geometry: MarkGeometry) -> Self {
        Self::new(geometry.clone(), geometry, 0.0, 0.0)
    }

    #[must_use]
    pub fn target(&self) -> &MarkGeometry {
        &self.to
    }

    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Geometry displayed at `now_ms`.
    ///
    /// Geometries that cannot be interpolated hold the start shape and jump to
    /// the target when the transition ends.
    #[must_use]
    pub fn geometry_at(&self, now_ms: f64) -> MarkGeometry {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return self.to.clone();
        }
        self.from
            .lerp(&self.to, ease_cubic_in_out(progress))
            .unwrap_or_else(|| self.from.clone())
    }

    pub fn retarget(&mut self, to: MarkGeometry, now_ms: f64, duration_ms: f64) {
        self.from = self.geometry_at(now_ms);
        self.to = to;
        self.started_at_ms = now_ms;
        self.duration_ms = duration_ms.max(0.0);
    }
}
