//! Vector outlines: a path tagged with how it should be painted.
//!
//! Transforms never mutate the receiver. Each call returns a new outline whose path has
//! the matrix applied to every coordinate, so a base shape can be built once and
//! re-posed every tick.

use crate::foundation::core::{Affine, BezPath, Vec2};

/// How an outline's path is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlineMode {
    /// Fill the interior (non-zero winding).
    Fill,
    /// Stroke the path with the outline's weight.
    Stroke,
}

/// A path plus its paint mode and stroke weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    path: BezPath,
    mode: OutlineMode,
    weight: f64,
}

impl Outline {
    /// Filled outline. The weight is fixed at 1 and ignored when painting.
    pub fn fill(path: BezPath) -> Self {
        Self {
            path,
            mode: OutlineMode::Fill,
            weight: 1.0,
        }
    }

    /// Stroked outline of the given line weight.
    pub fn stroke(path: BezPath, weight: f64) -> Self {
        Self {
            path,
            mode: OutlineMode::Stroke,
            weight,
        }
    }

    /// Outline of the given mode; `weight` only matters for strokes.
    pub fn with_mode(path: BezPath, mode: OutlineMode, weight: f64) -> Self {
        match mode {
            OutlineMode::Fill => Self::fill(path),
            OutlineMode::Stroke => Self::stroke(path, weight),
        }
    }

    /// Underlying path, already transformed.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Paint mode.
    pub fn mode(&self) -> OutlineMode {
        self.mode
    }

    /// Stroke weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Consume the outline and return its path.
    pub fn into_path(self) -> BezPath {
        self.path
    }

    /// New outline translated by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        self.transform(Affine::translate(Vec2::new(dx, dy)))
    }

    /// New outline scaled about the origin. Pass `sx` twice for a uniform scale.
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        self.transform(Affine::scale_non_uniform(sx, sy))
    }

    /// New outline scaled uniformly about the origin.
    pub fn scale_uniform(&self, s: f64) -> Self {
        self.scale(s, s)
    }

    /// New outline rotated about the origin by `radians`.
    ///
    /// Positive angles turn +x toward +y. Surfaces are y-down, so positive angles
    /// appear clockwise on screen.
    pub fn rotate(&self, radians: f64) -> Self {
        self.transform(Affine::rotate(radians))
    }

    /// New outline with an arbitrary affine applied after any previous transforms.
    pub fn transform(&self, affine: Affine) -> Self {
        let mut path = self.path.clone();
        path.apply_affine(affine);
        Self {
            path,
            mode: self.mode,
            weight: self.weight,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/outline.rs"]
mod tests;
