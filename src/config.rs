//! Process-wide display configuration and the painter boundary.
//!
//! [`DisplayConfig`] replaces mutable static rendering state: it is built
//! once at setup, then shared read-only across every catalog object. The
//! renderer consumes only [`DisplayQuantities`] through the [`HintPainter`]
//! capability and never reaches into raw catalog fields.

use crate::types::ColorCategory;
use serde::{Deserialize, Serialize};

/// Linear RGB triple, components in 0..1.
pub type Rgb = [f32; 3];

/// Static display configuration, written once during setup and read-only
/// thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Objects fainter than this apparent magnitude get no hint marker.
    pub max_hint_magnitude: f32,
    /// Overall brightness applied to hint markers, 0..1.
    pub hints_brightness: f32,
    pub label_color: Rgb,
    pub circle_color: Rgb,
    pub galaxy_color: Rgb,
    pub cluster_color: Rgb,
    pub nebula_color: Rgb,
    pub star_color: Rgb,
    pub reference_color: Rgb,
    /// Scaling applied to the hint circle radius.
    pub circle_scale: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_hint_magnitude: 15.0,
            hints_brightness: 1.0,
            label_color: [0.4, 0.6, 1.0],
            circle_color: [0.8, 0.8, 0.1],
            galaxy_color: [1.0, 0.5, 0.5],
            cluster_color: [1.0, 1.0, 0.5],
            nebula_color: [0.4, 0.5, 0.8],
            star_color: [1.0, 1.0, 1.0],
            reference_color: [0.5, 0.5, 0.5],
            circle_scale: 1.0,
        }
    }
}

impl DisplayConfig {
    /// Hint color for a display category.
    pub fn color_for(&self, category: ColorCategory) -> Rgb {
        match category {
            ColorCategory::Galaxy => self.galaxy_color,
            ColorCategory::Cluster => self.cluster_color,
            ColorCategory::Nebula => self.nebula_color,
            ColorCategory::Star => self.star_color,
            ColorCategory::Reference => self.reference_color,
        }
    }
}

/// Everything the renderer is allowed to know about one object.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayQuantities {
    /// Selection rank, lower wins.
    pub priority: f32,
    /// Field of view on approach, degrees.
    pub close_view_fov: f64,
    pub type_label: &'static str,
    pub color: Rgb,
    /// Hint circle radius, degrees, already scaled by the configuration.
    pub circle_radius: f32,
    pub brightness: f32,
}

/// Painter capability supplied by the rendering collaborator.
pub trait HintPainter {
    fn draw_hint(&mut self, quantities: &DisplayQuantities);
}
