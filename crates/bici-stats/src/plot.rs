//! Rendering boundary
//!
//! Samples draw themselves onto a caller-supplied [`PlotTarget`]. There is no
//! ambient "current axes": the target is always an explicit argument, and
//! nothing flows back from the target to the sample.

use serde::{Deserialize, Serialize};

/// Draw color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// Gray level, 0 (black) to 1 (white)
    Gray(f64),
    /// RGB, each channel 0 to 1
    Rgb(f64, f64, f64),
}

impl Color {
    pub const BLACK: Color = Color::Gray(0.0);
    pub const WHITE: Color = Color::Gray(1.0);

    /// RGB channels
    pub fn to_rgb(&self) -> [f64; 3] {
        match *self {
            Color::Gray(level) => [level, level, level],
            Color::Rgb(r, g, b) => [r, g, b],
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Marker (scatter) style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Edge color
    pub color: Color,
    /// Face color; `None` means same as edge
    pub face_color: Option<Color>,
    /// Marker size in points
    pub size: f64,
    /// Legend label
    pub label: Option<String>,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            face_color: None,
            size: 6.0,
            label: None,
        }
    }
}

impl MarkerStyle {
    pub fn with_face_color(mut self, face_color: Color) -> Self {
        self.face_color = Some(face_color);
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Line (trace) style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    /// Line width in points
    pub width: f64,
    pub label: Option<String>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            label: None,
        }
    }
}

impl LineStyle {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Options shared by the univariate `plot` methods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotOptions {
    /// Overlay the sample mean
    pub plot_sample_mean: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            plot_sample_mean: true,
        }
    }
}

/// A drawing surface
pub trait PlotTarget {
    /// Draw markers at `(x[i], y[i])`
    fn scatter(&mut self, x: &[f64], y: &[f64], style: &MarkerStyle);

    /// Draw a polyline through `(x[i], y[i])`
    fn line(&mut self, x: &[f64], y: &[f64], style: &LineStyle);
}
