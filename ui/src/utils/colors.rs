//! Shared color constants for the UI.

use egui::Color32;

/// Red color for error/failed status.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber color for values that need attention (deductions, absences).
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Border color for the Typora-like table style (subtle gray).
pub const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

/// Header background color for the Typora-like table style (light gray).
pub const HEADER_BG_COLOR: Color32 = Color32::from_rgb(245, 245, 245);

/// Placeholder bars of the loading skeleton.
pub const SKELETON_COLOR: Color32 = Color32::from_rgb(225, 225, 225);
