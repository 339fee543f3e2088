//! Panel view models

use crate::catalog::{Catalog, Record, RecordId, MAX_SCORE};
use crate::render::MaterialHandle;

/// Heading of the dimensions row
pub const DIMENSIONS_LABEL: &str = "Dimensions (m)";

/// A score rendered as a red-to-green bar with a marker
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBar {
    /// Row heading, e.g. "Condition"
    pub label: &'static str,
    /// Score in `[0, 100]`
    pub value: f32,
}

impl ScoreBar {
    /// Create a bar for a score
    pub fn new(label: &'static str, value: f32) -> Self {
        Self { label, value }
    }

    /// Horizontal marker position as a percentage of the bar width
    pub fn marker_percent(&self) -> f32 {
        self.value.clamp(0.0, MAX_SCORE)
    }

    /// Bar color: red at 0, yellow at 50, green at 100
    pub fn color(&self) -> [u8; 3] {
        let p = self.marker_percent();
        [channel(MAX_SCORE - p), channel(p), 0]
    }

    /// Bar color as a CSS `rgb(...)` string
    pub fn css_color(&self) -> String {
        let [r, g, b] = self.color();
        format!("rgb({r}, {g}, {b})")
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(percent: f32) -> u8 {
    (255.0 * percent / MAX_SCORE).round() as u8
}

/// Everything a front-end needs to draw one passport panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    /// Record the panel belongs to; hover events carry this id
    pub id: RecordId,
    /// Material type
    pub title: String,
    /// Record label
    pub subtitle: String,
    /// Condition score bar
    pub condition: ScoreBar,
    /// Reusability score bar
    pub reusability: ScoreBar,
    /// Dimensions text
    pub dimensions: String,
    /// Whether a scene material is bound to the record
    pub bound: bool,
    /// Whether the record's material is the emphasized one
    pub highlighted: bool,
}

impl PanelView {
    /// Build the view of a single record
    pub fn from_record(record: &Record, highlighted: Option<MaterialHandle>) -> Self {
        Self {
            id: record.id().clone(),
            title: record.material.clone(),
            subtitle: record.label.clone(),
            condition: ScoreBar::new("Condition", record.condition),
            reusability: ScoreBar::new("Reusability", record.reusability),
            dimensions: record.dimensions.clone(),
            bound: record.is_bound(),
            highlighted: highlighted.is_some() && record.bound_visual() == highlighted,
        }
    }
}

/// One panel per record, in catalog order
pub fn build_panels(catalog: &Catalog, highlighted: Option<MaterialHandle>) -> Vec<PanelView> {
    catalog
        .records()
        .iter()
        .map(|record| PanelView::from_record(record, highlighted))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::{MaterialStore, RenderMaterial};

    #[test]
    fn test_score_bar_colors() {
        assert_eq!(ScoreBar::new("Condition", 0.0).color(), [255, 0, 0]);
        assert_eq!(ScoreBar::new("Condition", 100.0).color(), [0, 255, 0]);
        assert_eq!(ScoreBar::new("Condition", 50.0).color(), [128, 128, 0]);
        assert_eq!(ScoreBar::new("Reusability", 75.0).css_color(), "rgb(64, 191, 0)");
    }

    #[test]
    fn test_marker_position_follows_score() {
        assert_eq!(ScoreBar::new("Condition", 37.5).marker_percent(), 37.5);
    }

    #[test]
    fn test_panels_follow_catalog_order_and_binding() {
        let mut catalog = Catalog::new(
            "Pavilion",
            "pavilion.glb",
            vec![
                Record::for_material_name("Brick", "Masonry", "Facade", 80.0, 60.0, "1 x 2"),
                Record::for_material_name("Timber", "Wood", "Beam", 30.0, 90.0, "0.2 x 6"),
            ],
        )
        .unwrap();
        let mut store = MaterialStore::new();
        let brick = store.insert(RenderMaterial::new("Brick").with_color_map("brick.png"));
        catalog.bind_by_material_name("Brick", brick, &mut store, Vec3::new(0.0, 0.75, 1.0));

        let panels = build_panels(&catalog, Some(brick));

        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].title, "Masonry");
        assert_eq!(panels[0].subtitle, "Facade");
        assert!(panels[0].bound && panels[0].highlighted);
        assert_eq!(panels[1].reusability.value, 90.0);
        assert!(!panels[1].bound && !panels[1].highlighted);

        let idle = build_panels(&catalog, None);
        assert!(idle.iter().all(|panel| !panel.highlighted));
    }
}
