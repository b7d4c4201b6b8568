//! Cosmetic overrides for the tab widget.
//!
//! None of these values feed the layout math; the indicator and auto-scroll
//! always work from measured geometry.

use derive_setters::Setters;

/// RGBA color, components in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a color from float components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from 8-bit channels and a float alpha.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }
}

/// Padding on each side of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    /// Left.
    pub left: f32,
    /// Top.
    pub top: f32,
    /// Right.
    pub right: f32,
    /// Bottom.
    pub bottom: f32,
}

impl Insets {
    /// Same padding horizontally and vertically.
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }
}

/// Style of a rectangular surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxStyle {
    /// Fill color.
    pub background: Color,
    /// Corner radius; large values give a pill shape.
    pub corner_radius: f32,
    /// Inner padding.
    pub padding: Insets,
    /// Gap between children.
    pub gap: f32,
    /// Fixed height, if any.
    #[setters(strip_option)]
    pub height: Option<f32>,
}

/// Label typography.
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in logical pixels.
    pub font_size: f32,
    /// Whether the label is bold.
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            font_size: 16.0,
            bold: true,
        }
    }
}

/// Override points of the tab widget.
#[derive(Clone, Debug, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TabsStyle {
    /// Each tab label's container.
    pub tab_item: BoxStyle,
    /// Label text of inactive tabs.
    pub tab_item_text: TextStyle,
    /// Overrides applied on top of `tab_item_text` for the active tab.
    #[setters(strip_option)]
    pub tab_item_active_text: Option<TextStyle>,
    /// Outer container of the whole widget.
    pub tab_strip: BoxStyle,
    /// The strip's scroll viewport.
    pub scroll_viewport: BoxStyle,
    /// Wrapper around the scrolled tab labels.
    pub scroll_content: BoxStyle,
    /// The animated indicator.
    pub indicator: BoxStyle,
}

impl Default for TabsStyle {
    fn default() -> Self {
        Self {
            tab_item: BoxStyle::default()
                .corner_radius(99.0)
                .padding(Insets::symmetric(24.0, 16.0)),
            tab_item_text: TextStyle::default(),
            tab_item_active_text: None,
            tab_strip: BoxStyle::default(),
            scroll_viewport: BoxStyle::default().padding(Insets {
                top: 20.0,
                ..Insets::default()
            }),
            scroll_content: BoxStyle::default()
                .corner_radius(999.0)
                .padding(Insets::symmetric(16.0, 0.0))
                .gap(12.0)
                .height(70.0),
            indicator: BoxStyle::default()
                .background(Color::from_rgba8(181, 181, 181, 0.15))
                .corner_radius(999.0),
        }
    }
}

impl TabsStyle {
    /// Text style for a tab in the given state.
    pub fn text_for(&self, active: bool) -> TextStyle {
        match (active, self.tab_item_active_text) {
            (true, Some(active_text)) => active_text,
            _ => self.tab_item_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_text_falls_back_to_base() {
        let style = TabsStyle::default();
        assert_eq!(style.text_for(true), style.tab_item_text);
    }

    #[test]
    fn test_active_text_override() {
        let highlighted = TextStyle::default().color(Color::BLACK);
        let style = TabsStyle::default().tab_item_active_text(highlighted);
        assert_eq!(style.text_for(true), highlighted);
        assert_eq!(style.text_for(false), TextStyle::default());
    }

    #[test]
    fn test_default_indicator_is_translucent_pill() {
        let indicator = TabsStyle::default().indicator;
        assert_eq!(indicator.corner_radius, 999.0);
        assert_eq!(indicator.background.a, 0.15);
    }
}
