//! Page geometry
//!
//! All layout math runs in millimeters with the origin at the top-left of
//! the page and y growing downwards, the way the itinerary is read. The PDF
//! writer converts to points and flips the axis at the very end.

use crate::pack::PackSettings;

/// Simple length type in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from millimeters
    pub fn from_mm(mm: f64) -> Self {
        Length(mm)
    }

    /// Create a length from points (1/72 inch)
    pub fn from_pt(pt: f64) -> Self {
        Length(pt * 25.4 / 72.0)
    }

    /// Get the value in millimeters
    pub fn mm(&self) -> f64 {
        self.0
    }

    /// Get the value in points (1/72 inch)
    pub fn pt(&self) -> f64 {
        self.0 * 72.0 / 25.4
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy)]
pub struct PageDimensions {
    pub width: Length,
    pub height: Length,
}

impl PageDimensions {
    /// A4 size (210mm × 297mm)
    pub fn a4() -> Self {
        Self {
            width: Length::from_mm(210.0),
            height: Length::from_mm(297.0),
        }
    }
}

/// Horizontal and top margins for page content
///
/// There is no bottom margin: the footer band closes every page.
#[derive(Debug, Clone, Copy)]
pub struct Margins {
    pub top: Length,
    pub left: Length,
    pub right: Length,
}

impl Margins {
    /// Create margins with same value on all sides
    pub fn uniform(margin: Length) -> Self {
        Self {
            top: margin,
            left: margin,
            right: margin,
        }
    }
}

/// Everything the packer and writer need to know about a page
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub page: PageDimensions,
    pub margins: Margins,
    /// Band reserved at the bottom of every page
    pub footer_height: Length,
    /// Vertical space between consecutive blocks
    pub gap: Length,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageGeometry {
    /// A4 with 10mm margins, a 35mm footer band and 5mm between blocks
    pub fn a4() -> Self {
        Self {
            page: PageDimensions::a4(),
            margins: Margins::uniform(Length::from_mm(10.0)),
            footer_height: Length::from_mm(35.0),
            gap: Length::from_mm(5.0),
        }
    }

    /// Height above the footer band
    pub fn content_height(&self) -> f64 {
        (self.page.height.mm() - self.footer_height.mm()).max(0.0)
    }

    /// Width available to blocks between the side margins
    pub fn content_width(&self) -> f64 {
        (self.page.width.mm() - self.margins.left.mm() - self.margins.right.mm()).max(0.0)
    }

    /// Distance from the top of the page to the footer band
    pub fn footer_top(&self) -> f64 {
        self.content_height()
    }

    pub fn pack_settings(&self) -> PackSettings {
        PackSettings::new(
            self.page.height.mm(),
            self.footer_height.mm(),
            self.margins.top.mm(),
            self.gap.mm(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversions() {
        let len = Length::from_pt(72.0);
        assert!((len.mm() - 25.4).abs() < 0.01);
        assert!((Length::from_mm(25.4).pt() - 72.0).abs() < 0.01);
    }

    #[test]
    fn test_a4_geometry() {
        let geometry = PageGeometry::a4();
        assert_eq!(geometry.content_height(), 262.0);
        assert_eq!(geometry.content_width(), 190.0);
        assert_eq!(geometry.footer_top(), 262.0);
    }

    #[test]
    fn test_footer_larger_than_page_leaves_no_content() {
        let geometry = PageGeometry {
            footer_height: Length::from_mm(400.0),
            ..PageGeometry::a4()
        };
        assert_eq!(geometry.content_height(), 0.0);
    }

    #[test]
    fn test_pack_settings_subtract_footer_first() {
        let settings = PageGeometry::a4().pack_settings();
        assert_eq!(settings.content_height(), 262.0);
        assert_eq!(settings.margin(), 10.0);
        assert_eq!(settings.gap(), 5.0);
    }
}
