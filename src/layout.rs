//! Geometry of the test pattern.
//!
//! Sizes are kept in millimeters and converted to PDF points with [`mm_to_pt`], the same
//! factor for pages and bars, so a group that fits the page in millimeters fits it in
//! points too.

use crate::error::AppError;
use clap::ValueEnum;
use rand::Rng;

/// Points per millimeter.
pub const PT_PER_MM: f64 = 2.83465;

/// Number of bars in a group, one per ink channel.
pub const BAR_COUNT: usize = 4;

pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

pub fn pt_to_mm(pt: f64) -> f64 {
    pt / PT_PER_MM
}

/// Supported page sizes.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    #[value(name = "A4", alias = "a4")]
    A4,
    #[value(name = "letter")]
    Letter,
}

impl PageSize {
    /// Page dimensions as `(width, height)` in millimeters.
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            // 8.5 x 11 in
            PageSize::Letter => (215.9, 279.4),
        }
    }

    /// Page dimensions as `(width, height)` in points.
    pub fn dimensions(self) -> (f64, f64) {
        let (width, height) = self.dimensions_mm();
        (mm_to_pt(width), mm_to_pt(height))
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "letter",
        }
    }
}

/// A single process ink channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ink {
    Cyan,
    Magenta,
    Yellow,
    Black,
}

impl Ink {
    /// Left-to-right drawing order of the bars.
    pub const ORDER: [Ink; BAR_COUNT] = [Ink::Cyan, Ink::Magenta, Ink::Yellow, Ink::Black];

    /// Full coverage of this channel and none of the others, as `(c, m, y, k)`.
    pub fn cmyk(self) -> (f32, f32, f32, f32) {
        match self {
            Ink::Cyan => (1.0, 0.0, 0.0, 0.0),
            Ink::Magenta => (0.0, 1.0, 0.0, 0.0),
            Ink::Yellow => (0.0, 0.0, 1.0, 0.0),
            Ink::Black => (0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Dimensions shared by every bar, in millimeters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSpec {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl BarSpec {
    /// Builds a bar spec, rejecting non-positive or non-finite dimensions.
    pub fn new(width_mm: f64, height_mm: f64) -> Result<Self, AppError> {
        for (dimension, value) in [("width", width_mm), ("height", height_mm)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AppError::InvalidBarSize { dimension, value });
            }
        }
        Ok(Self {
            width_mm,
            height_mm,
        })
    }

    pub fn bar_width_pt(&self) -> f64 {
        mm_to_pt(self.width_mm)
    }

    pub fn bar_height_pt(&self) -> f64 {
        mm_to_pt(self.height_mm)
    }

    /// Width of the whole group of bars, in points.
    pub fn group_width_pt(&self) -> f64 {
        BAR_COUNT as f64 * self.bar_width_pt()
    }

    pub fn group_height_pt(&self) -> f64 {
        self.bar_height_pt()
    }

    /// The range of valid lower-left offsets as `(max_x, max_y)` in points.
    ///
    /// Fails when the group is wider or taller than the page, since no placement can keep
    /// it inside the page bounds.
    pub fn placement_range(&self, page: PageSize) -> Result<(f64, f64), AppError> {
        let (page_width_mm, page_height_mm) = page.dimensions_mm();
        let group_width_mm = BAR_COUNT as f64 * self.width_mm;
        let group_height_mm = self.height_mm;
        let max_x_mm = page_width_mm - group_width_mm;
        let max_y_mm = page_height_mm - group_height_mm;

        if max_x_mm < 0.0 || max_y_mm < 0.0 {
            return Err(AppError::BarGroupExceedsPage {
                group_width_mm,
                group_height_mm,
                page_width_mm,
                page_height_mm,
            });
        }
        Ok((mm_to_pt(max_x_mm), mm_to_pt(max_y_mm)))
    }
}

/// Lower-left corner of the bar group, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
}

/// One filled rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub ink: Ink,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The four bars of a test pattern, placed on a page.
#[derive(Clone, Debug, PartialEq)]
pub struct BarGroup {
    pub page: PageSize,
    pub placement: Placement,
    pub bars: [Bar; BAR_COUNT],
}

impl BarGroup {
    /// Draws a uniformly random placement for `spec` on `page` and lays out the bars.
    pub fn place<R: Rng + ?Sized>(
        page: PageSize,
        spec: BarSpec,
        rng: &mut R,
    ) -> Result<Self, AppError> {
        let (max_x, max_y) = spec.placement_range(page)?;
        let placement = Placement {
            x: rng.gen_range(0.0..=max_x),
            y: rng.gen_range(0.0..=max_y),
        };
        Ok(Self::at(page, spec, placement))
    }

    /// Lays out the bars with the group's lower-left corner at `placement`.
    pub fn at(page: PageSize, spec: BarSpec, placement: Placement) -> Self {
        let width = spec.bar_width_pt();
        let height = spec.bar_height_pt();
        let bars = std::array::from_fn(|slot| Bar {
            ink: Ink::ORDER[slot],
            x: placement.x + slot as f64 * width,
            y: placement.y,
            width,
            height,
        });
        Self {
            page,
            placement,
            bars,
        }
    }
}
