//! Block rasterization
//!
//! A [`Rasterizer`] turns one block into a [`Raster`]: its measured height and
//! the drawing operations that reproduce it. Operations use block-local
//! millimeter coordinates with the origin at the block's top-left corner, so
//! the writer can drop a raster anywhere on a page.
//!
//! The packer only ever sees the height.

use unicode_segmentation::UnicodeSegmentation;
use crate::blocks::{Block, Cover, DayCard, Table, TextBlock};
use crate::error::Result;
use crate::layout::Length;

/// RGB fill/stroke color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BRAND: Color = Color(91, 58, 140);
    pub const TEXT: Color = Color(33, 33, 33);
    pub const MUTED: Color = Color(80, 80, 80);
    pub const RULE: Color = Color(200, 200, 200);
    pub const BAND: Color = Color(243, 238, 250);
    pub const WHITE: Color = Color(255, 255, 255);
}

/// Font weight of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// One drawing operation, positioned in millimeters from a top-left origin
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Single line of text; `baseline` is the y of the text baseline
    Text {
        x: f64,
        baseline: f64,
        size_pt: f64,
        weight: Weight,
        color: Color,
        text: String,
    },
    /// Horizontal line
    Rule {
        x1: f64,
        x2: f64,
        y: f64,
        thickness: f64,
        color: Color,
    },
    /// Filled rectangle
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
}

/// Measured drawing of one block
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

/// Turns blocks into rasters, once per block and in block order
pub trait Rasterizer {
    fn rasterize(&mut self, block: &Block, width: f64) -> Result<Raster>;
}

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 - 9
    278, 278, 584, 584, 584, 556, 1015, // : - @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N - Z
    278, 278, 278, 469, 556, 333, // [ - `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a - m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n - z
    334, 260, 334, 584, // { - ~
];

fn char_width_em(c: char, weight: Weight) -> f64 {
    let code = c as u32;
    let regular = if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize]
    } else {
        556
    };
    let scale = match weight {
        Weight::Regular => 1.0,
        Weight::Bold => 1.06,
    };
    f64::from(regular) * scale / 1000.0
}

/// Width of a text run in millimeters
///
/// Each grapheme cluster advances by its base character; combining marks
/// add no width.
pub fn text_width(text: &str, size_pt: f64, weight: Weight) -> f64 {
    let em: f64 = text
        .graphemes(true)
        .filter_map(|g| g.chars().next())
        .map(|c| char_width_em(c, weight))
        .sum();
    Length::from_pt(em * size_pt).mm()
}

/// Distance between baselines for a font size, in millimeters
pub fn line_height(size_pt: f64) -> f64 {
    Length::from_pt(size_pt * 1.35).mm()
}

/// Break a word wider than the line between grapheme clusters
fn break_word(word: &str, size_pt: f64, weight: Weight, max_width: f64, lines: &mut Vec<String>) -> String {
    let mut line = String::new();
    for grapheme in word.graphemes(true) {
        line.push_str(grapheme);
        if text_width(&line, size_pt, weight) > max_width && line.len() > grapheme.len() {
            line.truncate(line.len() - grapheme.len());
            lines.push(std::mem::replace(&mut line, grapheme.to_string()));
        }
    }
    line
}

/// Greedy word wrap honoring explicit line breaks
///
/// Words wider than the line are broken between grapheme clusters.
pub fn wrap_text(text: &str, size_pt: f64, weight: Weight, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if text_width(&candidate, size_pt, weight) <= max_width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            line = if text_width(word, size_pt, weight) <= max_width {
                word.to_string()
            } else {
                break_word(word, size_pt, weight, max_width, &mut lines)
            };
        }
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

const PADDING: f64 = 3.0;
const CELL_PADDING: f64 = 1.5;

/// Cursor-based layout of one block
struct Canvas {
    width: f64,
    y: f64,
    ops: Vec<DrawOp>,
}

impl Canvas {
    fn new(width: f64) -> Self {
        Self { width, y: PADDING, ops: Vec::new() }
    }

    fn text_line(&mut self, x: f64, text: &str, size_pt: f64, weight: Weight, color: Color) {
        let size_mm = Length::from_pt(size_pt).mm();
        self.ops.push(DrawOp::Text {
            x,
            baseline: self.y + size_mm * 0.8,
            size_pt,
            weight,
            color,
            text: text.to_string(),
        });
        self.y += line_height(size_pt);
    }

    /// Wrapped text starting at `x`
    fn paragraph(&mut self, x: f64, text: &str, size_pt: f64, weight: Weight, color: Color) {
        for line in wrap_text(text, size_pt, weight, self.width - x - PADDING) {
            self.text_line(x, &line, size_pt, weight, color);
        }
    }

    fn rule(&mut self, color: Color) {
        self.ops.push(DrawOp::Rule {
            x1: 0.0,
            x2: self.width,
            y: self.y,
            thickness: 0.2,
            color,
        });
    }

    fn space(&mut self, mm: f64) {
        self.y += mm;
    }

    fn finish(mut self) -> Raster {
        self.y += PADDING;
        Raster { height: self.y, ops: self.ops }
    }
}

/// Built-in rasterizer drawing blocks as Helvetica text, rules and bands
#[derive(Debug, Clone, Default)]
pub struct TextRasterizer;

impl TextRasterizer {
    pub fn new() -> Self {
        Self
    }

    fn cover(&self, cover: &Cover, width: f64) -> Raster {
        let mut canvas = Canvas::new(width);
        canvas.paragraph(PADDING, &cover.greeting, 20.0, Weight::Bold, Color::BRAND);
        if !cover.title.is_empty() {
            canvas.paragraph(PADDING, &cover.title, 16.0, Weight::Bold, Color::TEXT);
        }
        if !cover.duration.is_empty() {
            canvas.paragraph(PADDING, &cover.duration, 12.0, Weight::Regular, Color::MUTED);
        }

        if !cover.facts.is_empty() {
            canvas.space(3.0);
            let band_top = canvas.y;
            let band_index = canvas.ops.len();
            canvas.space(2.0);
            let value_x = PADDING + 42.0;
            for (label, value) in &cover.facts {
                let row_top = canvas.y;
                canvas.text_line(PADDING + 2.0, label, 10.0, Weight::Bold, Color::BRAND);
                let after_label = canvas.y;
                canvas.y = row_top;
                canvas.paragraph(value_x, value, 10.0, Weight::Regular, Color::TEXT);
                canvas.y = canvas.y.max(after_label);
            }
            canvas.space(2.0);
            let band = DrawOp::Rect {
                x: 0.0,
                y: band_top,
                width,
                height: canvas.y - band_top,
                color: Color::BAND,
            };
            // The band goes underneath the rows drawn on top of it
            canvas.ops.insert(band_index, band);
        }
        canvas.finish()
    }

    fn day(&self, day: &DayCard, width: f64) -> Raster {
        let mut canvas = Canvas::new(width);
        let header_height = line_height(12.0) + 2.0;
        canvas.ops.push(DrawOp::Rect {
            x: 0.0,
            y: 0.0,
            width,
            height: header_height + PADDING,
            color: Color::BRAND,
        });
        let mut header = format!("Day {}", day.number);
        if !day.date.is_empty() {
            header.push_str(&format!("  |  {}", day.date));
        }
        canvas.text_line(PADDING, &header, 12.0, Weight::Bold, Color::WHITE);
        canvas.y = header_height + PADDING + 2.0;

        if !day.title.is_empty() {
            canvas.paragraph(PADDING, &day.title, 12.0, Weight::Bold, Color::TEXT);
        }
        for (label, activities) in &day.periods {
            canvas.space(1.0);
            canvas.text_line(PADDING, label, 10.0, Weight::Bold, Color::BRAND);
            for activity in activities {
                let top = canvas.y;
                canvas.text_line(PADDING + 2.0, "\u{2022}", 10.0, Weight::Regular, Color::TEXT);
                canvas.y = top;
                canvas.paragraph(PADDING + 6.0, activity, 10.0, Weight::Regular, Color::TEXT);
            }
        }
        canvas.space(1.0);
        canvas.rule(Color::RULE);
        canvas.finish()
    }

    fn table(&self, table: &Table, width: f64) -> Raster {
        let mut canvas = Canvas::new(width);
        canvas.paragraph(PADDING, &table.heading, 13.0, Weight::Bold, Color::BRAND);
        for line in &table.lead {
            canvas.paragraph(PADDING, line, 10.0, Weight::Regular, Color::TEXT);
        }
        canvas.space(1.5);

        let widths = column_widths(table, width);
        let header: Vec<&str> = table.columns.iter().map(String::as_str).collect();
        self.table_row(&mut canvas, &widths, &header, Weight::Bold, Some(Color::BAND));
        for row in &table.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            self.table_row(&mut canvas, &widths, &cells, Weight::Regular, None);
        }

        if !table.notes.is_empty() {
            canvas.space(2.0);
            for (i, note) in table.notes.iter().enumerate() {
                canvas.paragraph(PADDING, &format!("{}. {}", i + 1, note), 9.0, Weight::Regular, Color::MUTED);
            }
        }
        canvas.finish()
    }

    fn table_row(&self, canvas: &mut Canvas, widths: &[f64], cells: &[&str], weight: Weight, fill: Option<Color>) {
        const SIZE: f64 = 9.0;
        let wrapped: Vec<Vec<String>> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).copied().unwrap_or("");
                wrap_text(cell, SIZE, weight, (w - 2.0 * CELL_PADDING).max(1.0))
            })
            .collect();
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let row_height = lines as f64 * line_height(SIZE) + 2.0 * CELL_PADDING;
        let top = canvas.y;

        if let Some(color) = fill {
            canvas.ops.push(DrawOp::Rect {
                x: 0.0,
                y: top,
                width: canvas.width,
                height: row_height,
                color,
            });
        }

        let mut x = 0.0;
        for (cell_lines, w) in wrapped.iter().zip(widths) {
            canvas.y = top + CELL_PADDING;
            for line in cell_lines {
                canvas.text_line(x + CELL_PADDING, line, SIZE, weight, Color::TEXT);
            }
            x += w;
        }
        canvas.y = top + row_height;
        canvas.rule(Color::RULE);
    }

    fn text(&self, text: &TextBlock, width: f64) -> Raster {
        let mut canvas = Canvas::new(width);
        canvas.paragraph(PADDING, &text.heading, 13.0, Weight::Bold, Color::BRAND);
        for paragraph in &text.paragraphs {
            canvas.paragraph(PADDING, paragraph, 10.0, Weight::Regular, Color::TEXT);
            canvas.space(1.0);
        }
        canvas.finish()
    }
}

/// Share the width between columns in proportion to their widest cell,
/// with every column getting at least a tenth of the even share
fn column_widths(table: &Table, width: f64) -> Vec<f64> {
    let count = table.columns.len().max(1);
    let even = width / count as f64;
    let natural: Vec<f64> = (0..count)
        .map(|i| {
            let header = table.columns.get(i).map_or(0.0, |h| text_width(h, 9.0, Weight::Bold));
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .flat_map(|cell| cell.lines())
                .map(|line| text_width(line, 9.0, Weight::Regular))
                .fold(header, f64::max)
                .max(even * 0.1)
                + 2.0 * CELL_PADDING
        })
        .collect();
    let total: f64 = natural.iter().sum();
    if total <= width {
        // Hand the slack out evenly
        let extra = (width - total) / count as f64;
        natural.iter().map(|w| w + extra).collect()
    } else {
        natural.iter().map(|w| w / total * width).collect()
    }
}

impl Rasterizer for TextRasterizer {
    fn rasterize(&mut self, block: &Block, width: f64) -> Result<Raster> {
        Ok(match block {
            Block::Cover(cover) => self.cover(cover, width),
            Block::DayCard(day) => self.day(day, width),
            Block::Table(table) => self.table(table, width),
            Block::Text(text) => self.text(text, width),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Itinerary;

    fn raster_all(itinerary: &Itinerary) -> Vec<Raster> {
        let mut rasterizer = TextRasterizer::new();
        itinerary
            .blocks()
            .iter()
            .map(|block| rasterizer.rasterize(block, 190.0).unwrap())
            .collect()
    }

    fn ops_within(raster: &Raster, width: f64) -> bool {
        raster.ops.iter().all(|op| match op {
            DrawOp::Text { baseline, x, .. } => *baseline <= raster.height && *x >= 0.0 && *x <= width,
            DrawOp::Rule { y, x2, .. } => *y <= raster.height && *x2 <= width + 1e-9,
            DrawOp::Rect { y, height, width: w, .. } => y + height <= raster.height + 1e-9 && *w <= width + 1e-9,
        })
    }

    #[test]
    fn test_text_width() {
        // "0" is 556/1000 em; at 72pt one em is 25.4mm
        assert!((text_width("0", 72.0, Weight::Regular) - 0.556 * 25.4).abs() < 1e-9);
        assert!(text_width("WWW", 10.0, Weight::Regular) > text_width("iii", 10.0, Weight::Regular));
        assert!(text_width("abc", 10.0, Weight::Bold) > text_width("abc", 10.0, Weight::Regular));
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "Explore Gardens By The Bay, Including Super Tree Grove (3-4 Hours)";
        let lines = wrap_text(text, 10.0, Weight::Regular, 40.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, Weight::Regular) <= 40.0, "{:?}", line);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_text_breaks_long_words_and_keeps_newlines() {
        let lines = wrap_text("Super Townhouse Oak\nVasant", 10.0, Weight::Regular, 500.0);
        assert_eq!(lines, vec!["Super Townhouse Oak", "Vasant"]);

        let long = "x".repeat(200);
        let lines = wrap_text(&long, 10.0, Weight::Regular, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), long);

        assert_eq!(wrap_text("", 10.0, Weight::Regular, 20.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_keeps_combining_marks_with_their_letter() {
        let decomposed = "e\u{301}".repeat(40);
        let lines = wrap_text(&decomposed, 10.0, Weight::Regular, 10.0);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| !line.starts_with('\u{301}')), "{:?}", lines);
        assert_eq!(lines.concat(), decomposed);
        assert_eq!(
            text_width("e\u{301}", 10.0, Weight::Regular),
            text_width("e", 10.0, Weight::Regular)
        );
    }

    #[test]
    fn test_example_rasters_are_positive_and_contained() {
        for raster in raster_all(&Itinerary::example()) {
            assert!(raster.height > 0.0);
            assert!(ops_within(&raster, 190.0), "{:?}", raster);
        }
    }

    #[test]
    fn test_more_activities_make_taller_day() {
        let mut itinerary = Itinerary::example();
        let short = raster_all(&itinerary)[1].height;
        if let Ok(day) = itinerary.days.get_mut(0) {
            for _ in 0..5 {
                day.morning.push("Another stop along the waterfront".to_string());
            }
        }
        let tall = raster_all(&itinerary)[1].height;
        assert!(tall > short);
    }

    #[test]
    fn test_column_widths_fill_table() {
        let table = Table {
            heading: "Flight Summary".to_string(),
            lead: Vec::new(),
            columns: vec!["Date".to_string(), "Route".to_string()],
            rows: vec![vec!["Thu 31 Oct 25".to_string(), "From Mumbai (BOM) To Singapore (SIN)".to_string()]],
            notes: Vec::new(),
        };
        let widths = column_widths(&table, 190.0);
        assert!((widths.iter().sum::<f64>() - 190.0).abs() < 1e-9);
        assert!(widths[1] > widths[0]);
    }
}
