//! Page footer band
//!
//! Every page ends with the same band: a separator rule, the company identity
//! on the left, contact details in the middle, the brand with its tagline on
//! the right and the page number underneath.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::layout::PageGeometry;
use crate::raster::{Color, DrawOp, Weight};

/// Company identity printed in every footer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterIdentity {
    pub company: String,
    pub office_lines: Vec<String>,
    pub phone: String,
    pub email: String,
    pub cin: String,
    pub brand: String,
    pub tagline: String,
}

impl Default for FooterIdentity {
    fn default() -> Self {
        Self {
            company: "Vigovia Tech Pvt. Ltd".to_string(),
            office_lines: vec![
                "Registered Office: Hd-109 Cinnabar-Hills,".to_string(),
                "Links Business Park, Karnataka, India.".to_string(),
            ],
            phone: "+91-9504061112".to_string(),
            email: "Utkarshjj@Vigovia.Com".to_string(),
            cin: "U79110KA2024PTC191590".to_string(),
            brand: "vigovia".to_string(),
            tagline: "PLAN.PACK.GO".to_string(),
        }
    }
}

impl FooterIdentity {
    /// Load an identity from a JSON file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn text(x: f64, baseline: f64, size_pt: f64, weight: Weight, color: Color, value: &str) -> DrawOp {
    DrawOp::Text {
        x,
        baseline,
        size_pt,
        weight,
        color,
        text: value.to_string(),
    }
}

/// Drawing operations for the footer of one page, in page coordinates
pub fn footer_ops(identity: &FooterIdentity, geometry: &PageGeometry, page_number: usize) -> Vec<DrawOp> {
    let top = geometry.footer_top();
    let left = geometry.margins.left.mm();
    let right = geometry.page.width.mm() - geometry.margins.right.mm();
    let contact_x = left + 70.0;
    let brand_x = right - 40.0;

    let mut ops = vec![DrawOp::Rule {
        x1: left,
        x2: right,
        y: top,
        thickness: 0.2,
        color: Color::RULE,
    }];

    ops.push(text(left, top + 5.0, 8.0, Weight::Bold, Color::MUTED, &identity.company));
    for (i, line) in identity.office_lines.iter().take(2).enumerate() {
        ops.push(text(left, top + 9.0 + 3.0 * i as f64, 7.0, Weight::Regular, Color::MUTED, line));
    }

    let contacts = [
        (5.0, "Phone", &identity.phone),
        (9.0, "Email ID", &identity.email),
        (12.0, "CIN", &identity.cin),
    ];
    for (offset, label, value) in contacts {
        if !value.is_empty() {
            let line = format!("{}: {}", label, value);
            ops.push(text(contact_x, top + offset, 7.0, Weight::Regular, Color::MUTED, &line));
        }
    }

    ops.push(text(brand_x, top + 7.0, 10.0, Weight::Bold, Color::BRAND, &identity.brand));
    ops.push(text(brand_x, top + 12.0, 8.0, Weight::Regular, Color::MUTED, &identity.tagline));
    ops.push(text(
        right - 15.0,
        top + 16.0,
        7.0,
        Weight::Regular,
        Color::MUTED,
        &format!("Page {}", page_number),
    ));
    ops
}
