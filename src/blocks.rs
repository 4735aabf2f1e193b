//! Content blocks
//!
//! [`Itinerary::blocks`] flattens an itinerary into the ordered list of
//! independently drawable blocks that the packer distributes over pages.
//! The order is fixed:
//!
//! cover → days → flights (with notes) → hotels → important notes →
//! scope of service → inclusion summary → activities → terms and payment
//! plan → visa details
//!
//! Sections without content produce no block. The cover is always present.

use crate::date::display_date;
use crate::model::{Itinerary, Period};

/// Semantic kind of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Cover,
    DayCard,
    Table,
    Text,
}

impl BlockKind {
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Cover => "cover",
            BlockKind::DayCard => "day",
            BlockKind::Table => "table",
            BlockKind::Text => "text",
        }
    }
}

/// Trip overview block
#[derive(Debug, Clone, PartialEq)]
pub struct Cover {
    pub greeting: String,
    pub title: String,
    /// e.g. "4 Days 3 Nights"
    pub duration: String,
    /// Label/value pairs shown in the trip details box
    pub facts: Vec<(String, String)>,
}

/// One day of the plan
#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub number: usize,
    pub date: String,
    pub title: String,
    /// Period label with its non-blank activities
    pub periods: Vec<(String, Vec<String>)>,
}

/// Headed grid with optional lead lines and numbered notes
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub heading: String,
    pub lead: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub notes: Vec<String>,
}

/// Headed free text
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

/// One independently measurable unit of content
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Cover(Cover),
    DayCard(DayCard),
    Table(Table),
    Text(TextBlock),
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Cover(_) => BlockKind::Cover,
            Block::DayCard(_) => BlockKind::DayCard,
            Block::Table(_) => BlockKind::Table,
            Block::Text(_) => BlockKind::Text,
        }
    }

    /// Short human-readable label
    pub fn label(&self) -> String {
        match self {
            Block::Cover(cover) => cover.title.clone(),
            Block::DayCard(day) => format!("Day {}: {}", day.number, day.title),
            Block::Table(table) => table.heading.clone(),
            Block::Text(text) => text.heading.clone(),
        }
    }
}

fn owned(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.trim().to_string()).collect()
}

fn table(heading: &str, columns: &[&str], rows: Vec<Vec<String>>) -> Table {
    Table {
        heading: heading.to_string(),
        lead: Vec::new(),
        columns: owned(columns),
        rows,
        notes: Vec::new(),
    }
}

fn plural(count: u32, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

/// Group plain digit runs of an amount the Indian way: `900000` → `9,00,000`
///
/// Runs that already contain separators, and any other text, are kept.
pub fn format_amount(amount: &str) -> String {
    let mut out = String::with_capacity(amount.len() + 4);
    let mut run = String::new();
    let mut run_follows_separator = false;
    let mut previous: Option<char> = None;

    for c in amount.chars() {
        if c.is_ascii_digit() {
            if run.is_empty() {
                run_follows_separator = matches!(previous, Some(',') | Some('.'));
            }
            run.push(c);
        } else {
            if !run.is_empty() {
                // A run touching ',' or '.' belongs to an already formatted number
                let preformatted = run_follows_separator || c == ',' || c == '.';
                push_run(&mut out, &run, preformatted);
                run.clear();
            }
            out.push(c);
        }
        previous = Some(c);
    }
    if !run.is_empty() {
        push_run(&mut out, &run, run_follows_separator);
    }
    out
}

fn push_run(out: &mut String, run: &str, preformatted: bool) {
    if preformatted {
        out.push_str(run);
    } else {
        out.push_str(&group_indian(run));
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), last_three)
}

impl Itinerary {
    /// Ordered content blocks for rendering
    pub fn blocks(&self) -> Vec<Block> {
        let mut blocks = vec![Block::Cover(self.cover())];

        blocks.extend(self.days.iter().map(|day| {
            let periods = Period::ALL
                .iter()
                .map(|&period| {
                    let activities: Vec<String> = day
                        .activities(period)
                        .iter()
                        .map(|a| a.trim())
                        .filter(|a| !a.is_empty())
                        .map(str::to_string)
                        .collect();
                    (period.label().to_string(), activities)
                })
                .filter(|(_, activities)| !activities.is_empty())
                .collect();
            Block::DayCard(DayCard {
                number: day.day_number,
                date: day.date.trim().to_string(),
                title: day.title.trim().to_string(),
                periods,
            })
        }));

        if !self.flights.is_empty() {
            let mut flights = table(
                "Flight Summary",
                &["Date", "Flight", "Airline", "Route"],
                self.flights
                    .iter()
                    .map(|f| owned(&[f.date.as_str(), f.flight_number.as_str(), f.airline.as_str(), f.route.as_str()]))
                    .collect(),
            );
            flights.notes = self
                .flight_notes
                .iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect();
            blocks.push(Block::Table(flights));
        }

        if !self.hotels.is_empty() {
            blocks.push(Block::Table(table(
                "Hotel Bookings",
                &["City", "Check In", "Check Out", "Nights", "Hotel Name"],
                self.hotels
                    .iter()
                    .map(|h| {
                        vec![
                            h.city.trim().to_string(),
                            display_date(&h.check_in),
                            display_date(&h.check_out),
                            h.nights.to_string(),
                            h.hotel_name.trim().to_string(),
                        ]
                    })
                    .collect(),
            )));
        }

        if !self.important_notes.is_empty() {
            blocks.push(Block::Table(table(
                "Important Notes",
                &["Point", "Details"],
                self.important_notes.iter().map(|n| owned(&[n.point.as_str(), n.details.as_str()])).collect(),
            )));
        }

        if !self.scope_of_service.is_empty() {
            blocks.push(Block::Table(table(
                "Scope Of Service",
                &["Service", "Details"],
                self.scope_of_service.iter().map(|s| owned(&[s.service.as_str(), s.details.as_str()])).collect(),
            )));
        }

        if !self.inclusion_summary.is_empty() {
            blocks.push(Block::Table(table(
                "Inclusion Summary",
                &["Category", "Count", "Details", "Status / Comments"],
                self.inclusion_summary
                    .iter()
                    .map(|i| owned(&[i.category.as_str(), i.count.to_string().as_str(), i.details.as_str(), i.status.as_str()]))
                    .collect(),
            )));
        }

        if !self.activities.is_empty() {
            blocks.push(Block::Table(table(
                "Activity Table",
                &["City", "Activity", "Type", "Time Required"],
                self.activities
                    .iter()
                    .map(|a| owned(&[a.city.as_str(), a.activity.as_str(), a.kind.as_str(), a.time_required.as_str()]))
                    .collect(),
            )));
        }

        if !self.terms.trim().is_empty() {
            blocks.push(Block::Text(TextBlock {
                heading: "Terms And Conditions".to_string(),
                paragraphs: self
                    .terms
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect(),
            }));
        }

        if !self.payment_plan.is_empty() {
            let plan = &self.payment_plan;
            let mut payment = table(
                "Payment Plan",
                &["Installment", "Amount", "Due Date"],
                plan.installments
                    .iter()
                    .map(|i| {
                        vec![
                            format!("Installment {}", i.number),
                            format_amount(i.amount.trim()),
                            i.due_date.trim().to_string(),
                        ]
                    })
                    .collect(),
            );
            if !plan.total_amount.trim().is_empty() {
                let mut line = format!("Total Amount: {}", format_amount(plan.total_amount.trim()));
                if !plan.gst_note.trim().is_empty() {
                    line.push_str(&format!(" ({})", plan.gst_note.trim()));
                }
                payment.lead.push(line);
            }
            if !plan.tcs_status.trim().is_empty() {
                payment.lead.push(format!("TCS: {}", plan.tcs_status.trim()));
            }
            blocks.push(Block::Table(payment));
        }

        if !self.visa_details.is_empty() {
            let visa = &self.visa_details;
            blocks.push(Block::Table(table(
                "Visa Details",
                &["Visa Type", "Validity", "Processing Date"],
                vec![owned(&[visa.visa_type.as_str(), visa.validity.as_str(), visa.processing_date.as_str()])],
            )));
        }

        blocks
    }

    fn cover(&self) -> Cover {
        let overview = &self.overview;
        let name = overview.customer_name.trim();
        let greeting = if name.is_empty() {
            "Hi!".to_string()
        } else {
            format!("Hi, {}!", name)
        };

        let mut duration = Vec::new();
        if overview.duration_days > 0 {
            duration.push(plural(overview.duration_days, "Day", "Days"));
        }
        if overview.duration_nights > 0 {
            duration.push(plural(overview.duration_nights, "Night", "Nights"));
        }

        let mut facts = Vec::new();
        let mut fact = |label: &str, value: String| {
            if !value.is_empty() {
                facts.push((label.to_string(), value));
            }
        };
        fact("Departure From", overview.departure_from.trim().to_string());
        fact("Departure", display_date(&overview.departure_date));
        fact("Arrival", display_date(&overview.arrival_date));
        fact("Destination", overview.destination.trim().to_string());
        if overview.travelers > 0 {
            fact("No. Of Travellers", overview.travelers.to_string());
        }

        Cover {
            greeting,
            title: overview.trip_title.trim().to_string(),
            duration: duration.join(" "),
            facts,
        }
    }
}
