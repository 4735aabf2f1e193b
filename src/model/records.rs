//! Itinerary section records

use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use super::collection::{parse_count, unknown_field, Collection, Record};

/// Trip overview shown on the cover
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    pub customer_name: String,
    pub trip_title: String,
    pub duration_days: u32,
    pub duration_nights: u32,
    /// Number of travelers, 0 when not yet entered
    pub travelers: u32,
    pub departure_from: String,
    pub departure_date: String,
    pub arrival_date: String,
    pub destination: String,
}

impl Overview {
    /// Set one overview field by name
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        const SECTION: &str = "trip_overview";
        match field {
            "customer_name" => self.customer_name = value.to_string(),
            "trip_title" => self.trip_title = value.to_string(),
            "duration_days" => self.duration_days = parse_count(SECTION, "duration_days", value)?,
            "duration_nights" => self.duration_nights = parse_count(SECTION, "duration_nights", value)?,
            "travelers" => self.travelers = parse_count(SECTION, "travelers", value)?,
            "departure_from" => self.departure_from = value.to_string(),
            "departure_date" => self.departure_date = value.to_string(),
            "arrival_date" => self.arrival_date = value.to_string(),
            "destination" => self.destination = value.to_string(),
            _ => return Err(unknown_field(SECTION, field)),
        }
        Ok(())
    }
}

/// Part of a day an activity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Morning, Period::Afternoon, Period::Evening];

    pub fn name(self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
            Period::Evening => "evening",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Afternoon => "Afternoon",
            Period::Evening => "Evening",
        }
    }
}

/// One day of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Day {
    pub day_number: usize,
    pub date: String,
    pub title: String,
    pub morning: Vec<String>,
    pub afternoon: Vec<String>,
    pub evening: Vec<String>,
}

impl Default for Day {
    fn default() -> Self {
        Self {
            day_number: 0,
            date: String::new(),
            title: String::new(),
            morning: vec![String::new()],
            afternoon: vec![String::new()],
            evening: vec![String::new()],
        }
    }
}

impl Day {
    pub fn activities(&self, period: Period) -> &[String] {
        match period {
            Period::Morning => &self.morning,
            Period::Afternoon => &self.afternoon,
            Period::Evening => &self.evening,
        }
    }

    fn activities_mut(&mut self, period: Period) -> &mut Vec<String> {
        match period {
            Period::Morning => &mut self.morning,
            Period::Afternoon => &mut self.afternoon,
            Period::Evening => &mut self.evening,
        }
    }

    /// Append an empty activity and return its index
    pub fn add_activity(&mut self, period: Period) -> usize {
        let list = self.activities_mut(period);
        list.push(String::new());
        list.len() - 1
    }

    pub fn update_activity(&mut self, period: Period, index: usize, text: &str) -> Result<()> {
        let list = self.activities_mut(period);
        let len = list.len();
        let slot = list.get_mut(index).ok_or(Error::IndexOutOfRange {
            section: period.name(),
            index,
            len,
        })?;
        *slot = text.to_string();
        Ok(())
    }

    /// Remove an activity; a period always keeps at least one entry
    pub fn remove_activity(&mut self, period: Period, index: usize) -> Result<String> {
        let list = self.activities_mut(period);
        if index >= list.len() {
            return Err(Error::IndexOutOfRange {
                section: period.name(),
                index,
                len: list.len(),
            });
        }
        if list.len() == 1 {
            return Err(Error::LastActivity(period.name()));
        }
        Ok(list.remove(index))
    }

    /// Restore the one-entry minimum on periods emptied outside the editor
    pub(crate) fn fill_empty_periods(&mut self) {
        for period in Period::ALL {
            let list = self.activities_mut(period);
            if list.is_empty() {
                list.push(String::new());
            }
        }
    }
}

impl Record for Day {
    const SECTION: &'static str = "days";

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "date" => self.date = value.to_string(),
            "title" => self.title = value.to_string(),
            _ => return Err(unknown_field(Self::SECTION, field)),
        }
        Ok(())
    }

    fn renumber(&mut self, position: usize) {
        self.day_number = position + 1;
    }

    fn init_new(&mut self, position: usize) {
        if self.title.is_empty() {
            self.title = format!("Day {}", position + 1);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flight {
    pub date: String,
    pub flight_number: String,
    pub airline: String,
    /// e.g. "From Mumbai (BOM) To Singapore (SIN)"
    pub route: String,
}

impl Record for Flight {
    const SECTION: &'static str = "flights";

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "date" => self.date = value.to_string(),
            "flight_number" => self.flight_number = value.to_string(),
            "airline" => self.airline = value.to_string(),
            "route" => self.route = value.to_string(),
            _ => return Err(unknown_field(Self::SECTION, field)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotel {
    pub city: String,
    pub check_in: String,
    pub check_out: String,
    pub nights: u32,
    /// May span several lines
    pub hotel_name: String,
}

impl Record for Hotel {
    const SECTION: &'static str = "hotels";

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "city" => self.city = value.to_string(),
            "check_in" => self.check_in = value.to_string(),
            "check_out" => self.check_out = value.to_string(),
            "nights" => {
                let nights = parse_count(Self::SECTION, "nights", value)?;
                if nights == 0 {
                    return Err(Error::InvalidField {
                        section: Self::SECTION,
                        field: "nights",
                        value: value.to_string(),
                    });
                }
                self.nights = nights;
            }
            "hotel_name" => self.hotel_name = value.to_string(),
            _ => return Err(unknown_field(Self::SECTION, field)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Installment {
    pub number: usize,
    pub amount: String,
    pub due_date: String,
}

impl Record for Installment {
    const SECTION: &'static str = "installments";

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "amount" => self.amount = value.to_string(),
            "due_date" => self.due_date = value.to_string(),
            _ => return Err(unknown_field(Self::SECTION, field)),
        }
        Ok(())
    }

    fn renumber(&mut self, position: usize) {
        self.number = position + 1;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentPlan {
    pub total_amount: String,
    pub gst_note: String,
    pub tcs_status: String,
    pub installments: Collection<Installment>,
}

impl PaymentPlan {
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "total_amount" => self.total_amount = value.to_string(),
            "gst_note" => self.gst_note = value.to_string(),
            "tcs_status" => self.tcs_status = value.to_string(),
            _ => return Err(unknown_field("payment_plan", field)),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.total_amount.trim().is_empty()
            && self.gst_note.trim().is_empty()
            && self.tcs_status.trim().is_empty()
            && self.installments.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisaDetails {
    pub visa_type: String,
    pub validity: String,
    pub processing_date: String,
}

impl VisaDetails {
    pub fn is_empty(&self) -> bool {
        self.visa_type.trim().is_empty()
            && self.validity.trim().is_empty()
            && self.processing_date.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportantNote {
    pub point: String,
    pub details: String,
}

impl Record for ImportantNote {
    const SECTION: &'static str = "important_notes";

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "point" => self.point = value.to_string(),
            "details" => self.details = value.to_string(),
            _ => return Err(unknown_field(Self::SECTION, field)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub service: String,
    pub details: String,
}

impl Record for Service {
    const SECTION: &'static str = "scope_of_service";

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "service" => self.service = value.to_string(),
            "details" => self.details = value.to_string(),
            _ => return Err(unknown_field(Self::SECTION, field)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inclusion {
    pub category: String,
    pub count: u32,
    pub details: String,
    pub status: String,
}

impl Record for Inclusion {
    const SECTION: &'static str = "inclusion_summary";

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "category" => self.category = value.to_string(),
            "count" => self.count = parse_count(Self::SECTION, "count", value)?,
            "details" => self.details = value.to_string(),
            "status" => self.status = value.to_string(),
            _ => return Err(unknown_field(Self::SECTION, field)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub city: String,
    pub activity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time_required: String,
}

impl Record for Activity {
    const SECTION: &'static str = "activities";

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "city" => self.city = value.to_string(),
            "activity" => self.activity = value.to_string(),
            "type" => self.kind = value.to_string(),
            "time_required" => self.time_required = value.to_string(),
            _ => return Err(unknown_field(Self::SECTION, field)),
        }
        Ok(())
    }
}
