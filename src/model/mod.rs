//! Itinerary data model
//!
//! An [`Itinerary`] is a plain tree owned by the caller. Repeated sections are
//! [`Collection`]s edited by index; singletons (overview, payment plan totals,
//! visa details, terms) are edited in place or overwritten wholesale.

pub mod collection;
pub mod records;
mod example;

use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

pub use collection::{Collection, Record};
pub use records::{
    Activity, Day, Flight, Hotel, ImportantNote, Inclusion, Installment, Overview, PaymentPlan,
    Period, Service, VisaDetails,
};

/// One trip itinerary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Itinerary {
    #[serde(rename = "trip_overview", alias = "overview")]
    pub overview: Overview,
    pub days: Collection<Day>,
    pub flights: Collection<Flight>,
    pub flight_notes: Collection<String>,
    pub hotels: Collection<Hotel>,
    pub payment_plan: PaymentPlan,
    pub visa_details: VisaDetails,
    pub important_notes: Collection<ImportantNote>,
    pub scope_of_service: Collection<Service>,
    pub inclusion_summary: Collection<Inclusion>,
    pub activities: Collection<Activity>,
    pub terms: String,
}

impl Itinerary {
    /// Empty itinerary
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the visa details as a whole
    pub fn set_visa_details(&mut self, visa: VisaDetails) {
        self.visa_details = visa;
    }

    pub fn set_terms(&mut self, terms: &str) {
        self.terms = terms.to_string();
    }

    /// Recompute sequence numbers and restore the one-activity minimum
    ///
    /// Drafts written by other tools may carry stale or missing numbers.
    pub fn normalize(&mut self) {
        self.days.renumber();
        for day in self.days.iter_mut() {
            day.fill_empty_periods();
        }
        self.payment_plan.installments.renumber();
    }

    /// Check the fields required before export
    pub fn validate(&self) -> Result<()> {
        let overview = &self.overview;
        let missing: Vec<&'static str> = [
            ("customer_name", &overview.customer_name),
            ("trip_title", &overview.trip_title),
            ("departure_from", &overview.departure_from),
            ("destination", &overview.destination),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_days() -> Itinerary {
        let mut itinerary = Itinerary::new();
        for title in ["Arrival", "City Tour", "Departure"] {
            let index = itinerary.days.add();
            itinerary.days.update(index, "title", title).unwrap();
        }
        itinerary
    }

    #[test]
    fn test_remove_middle_day_renumbers() {
        let mut itinerary = three_days();
        let removed = itinerary.days.remove(1).unwrap();
        assert_eq!(removed.title, "City Tour");

        let days: Vec<(usize, &str)> = itinerary
            .days
            .iter()
            .map(|d| (d.day_number, d.title.as_str()))
            .collect();
        assert_eq!(days, vec![(1, "Arrival"), (2, "Departure")]);
    }

    #[test]
    fn test_remove_installment_renumbers() {
        let mut itinerary = Itinerary::new();
        for amount in ["350000", "400000", "Remaining"] {
            let index = itinerary.payment_plan.installments.add();
            itinerary.payment_plan.installments.update(index, "amount", amount).unwrap();
        }
        itinerary.payment_plan.installments.remove(0).unwrap();

        let installments: Vec<(usize, &str)> = itinerary
            .payment_plan
            .installments
            .iter()
            .map(|i| (i.number, i.amount.as_str()))
            .collect();
        assert_eq!(installments, vec![(1, "400000"), (2, "Remaining")]);
    }

    #[test]
    fn test_removing_day_keeps_user_titles() {
        let mut itinerary = Itinerary::new();
        for title in ["Arrival", "Day 2", "Departure"] {
            let index = itinerary.days.add();
            itinerary.days.update(index, "title", title).unwrap();
        }
        itinerary.days.remove(0).unwrap();

        let days: Vec<(usize, &str)> = itinerary
            .days
            .iter()
            .map(|d| (d.day_number, d.title.as_str()))
            .collect();
        assert_eq!(days, vec![(1, "Day 2"), (2, "Departure")]);
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let mut itinerary = Itinerary::new();
        itinerary.overview.customer_name = "Rahul".to_string();
        itinerary.overview.destination = "   ".to_string();

        match itinerary.validate() {
            Err(Error::Validation(missing)) => {
                assert_eq!(missing, vec!["trip_title", "departure_from", "destination"]);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_example_is_valid() {
        assert!(Itinerary::example().validate().is_ok());
    }

    #[test]
    fn test_visa_details_overwritten_wholesale() {
        let mut itinerary = Itinerary::example();
        itinerary.set_visa_details(VisaDetails {
            visa_type: "E-Visa".to_string(),
            ..VisaDetails::default()
        });
        assert_eq!(itinerary.visa_details.visa_type, "E-Visa");
        assert!(itinerary.visa_details.validity.is_empty());

        itinerary.set_terms("Non-refundable after issue.");
        assert_eq!(itinerary.terms, "Non-refundable after issue.");
    }

    #[test]
    fn test_normalize_repairs_numbers_and_periods() {
        let mut itinerary = three_days();
        if let Ok(day) = itinerary.days.get_mut(0) {
            day.day_number = 9;
            day.morning.clear();
        }
        itinerary.normalize();

        let first = itinerary.days.get(0).unwrap();
        assert_eq!(first.day_number, 1);
        assert_eq!(first.morning, vec![String::new()]);
    }
}
