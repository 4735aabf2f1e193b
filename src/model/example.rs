//! Bundled example itinerary

use super::*;

fn text(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const VISA_REJECTION: &str = "In Case Of Visa Rejection, Visa Fees Or Any Other Non Cancellable \
                              Component Cannot Be Reimbursed At Any Cost.";

impl Itinerary {
    /// A four-traveler Singapore trip, useful for previews and tests
    pub fn example() -> Self {
        let overview = Overview {
            customer_name: "Rahul".to_string(),
            trip_title: "Singapore Itinerary".to_string(),
            duration_days: 4,
            duration_nights: 3,
            travelers: 4,
            departure_from: "Mumbai".to_string(),
            departure_date: "2025-10-31".to_string(),
            arrival_date: "2025-11-01".to_string(),
            destination: "Singapore".to_string(),
        };

        let days = [
            Day {
                date: "27th November".to_string(),
                title: "Arrive in Genting And Relax".to_string(),
                morning: text(&["Arrive In Singapore. Transfer From Airport To Hotel"]),
                afternoon: text(&[
                    "Check Into Your Hotel",
                    "Visit Marina Bay Sands Sky Park (2-3 Hours)",
                    "Optional: Stroll Along Marina Bay Waterfront Promenade Or Helix Bridge",
                ]),
                evening: text(&["Explore Gardens By The Bay, Including Super Tree Grove (3-4 Hours)"]),
                ..Day::default()
            },
            Day {
                date: "28th November".to_string(),
                title: "Singapore City Excursion".to_string(),
                morning: text(&["Breakfast at hotel", "Visit Merlion Park"]),
                afternoon: text(&[
                    "Explore Chinatown",
                    "Visit Singapore Botanic Gardens",
                    "Shopping at Orchard Road",
                ]),
                evening: text(&["Night Safari at Singapore Zoo"]),
                ..Day::default()
            },
            Day {
                date: "29th November".to_string(),
                title: "Gardens By The Bay + Marina Bay".to_string(),
                morning: text(&["Universal Studios Singapore"]),
                afternoon: text(&["Continue at Universal Studios", "Lunch at Sentosa Island"]),
                evening: text(&["Return to hotel", "Free time for shopping"]),
                ..Day::default()
            },
        ];

        let flights = [
            Flight {
                date: "Thu 31 Oct 25".to_string(),
                flight_number: "AX-123".to_string(),
                airline: "Air India".to_string(),
                route: "From Mumbai (BOM) To Singapore (SIN)".to_string(),
            },
            Flight {
                date: "Sun 03 Nov 25".to_string(),
                flight_number: "AX-124".to_string(),
                airline: "Air India".to_string(),
                route: "From Singapore (SIN) To Mumbai (BOM)".to_string(),
            },
        ];

        let payment_plan = PaymentPlan {
            total_amount: "Rs. 900000".to_string(),
            gst_note: "For 4 Pax (Inclusive Of GST)".to_string(),
            tcs_status: "Not Collected".to_string(),
            installments: [
                ("Rs. 350000", "Initial Payment"),
                ("Rs. 400000", "Post Visa Approval"),
                ("Remaining", "20 Days Before Departure"),
            ]
            .into_iter()
            .map(|(amount, due_date)| Installment {
                number: 0,
                amount: amount.to_string(),
                due_date: due_date.to_string(),
            })
            .collect(),
        };

        Self {
            overview,
            days: days.into_iter().collect(),
            flights: flights.into_iter().collect(),
            flight_notes: text(&[
                "All Flights Are Refundable And Can Be Rebooked With Stinter",
                "Breakfast Included For All Hotel Stays",
                "All Hotels Will Be As And Above Category",
                "A Premium occupancy of 2 people/room is allowed in most hotels",
            ])
            .into_iter()
            .collect(),
            hotels: [Hotel {
                city: "Singapore".to_string(),
                check_in: "2025-11-01".to_string(),
                check_out: "2025-11-03".to_string(),
                nights: 3,
                hotel_name: "Super Townhouse Oak\nVasant Formerly Blue Diamond".to_string(),
            }]
            .into_iter()
            .collect(),
            payment_plan,
            visa_details: VisaDetails {
                visa_type: "Tourist Visa".to_string(),
                validity: "30 Days".to_string(),
                processing_date: "7-10 Business Days".to_string(),
            },
            important_notes: ["Airlines Standard Policy", "Flight/Hotel Cancellation", "Trip Insurance"]
                .into_iter()
                .map(|point| ImportantNote {
                    point: point.to_string(),
                    details: VISA_REJECTION.to_string(),
                })
                .collect(),
            scope_of_service: [
                ("Flight Tickets And Hotel Vouchers", "Delivered 3 Days Post Full Payment"),
                ("Web Check-In", "Boarding Pass (before) Via Email/WhatsApp"),
                ("Support", "Chat Support - Response Time: 4 Hours"),
            ]
            .into_iter()
            .map(|(service, details)| Service {
                service: service.to_string(),
                details: details.to_string(),
            })
            .collect(),
            inclusion_summary: [
                Inclusion {
                    category: "Flight".to_string(),
                    count: 2,
                    details: "All Flights Mentioned".to_string(),
                    status: "Awaiting Confirmation".to_string(),
                },
                Inclusion {
                    category: "Hotel".to_string(),
                    count: 1,
                    details: "Super Townhouse Oak Vasant Formerly Blue Diamond".to_string(),
                    status: "Included".to_string(),
                },
            ]
            .into_iter()
            .collect(),
            activities: [Activity {
                city: "Singapore".to_string(),
                activity: "Marina Bay Sands Sky Park".to_string(),
                kind: "Nature/Sightseeing".to_string(),
                time_required: "2-3 Hours".to_string(),
            }]
            .into_iter()
            .collect(),
            terms: "All bookings are subject to availability. Cancellation policies apply as per \
                    hotel and airline terms."
                .to_string(),
        }
    }
}
