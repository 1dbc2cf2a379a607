//! Payload fixtures shared by the integration tests

#![allow(dead_code)]

use serde_json::{Value, json};

/// Schema-conformant package staying 2026-06-10 to 2026-06-15
pub fn package(total_package_cost: f64) -> Value {
    json!({
        "resort": {
            "name": "Nuku Resort",
            "location": "Beqa Lagoon, Fiji",
            "check_in": "2026-06-10",
            "check_out": "2026-06-15",
            "price_per_night": 140,
            "total_resort_cost": 700,
            "amenities": ["Nitrox", "Restaurant"],
            "dive_highlights": ["Bull sharks", "Soft coral"],
            "url": "https://example.com/nuku"
        },
        "flights": {
            "departing_flight": {
                "departure_datetime": "2026-06-08T22:30",
                "arrival_datetime": "2026-06-10T08:00",
                "airline": "Fiji Airways",
                "price": 250,
                "layovers": ["NAN"],
                "flight_time": "11h 30m"
            },
            "returning_flight": {
                "departure_datetime": "2026-06-15T20:00",
                "arrival_datetime": "2026-06-15T11:10",
                "airline": "Fiji Airways",
                "price": 250,
                "layovers": [],
                "flight_time": "10h 10m"
            },
            "total_flight_cost": 500
        },
        "itinerary": {
            "departure_date": "2026-06-08",
            "return_date": "2026-06-15",
            "schedule": [
                {"day": 1, "date": "2026-06-10", "activities": ["Arrive", "Check-in"]},
                {"day": 2, "date": "2026-06-11", "activities": ["Two-tank shark dive"]}
            ]
        },
        "total_package_cost": total_package_cost,
        "currency": "USD"
    })
}

pub fn result_set(packages: Vec<Value>) -> Value {
    json!({ "results": packages })
}

/// The passing two-package answer: costs 1200 then 1500
pub fn passing_answer() -> Value {
    result_set(vec![package(1200.0), package(1500.0)])
}
