//! Seed data for running without a backend.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use ventures_lib::Error;
use ventures_lib::memory::{MemorySource, MemoryStore};
use ventures_lib::model::Record;

use crate::model::{
    APPLICATIONS, ENGAGEMENTS, EVENTS, Engagement, EngagementStage, Event, FUNDING, FundingRecord, INQUIRIES, InquiryStatus, REGISTRATIONS, Registration, VendorApplication, VendorInquiry,
};

/// Base of the public URLs the demo store hands out.
pub const PUBLIC_BASE: &str = "memory://uploads";

fn records<T: Serialize>(items: &[T]) -> Result<Vec<Record>, Error> {
    items
        .iter()
        .map(|item| Record::encode(item).map_err(Error::from))
        .collect()
}

fn event(id: i64, title: &str, starts_at: Option<DateTime<Utc>>, location: &str, capacity: i64) -> Event {
    Event {
        id,
        title: title.to_string(),
        starts_at,
        location: Some(location.to_string()),
        capacity: Some(capacity),
    }
}

fn registration(id: i64, event_id: Option<i64>, name: &str) -> Registration {
    Registration {
        id,
        event_id,
        attendee_name: name.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
    }
}

fn inquiry(id: i64, company: &str, status: InquiryStatus, created_at: DateTime<Utc>) -> VendorInquiry {
    VendorInquiry {
        id,
        company: company.to_string(),
        contact_email: Some(format!("hello@{}.example", company.to_lowercase().replace(' ', "-"))),
        status,
        created_at: Some(created_at),
    }
}

fn engagement(id: i64, company: &str, stage: EngagementStage, owner: Option<&str>, updated_at: DateTime<Utc>) -> Engagement {
    Engagement {
        id,
        company: company.to_string(),
        stage,
        owner: owner.map(str::to_string),
        updated_at,
    }
}

fn funding(id: i64, program: &str, committed: Option<i64>, disbursed: Option<i64>) -> FundingRecord {
    FundingRecord {
        id,
        program: program.to_string(),
        committed: committed.map(Decimal::from),
        disbursed: disbursed.map(Decimal::from),
    }
}

/// A memory source with a small, consistent data set. Dates are relative to
/// `now` so upcoming events stay upcoming.
pub fn source(now: DateTime<Utc>) -> Result<MemorySource, Error> {
    let days = Duration::days;

    let events = [
        event(1, "Founder Breakfast", Some(now - days(20)), "Innovation Hub", 40),
        event(2, "Demo Day", Some(now + days(10)), "Main Auditorium", 200),
        event(3, "Pitch Night", Some(now + days(30)), "Rooftop Lounge", 80),
        event(4, "Investor Roundtable", None, "TBD", 12),
    ];

    let registrations = [
        registration(1, Some(1), "Ada Lovelace"),
        registration(2, Some(1), "Grace Hopper"),
        registration(3, Some(2), "Alan Turing"),
        registration(4, Some(2), "Katherine Johnson"),
        registration(5, Some(2), "Edsger Dijkstra"),
        registration(6, Some(3), "Barbara Liskov"),
        registration(7, None, "Walk In"),
    ];

    let inquiries = [
        inquiry(1, "Acme Robotics", InquiryStatus::New, now - days(1)),
        inquiry(2, "Globex Energy", InquiryStatus::Reviewing, now - days(4)),
        inquiry(3, "Initech", InquiryStatus::Accepted, now - days(12)),
        inquiry(4, "Umbrella Bio", InquiryStatus::Rejected, now - days(30)),
        inquiry(5, "Stark Materials", InquiryStatus::New, now - days(2)),
    ];

    let applications = [
        VendorApplication {
            id: 1,
            inquiry_id: Some(3),
            product: "Predictive maintenance".to_string(),
            pitch_deck_url: Some(format!("{}/pitch-decks/1/initech.pdf", PUBLIC_BASE)),
            submitted_at: Some(now - days(10)),
        },
        VendorApplication {
            id: 2,
            inquiry_id: Some(2),
            product: "Grid storage pilot".to_string(),
            pitch_deck_url: None,
            submitted_at: Some(now - days(3)),
        },
        VendorApplication {
            id: 3,
            inquiry_id: None,
            product: "Open call submission".to_string(),
            pitch_deck_url: None,
            submitted_at: None,
        },
    ];

    let engagements = [
        engagement(1, "Initech", EngagementStage::Contract, Some("Dana"), now - days(5)),
        engagement(2, "Globex Energy", EngagementStage::Pilot, Some("Sam"), now - days(15)),
        engagement(3, "Acme Robotics", EngagementStage::Discovery, Some("Dana"), now - days(40)),
        engagement(4, "Hooli", EngagementStage::Lead, None, now - days(45)),
        engagement(5, "Umbrella Bio", EngagementStage::Closed, Some("Sam"), now - days(70)),
        engagement(6, "Stark Materials", EngagementStage::Lead, Some("Ravi"), now - days(1)),
    ];

    let funding_records = [
        funding(1, "Seed", Some(150_000), Some(75_000)),
        funding(2, "Seed", Some(50_000), None),
        funding(3, "Growth", Some(500_000), Some(125_000)),
        funding(4, "Grants", None, None),
    ];

    Ok(MemorySource::new()
        .with_rows(EVENTS, records(&events)?)
        .with_rows(REGISTRATIONS, records(&registrations)?)
        .with_rows(INQUIRIES, records(&inquiries)?)
        .with_rows(APPLICATIONS, records(&applications)?)
        .with_rows(ENGAGEMENTS, records(&engagements)?)
        .with_rows(FUNDING, records(&funding_records)?))
}

/// An in-memory upload target.
pub fn store() -> MemoryStore {
    MemoryStore::new(PUBLIC_BASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_collection_is_seeded() {
        let source = source(Utc::now()).unwrap();
        for collection in [EVENTS, REGISTRATIONS, INQUIRIES, APPLICATIONS, ENGAGEMENTS, FUNDING] {
            assert!(!source.rows(collection).is_empty(), "{} is empty", collection);
        }
    }
}
