//! Domain records, decoded from data API rows at the fetch boundary.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ventures_lib::model::Value;
use ventures_table::Tone;

pub const EVENTS: &str = "events";
pub const REGISTRATIONS: &str = "event_registrations";
pub const INQUIRIES: &str = "vendor_inquiries";
pub const APPLICATIONS: &str = "vendor_applications";
pub const ENGAGEMENTS: &str = "engagements";
pub const FUNDING: &str = "funding_records";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: i64,
    pub event_id: Option<i64>,
    pub attendee_name: String,
    pub email: Option<String>,
}

/// Review state of a vendor inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Reviewing,
    Accepted,
    Rejected,
}

impl InquiryStatus {
    pub const ALL: [InquiryStatus; 4] = [
        InquiryStatus::New,
        InquiryStatus::Reviewing,
        InquiryStatus::Accepted,
        InquiryStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reviewing => "reviewing",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::New => Tone::Info,
            Self::Reviewing => Tone::Warning,
            Self::Accepted => Tone::Success,
            Self::Rejected => Tone::Danger,
        }
    }

    /// Whether the inquiry still needs a decision.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::New | Self::Reviewing)
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown status {:?} (expected one of: new, reviewing, accepted, rejected)",
                    s
                )
            })
    }
}

impl From<InquiryStatus> for Value {
    fn from(status: InquiryStatus) -> Self {
        Value::Text(status.as_str().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorInquiry {
    pub id: i64,
    pub company: String,
    pub contact_email: Option<String>,
    pub status: InquiryStatus,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorApplication {
    pub id: i64,
    pub inquiry_id: Option<i64>,
    pub product: String,
    pub pitch_deck_url: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Pipeline stage of an engagement, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementStage {
    Lead,
    Discovery,
    Pilot,
    Contract,
    Closed,
}

impl EngagementStage {
    pub const ALL: [EngagementStage; 5] = [
        EngagementStage::Lead,
        EngagementStage::Discovery,
        EngagementStage::Pilot,
        EngagementStage::Contract,
        EngagementStage::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Discovery => "discovery",
            Self::Pilot => "pilot",
            Self::Contract => "contract",
            Self::Closed => "closed",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Lead => Tone::Neutral,
            Self::Discovery | Self::Pilot => Tone::Info,
            Self::Contract => Tone::Success,
            Self::Closed => Tone::Neutral,
        }
    }

    /// Every stage except `closed` counts as active.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl fmt::Display for EngagementStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub id: i64,
    pub company: String,
    pub stage: EngagementStage,
    pub owner: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRecord {
    pub id: i64,
    pub program: String,
    pub committed: Option<Decimal>,
    pub disbursed: Option<Decimal>,
}
