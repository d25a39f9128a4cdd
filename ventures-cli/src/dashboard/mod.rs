//! Dashboard widgets.
//!
//! The dashboard fetches every collection it summarizes in one joint load,
//! then derives KPI cards, the stage heat map and the funding tracker from
//! the loaded data. Derived widgets are cached against the resource version
//! and recomputed only after a reload.

use chrono::{DateTime, Utc};
use ventures_lib::{DataSource, Error};
use ventures_lib::api::query::Query;
use ventures_lib::resource::{Derived, ViewModel};
use ventures_lib::source::fetch_as;

use crate::model::{
    ENGAGEMENTS, EVENTS, Engagement, Event, FUNDING, FundingRecord, INQUIRIES, REGISTRATIONS, Registration, VendorInquiry,
};

pub mod funding;
pub mod heatmap;
pub mod kpi;

pub use funding::FundingRow;
pub use heatmap::HeatMap;
pub use kpi::Kpi;

/// Everything the dashboard summarizes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub events: Vec<Event>,
    pub registrations: Vec<Registration>,
    pub inquiries: Vec<VendorInquiry>,
    pub engagements: Vec<Engagement>,
    pub funding: Vec<FundingRecord>,
}

impl DashboardData {
    pub async fn fetch(source: &dyn DataSource) -> Result<Self, Error> {
        let queries = [EVENTS, REGISTRATIONS, INQUIRIES, ENGAGEMENTS, FUNDING].map(Query::from);
        let (events, registrations, inquiries, engagements, funding) = futures::try_join!(
            fetch_as::<Event, _>(source, &queries[0]),
            fetch_as::<Registration, _>(source, &queries[1]),
            fetch_as::<VendorInquiry, _>(source, &queries[2]),
            fetch_as::<Engagement, _>(source, &queries[3]),
            fetch_as::<FundingRecord, _>(source, &queries[4]),
        )?;

        Ok(Self {
            events,
            registrations,
            inquiries,
            engagements,
            funding,
        })
    }
}

pub struct DashboardPage {
    view: ViewModel<DashboardData>,
    heat_map: Derived<HeatMap>,
    funding: Derived<Vec<FundingRow>>,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            view: ViewModel::new("dashboard"),
            heat_map: Derived::new(),
            funding: Derived::new(),
        }
    }

    pub async fn load(&self, source: &dyn DataSource) -> Result<(), Error> {
        self.view.load(DashboardData::fetch(source)).await
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    /// Loaded data, empty when not loaded or failed.
    pub fn data(&self) -> DashboardData {
        self.view.ready_or_default()
    }

    fn version(&self) -> u64 {
        self.view.resource().version()
    }

    pub fn kpis(&self, now: DateTime<Utc>) -> Vec<Kpi> {
        kpi::compute_kpis(&self.data(), now)
    }

    pub fn heat_map(&self) -> HeatMap {
        self.heat_map
            .get_or_compute(&[self.version()], || HeatMap::build(&self.data().engagements))
    }

    pub fn funding(&self) -> Vec<FundingRow> {
        self.funding
            .get_or_compute(&[self.version()], || funding::summarize(&self.data().funding))
    }
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}
