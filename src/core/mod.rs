pub mod booking;
pub mod loader;
pub mod message;
pub mod pricing;

pub use crate::domain::model::{
    BookingState, BusinessProfile, CategoryGroup, DestinationChannel, PricedService,
    SelectionEntry, ServiceRecord, SummaryView,
};
pub use crate::domain::ports::{CatalogSource, ConfigProvider};
pub use crate::utils::error::Result;
