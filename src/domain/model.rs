use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the price list as published by the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub category: String,
    #[serde(rename = "service")]
    pub service_name: String,
    #[serde(rename = "old")]
    pub base_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedService {
    pub category: String,
    pub service_name: String,
    pub base_price: f64,
    pub discounted_price: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    /// Trimmed, case-folded grouping key.
    pub key: String,
    pub label: String,
    pub services: Vec<PricedService>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionEntry {
    pub service_name: String,
    pub discounted_price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub customer_name: String,
    pub appointment: String,
    pub services: Vec<SelectionEntry>,
    pub total: u64,
}

impl SummaryView {
    pub fn render(&self, currency_code: &str) -> String {
        let mut lines = vec![
            format!("Name: {}", self.customer_name),
            format!("Appointment: {}", self.appointment),
            "Selected Services:".to_string(),
        ];
        for entry in &self.services {
            lines.push(format!(
                "  {} ({} {})",
                entry.service_name, entry.discounted_price, currency_code
            ));
        }
        lines.push(format!("Total: {} {}", self.total, currency_code));
        lines.join("\n")
    }
}

/// Business details that appear in the outbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub business_name: String,
    pub currency_code: String,
    pub location_label: String,
    pub hours_label: String,
    pub destination_identifier: String,
    pub max_url_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DestinationChannel {
    Mobile,
    Desktop,
}

impl DestinationChannel {
    pub fn base_url(&self, destination: &str) -> String {
        match self {
            Self::Mobile => format!("https://wa.me/{}?text=", destination),
            Self::Desktop => format!(
                "https://web.whatsapp.com/send?phone={}&text=",
                destination
            ),
        }
    }
}

impl fmt::Display for DestinationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mobile => write!(f, "mobile"),
            Self::Desktop => write!(f, "desktop"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    Empty,
    HasSelections,
}

pub type AppointmentTime = NaiveDateTime;
