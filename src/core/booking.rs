//! Per-session selection state and the summary/message builders on top of it.
//!
//! A [`BookingContext`] is owned by exactly one front-end session and passed
//! into every command. Nothing here is global.

use crate::core::message::{build_handoff_url, render_message_text};
use crate::domain::model::{
    AppointmentTime, BookingState, BusinessProfile, DestinationChannel, PricedService,
    SelectionEntry, SummaryView,
};
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDateTime;

pub const DEFAULT_CUSTOMER_NAME: &str = "Customer";
pub const NOT_SELECTED: &str = "Not selected";

const APPOINTMENT_DISPLAY_FORMAT: &str = "%a, %b %-d %Y, %I:%M %p";
const APPOINTMENT_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses the `YYYY-MM-DDTHH:MM` form a date-time picker produces.
pub fn parse_appointment_time(value: &str) -> Result<AppointmentTime> {
    let trimmed = value.trim();
    APPOINTMENT_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| BookingError::InvalidAppointmentTimeError {
            value: value.to_string(),
            reason: "expected YYYY-MM-DDTHH:MM".to_string(),
        })
}

pub fn format_appointment_time(time: &AppointmentTime) -> String {
    time.format(APPOINTMENT_DISPLAY_FORMAT).to_string()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingContext {
    customer_name: String,
    appointment_time: Option<AppointmentTime>,
    selections: Vec<SelectionEntry>,
}

impl BookingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BookingState {
        if self.selections.is_empty() {
            BookingState::Empty
        } else {
            BookingState::HasSelections
        }
    }

    pub fn selections(&self) -> &[SelectionEntry] {
        &self.selections
    }

    pub fn is_selected(&self, service_name: &str) -> bool {
        self.selections.iter().any(|s| s.service_name == service_name)
    }

    /// Adds the service if absent, removes it if present. Returns whether it
    /// is selected afterwards.
    pub fn toggle(&mut self, service_name: &str, discounted_price: u64) -> bool {
        if let Some(pos) = self
            .selections
            .iter()
            .position(|s| s.service_name == service_name)
        {
            let removed = self.selections.remove(pos);
            tracing::debug!("Deselected {} ({})", removed.service_name, removed.discounted_price);
            false
        } else {
            self.selections.push(SelectionEntry {
                service_name: service_name.to_string(),
                discounted_price,
            });
            tracing::debug!("Selected {} ({})", service_name, discounted_price);
            true
        }
    }

    /// Toggles a catalog entry at its displayed discounted price.
    pub fn toggle_service(&mut self, service: &PricedService) -> bool {
        self.toggle(&service.service_name, service.discounted_price)
    }

    pub fn clear(&mut self) {
        self.selections.clear();
        self.customer_name.clear();
        self.appointment_time = None;
        tracing::debug!("Booking cleared");
    }

    pub fn set_customer(&mut self, name: &str) {
        self.customer_name = name.to_string();
    }

    pub fn set_appointment_time(&mut self, time: Option<AppointmentTime>) {
        self.appointment_time = time;
    }

    pub fn customer_name(&self) -> &str {
        let trimmed = self.customer_name.trim();
        if trimmed.is_empty() {
            DEFAULT_CUSTOMER_NAME
        } else {
            trimmed
        }
    }

    pub fn appointment_time(&self) -> Option<&AppointmentTime> {
        self.appointment_time.as_ref()
    }

    /// Sum of per-item prices; the sum itself is never re-rounded.
    ///
    /// Catalog prices are bounded by `MAX_BASE_PRICE`, so saturation is only
    /// reachable through hand-fed prices passed to [`toggle`](Self::toggle).
    pub fn compute_total(&self) -> u64 {
        self.selections
            .iter()
            .fold(0u64, |total, s| total.saturating_add(s.discounted_price))
    }

    pub fn build_summary(&self) -> Result<SummaryView> {
        if self.selections.is_empty() {
            return Err(BookingError::EmptySelectionError);
        }

        Ok(SummaryView {
            customer_name: self.customer_name().to_string(),
            appointment: self
                .appointment_time
                .as_ref()
                .map(format_appointment_time)
                .unwrap_or_else(|| NOT_SELECTED.to_string()),
            services: self.selections.clone(),
            total: self.compute_total(),
        })
    }

    /// Full handoff URL carrying the encoded booking message.
    pub fn build_message_payload(
        &self,
        profile: &BusinessProfile,
        channel: DestinationChannel,
    ) -> Result<String> {
        let summary = self.build_summary()?;
        let text = render_message_text(&summary, profile);
        build_handoff_url(&text, profile, channel)
    }
}
