//! Outbound booking message: plain-text template, URL handoff and offer banner.

use crate::domain::model::{BusinessProfile, DestinationChannel, SummaryView};
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Hard cap imposed by the messaging transport.
pub const MAX_URL_LENGTH: usize = 2000;

/// URI component set: everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

pub fn render_message_text(summary: &SummaryView, profile: &BusinessProfile) -> String {
    let currency = &profile.currency_code;
    let services = summary
        .services
        .iter()
        .map(|s| format!("- {} ({} {})", s.service_name, s.discounted_price, currency))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "*{business} Booking*\n\
         \n\
         👩 Name: {name}\n\
         🕒 Appointment: {appointment}\n\
         \n\
         *Selected Services:*\n\
         {services}\n\
         \n\
         💰 *Total:* {total} {currency}\n\
         📍 {location}\n\
         ⏰ {hours}",
        business = profile.business_name,
        name = summary.customer_name,
        appointment = summary.appointment,
        services = services,
        total = summary.total,
        currency = currency,
        location = profile.location_label,
        hours = profile.hours_label,
    )
}

/// Percent-encodes `text` onto the channel's base URL. Never truncates.
pub fn build_handoff_url(
    text: &str,
    profile: &BusinessProfile,
    channel: DestinationChannel,
) -> Result<String> {
    let url = format!(
        "{}{}",
        channel.base_url(&profile.destination_identifier),
        encode_component(text)
    );
    let limit = profile.max_url_length.min(MAX_URL_LENGTH);
    let length = url.chars().count();

    if length > limit {
        tracing::warn!("Handoff URL for {} is {} characters (limit {})", channel, length, limit);
        return Err(BookingError::PayloadTooLargeError { length, limit });
    }

    tracing::debug!("Built {} handoff URL ({} characters)", channel, length);
    Ok(url)
}

/// Promotion headline, e.g. `✨ October Glow Offer – 10% OFF All Services! ✨`.
pub fn offer_banner(offer_name: &str, discount_rate: f64, today: NaiveDate) -> String {
    let percent = (discount_rate * 100.0).round() as u64;
    format!(
        "✨ {} {} – {}% OFF All Services! ✨",
        today.format("%B"),
        offer_name.trim(),
        percent
    )
}
