//! Message row labels.

use chrono::{DateTime, Local, Utc};
use trackdeck_bridge_models::{DeliveryStatus, Message};

/// `HH:MM` in the given zone.
#[must_use]
pub fn time_label_in<Tz: chrono::TimeZone>(timestamp: DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(zone).format("%H:%M").to_string()
}

/// `HH:MM` in local time.
#[must_use]
pub fn time_label(timestamp: DateTime<Utc>) -> String {
    time_label_in(timestamp, &Local)
}

/// "1 reply" / "N replies"; nothing for an empty thread.
#[must_use]
pub fn reply_label(message: &Message) -> Option<String> {
    let inline = u32::try_from(message.replies.len()).unwrap_or(u32::MAX);
    match message.reply_count.unwrap_or(inline) {
        0 => None,
        1 => Some("1 reply".to_string()),
        count => Some(format!("{count} replies")),
    }
}

/// Glyph shown next to an outgoing message.
#[must_use]
pub const fn delivery_glyph(status: DeliveryStatus) -> &'static str {
    match status {
        DeliveryStatus::Sending => "…",
        DeliveryStatus::Sent => "✓",
        DeliveryStatus::Delivered | DeliveryStatus::Read => "✓✓",
        DeliveryStatus::Failed => "!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use trackdeck_bridge_models::Sender;

    fn message(reply_count: Option<u32>) -> Message {
        Message {
            id: "m1".into(),
            sender: Sender {
                id: "u1".into(),
                name: "Ada".into(),
                avatar: String::new(),
                online: None,
            },
            text: "hello".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 0).unwrap(),
            message_type: None,
            delivery_status: None,
            attachments: Vec::new(),
            reply_to: None,
            replies: Vec::new(),
            reply_count,
            metadata: None,
        }
    }

    #[test]
    fn time_label_is_zero_padded() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 0).unwrap();
        assert_eq!(time_label_in(at, &Utc), "09:05");
    }

    #[test]
    fn reply_labels_pluralize() {
        assert_eq!(reply_label(&message(None)), None);
        assert_eq!(reply_label(&message(Some(0))), None);
        assert_eq!(reply_label(&message(Some(1))).as_deref(), Some("1 reply"));
        assert_eq!(reply_label(&message(Some(4))).as_deref(), Some("4 replies"));

        let mut threaded = message(None);
        threaded.replies = vec![message(None), message(None)];
        assert_eq!(reply_label(&threaded).as_deref(), Some("2 replies"));
    }

    #[test]
    fn read_and_delivered_share_double_check() {
        assert_eq!(delivery_glyph(DeliveryStatus::Read), delivery_glyph(DeliveryStatus::Delivered));
        assert_ne!(delivery_glyph(DeliveryStatus::Sent), delivery_glyph(DeliveryStatus::Failed));
    }
}
