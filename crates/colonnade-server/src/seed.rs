//! Demo data for a fresh in-memory store.

use std::collections::BTreeSet;

use colonnade_core::ids::MessageId;
use colonnade_core::models::conversation::Conversation;
use colonnade_core::models::message::Message;
use colonnade_core::models::sensor_metric::SensorMetric;
use jiff::{SignedDuration, Timestamp};
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

pub const GENERAL_CONVERSATION: Uuid = Uuid::from_u128(0x11111111_1111_1111_1111_111111111111);
pub const SUPPORT_CONVERSATION: Uuid = Uuid::from_u128(0x22222222_2222_2222_2222_222222222222);

/// First demo reading; readings run hourly for three days from here.
const READINGS_FROM: &str = "2025-11-11T00:00:00Z";
const READING_HOURS: i64 = 72;

struct Line {
    sender_id: &'static str,
    sender_name: &'static str,
    text: &'static str,
}

const GENERAL_LINES: &[Line] = &[
    Line { sender_id: "user1", sender_name: "Alice", text: "Morning all, kickoff at ten?" },
    Line { sender_id: "user2", sender_name: "Bob", text: "Works for me." },
    Line { sender_id: "user3", sender_name: "Carol", text: "I'll bring the sensor dashboards." },
    Line { sender_id: "user1", sender_name: "Alice", text: "Great, see you there." },
];

const SUPPORT_LINES: &[Line] = &[
    Line { sender_id: "user2", sender_name: "Bob", text: "TEMP-001 spiked overnight." },
    Line { sender_id: "user4", sender_name: "Dave", text: "Looking at the hourly range now." },
    Line { sender_id: "user4", sender_name: "Dave", text: "HVAC cycled at 17:00, back to normal." },
];

/// Append the demo conversations and sensor readings.
pub async fn seed_demo(state: &AppState) -> eyre::Result<()> {
    let started: Timestamp = "2025-11-13T09:00:00Z".parse()?;
    seed_conversation(state, GENERAL_CONVERSATION, "General", started, GENERAL_LINES).await?;
    let started: Timestamp = "2025-11-13T18:30:00Z".parse()?;
    seed_conversation(state, SUPPORT_CONVERSATION, "Sensor alerts", started, SUPPORT_LINES).await?;

    let from: Timestamp = READINGS_FROM.parse()?;
    let mut readings = 0usize;
    for h in 0..READING_HOURS {
        let at = from.checked_add(SignedDuration::from_hours(h))?;
        let hour = (h % 24) as f64;
        let temp = 19.0 + 4.0 * (1.0 - (hour - 15.0).abs() / 12.0).max(0.0);
        let cpu = 20.0 + (h * 37 % 60) as f64;
        for metric in [
            SensorMetric::new("TEMP-001", at, "temperature", round(temp), "C")
                .with_location("server-room-a")
                .with_status("ok"),
            SensorMetric::new("CPU-001", at, "cpu_usage", cpu, "%")
                .with_location("rack-3")
                .with_status(if cpu > 75.0 { "warning" } else { "ok" })
                .with_metadata("host", "app-01"),
        ] {
            state.sensors.append_metric(&metric).await?;
            readings += 1;
        }
    }

    info!(conversations = 2, readings, "seeded demo data");
    Ok(())
}

async fn seed_conversation(
    state: &AppState,
    id: Uuid,
    name: &str,
    started: Timestamp,
    lines: &[Line],
) -> eyre::Result<()> {
    let mut participants = BTreeSet::new();
    let mut last = None;
    for (i, line) in lines.iter().enumerate() {
        let created_at = started.checked_add(SignedDuration::from_mins(3 * i as i64))?;
        let message = Message {
            conversation_id: id,
            message_id: MessageId::at(created_at)?,
            sender_id: line.sender_id.to_string(),
            sender_name: line.sender_name.to_string(),
            message_text: line.text.to_string(),
            created_at,
            is_read: i + 1 < lines.len(),
        };
        state.chat.append_message(&message).await?;
        participants.insert(line.sender_id.to_string());
        last = Some(created_at);
    }

    let conversation = Conversation {
        conversation_id: id,
        conversation_name: name.to_string(),
        created_at: started,
        participants,
        last_message_time: last,
    };
    state.chat.put_conversation(&conversation).await?;
    Ok(())
}

fn round(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
