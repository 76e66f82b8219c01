//! Parser for the machine-readable status report

use crate::record::{ScalarSlot, StatusRecord, SCOREBOARD_CHARS};
use tracing::warn;

/// Parse a raw `?auto` report into a [`StatusRecord`].
///
/// Parsing never fails: fields the report does not carry stay absent, and
/// malformed lines are skipped. A line becomes a field only when it splits on
/// `": "` into a recognized key and a value of the expected numeric type.
/// Both LF and CRLF line endings are accepted.
pub fn parse(raw: &str) -> StatusRecord {
    let mut record = StatusRecord::default();

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };

        if key == "Scoreboard" {
            apply_scoreboard(&mut record, value);
            continue;
        }

        for (name, slot) in record.scalar_slots() {
            if name != key {
                continue;
            }
            match slot {
                ScalarSlot::Int(field) => match value.parse() {
                    Ok(parsed) => *field = Some(parsed),
                    Err(_) => warn!("Discarding non-integer value for {}: {:?}", key, value),
                },
                ScalarSlot::Float(field) => match value.parse() {
                    Ok(parsed) => *field = Some(parsed),
                    Err(_) => warn!("Discarding non-numeric value for {}: {:?}", key, value),
                },
            }
            break;
        }
    }

    record
}

/// Decode a scoreboard string into the eleven per-state counts.
///
/// Characters outside the known slot states are not counted toward any
/// field; when that happens the counts no longer sum to the string length,
/// so it is logged rather than silently accepted.
fn apply_scoreboard(record: &mut StatusRecord, value: &str) {
    let mut counts = [0u64; 11];
    let mut ignored = 0usize;

    for ch in value.chars() {
        match SCOREBOARD_CHARS.iter().position(|&known| known == ch) {
            Some(idx) => counts[idx] += 1,
            None => ignored += 1,
        }
    }

    if ignored > 0 {
        warn!("Scoreboard contained {} character(s) outside the known slot states", ignored);
    }

    for (slot, count) in record.scoreboard_slots().into_iter().zip(counts) {
        *slot = Some(count);
    }
}
