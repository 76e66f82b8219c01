//! Canonical text rendering of a status record

use crate::record::StatusRecord;

/// Returned when serializing a record that lacks a required field.
///
/// Carries the name of the first absent field in output order (the nine
/// scalar fields, then the eleven scoreboard counts).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("required field '{field}' is absent from the record")]
pub struct MissingFieldError {
    pub field: &'static str,
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, MissingFieldError> {
    value.ok_or(MissingFieldError { field })
}

/// Render a record back into the `?auto` report format.
///
/// Output is nine labeled scalar lines in fixed order followed by the
/// `Scoreboard:` line, each terminated by a newline. All twenty fields must
/// be present. Floats render with `f64`'s `Display`, the shortest decimal
/// that round-trips to the same value, so `parse` recovers every field
/// exactly; note this prints integral floats without a decimal point.
pub fn serialize(record: &StatusRecord) -> Result<String, MissingFieldError> {
    let mut out = String::new();

    out.push_str(&format!(
        "Total Accesses: {}\n",
        require(record.total_accesses, "total_accesses")?
    ));
    out.push_str(&format!(
        "Total kBytes: {}\n",
        require(record.total_kbytes, "total_kbytes")?
    ));
    out.push_str(&format!("CPULoad: {}\n", require(record.cpuload, "cpuload")?));
    out.push_str(&format!("Uptime: {}\n", require(record.uptime, "uptime")?));
    out.push_str(&format!(
        "ReqPerSec: {}\n",
        require(record.requests_per_second, "requests_per_second")?
    ));
    out.push_str(&format!(
        "BytesPerSec: {}\n",
        require(record.bytes_per_second, "bytes_per_second")?
    ));
    out.push_str(&format!(
        "BytesPerReq: {}\n",
        require(record.bytes_per_request, "bytes_per_request")?
    ));
    out.push_str(&format!(
        "BusyWorkers: {}\n",
        require(record.busy_workers, "busy_workers")?
    ));
    out.push_str(&format!(
        "IdleWorkers: {}\n",
        require(record.idle_workers, "idle_workers")?
    ));

    let mut board = String::new();
    for (ch, field, count) in [
        ('_', "waiting_for_connection", record.waiting_for_connection),
        ('S', "starting_up", record.starting_up),
        ('R', "reading_request", record.reading_request),
        ('W', "sending_reply", record.sending_reply),
        ('K', "keepalive", record.keepalive),
        ('D', "dns_lookup", record.dns_lookup),
        ('C', "closing_connection", record.closing_connection),
        ('L', "logging", record.logging),
        ('G', "gracefully_finishing", record.gracefully_finishing),
        ('I', "idle_cleanup_of_worker", record.idle_cleanup_of_worker),
        ('.', "open_slots", record.open_slots),
    ] {
        for _ in 0..require(count, field)? {
            board.push(ch);
        }
    }
    out.push_str(&format!("Scoreboard: {}\n", board));

    Ok(out)
}
