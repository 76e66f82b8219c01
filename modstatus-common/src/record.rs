//! Parsed mod_status report

use serde::{Deserialize, Serialize};

/// Scoreboard slot-state characters, in the order the serializer emits them.
pub const SCOREBOARD_CHARS: [char; 11] =
    ['_', 'S', 'R', 'W', 'K', 'D', 'C', 'L', 'G', 'I', '.'];

/// One snapshot of a server's machine-readable status report.
///
/// Every field is optional because mod_status reports different sets of
/// fields depending on the server's configured verbosity. An absent field
/// means the server did not report it, not that the value was zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Total requests served since startup
    pub total_accesses: Option<u64>,

    /// Total kilobytes served since startup
    pub total_kbytes: Option<u64>,

    /// CPU load attributed to the server
    pub cpuload: Option<f64>,

    /// Uptime in seconds
    pub uptime: Option<u64>,

    /// Average requests per second
    pub requests_per_second: Option<f64>,

    /// Average bytes served per second
    pub bytes_per_second: Option<f64>,

    /// Average bytes per request
    pub bytes_per_request: Option<f64>,

    /// Workers currently serving requests
    pub busy_workers: Option<u64>,

    /// Workers currently idle
    pub idle_workers: Option<u64>,

    /// Slots waiting for a connection (`_`)
    pub waiting_for_connection: Option<u64>,

    /// Slots starting up (`S`)
    pub starting_up: Option<u64>,

    /// Slots reading a request (`R`)
    pub reading_request: Option<u64>,

    /// Slots sending a reply (`W`)
    pub sending_reply: Option<u64>,

    /// Slots in a keepalive read (`K`)
    pub keepalive: Option<u64>,

    /// Slots performing a DNS lookup (`D`)
    pub dns_lookup: Option<u64>,

    /// Slots closing a connection (`C`)
    pub closing_connection: Option<u64>,

    /// Slots writing a log entry (`L`)
    pub logging: Option<u64>,

    /// Slots gracefully finishing (`G`)
    pub gracefully_finishing: Option<u64>,

    /// Slots in idle cleanup (`I`)
    pub idle_cleanup_of_worker: Option<u64>,

    /// Open slots with no current process (`.`)
    pub open_slots: Option<u64>,
}

/// A writable slot for one scalar report field, tagged with its numeric type.
pub(crate) enum ScalarSlot<'a> {
    Int(&'a mut Option<u64>),
    Float(&'a mut Option<f64>),
}

impl StatusRecord {
    /// Report keys for the nine scalar lines, each paired with the record
    /// field it populates.
    pub(crate) fn scalar_slots(&mut self) -> [(&'static str, ScalarSlot<'_>); 9] {
        [
            ("Total Accesses", ScalarSlot::Int(&mut self.total_accesses)),
            ("Total kBytes", ScalarSlot::Int(&mut self.total_kbytes)),
            ("CPULoad", ScalarSlot::Float(&mut self.cpuload)),
            ("Uptime", ScalarSlot::Int(&mut self.uptime)),
            ("ReqPerSec", ScalarSlot::Float(&mut self.requests_per_second)),
            ("BytesPerSec", ScalarSlot::Float(&mut self.bytes_per_second)),
            ("BytesPerReq", ScalarSlot::Float(&mut self.bytes_per_request)),
            ("BusyWorkers", ScalarSlot::Int(&mut self.busy_workers)),
            ("IdleWorkers", ScalarSlot::Int(&mut self.idle_workers)),
        ]
    }

    /// The eleven scoreboard count fields, in [`SCOREBOARD_CHARS`] order.
    pub(crate) fn scoreboard_slots(&mut self) -> [&mut Option<u64>; 11] {
        [
            &mut self.waiting_for_connection,
            &mut self.starting_up,
            &mut self.reading_request,
            &mut self.sending_reply,
            &mut self.keepalive,
            &mut self.dns_lookup,
            &mut self.closing_connection,
            &mut self.logging,
            &mut self.gracefully_finishing,
            &mut self.idle_cleanup_of_worker,
            &mut self.open_slots,
        ]
    }
}
