//! Ticket issuance: one ticket per mined block

use crate::blockchain::Blockchain;
use crate::codec::{sha256_hex, Transaction};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const TICKET_ID_PREFIX: &str = "TKT-";
/// Hex characters of the raw-id digest kept in a ticket id.
pub const TICKET_ID_HEX_LEN: usize = 12;
pub const ISSUE_KIND: &str = "ISSUE";

/// Display identifier derived from a raw id: `TKT-` plus the first 12 hex
/// characters of its SHA-256. Not a credential.
pub fn ticket_id_from_raw(raw_id: &str) -> String {
    let digest = sha256_hex(raw_id.as_bytes());
    format!("{}{}", TICKET_ID_PREFIX, &digest[..TICKET_ID_HEX_LEN])
}

pub fn generate_ticket_id() -> String {
    ticket_id_from_raw(&Uuid::new_v4().to_string())
}

pub fn is_ticket_id(candidate: &str) -> bool {
    candidate
        .strip_prefix(TICKET_ID_PREFIX)
        .map(|hex| {
            hex.len() == TICKET_ID_HEX_LEN
                && hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        })
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "type")]
    pub kind: String,
    pub ticket_id: String,
    pub event: String,
    pub buyer: String,
    /// Local wall-clock time in `ctime` form, e.g. `Sun Oct 19 14:02:11 2026`.
    pub timestamp: String,
}

impl Ticket {
    pub fn new(event_name: &str, buyer_name: &str) -> Self {
        Ticket {
            kind: ISSUE_KIND.to_string(),
            ticket_id: generate_ticket_id(),
            event: event_name.to_string(),
            buyer: buyer_name.to_string(),
            timestamp: Local::now().format("%a %b %e %H:%M:%S %Y").to_string(),
        }
    }

    pub fn to_transaction(&self) -> Transaction {
        let mut tx = Transaction::new();
        tx.insert("type".to_string(), Value::String(self.kind.clone()));
        tx.insert("ticket_id".to_string(), Value::String(self.ticket_id.clone()));
        tx.insert("event".to_string(), Value::String(self.event.clone()));
        tx.insert("buyer".to_string(), Value::String(self.buyer.clone()));
        tx.insert("timestamp".to_string(), Value::String(self.timestamp.clone()));
        tx
    }

    /// Reads a ticket back out of a block transaction, if it is one.
    pub fn from_transaction(tx: &Transaction) -> Option<Self> {
        serde_json::from_value::<Ticket>(Value::Object(tx.clone()))
            .ok()
            .filter(|ticket| ticket.kind == ISSUE_KIND)
    }
}

/// What the buyer keeps: the ticket and where it landed in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketReceipt {
    pub ticket: Ticket,
    pub block_index: u64,
    pub block_hash: String,
}

/// Issues a ticket and mines it as the sole transaction of a new block.
pub fn issue_ticket(chain: &mut Blockchain, event_name: &str, buyer_name: &str) -> TicketReceipt {
    let ticket = Ticket::new(event_name, buyer_name);
    let block = chain.mine(vec![ticket.to_transaction()]);
    TicketReceipt {
        ticket,
        block_index: block.index(),
        block_hash: block.hash().to_string(),
    }
}
