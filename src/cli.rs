//! Terminal rendering for receipts and the chain explorer

use crate::blockchain::{Block, Blockchain};
use crate::codec::Transaction;
use crate::ticket::{Ticket, TicketReceipt};
use chrono::Local;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};
use serde_json::Value;

/// Block time in local `ctime` form, or raw milliseconds if out of range.
pub fn format_block_time(block: &Block) -> String {
    block
        .datetime()
        .map(|dt| dt.with_timezone(&Local).format("%a %b %e %H:%M:%S %Y").to_string())
        .unwrap_or_else(|| block.timestamp().to_string())
}

pub fn describe_transaction(tx: &Transaction) -> String {
    match Ticket::from_transaction(tx) {
        Some(ticket) => format!("{} {} → {}", ticket.ticket_id, ticket.event, ticket.buyer),
        None => Value::Object(tx.clone()).to_string(),
    }
}

pub fn render_receipt(receipt: &TicketReceipt) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "🎟️  Ticket Issued & Block Mined".bright_green().bold()));
    out.push_str(&format!("  Block Index: {}\n", receipt.block_index.to_string().bright_white()));
    out.push_str(&format!("  Block Hash:  {}\n", receipt.block_hash.bright_cyan()));
    out.push_str(&format!("  Ticket ID:   {}\n", receipt.ticket.ticket_id.yellow()));
    out.push_str(&format!("  Event:       {}\n", receipt.ticket.event));
    out.push_str(&format!("  Buyer:       {}\n", receipt.ticket.buyer));
    out.push_str(&format!("  Issued At:   {}\n", receipt.ticket.timestamp));
    out
}

pub fn chain_table(chain: &Blockchain) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Timestamp").add_attribute(Attribute::Bold),
            Cell::new("Hash").add_attribute(Attribute::Bold),
            Cell::new("Previous Hash").add_attribute(Attribute::Bold),
            Cell::new("Nonce").add_attribute(Attribute::Bold),
            Cell::new("Transactions").add_attribute(Attribute::Bold),
        ]);

    for block in chain.inspect_chain() {
        let transactions = block
            .transactions()
            .iter()
            .map(describe_transaction)
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(block.index()).fg(TableColor::Green),
            Cell::new(format_block_time(block)),
            Cell::new(block.hash()).fg(TableColor::Cyan),
            Cell::new(block.previous_hash()),
            Cell::new(block.nonce()),
            Cell::new(transactions),
        ]);
    }
    table
}

pub fn render_chain(chain: &Blockchain) -> String {
    let status = if chain.is_valid() {
        "valid".bright_green()
    } else {
        "INVALID".red().bold()
    };
    format!(
        "{}\nBlocks: {}  Difficulty: {}  Integrity: {}\n{}\n",
        "================ Blockchain Explorer ================".bright_magenta(),
        chain.len(),
        chain.difficulty(),
        status,
        chain_table(chain)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::genesis_transaction;
    use crate::ticket::issue_ticket;

    #[test]
    fn test_describe_ticket_and_system_transactions() {
        let ticket = Ticket::new("Movie Screening", "Rahul");
        let line = describe_transaction(&ticket.to_transaction());
        assert!(line.starts_with(&ticket.ticket_id));
        assert!(line.contains("Movie Screening"));
        assert!(line.contains("Rahul"));

        assert_eq!(describe_transaction(&genesis_transaction()), r#"{"system":"genesis"}"#);
    }

    #[test]
    fn test_render_chain_lists_every_block() {
        colored::control::set_override(false);
        let mut chain = Blockchain::new(1);
        let receipt = issue_ticket(&mut chain, "Carnival", "Isha");
        let rendered = render_chain(&chain);
        assert!(rendered.contains("Blocks: 2"));
        assert!(rendered.contains(chain.genesis().hash()));
        assert!(rendered.contains(&receipt.block_hash));
        assert!(render_receipt(&receipt).contains(&receipt.ticket.ticket_id));
    }
}
