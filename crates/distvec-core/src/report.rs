//! Plain-text rendering of simulation epochs.
//!
//! For each epoch the forwarding table of every node is written as
//! `dest next_hop cost` lines followed by a blank line, then one line per
//! queued message:
//!
//! ```text
//! from 2 to 1 cost 6 hops 2 5 4 message here is a message from 2 to 1
//! from 3 to 5 cost infinite hops unreachable message no route
//! ```

use std::io::{self, Write};

use crate::route::TraceOutcome;
use crate::simulation::{Delivery, Epoch};
use crate::table::ForwardingTable;

/// Write every epoch in order.
pub fn write_epochs<W: Write>(out: &mut W, epochs: &[Epoch]) -> io::Result<()> {
    for epoch in epochs {
        write_epoch(out, epoch)?;
    }
    Ok(())
}

pub fn write_epoch<W: Write>(out: &mut W, epoch: &Epoch) -> io::Result<()> {
    for table in &epoch.tables {
        write_table(out, table)?;
    }
    for delivery in &epoch.deliveries {
        write_delivery(out, delivery)?;
    }
    if !epoch.deliveries.is_empty() {
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_table<W: Write>(out: &mut W, table: &ForwardingTable) -> io::Result<()> {
    for entry in &table.entries {
        writeln!(out, "{} {} {}", entry.destination, entry.next_hop, entry.cost)?;
    }
    writeln!(out)
}

pub fn write_delivery<W: Write>(out: &mut W, delivery: &Delivery) -> io::Result<()> {
    let message = &delivery.message;
    write!(out, "from {} to {} cost ", message.src, message.dest)?;
    match &delivery.outcome {
        TraceOutcome::Delivered(route) => {
            write!(out, "{} hops", route.cost)?;
            for hop in route.hops() {
                write!(out, " {hop}")?;
            }
        }
        TraceOutcome::Unreachable => write!(out, "infinite hops unreachable")?,
        TraceOutcome::Broken { .. } => write!(out, "infinite hops inconsistent")?,
    }
    writeln!(out, " message {}", message.text)
}
