//! Parsers for the whitespace-separated topology, message and change formats.
//!
//! Every format is one record per line; blank lines are skipped.
//!
//! ```text
//! topology:  <node> <node> <cost>
//! changes:   <node> <node> <cost | -999>
//! messages:  <src> <dest> <free text until end of line>
//! ```

use crate::error::RoutingError;
use crate::types::{Change, Cost, CostUpdate, Link, Message, NodeId};

/// Position of the record being parsed, for error reporting.
struct LineRef<'a> {
    source_name: &'a str,
    line: usize,
}

impl LineRef<'_> {
    fn error(&self, reason: impl Into<String>) -> RoutingError {
        RoutingError::Parse {
            source_name: self.source_name.to_string(),
            line: self.line,
            reason: reason.into(),
        }
    }

    fn integer(&self, token: Option<&str>, field: &str) -> Result<i64, RoutingError> {
        let token = token.ok_or_else(|| self.error(format!("missing {field}")))?;
        token
            .parse::<i64>()
            .map_err(|_| self.error(format!("{field} is not an integer: {token:?}")))
    }

    fn node(&self, token: Option<&str>, field: &str) -> Result<NodeId, RoutingError> {
        let raw = self.integer(token, field)?;
        NodeId::from_raw(raw).map_err(|e| self.error(e.to_string()))
    }

    fn no_trailing(&self, token: Option<&str>) -> Result<(), RoutingError> {
        match token {
            Some(extra) => Err(self.error(format!("unexpected trailing field {extra:?}"))),
            None => Ok(()),
        }
    }
}

/// Non-blank lines with their 1-based line numbers.
fn records<'a>(
    text: &'a str,
    source_name: &'a str,
) -> impl Iterator<Item = (LineRef<'a>, &'a str)> + 'a {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(move |(idx, line)| {
            (
                LineRef {
                    source_name,
                    line: idx + 1,
                },
                line,
            )
        })
}

/// Split off the first whitespace-delimited token.
fn split_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

/// Parse `<node> <node> <cost>` records.
pub fn parse_topology(text: &str, source_name: &str) -> Result<Vec<Link>, RoutingError> {
    records(text, source_name)
        .map(|(at, line)| -> Result<Link, RoutingError> {
            let mut fields = line.split_whitespace();
            let a = at.node(fields.next(), "first node")?;
            let b = at.node(fields.next(), "second node")?;
            let raw = at.integer(fields.next(), "cost")?;
            at.no_trailing(fields.next())?;
            let cost = Cost::try_from(raw)
                .map_err(|_| at.error(RoutingError::NegativeCost { a, b, cost: raw }.to_string()))?;
            Ok(Link::new(a, b, cost))
        })
        .collect()
}

/// Parse `<node> <node> <cost>` change records, where `-999` withdraws the link.
pub fn parse_changes(text: &str, source_name: &str) -> Result<Vec<Change>, RoutingError> {
    records(text, source_name)
        .map(|(at, line)| -> Result<Change, RoutingError> {
            let mut fields = line.split_whitespace();
            let a = at.node(fields.next(), "first node")?;
            let b = at.node(fields.next(), "second node")?;
            let raw = at.integer(fields.next(), "cost")?;
            at.no_trailing(fields.next())?;
            let update = CostUpdate::from_raw(a, b, raw).map_err(|e| at.error(e.to_string()))?;
            Ok(Change::new(a, b, update))
        })
        .collect()
}

/// Parse `<src> <dest> <text>` records. The text keeps its inner spacing.
pub fn parse_messages(text: &str, source_name: &str) -> Result<Vec<Message>, RoutingError> {
    records(text, source_name)
        .map(|(at, line)| -> Result<Message, RoutingError> {
            let (src, rest) = split_token(line).ok_or_else(|| at.error("missing source node"))?;
            let src = at.node(Some(src), "source node")?;
            let (dest, rest) = split_token(rest)
                .ok_or_else(|| at.error("missing destination node"))?;
            let dest = at.node(Some(dest), "destination node")?;
            Ok(Message {
                src,
                dest,
                text: rest.trim().to_string(),
            })
        })
        .collect()
}
