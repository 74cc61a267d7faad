//! Text format for command streams.
//!
//! One command per line, fields separated by whitespace, `#` starts a comment:
//!
//! ```text
//! # id  class side qty price trig flag
//! 1100  L     B    1   100   0    N
//! 1200  M     S    2   0     90   SL
//! cancel 1100
//! ask
//! bid
//! ```
//!
//! Quantities and prices are decimals with up to 8 fractional digits. Flags
//! combine with `+`, e.g. `SL+I`.

use crate::error::ScriptError;
use crate::types::price::to_fixed;
use crate::types::{OrderClass, OrderFlags, Side};

/// One engine command, without its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place {
        id: u64,
        class: OrderClass,
        side: Side,
        quantity: u64,
        price: u64,
        trig_price: u64,
        flags: OrderFlags,
    },
    Cancel {
        id: u64,
    },
    BestAsk,
    BestBid,
}

/// Parse a whole script. Blank and comment-only lines are skipped.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let content = raw.split('#').next().unwrap_or_default();
        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        commands.push(parse_fields(index + 1, &fields)?);
    }
    Ok(commands)
}

fn parse_fields(line: usize, fields: &[&str]) -> Result<Command, ScriptError> {
    match fields {
        ["ask"] => Ok(Command::BestAsk),
        ["bid"] => Ok(Command::BestBid),
        ["cancel", id] => Ok(Command::Cancel {
            id: parse_id(line, id)?,
        }),
        [id, class, side, quantity, price, trig_price, flags] => Ok(Command::Place {
            id: parse_id(line, id)?,
            class: parse_class(line, class)?,
            side: parse_side(line, side)?,
            quantity: parse_amount(line, quantity)?,
            price: parse_amount(line, price)?,
            trig_price: parse_amount(line, trig_price)?,
            flags: parse_flags(line, flags)?,
        }),
        _ => Err(ScriptError::Malformed {
            line,
            expected: "`id class side qty price trig flag`, `cancel id`, `ask` or `bid`",
            found: fields.join(" "),
        }),
    }
}

fn parse_id(line: usize, value: &str) -> Result<u64, ScriptError> {
    value.parse().map_err(|_| ScriptError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

fn parse_amount(line: usize, value: &str) -> Result<u64, ScriptError> {
    to_fixed(value).ok_or_else(|| ScriptError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

fn parse_class(line: usize, value: &str) -> Result<OrderClass, ScriptError> {
    match value {
        "L" => Ok(OrderClass::Limit),
        "M" => Ok(OrderClass::Market),
        _ => Err(malformed(line, "order class `L` or `M`", value)),
    }
}

fn parse_side(line: usize, value: &str) -> Result<Side, ScriptError> {
    match value {
        "B" => Ok(Side::Buy),
        "S" => Ok(Side::Sell),
        _ => Err(malformed(line, "side `B` or `S`", value)),
    }
}

fn parse_flags(line: usize, value: &str) -> Result<OrderFlags, ScriptError> {
    value.split('+').try_fold(OrderFlags::empty(), |flags, name| {
        let flag = match name {
            "N" => OrderFlags::empty(),
            "I" => OrderFlags::IOC,
            "A" => OrderFlags::AON,
            "F" => OrderFlags::FOK,
            "SL" => OrderFlags::STOP_LOSS,
            "TP" => OrderFlags::TAKE_PROFIT,
            "S" => OrderFlags::SNAPSHOT,
            _ => return Err(malformed(line, "flag N, I, A, F, SL, TP or S", value)),
        };
        Ok(flags | flag)
    })
}

fn malformed(line: usize, expected: &'static str, found: &str) -> ScriptError {
    ScriptError::Malformed {
        line,
        expected,
        found: found.to_string(),
    }
}
