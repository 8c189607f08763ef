//! Staged market instructions and batch validation

use thiserror::Error;
use tracing::debug;

use crate::orderbook::{OrderBook, OrderId, Price, TraderId, Vol};

/// A mutating operation staged for the next step.
///
/// Placements are staged as [`Instruction::Submit`] of an order record
/// pre-created in the arena, so the order id handed back to the caller is
/// stable across the later shuffled application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Null instruction; applying it does nothing.
    NoOp,
    /// Apply a pre-created order to the book.
    Submit(OrderId),
    /// Cancel an order. Unknown or inactive targets are no-ops at apply
    /// time.
    Cancel(OrderId),
    /// Modify an order's price and/or volume. Invalid targets or
    /// parameters are no-ops at apply time.
    Modify {
        /// The order to modify.
        order_id: OrderId,
        /// Replacement price, if any.
        new_price: Option<Price>,
        /// Replacement volume, if any.
        new_vol: Option<Vol>,
    },
}

/// Apply one staged instruction against the book.
///
/// Validation rejections from the book are demoted to logged no-ops: a
/// shuffled batch must never abort mid-application.
pub(super) fn apply(book: &mut OrderBook, instruction: Instruction) {
    match instruction {
        Instruction::NoOp => {}
        Instruction::Submit(id) => book.submit_order(id),
        Instruction::Cancel(id) => {
            if let Err(err) = book.cancel_order(id) {
                debug!(%err, "dropped cancel instruction");
            }
        }
        Instruction::Modify {
            order_id,
            new_price,
            new_vol,
        } => {
            if let Err(err) = book.modify_order(order_id, new_price, new_vol) {
                debug!(%err, "dropped modify instruction");
            }
        }
    }
}

/// Batch instruction block: six equal-length columns, one row per
/// instruction.
///
/// Row `i` is interpreted by `kinds[i]`: `0` no-op, `1` new limit order
/// (reads `sides`, `vols`, `trader_ids`, `prices`), `2` cancellation
/// (reads `order_ids`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionBlock {
    /// Instruction kind per row: `0` no-op, `1` new order, `2` cancel.
    pub kinds: Vec<u32>,
    /// Order side per row, `true` for bids. Used when `kind = 1`.
    pub sides: Vec<bool>,
    /// Order volume per row. Used when `kind = 1`.
    pub vols: Vec<Vol>,
    /// Trader id per row. Used when `kind = 1`.
    pub trader_ids: Vec<TraderId>,
    /// Limit price per row. Used when `kind = 1`.
    pub prices: Vec<Price>,
    /// Target order id per row. Used when `kind = 2`.
    pub order_ids: Vec<OrderId>,
}

/// Kind code for a new limit order row.
pub(super) const KIND_NEW_ORDER: u32 = 1;
/// Kind code for a cancellation row.
pub(super) const KIND_CANCEL: u32 = 2;

impl InstructionBlock {
    /// Number of rows in the block.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// `true` when the block holds no rows.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Validate the whole block against `tick_size`.
    ///
    /// Checks column lengths, kind codes and, for each new-order row,
    /// the volume and price. Nothing may be staged from a block that
    /// fails any row: partial application of a batch would be ambiguous
    /// and unreproducible.
    pub(super) fn validate(&self, tick_size: Price) -> Result<(), InstructionError> {
        let rows = self.kinds.len();
        for column_len in [
            self.sides.len(),
            self.vols.len(),
            self.trader_ids.len(),
            self.prices.len(),
            self.order_ids.len(),
        ] {
            if column_len != rows {
                return Err(InstructionError::LengthMismatch {
                    expected: rows,
                    got: column_len,
                });
            }
        }
        for (index, &kind) in self.kinds.iter().enumerate() {
            match kind {
                0 | KIND_CANCEL => {}
                KIND_NEW_ORDER => {
                    check_new_order(index, self.vols[index], self.prices[index], tick_size)?;
                }
                _ => return Err(InstructionError::UnknownKind { index, kind }),
            }
        }
        Ok(())
    }
}

/// Validate one new-order row of a batch.
pub(super) fn check_new_order(
    index: usize,
    vol: Vol,
    price: Price,
    tick_size: Price,
) -> Result<(), InstructionError> {
    if vol == 0 {
        return Err(InstructionError::ZeroVolume { index });
    }
    if price == 0 || price == crate::orderbook::MAX_PRICE {
        return Err(InstructionError::PriceOutOfRange { index, price });
    }
    if price % tick_size != 0 {
        return Err(InstructionError::MisalignedPrice {
            index,
            price,
            tick_size,
        });
    }
    Ok(())
}

/// Hard failures raised by batch submission.
///
/// Unlike the per-order rejections of the matching core these abort the
/// whole call before anything is staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InstructionError {
    /// Columns of the batch have different lengths.
    #[error("instruction columns have mismatched lengths ({got} row(s), expected {expected})")]
    LengthMismatch {
        /// Length of the kind column.
        expected: usize,
        /// Length of the offending column.
        got: usize,
    },

    /// A kind code outside `{0, 1, 2}`.
    #[error("unknown instruction kind {kind} at row {index}")]
    UnknownKind {
        /// Offending row.
        index: usize,
        /// The unrecognised code.
        kind: u32,
    },

    /// A new-order row with zero volume.
    #[error("zero volume at row {index}")]
    ZeroVolume {
        /// Offending row.
        index: usize,
    },

    /// A new-order row priced at a market sentinel.
    #[error("price {price} at row {index} is outside the valid limit range")]
    PriceOutOfRange {
        /// Offending row.
        index: usize,
        /// The offending price.
        price: Price,
    },

    /// A new-order row whose price is not a tick multiple.
    #[error("price {price} at row {index} is not a multiple of tick size {tick_size}")]
    MisalignedPrice {
        /// Offending row.
        index: usize,
        /// The offending price.
        price: Price,
        /// The environment's tick size.
        tick_size: Price,
    },
}
