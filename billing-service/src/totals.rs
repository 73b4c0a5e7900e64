use rust_decimal::Decimal;

use error_common::{LmsError, LmsResult};

use crate::models::LineItem;

/// Derived monetary summary of a bill
///
/// Never stored anywhere; recomputed from the current items, discount,
/// and received amount whenever any of them changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillTotals {
    pub sub_total: Decimal,
    pub grand_total: Decimal,
    pub amount_due: Decimal,
}

impl BillTotals {
    /// True when the received amount exceeds the grand total
    ///
    /// A negative due is a caller-visible condition and must be rendered
    /// distinctly, never clamped to zero.
    pub fn is_overpaid(&self) -> bool {
        self.amount_due < Decimal::ZERO
    }
}

/// Compute sub total, grand total, and amount due for a bill
///
/// Pure and synchronous. Inputs must already be validated non-negative;
/// a discount larger than the sub total is deliberately reflected as a
/// negative grand total rather than clamped (observed product behavior,
/// flagged for confirmation rather than silently corrected).
pub fn compute_totals(
    items: &[LineItem],
    discount_amount: Decimal,
    amount_received: Decimal,
) -> LmsResult<BillTotals> {
    if discount_amount < Decimal::ZERO {
        return Err(LmsError::Validation(
            "Discount cannot be negative".to_string(),
        ));
    }
    if amount_received < Decimal::ZERO {
        return Err(LmsError::Validation(
            "Amount received cannot be negative".to_string(),
        ));
    }

    let sub_total: Decimal = items.iter().map(|item| item.unit_price).sum();
    let grand_total = sub_total - discount_amount;
    let amount_due = grand_total - amount_received;

    Ok(BillTotals {
        sub_total,
        grand_total,
        amount_due,
    })
}
