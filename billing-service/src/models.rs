use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use error_common::{LmsError, LmsResult};

use crate::totals::{compute_totals, BillTotals};

/// What a billed line refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Test,
    Package,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Test => "test",
            ItemKind::Package => "package",
        }
    }
}

/// One billed test or package entry with a fixed unit price
///
/// Immutable once added to a bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub kind: ItemKind,
    pub unit_price: Decimal,
}

/// How the received amount was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Cash,
    Card,
    Upi,
    Online,
    Cheque,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Card => "card",
            PaymentMode::Upi => "upi",
            PaymentMode::Online => "online",
            PaymentMode::Cheque => "cheque",
        }
    }
}

/// Bill lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Initial,
    Done,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Initial => "initial",
            BillStatus::Done => "done",
        }
    }
}

/// In-progress invoice composed by the billing wizard
///
/// Monetary fields are validated on every mutation, and a finalized bill
/// (status [`BillStatus::Done`]) rejects all further edits. Totals are
/// derived on demand via [`BillDraft::totals`] and never held on the
/// draft itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillDraft {
    pub draft_id: Uuid,
    /// Server-assigned id once the draft has been persisted
    pub server_id: Option<i64>,
    pub patient_id: Option<i64>,
    items: Vec<LineItem>,
    discount_amount: Decimal,
    amount_received: Decimal,
    payment_mode: Option<PaymentMode>,
    notes: Option<String>,
    status: BillStatus,
    pub created_at: DateTime<Utc>,
}

impl BillDraft {
    /// Start a fresh wizard session
    pub fn new() -> Self {
        Self {
            draft_id: Uuid::new_v4(),
            server_id: None,
            patient_id: None,
            items: Vec::new(),
            discount_amount: Decimal::ZERO,
            amount_received: Decimal::ZERO,
            payment_mode: None,
            notes: None,
            status: BillStatus::Initial,
            created_at: Utc::now(),
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn discount_amount(&self) -> Decimal {
        self.discount_amount
    }

    pub fn amount_received(&self) -> Decimal {
        self.amount_received
    }

    pub fn payment_mode(&self) -> Option<PaymentMode> {
        self.payment_mode
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn status(&self) -> BillStatus {
        self.status
    }

    pub fn is_finalized(&self) -> bool {
        self.status == BillStatus::Done
    }

    /// Append a line item; order of addition is the order billed
    pub fn add_item(&mut self, item: LineItem) -> LmsResult<()> {
        self.ensure_editable()?;
        self.items.push(item);
        Ok(())
    }

    /// Remove a line item by position
    pub fn remove_item(&mut self, index: usize) -> LmsResult<()> {
        self.ensure_editable()?;
        if index < self.items.len() {
            self.items.remove(index);
        }
        Ok(())
    }

    pub fn set_discount(&mut self, amount: Decimal) -> LmsResult<()> {
        self.ensure_editable()?;
        if amount < Decimal::ZERO {
            return Err(LmsError::Validation(
                "Discount cannot be negative".to_string(),
            ));
        }
        self.discount_amount = amount;
        Ok(())
    }

    pub fn set_amount_received(&mut self, amount: Decimal) -> LmsResult<()> {
        self.ensure_editable()?;
        if amount < Decimal::ZERO {
            return Err(LmsError::Validation(
                "Amount received cannot be negative".to_string(),
            ));
        }
        self.amount_received = amount;
        Ok(())
    }

    pub fn set_payment_mode(&mut self, mode: Option<PaymentMode>) -> LmsResult<()> {
        self.ensure_editable()?;
        self.payment_mode = mode;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: Option<String>) -> LmsResult<()> {
        self.ensure_editable()?;
        self.notes = notes;
        Ok(())
    }

    /// Current derived totals, recomputed from scratch on every call
    pub fn totals(&self) -> LmsResult<BillTotals> {
        compute_totals(&self.items, self.discount_amount, self.amount_received)
    }

    /// Mark the bill Done; after this no discount/payment/notes/item edit
    /// is permitted
    pub fn finalize(&mut self) -> LmsResult<()> {
        if self.is_finalized() {
            return Err(LmsError::Validation(
                "Bill is already finalized".to_string(),
            ));
        }
        if self.items.is_empty() {
            return Err(LmsError::Validation(
                "Select at least one test or package".to_string(),
            ));
        }
        self.status = BillStatus::Done;
        Ok(())
    }

    fn ensure_editable(&self) -> LmsResult<()> {
        if self.is_finalized() {
            return Err(LmsError::Validation(
                "Bill is finalized and can no longer be edited".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BillDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn cbc() -> LineItem {
        LineItem {
            name: "CBC".to_string(),
            kind: ItemKind::Test,
            unit_price: dec("350.00"),
        }
    }

    #[test]
    fn test_totals_follow_every_change() {
        let mut draft = BillDraft::new();
        draft.add_item(cbc()).unwrap();
        assert_eq!(draft.totals().unwrap().sub_total, dec("350.00"));

        draft.set_discount(dec("50.00")).unwrap();
        assert_eq!(draft.totals().unwrap().grand_total, dec("300.00"));

        draft.set_amount_received(dec("100.00")).unwrap();
        assert_eq!(draft.totals().unwrap().amount_due, dec("200.00"));
    }

    #[test]
    fn test_negative_amounts_rejected_before_computation() {
        let mut draft = BillDraft::new();
        assert!(draft.set_discount(dec("-5")).is_err());
        assert!(draft.set_amount_received(dec("-5")).is_err());
        // draft untouched by the rejected edits
        assert_eq!(draft.discount_amount(), Decimal::ZERO);
        assert_eq!(draft.amount_received(), Decimal::ZERO);
    }

    #[test]
    fn test_finalized_bill_is_immutable() {
        let mut draft = BillDraft::new();
        draft.add_item(cbc()).unwrap();
        draft.finalize().unwrap();

        assert!(draft.is_finalized());
        assert!(draft.add_item(cbc()).is_err());
        assert!(draft.set_discount(dec("10.00")).is_err());
        assert!(draft.set_amount_received(dec("10.00")).is_err());
        assert!(draft.set_payment_mode(Some(PaymentMode::Cash)).is_err());
        assert!(draft.set_notes(Some("late".to_string())).is_err());
    }

    #[test]
    fn test_empty_bill_cannot_be_finalized() {
        let mut draft = BillDraft::new();
        assert!(draft.finalize().is_err());
        assert_eq!(draft.status(), BillStatus::Initial);
    }

    #[test]
    fn test_finalize_twice_is_an_error() {
        let mut draft = BillDraft::new();
        draft.add_item(cbc()).unwrap();
        draft.finalize().unwrap();
        assert!(draft.finalize().is_err());
    }

    #[test]
    fn test_enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(BillStatus::Done).unwrap(),
            serde_json::json!("done")
        );
        assert_eq!(
            serde_json::to_value(PaymentMode::Upi).unwrap(),
            serde_json::json!("upi")
        );
        assert_eq!(
            serde_json::to_value(ItemKind::Package).unwrap(),
            serde_json::json!("package")
        );
    }

    #[test]
    fn test_remove_item_out_of_range_is_noop() {
        let mut draft = BillDraft::new();
        draft.add_item(cbc()).unwrap();
        draft.remove_item(5).unwrap();
        assert_eq!(draft.items().len(), 1);
    }
}
