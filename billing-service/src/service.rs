use std::sync::Arc;

use rust_decimal::Decimal;

use backend_client::{
    BillItemPayload, BillPayload, BillRecord, LmsClient, TestPackagePayload, TestPackageRecord,
};
use error_common::{LmsError, LmsResult};

use crate::models::BillDraft;
use crate::selection::{TestOption, TestSelection};

/// Input for creating a test package
#[derive(Debug, Clone)]
pub struct NewTestPackage {
    pub name: String,
    pub package_code: Option<String>,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_seed: Option<String>,
}

/// Billing facade: catalog loading and bill/package submission
pub struct BillingService {
    client: Arc<LmsClient>,
}

impl BillingService {
    /// Create a new billing service
    pub fn new(client: Arc<LmsClient>) -> Self {
        Self { client }
    }

    /// Load the test catalog as session-local options
    ///
    /// Display ids are assigned in arrival order and are valid for this
    /// session only.
    pub async fn load_test_catalog(&self) -> LmsResult<Vec<TestOption>> {
        let records = self.client.list_tests().await.map_err(LmsError::from)?;
        tracing::debug!(tests = records.len(), "loaded test catalog");
        Ok(records
            .iter()
            .enumerate()
            .map(|(index, record)| TestOption::from_record(record, index + 1))
            .collect())
    }

    /// Persist a draft: POST for a new bill, PUT when the server already
    /// knows it
    pub async fn submit_bill(&self, draft: &BillDraft) -> LmsResult<BillRecord> {
        let payload = build_bill_payload(draft)?;
        let result = match draft.server_id {
            Some(id) => self.client.update_bill(id, &payload).await,
            None => self.client.create_bill(&payload).await,
        };
        match result {
            Ok(record) => {
                tracing::debug!(bill_id = record.id, "bill persisted");
                Ok(record)
            }
            Err(err) => {
                let err = LmsError::from(err);
                error_common::log_error("submit_bill", &err).await;
                Err(err)
            }
        }
    }

    /// Fetch a previously persisted bill
    pub async fn fetch_bill(&self, id: i64) -> LmsResult<BillRecord> {
        self.client.get_bill(id).await.map_err(LmsError::from)
    }

    /// Create a test package from the current selection
    pub async fn submit_test_package(
        &self,
        package: &NewTestPackage,
        selection: &TestSelection,
    ) -> LmsResult<TestPackageRecord> {
        let payload = build_package_payload(package, selection)?;
        match self.client.create_test_package(&payload).await {
            Ok(record) => Ok(record),
            Err(err) => {
                let err = LmsError::from(err);
                error_common::log_error("submit_test_package", &err).await;
                Err(err)
            }
        }
    }
}

/// Validate a draft and assemble the wire payload, totals included
///
/// Validation failures stay on this side of the wire; nothing is sent.
pub fn build_bill_payload(draft: &BillDraft) -> LmsResult<BillPayload> {
    if draft.items().is_empty() {
        return Err(LmsError::Validation(
            "Select at least one test or package".to_string(),
        ));
    }
    let totals = draft.totals()?;

    Ok(BillPayload {
        patient_id: draft.patient_id,
        items: draft
            .items()
            .iter()
            .map(|item| BillItemPayload {
                name: item.name.clone(),
                item_type: item.kind.as_str().to_string(),
                unit_price: item.unit_price,
            })
            .collect(),
        discount_amount: draft.discount_amount(),
        amount_received: draft.amount_received(),
        payment_mode: draft.payment_mode().map(|m| m.as_str().to_string()),
        notes: draft.notes().map(str::to_string),
        status: draft.status().as_str().to_string(),
        sub_total: totals.sub_total,
        grand_total: totals.grand_total,
        amount_due: totals.amount_due,
    })
}

/// Validate package inputs and assemble the wire payload
///
/// Only durable backend ids are sent; display ids never leave the session.
pub fn build_package_payload(
    package: &NewTestPackage,
    selection: &TestSelection,
) -> LmsResult<TestPackagePayload> {
    if package.name.trim().is_empty() {
        return Err(LmsError::Validation(
            "Package name is required".to_string(),
        ));
    }
    if package.price < Decimal::ZERO {
        return Err(LmsError::Validation(
            "Package price cannot be negative".to_string(),
        ));
    }
    if selection.is_empty() {
        return Err(LmsError::Validation(
            "Select at least one test for the package".to_string(),
        ));
    }

    Ok(TestPackagePayload {
        name: package.name.trim().to_string(),
        package_code: package.package_code.clone(),
        price: package.price,
        description: package.description.clone(),
        selected_tests: selection.backend_ids(),
        image_seed: package.image_seed.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemKind, LineItem, PaymentMode};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn draft_with_items() -> BillDraft {
        let mut draft = BillDraft::new();
        draft
            .add_item(LineItem {
                name: "CBC".to_string(),
                kind: ItemKind::Test,
                unit_price: dec("350.00"),
            })
            .unwrap();
        draft
            .add_item(LineItem {
                name: "Full Body".to_string(),
                kind: ItemKind::Package,
                unit_price: dec("700.00"),
            })
            .unwrap();
        draft
    }

    #[test]
    fn test_bill_payload_carries_computed_totals() {
        let mut draft = draft_with_items();
        draft.set_discount(dec("50.00")).unwrap();
        draft.set_amount_received(dec("500.00")).unwrap();
        draft.set_payment_mode(Some(PaymentMode::Upi)).unwrap();

        let payload = build_bill_payload(&draft).unwrap();
        assert_eq!(payload.sub_total, dec("1050.00"));
        assert_eq!(payload.grand_total, dec("1000.00"));
        assert_eq!(payload.amount_due, dec("500.00"));
        assert_eq!(payload.payment_mode.as_deref(), Some("upi"));
        assert_eq!(payload.items[1].item_type, "package");
    }

    #[test]
    fn test_empty_bill_is_rejected_before_submission() {
        let draft = BillDraft::new();
        let err = build_bill_payload(&draft).unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
    }

    #[test]
    fn test_package_payload_sends_backend_ids_only() {
        let mut selection = TestSelection::new();
        selection.add(TestOption {
            display_id: "opt-1".to_string(),
            backend_id: 42,
            name: "CBC".to_string(),
            price: dec("350.00"),
        });

        let package = NewTestPackage {
            name: "Basic".to_string(),
            package_code: Some("PKG-01".to_string()),
            price: dec("300.00"),
            description: None,
            image_seed: None,
        };
        let payload = build_package_payload(&package, &selection).unwrap();
        assert_eq!(payload.selected_tests, vec![42]);
    }

    #[test]
    fn test_package_requires_a_selection() {
        let package = NewTestPackage {
            name: "Basic".to_string(),
            package_code: None,
            price: dec("300.00"),
            description: None,
            image_seed: None,
        };
        let err = build_package_payload(&package, &TestSelection::new()).unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
    }

    #[test]
    fn test_package_name_and_price_validated() {
        let mut selection = TestSelection::new();
        selection.add(TestOption {
            display_id: "opt-1".to_string(),
            backend_id: 42,
            name: "CBC".to_string(),
            price: dec("350.00"),
        });

        let blank = NewTestPackage {
            name: "   ".to_string(),
            package_code: None,
            price: dec("300.00"),
            description: None,
            image_seed: None,
        };
        assert!(build_package_payload(&blank, &selection).is_err());

        let negative = NewTestPackage {
            name: "Basic".to_string(),
            package_code: None,
            price: dec("-1.00"),
            description: None,
            image_seed: None,
        };
        assert!(build_package_payload(&negative, &selection).is_err());
    }
}
