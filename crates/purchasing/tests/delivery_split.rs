//! End-to-end delivery splitting against the in-memory receipt store.

use chrono::{DateTime, TimeZone, Utc};

use splitdate_core::DomainError;
use splitdate_inventory::{InMemoryReceiptStore, ProductId, Receipt, ReceiptId, ReceiptStore};
use splitdate_purchasing::{
    DATE_PLANNED, GroupKeyEntry, PurchaseOrder, ReceiptMoveFactory, ReceiptSplitter, SplitConfig,
};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

fn setup(dates: &[DateTime<Utc>]) -> (InMemoryReceiptStore, PurchaseOrder, ReceiptId) {
    splitdate_observability::init();

    let mut order = PurchaseOrder::new("PO00012", "Wood Corner");
    for date in dates {
        order.add_line(ProductId::generate(), 10, *date).unwrap();
    }

    let store = InMemoryReceiptStore::new();
    let receipt = store
        .insert(
            Receipt::new("", Utc::now())
                .with_origin(order.name())
                .with_partner(order.supplier()),
        )
        .unwrap();
    (store, order, receipt)
}

#[test]
fn three_lines_on_two_days_give_two_receipts() {
    let (store, order, receipt) = setup(&[at(5, 10), at(5, 14), at(7, 9)]);
    let splitter = ReceiptSplitter::from_config(&SplitConfig::default()).unwrap();

    let moves = splitter
        .create_order_moves(&store, &ReceiptMoveFactory::new(&store), &order, Some(receipt))
        .unwrap();
    assert_eq!(moves.len(), 3);

    let receipts = store.list().unwrap();
    assert_eq!(receipts.len(), 2);

    let original = &receipts[0];
    assert_eq!(original.id_typed(), receipt);
    assert_eq!(original.name(), "WH/IN/00001");
    assert_eq!(original.date(), at(5, 0));
    let original_lines: Vec<_> = store
        .moves(receipt)
        .unwrap()
        .iter()
        .map(|m| m.purchase_line_id)
        .collect();
    assert_eq!(
        original_lines,
        vec![order.lines()[0].id.0, order.lines()[1].id.0]
    );

    let clone = &receipts[1];
    assert_eq!(clone.name(), "WH/IN/00002");
    assert_eq!(clone.date(), at(7, 0));
    assert_eq!(clone.origin(), Some("PO00012"));
    assert_eq!(clone.partner(), Some("Wood Corner"));
    let clone_moves = store.moves(clone.id_typed()).unwrap();
    assert_eq!(clone_moves.len(), 1);
    assert_eq!(clone_moves[0].purchase_line_id, order.lines()[2].id.0);
}

#[test]
fn each_receipt_is_dated_to_its_lines() {
    let (store, order, receipt) = setup(&[at(20, 9), at(3, 23), at(11, 0), at(3, 1), at(20, 8)]);

    let groups = ReceiptSplitter::new()
        .split(&store, &ReceiptMoveFactory::new(&store), &order, order.lines(), Some(receipt))
        .unwrap();

    let days: Vec<_> = groups
        .iter()
        .map(|g| g.key.entries().to_vec())
        .collect();
    assert_eq!(
        days,
        vec![
            vec![GroupKeyEntry::new(DATE_PLANNED, "2024-01-03")],
            vec![GroupKeyEntry::new(DATE_PLANNED, "2024-01-11")],
            vec![GroupKeyEntry::new(DATE_PLANNED, "2024-01-20")],
        ]
    );

    for group in &groups {
        let receipt = store.get(group.receipt_id.unwrap()).unwrap().unwrap();
        for m in store.moves(receipt.id_typed()).unwrap() {
            assert_eq!(m.date_expected.date_naive(), receipt.date().date_naive());
        }
    }
}

#[test]
fn resplitting_a_single_day_receipt_makes_no_copies() {
    let (store, order, receipt) = setup(&[at(5, 10), at(7, 9)]);
    let splitter = ReceiptSplitter::new();
    let groups = splitter
        .split(&store, &ReceiptMoveFactory::new(&store), &order, order.lines(), Some(receipt))
        .unwrap();

    // Split the second day's line again onto its own receipt.
    let second = groups[1].receipt_id.unwrap();
    let line = order.line(groups[1].lines[0]).unwrap().clone();
    let again = splitter
        .split(&store, &ReceiptMoveFactory::new(&store), &order, &[line], Some(second))
        .unwrap();

    assert_eq!(again.len(), 1);
    assert_eq!(again[0].receipt_id, Some(second));
    assert_eq!(store.len().unwrap(), 2);
    assert_eq!(store.get(second).unwrap().unwrap().date(), at(7, 0));
}

#[test]
fn missing_receipt_with_several_days_fails_before_any_write() {
    let (store, order, _) = setup(&[at(5, 10), at(7, 9)]);

    let err = ReceiptSplitter::new()
        .create_order_moves(&store, &ReceiptMoveFactory::new(&store), &order, None)
        .unwrap_err();

    assert_eq!(err, DomainError::ReceiptRequired(2));
    assert_eq!(store.len().unwrap(), 1);
    assert!(store.unassigned_moves().unwrap().is_empty());
}
