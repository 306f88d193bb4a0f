use lunchsplit_calculator::{
    BillSummary, bill_subtotal, breakdowns, extra_costs_total, grand_total, line_item_total,
};
use lunchsplit_types::{ExtraCostConfig, LineItem, Participant, TipKind};
use rust_decimal_macros::dec;

fn no_extras() -> ExtraCostConfig {
    ExtraCostConfig::default()
}

#[test]
fn single_item_single_participant_pays_everything() {
    let alice = Participant::new("Alice");
    let items = vec![LineItem::new("Kurutob", dec!(10.00), 2).shared_by([alice.id])];

    let result = breakdowns(&[alice], &items, &no_extras());

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].subtotal, dec!(20.00));
    assert_eq!(result[0].extra_costs, dec!(0.00));
    assert_eq!(result[0].total, dec!(20.00));
}

#[test]
fn shared_item_with_tax_is_split_evenly_with_extras() {
    let alice = Participant::new("Alice");
    let bob = Participant::new("Bob");
    let items = vec![LineItem::new("Pizza", dec!(10.00), 1).shared_by([alice.id, bob.id])];
    let config = ExtraCostConfig {
        tax_percent: dec!(10),
        service_percent: dec!(0),
        tip_kind: TipKind::Fixed,
        tip_value: dec!(0),
    };

    let subtotal = bill_subtotal(&items);
    assert_eq!(subtotal, dec!(10.00));
    assert_eq!(extra_costs_total(subtotal, &config), dec!(1.00));
    assert_eq!(grand_total(&items, &config), dec!(11.00));

    let result = breakdowns(&[alice, bob], &items, &config);
    for breakdown in &result {
        assert_eq!(breakdown.subtotal, dec!(5.00));
        assert_eq!(breakdown.extra_costs, dec!(0.50));
        assert_eq!(breakdown.total, dec!(5.50));
        assert_eq!(breakdown.items.len(), 1);
        assert_eq!(breakdown.items[0].amount, dec!(5.00));
    }
}

#[test]
fn cent_priced_item_total_is_exact() {
    let item = LineItem::new("Lepyoshka", dec!(9.99), 3);
    assert_eq!(line_item_total(&item), dec!(29.97));
}

#[test]
fn fixed_tip_on_unassigned_bill_is_unattributed() {
    let items = vec![LineItem::new("Banquet", dec!(40.00), 1)];
    let config = ExtraCostConfig {
        tip_kind: TipKind::Fixed,
        tip_value: dec!(5.00),
        ..ExtraCostConfig::default()
    };

    let subtotal = bill_subtotal(&items);
    assert!(subtotal > dec!(0));
    assert_eq!(extra_costs_total(subtotal, &config), dec!(5.00));

    assert!(breakdowns(&[], &items, &config).is_empty());

    let people = vec![Participant::new("Alice"), Participant::new("Bob")];
    let result = breakdowns(&people, &items, &config);
    for breakdown in &result {
        assert!(breakdown.items.is_empty());
        assert_eq!(breakdown.subtotal, dec!(0));
        assert_eq!(breakdown.extra_costs, dec!(0));
        assert_eq!(breakdown.total, dec!(0));
    }

    let summary = BillSummary::compute(&people, &items, &config);
    assert_eq!(summary.unattributed, dec!(45.00));
}

#[test]
fn empty_bill_costs_nothing() {
    let percent_only = ExtraCostConfig {
        tax_percent: dec!(12),
        service_percent: dec!(10),
        tip_kind: TipKind::Percent,
        tip_value: dec!(5),
    };
    assert_eq!(bill_subtotal(&[]), dec!(0));
    assert_eq!(extra_costs_total(dec!(0), &percent_only), dec!(0));
    assert_eq!(grand_total(&[], &percent_only), dec!(0));
}

#[test]
fn zero_priced_items_do_not_divide_by_zero() {
    let alice = Participant::new("Alice");
    let items = vec![LineItem::new("Water", dec!(0), 3).shared_by([alice.id])];
    let config = ExtraCostConfig {
        tip_kind: TipKind::Fixed,
        tip_value: dec!(3),
        ..ExtraCostConfig::default()
    };

    let result = breakdowns(&[alice], &items, &config);
    assert_eq!(result[0].subtotal, dec!(0));
    assert_eq!(result[0].extra_costs, dec!(0));
    assert_eq!(result[0].items[0].amount, dec!(0));
}

#[test]
fn participant_without_items_owes_nothing() {
    let alice = Participant::new("Alice");
    let idle = Participant::new("Idle");
    let items = vec![LineItem::new("Soup", dec!(7.00), 1).shared_by([alice.id])];
    let config = ExtraCostConfig { tax_percent: dec!(10), ..ExtraCostConfig::default() };

    let result = breakdowns(&[alice, idle], &items, &config);
    assert_eq!(result[0].total, dec!(7.70));
    assert!(result[1].items.is_empty());
    assert_eq!(result[1].subtotal, dec!(0));
    assert_eq!(result[1].extra_costs, dec!(0));
    assert_eq!(result[1].total, dec!(0));
}

#[test]
fn breakdowns_follow_participant_order() {
    let people = vec![Participant::new("Zoe"), Participant::new("Adam"), Participant::new("Mia")];
    let items =
        vec![LineItem::new("Cake", dec!(9.00), 1).shared_by(people.iter().map(|p| p.id))];

    let result = breakdowns(&people, &items, &no_extras());
    let names: Vec<_> = result.iter().map(|b| b.participant.name.as_str()).collect();
    assert_eq!(names, ["Zoe", "Adam", "Mia"]);
}

#[test]
fn removing_a_sharer_changes_remaining_shares() {
    let alice = Participant::new("Alice");
    let bob = Participant::new("Bob");
    let carol = Participant::new("Carol");
    let mut items =
        vec![LineItem::new("Shashlik", dec!(12.00), 1).shared_by([alice.id, bob.id, carol.id])];

    let before = breakdowns(&[alice.clone(), bob.clone()], &items, &no_extras());
    assert_eq!(before[0].subtotal, dec!(4.00));

    // what deleting Carol cascades to
    for item in &mut items {
        item.participant_ids.remove(&carol.id);
    }

    let after = breakdowns(&[alice, bob], &items, &no_extras());
    assert_eq!(after[0].subtotal, dec!(6.00));
    assert_eq!(after[1].subtotal, dec!(6.00));
}

#[test]
fn dangling_assignment_share_is_unattributed() {
    let alice = Participant::new("Alice");
    let ghost = Participant::new("Ghost");
    let items = vec![LineItem::new("Tea", dec!(4.00), 1).shared_by([alice.id, ghost.id])];

    let summary = BillSummary::compute(&[alice], &items, &no_extras());
    assert_eq!(summary.breakdowns[0].subtotal, dec!(2.00));
    assert_eq!(summary.unattributed, dec!(2.00));
}

#[test]
fn extra_share_uses_rounded_person_subtotal() {
    let people = vec![Participant::new("A"), Participant::new("B"), Participant::new("C")];
    let items =
        vec![LineItem::new("Platter", dec!(10.00), 1).shared_by(people.iter().map(|p| p.id))];
    let config = ExtraCostConfig {
        tip_kind: TipKind::Fixed,
        tip_value: dec!(1.00),
        ..ExtraCostConfig::default()
    };

    let result = breakdowns(&people, &items, &config);
    for breakdown in &result {
        // 3.33 / 10.00 * 1.00 = 0.333
        assert_eq!(breakdown.subtotal, dec!(3.33));
        assert_eq!(breakdown.extra_costs, dec!(0.33));
        assert_eq!(breakdown.total, dec!(3.66));
    }

    let summary = BillSummary::compute(&people, &items, &config);
    assert_eq!(summary.grand_total, dec!(11.00));
    assert_eq!(summary.unattributed, dec!(0.02));
}
