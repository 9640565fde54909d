use super::{members, settlement_row, split_row};
use crate::core::engine::{build_balance_sheet, compute_balances, simplify_debts};
use crate::core::models::{ExpenseRow, LedgerSnapshot, Member, SimplifiedDebt};
use crate::core::money::Money;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn debt(from: &str, to: &str, amount: Decimal) -> (String, String, Money) {
    (from.to_string(), to.to_string(), Money::new(amount))
}

fn pairs(debts: &[SimplifiedDebt]) -> Vec<(String, String, Money)> {
    debts
        .iter()
        .map(|d| (d.from_member_id.clone(), d.to_member_id.clone(), d.amount))
        .collect()
}

#[test]
fn test_single_expense_split_between_two() {
    let _ = env_logger::try_init();
    let group = members(&["a", "b"]);
    let rows = vec![split_row("e1", "a", "a", dec!(20)), split_row("e1", "a", "b", dec!(20))];

    let net = compute_balances(&group, &rows, &[]);

    assert_eq!(net.get("a"), Some(Money::new(dec!(20))));
    assert_eq!(net.get("b"), Some(Money::new(dec!(-20))));
    assert_eq!(net.total(), Some(Money::ZERO));

    let debts = simplify_debts(&net);
    assert_eq!(pairs(&debts), vec![debt("b", "a", dec!(20))]);
    assert_eq!(debts[0].from_member_name, "Member b");
    assert_eq!(debts[0].to_member_name, "Member a");
}

#[test]
fn test_member_without_activity_has_zero_balance() {
    let group = members(&["a", "b", "c"]);
    let rows = vec![split_row("e1", "a", "b", dec!(15))];

    let sheet = build_balance_sheet(&LedgerSnapshot {
        members: group,
        expense_rows: rows,
        settlements: vec![],
    });

    assert_eq!(sheet.balances.len(), 3);
    assert_eq!(sheet.balance_of("c"), Some(Money::ZERO));
    assert!(sheet.simplified_debts.iter().all(|d| d.from_member_id != "c" && d.to_member_id != "c"));
}

#[test]
fn test_self_paid_expense_nets_to_zero() {
    let group = members(&["a", "b"]);
    let rows = vec![split_row("e1", "a", "a", dec!(42.5))];

    let net = compute_balances(&group, &rows, &[]);

    assert_eq!(net.get("a"), Some(Money::ZERO));
    assert!(simplify_debts(&net).is_empty());
}

#[test]
fn test_three_way_split_keeps_exact_thirds() {
    let group = members(&["a", "b", "c"]);
    let third = (dec!(10) / dec!(3)).round_dp(10);
    let rows = vec![
        split_row("e1", "a", "a", third),
        split_row("e1", "a", "b", third),
        split_row("e1", "a", "c", third),
    ];

    let net = compute_balances(&group, &rows, &[]);
    assert_eq!(net.total(), Some(Money::ZERO));

    let sheet = build_balance_sheet(&LedgerSnapshot {
        members: group,
        expense_rows: rows,
        settlements: vec![],
    });
    assert_eq!(sheet.balance_of("a"), Some(Money::new(dec!(6.67))));
    assert_eq!(sheet.balance_of("b"), Some(Money::new(dec!(-3.33))));
    assert_eq!(sheet.balance_of("c"), Some(Money::new(dec!(-3.33))));
    assert_eq!(
        pairs(&sheet.simplified_debts),
        vec![debt("b", "a", dec!(3.33)), debt("c", "a", dec!(3.33))]
    );
}

#[test]
fn test_settlement_moves_balance_toward_zero() {
    let group = members(&["a", "b"]);
    let rows = vec![split_row("e1", "a", "b", dec!(30))];

    let partial = compute_balances(&group, &rows, &[settlement_row("b", "a", dec!(10))]);
    assert_eq!(partial.get("a"), Some(Money::new(dec!(20))));
    assert_eq!(partial.get("b"), Some(Money::new(dec!(-20))));

    let full = compute_balances(
        &group,
        &rows,
        &[settlement_row("b", "a", dec!(10)), settlement_row("b", "a", dec!(20))],
    );
    assert_eq!(full.get("a"), Some(Money::ZERO));
    assert_eq!(full.get("b"), Some(Money::ZERO));
    assert!(simplify_debts(&full).is_empty());
}

#[test]
fn test_greedy_pairs_largest_first() {
    // a +50, b +30, c -40, d -40
    let group = members(&["a", "b", "c", "d"]);
    let rows = vec![
        split_row("e1", "a", "c", dec!(40)),
        split_row("e1", "a", "d", dec!(10)),
        split_row("e2", "b", "d", dec!(30)),
    ];

    let net = compute_balances(&group, &rows, &[]);
    assert_eq!(net.get("a"), Some(Money::new(dec!(50))));
    assert_eq!(net.get("b"), Some(Money::new(dec!(30))));
    assert_eq!(net.get("c"), Some(Money::new(dec!(-40))));
    assert_eq!(net.get("d"), Some(Money::new(dec!(-40))));

    let debts = simplify_debts(&net);
    assert_eq!(
        pairs(&debts),
        vec![
            debt("c", "a", dec!(40)),
            debt("d", "a", dec!(10)),
            debt("d", "b", dec!(30)),
        ]
    );
}

#[test]
fn test_ties_keep_member_order() {
    let group = members(&["x", "a", "b"]);
    let rows = vec![split_row("e1", "x", "a", dec!(5)), split_row("e1", "x", "b", dec!(5))];

    let debts = simplify_debts(&compute_balances(&group, &rows, &[]));

    assert_eq!(pairs(&debts), vec![debt("a", "x", dec!(5)), debt("b", "x", dec!(5))]);
}

#[test]
fn test_sub_cent_balance_is_settled() {
    let group = members(&["a", "b"]);
    let rows = vec![split_row("e1", "a", "b", dec!(0.009))];

    let net = compute_balances(&group, &rows, &[]);
    assert_eq!(net.get("a"), Some(Money::new(dec!(0.009))));
    assert!(simplify_debts(&net).is_empty());
}

#[test]
fn test_exactly_one_cent_is_not_a_debt() {
    let group = members(&["a", "b"]);
    let rows = vec![split_row("e1", "a", "b", dec!(0.01))];

    let net = compute_balances(&group, &rows, &[]);
    assert_eq!(net.get("b"), Some(Money::new(dec!(-0.01))));
    assert!(simplify_debts(&net).is_empty());

    let rows = vec![split_row("e1", "a", "b", dec!(0.02))];
    let debts = simplify_debts(&compute_balances(&group, &rows, &[]));
    assert_eq!(pairs(&debts), vec![debt("b", "a", dec!(0.02))]);
}

#[test]
fn test_out_of_range_rows_are_skipped() {
    let _ = env_logger::try_init();
    let group = members(&["a", "b"]);
    let rows = vec![
        split_row("e1", "a", "b", Decimal::MAX),
        split_row("e2", "a", "b", Decimal::MAX),
        split_row("e3", "a", "b", dec!(1)),
    ];
    let settlements = vec![settlement_row("b", "a", dec!(1))];

    let net = compute_balances(&group, &rows, &settlements);

    // e2 and e3 would push a past the maximum.
    assert_eq!(net.skipped().overflowed_rows, 2);
    let near_max = Money::new(Decimal::MAX) - Money::new(dec!(1));
    assert_eq!(net.get("a"), Some(near_max));
    assert_eq!(net.get("b"), Some(-near_max));
    assert_eq!(net.total(), Some(Money::ZERO));

    let sheet = build_balance_sheet(&LedgerSnapshot {
        members: group,
        expense_rows: rows,
        settlements,
    });
    assert_eq!(sheet.simplified_debts.len(), 1);
}

#[test]
fn test_unknown_references_are_skipped_and_counted() {
    let _ = env_logger::try_init();
    let group = members(&["a", "b"]);
    let rows = vec![
        split_row("e1", "ghost", "b", dec!(10)),
        split_row("e2", "a", "stranger", dec!(5)),
        split_row("e3", "a", "b", dec!(7)),
    ];
    let settlements = vec![settlement_row("b", "nobody", dec!(3))];

    let net = compute_balances(&group, &rows, &settlements);

    // Each side is applied independently of the other.
    assert_eq!(net.get("a"), Some(Money::new(dec!(12))));
    assert_eq!(net.get("b"), Some(Money::new(dec!(-14))));
    let skipped = net.skipped();
    assert_eq!(skipped.unknown_payers, 1);
    assert_eq!(skipped.unknown_split_members, 1);
    assert_eq!(skipped.unknown_settlement_members, 1);
    assert_eq!(skipped.total(), 3);
    assert!(net.get("ghost").is_none());
}

#[test]
fn test_expense_without_splits_changes_nothing() {
    let group = members(&["a", "b"]);
    let rows = vec![ExpenseRow {
        expense_id: "e1".to_string(),
        amount: Money::new(dec!(99)),
        paid_by_member_id: "a".to_string(),
        split: None,
    }];

    let net = compute_balances(&group, &rows, &[]);

    assert_eq!(net.get("a"), Some(Money::ZERO));
    assert_eq!(net.skipped().unsplit_expense_rows, 1);
    assert!(net.skipped().is_empty());
}

#[test]
fn test_empty_ledger() {
    let sheet = build_balance_sheet(&LedgerSnapshot::default());
    assert!(sheet.balances.is_empty());
    assert!(sheet.simplified_debts.is_empty());

    let sheet = build_balance_sheet(&LedgerSnapshot {
        members: members(&["a"]),
        ..Default::default()
    });
    assert_eq!(sheet.balance_of("a"), Some(Money::ZERO));
}

#[test]
fn test_duplicate_member_keeps_first_position() {
    let group = vec![
        Member::new("a", "Alice"),
        Member::new("b", "Bob"),
        Member::new("a", "Alicia"),
    ];

    let net = compute_balances(&group, &[], &[]);

    assert_eq!(net.entries().len(), 2);
    assert_eq!(net.entries()[0].member_id, "a");
    assert_eq!(net.entries()[0].member_name, "Alicia");
}

#[test]
fn test_balance_sheet_is_deterministic() {
    let snapshot = LedgerSnapshot {
        members: members(&["a", "b", "c", "d"]),
        expense_rows: vec![
            split_row("e1", "a", "b", dec!(12.34)),
            split_row("e1", "a", "c", dec!(12.34)),
            split_row("e2", "d", "a", dec!(7.5)),
        ],
        settlements: vec![settlement_row("c", "a", dec!(2))],
    };

    let first = serde_json::to_string(&build_balance_sheet(&snapshot)).unwrap();
    let second = serde_json::to_string(&build_balance_sheet(&snapshot)).unwrap();

    assert_eq!(first, second);
}

fn ids() -> Vec<String> {
    (0..5).map(|i| format!("m{}", i)).collect()
}

proptest! {
    #[test]
    fn prop_balances_sum_to_zero(
        expenses in prop::collection::vec((0usize..5, 0usize..5, 0i64..100_000), 0..40),
        settlements in prop::collection::vec((0usize..5, 0usize..5, 1i64..50_000), 0..10),
    ) {
        let ids = ids();
        let group: Vec<Member> = ids.iter().map(|id| Member::new(id.clone(), id.clone())).collect();
        let rows: Vec<ExpenseRow> = expenses
            .iter()
            .enumerate()
            .map(|(n, (payer, member, cents))| {
                split_row(&format!("e{}", n), &ids[*payer], &ids[*member], Money::from_cents(*cents).amount())
            })
            .collect();
        let settlement_rows: Vec<_> = settlements
            .iter()
            .map(|(from, to, cents)| settlement_row(&ids[*from], &ids[*to], Money::from_cents(*cents).amount()))
            .collect();

        let net = compute_balances(&group, &rows, &settlement_rows);
        prop_assert_eq!(net.total(), Some(Money::ZERO));
    }

    #[test]
    fn prop_suggested_payments_settle_everyone(
        expenses in prop::collection::vec((0usize..5, 0usize..5, 0i64..100_000), 0..40),
    ) {
        let ids = ids();
        let group: Vec<Member> = ids.iter().map(|id| Member::new(id.clone(), id.clone())).collect();
        let rows: Vec<ExpenseRow> = expenses
            .iter()
            .enumerate()
            .map(|(n, (payer, member, cents))| {
                split_row(&format!("e{}", n), &ids[*payer], &ids[*member], Money::from_cents(*cents).amount())
            })
            .collect();

        let net = compute_balances(&group, &rows, &[]);
        let debts = simplify_debts(&net);

        let creditors = net.entries().iter().filter(|e| !e.amount.is_settled() && e.amount.is_positive()).count();
        let debtors = net.entries().iter().filter(|e| !e.amount.is_settled() && e.amount.is_negative()).count();
        prop_assert!(debts.len() <= (creditors + debtors).saturating_sub(1));

        // Paying every suggested debt as a settlement leaves nothing owed.
        let payments: Vec<_> = debts
            .iter()
            .map(|d| settlement_row(&d.from_member_id, &d.to_member_id, d.amount.amount()))
            .collect();
        // Balances of exactly one cent sit out, so what is left over is at
        // most one cent per member.
        let after = compute_balances(&group, &rows, &payments);
        let leftover = Money::from_cents(ids.len() as i64);
        for entry in after.entries() {
            prop_assert!(entry.amount.abs() <= leftover, "{} still at {}", entry.member_id, entry.amount);
        }
    }
}
