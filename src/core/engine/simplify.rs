use super::balances::NetBalances;
use crate::core::models::SimplifiedDebt;
use crate::core::money::Money;
use log::debug;

struct Party<'a> {
    member_id: &'a str,
    name: &'a str,
    remaining: Money,
}

/// Greedy creditor/debtor matching.
///
/// Only members owed or owing more than a cent take part. Creditors and
/// debtors are each sorted by amount, largest first, and the
/// largest of each are paired until one side runs out. Sorting is stable, so
/// equal amounts keep member-list order. This keeps the number of payments
/// low but is not guaranteed to be the minimum.
pub fn simplify_debts(balances: &NetBalances) -> Vec<SimplifiedDebt> {
    let mut creditors: Vec<Party> = Vec::new();
    let mut debtors: Vec<Party> = Vec::new();

    for entry in balances.entries() {
        if entry.amount.abs() <= Money::CENT {
            continue;
        }
        let party = Party {
            member_id: &entry.member_id,
            name: &entry.member_name,
            remaining: entry.amount.abs(),
        };
        if entry.amount.is_positive() {
            creditors.push(party);
        } else {
            debtors.push(party);
        }
    }

    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut debts = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < creditors.len() && j < debtors.len() {
        let creditor = &creditors[i];
        let debtor = &debtors[j];
        let settle_amount = creditor.remaining.min(debtor.remaining);

        debts.push(SimplifiedDebt {
            from_member_id: debtor.member_id.to_string(),
            from_member_name: debtor.name.to_string(),
            to_member_id: creditor.member_id.to_string(),
            to_member_name: creditor.name.to_string(),
            amount: settle_amount.round_to_cents(),
        });

        creditors[i].remaining -= settle_amount;
        debtors[j].remaining -= settle_amount;

        if creditors[i].remaining.is_settled() {
            i += 1;
        }
        if debtors[j].remaining.is_settled() {
            j += 1;
        }
    }

    debug!("Simplified debts into {} payments", debts.len());
    debts
}
