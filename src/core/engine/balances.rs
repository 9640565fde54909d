use crate::core::models::{ExpenseRow, Member, MemberBalance, SettlementRow, SkippedReferences};
use crate::core::money::Money;
use log::{debug, warn};
use std::collections::HashMap;

struct Transfer {
    credited: bool,
    debited: bool,
}

struct Overflow;

/// Unrounded net position of one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetBalance {
    pub member_id: String,
    pub member_name: String,
    pub amount: Money,
}

/// Net positions for every member of a group, in member-list order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetBalances {
    entries: Vec<NetBalance>,
    index: HashMap<String, usize>,
    skipped: SkippedReferences,
}

impl NetBalances {
    fn new(members: &[Member]) -> Self {
        let mut balances = NetBalances::default();
        for member in members {
            match balances.index.get(&member.id) {
                Some(&pos) => balances.entries[pos].member_name = member.name.clone(),
                None => {
                    balances.index.insert(member.id.clone(), balances.entries.len());
                    balances.entries.push(NetBalance {
                        member_id: member.id.clone(),
                        member_name: member.name.clone(),
                        amount: Money::ZERO,
                    });
                }
            }
        }
        balances
    }

    /// Moves `amount` from `debit_id` to `credit_id`.
    ///
    /// Either side may be unknown, in which case only the known side changes.
    /// Nothing changes when a known side would leave the decimal range.
    fn transfer(&mut self, credit_id: &str, debit_id: &str, amount: Money) -> Result<Transfer, Overflow> {
        let credit_pos = self.index.get(credit_id).copied();
        let debit_pos = self.index.get(debit_id).copied();
        let applied = Transfer {
            credited: credit_pos.is_some(),
            debited: debit_pos.is_some(),
        };

        if credit_pos.is_some() && credit_pos == debit_pos {
            return Ok(applied);
        }

        let credited = match credit_pos {
            Some(pos) => Some((pos, self.entries[pos].amount.checked_add(amount).ok_or(Overflow)?)),
            None => None,
        };
        let debited = match debit_pos {
            Some(pos) => Some((pos, self.entries[pos].amount.checked_sub(amount).ok_or(Overflow)?)),
            None => None,
        };

        for (pos, value) in credited.into_iter().chain(debited) {
            self.entries[pos].amount = value;
        }
        Ok(applied)
    }

    pub fn entries(&self) -> &[NetBalance] {
        &self.entries
    }

    pub fn get(&self, member_id: &str) -> Option<Money> {
        self.index.get(member_id).map(|&pos| self.entries[pos].amount)
    }

    /// Exact sum of all positions; zero when every reference was known.
    /// `None` if the running sum leaves the decimal range.
    pub fn total(&self) -> Option<Money> {
        self.entries
            .iter()
            .try_fold(Money::ZERO, |acc, e| acc.checked_add(e.amount))
    }

    pub fn skipped(&self) -> SkippedReferences {
        self.skipped
    }

    /// Balances as reported to callers, rounded to cents.
    pub fn rounded(&self) -> Vec<MemberBalance> {
        self.entries
            .iter()
            .map(|e| MemberBalance {
                member_id: e.member_id.clone(),
                member_name: e.member_name.clone(),
                balance: e.amount.round_to_cents(),
            })
            .collect()
    }
}

/// Folds expense rows and settlements into one net balance per member.
///
/// The payer is credited with each split's `amount_owed` rather than the
/// expense total, so a payer who is also in the split nets out. References to
/// ids outside `members` contribute nothing and are counted in
/// [`NetBalances::skipped`].
pub fn compute_balances(
    members: &[Member],
    expense_rows: &[ExpenseRow],
    settlements: &[SettlementRow],
) -> NetBalances {
    let mut balances = NetBalances::new(members);
    let mut skipped = SkippedReferences::default();

    for row in expense_rows {
        let Some(split) = &row.split else {
            debug!("Expense {} has no splits; nothing to apply", row.expense_id);
            skipped.unsplit_expense_rows += 1;
            continue;
        };

        match balances.transfer(&row.paid_by_member_id, &split.member_id, split.amount_owed) {
            Ok(applied) => {
                if !applied.credited {
                    warn!(
                        "Skipping unknown payer {} on expense {}",
                        row.paid_by_member_id, row.expense_id
                    );
                    skipped.unknown_payers += 1;
                }
                if !applied.debited {
                    warn!(
                        "Skipping unknown split member {} on expense {}",
                        split.member_id, row.expense_id
                    );
                    skipped.unknown_split_members += 1;
                }
            }
            Err(Overflow) => {
                warn!("Skipping expense {} row: balance out of range", row.expense_id);
                skipped.overflowed_rows += 1;
            }
        }
    }

    for settlement in settlements {
        match balances.transfer(&settlement.from_member_id, &settlement.to_member_id, settlement.amount) {
            Ok(applied) => {
                if !applied.credited {
                    warn!("Skipping unknown settlement payer {}", settlement.from_member_id);
                    skipped.unknown_settlement_members += 1;
                }
                if !applied.debited {
                    warn!("Skipping unknown settlement payee {}", settlement.to_member_id);
                    skipped.unknown_settlement_members += 1;
                }
            }
            Err(Overflow) => {
                warn!(
                    "Skipping settlement {} -> {}: balance out of range",
                    settlement.from_member_id, settlement.to_member_id
                );
                skipped.overflowed_rows += 1;
            }
        }
    }

    balances.skipped = skipped;
    debug!(
        "Computed {} balances ({} skipped references)",
        balances.entries.len(),
        skipped.total()
    );
    balances
}
