// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::collections::BTreeMap;

use crate::records::{fields, Record};

/// Business summary over a batch of transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub total_transactions: usize,
    pub total_amount: f64,
    pub avg_amount: f64,
    pub currency_totals: BTreeMap<String, f64>,
    pub merchant_counts: BTreeMap<String, usize>,
    pub max_transaction: f64,
    pub min_transaction: f64,
}

/// Sum amounts overall and by currency, count by merchant. `None` for an
/// empty batch.
///
/// Missing `currency` and `merchant` group under `"unknown"`; a missing
/// `amount` counts as `0`.
pub fn aggregate_transactions(transactions: &[Record]) -> Option<TransactionSummary> {
    if transactions.is_empty() {
        return None;
    }

    let mut total_amount = 0.0;
    let mut max_transaction = f64::NEG_INFINITY;
    let mut min_transaction = f64::INFINITY;
    let mut currency_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut merchant_counts: BTreeMap<String, usize> = BTreeMap::new();

    for transaction in transactions {
        let amount = transaction.number_or(fields::AMOUNT, 0.0);
        total_amount += amount;
        max_transaction = max_transaction.max(amount);
        min_transaction = min_transaction.min(amount);

        let currency = transaction.key_or(fields::CURRENCY, fields::UNKNOWN);
        *currency_totals.entry(currency).or_insert(0.0) += amount;

        let merchant = transaction.key_or(fields::MERCHANT, fields::UNKNOWN);
        *merchant_counts.entry(merchant).or_insert(0) += 1;
    }

    Some(TransactionSummary {
        total_transactions: transactions.len(),
        total_amount,
        avg_amount: total_amount / transactions.len() as f64,
        currency_totals,
        merchant_counts,
        max_transaction,
        min_transaction,
    })
}
