//! Сборка документа pain.001 из готовых транзакций.
//!
//! Builder — однопроходная свёртка: считает `NbOfTxs` и `CtrlSum`,
//! назначает идентификаторы и прикрепляет плательщика из конфигурации.
//! Готовый документ неизменяем, поэтому инварианты
//! `NbOfTxs == len(transactions)` и `CtrlSum == Σ amount` держатся всегда.

use crate::{
    amount::Amount,
    config::{BatchConfig, EmptyBatchPolicy},
    error::{Result, SepaError},
    model::{Debtor, Transaction},
    stamp::StampSource,
};
use chrono::{NaiveDate, NaiveDateTime};
use log::info;

const PREFIX_LEN: usize = 5;
/// `Max35Text` для `MsgId`, `PmtInfId` и `EndToEndId`.
pub const MAX_ID_LEN: usize = 35;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInstructionDocument {
    message_id: String,
    creation_date_time: NaiveDateTime,
    number_of_transactions: usize,
    control_sum: Amount,
    initiating_party: String,
    payment_info_id: String,
    requested_execution_date: NaiveDate,
    debtor: Debtor,
    transactions: Vec<Transaction>,
}

impl PaymentInstructionDocument {
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn creation_date_time(&self) -> NaiveDateTime {
        self.creation_date_time
    }

    pub fn number_of_transactions(&self) -> usize {
        self.number_of_transactions
    }

    pub fn control_sum(&self) -> Amount {
        self.control_sum
    }

    pub fn initiating_party(&self) -> &str {
        &self.initiating_party
    }

    /// `MsgId-1`: в документе ровно один блок `PmtInf`.
    pub fn payment_info_id(&self) -> &str {
        &self.payment_info_id
    }

    pub fn requested_execution_date(&self) -> NaiveDate {
        self.requested_execution_date
    }

    pub fn debtor(&self) -> &Debtor {
        &self.debtor
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// `EndToEndId` транзакции с индексом `index` (с нуля): `PmtInfId-0000`, `PmtInfId-0001`, ...
    ///
    /// Начиная с индекса 10000 такая форма длиннее 35 символов. Тогда основой
    /// служит `MsgId` без `-1`, при необходимости укороченный с конца под длину номера.
    pub fn end_to_end_id(&self, index: usize) -> String {
        let id = format!("{}-{:04}", self.payment_info_id, index);
        if id.chars().count() <= MAX_ID_LEN {
            return id;
        }
        let number = index.to_string();
        let keep = MAX_ID_LEN.saturating_sub(number.len() + 1);
        let base: String = self.message_id.chars().take(keep).collect();
        format!("{base}-{number}")
    }
}

pub struct DocumentBuilder<'a> {
    config: &'a BatchConfig,
    stamp: &'a dyn StampSource,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(config: &'a BatchConfig, stamp: &'a dyn StampSource) -> Self {
        Self { config, stamp }
    }

    pub fn build(&self, transactions: Vec<Transaction>) -> Result<PaymentInstructionDocument> {
        if transactions.is_empty() && self.config.empty_batch == EmptyBatchPolicy::Reject {
            return Err(SepaError::EmptyBatch);
        }

        let now = self.stamp.now();
        let message_id = message_id(&self.config.id_prefix, now, &self.stamp.suffix());
        let payment_info_id = format!("{message_id}-1");
        let control_sum: Amount = transactions.iter().map(Transaction::amount).sum();

        let doc = PaymentInstructionDocument {
            creation_date_time: now,
            number_of_transactions: transactions.len(),
            control_sum,
            initiating_party: self.config.initiating_party().to_string(),
            payment_info_id,
            requested_execution_date: self.config.execution_date.unwrap_or_else(|| now.date()),
            debtor: self.config.debtor.clone(),
            transactions,
            message_id,
        };
        info!(
            "built {}: {} transaction(s), control sum {}",
            doc.message_id, doc.number_of_transactions, doc.control_sum
        );
        Ok(doc)
    }
}

/// Префикс ровно из 5 символов: длинный обрезается, короткий дополняется нулями слева.
pub fn normalize_prefix(prefix: &str) -> String {
    let len = prefix.chars().count();
    if len >= PREFIX_LEN {
        prefix.chars().take(PREFIX_LEN).collect()
    } else {
        format!("{}{}", "0".repeat(PREFIX_LEN - len), prefix)
    }
}

/// `PPPPP-YYYYMMDDHHMMSS-suffix`
pub fn message_id(prefix: &str, at: NaiveDateTime, suffix: &str) -> String {
    format!(
        "{}-{}-{}",
        normalize_prefix(prefix),
        at.format("%Y%m%d%H%M%S"),
        suffix
    )
}
