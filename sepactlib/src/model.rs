//! Доменные модели: строка платежа и плательщик.

use crate::amount::Amount;
use std::fmt;

/// Одна исходящая транзакция (строка входного CSV).
///
/// Создаётся только через [`RowParser::parse`](crate::row::RowParser::parse),
/// поэтому инварианты (сумма > 0, счёт и имя не пустые) всегда соблюдены.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub(crate) amount: Amount,
    pub(crate) creditor_account: String,
    pub(crate) creditor_name: String,
    pub(crate) remittance_info: String,
}

impl Transaction {
    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn creditor_account(&self) -> &str {
        &self.creditor_account
    }

    pub fn creditor_name(&self) -> &str {
        &self.creditor_name
    }

    /// Назначение платежа; может быть пустым.
    pub fn remittance_info(&self) -> &str {
        &self.remittance_info
    }
}

/// Текстовые поля с ограничением длины по схеме pain.001.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CreditorName,
    RemittanceInfo,
}

impl Field {
    /// Максимальная длина в символах (`Max70Text` / `Max140Text`).
    pub fn max_len(self) -> usize {
        match self {
            Field::CreditorName => 70,
            Field::RemittanceInfo => 140,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::CreditorName => "creditor name",
            Field::RemittanceInfo => "remittance info",
        })
    }
}

/// Отметка об обрезке поля до допустимой длины.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    pub row: usize,
    pub field: Field,
    pub original_len: usize,
}

/// Плательщик (инициатор пакета); берётся из конфигурации, не из CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debtor {
    pub name: String,
    pub iban: String,
    pub bic: Option<String>,
}

/// Результат чтения входного файла: транзакции в исходном порядке и все обрезки.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowBatch {
    pub transactions: Vec<Transaction>,
    pub truncations: Vec<Truncation>,
}
