//! Разбор одной строки входного файла в проверенную [`Transaction`].
//!
//! Порядок проверок: число полей, сумма, счёт, имя, назначение.
//! Первая же ошибка возвращается с номером строки. Разбор чистый:
//! обрезка длинных полей не логируется здесь, а возвращается в [`ParsedRow`].

use crate::{
    account::{AccountCheck, AccountRules},
    amount::Amount,
    error::{Result, SepaError},
    model::{Field, Transaction, Truncation},
};
use regex::Regex;

/// Набор колонок входного CSV (заголовка нет).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnLayout {
    /// `amount,account,name,description`
    #[default]
    Plain,
    /// Выгрузка Xero: `amount,account,name,reference,description`; `reference` игнорируется.
    Xero,
}

impl ColumnLayout {
    pub fn columns(self) -> usize {
        match self {
            ColumnLayout::Plain => 4,
            ColumnLayout::Xero => 5,
        }
    }

    fn description_index(self) -> usize {
        match self {
            ColumnLayout::Plain => 3,
            ColumnLayout::Xero => 4,
        }
    }
}

/// Что делать с именем или назначением длиннее лимита схемы.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPolicy {
    #[default]
    Truncate,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowOptions {
    pub layout: ColumnLayout,
    pub account_check: AccountCheck,
    pub overlong: LengthPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub transaction: Transaction,
    pub truncations: Vec<Truncation>,
}

pub struct RowParser {
    options: RowOptions,
    amount: Regex,
    accounts: AccountRules,
}

impl RowParser {
    pub fn new(options: RowOptions) -> Result<Self> {
        let amount = Regex::new(r"^-?[0-9]+(\.[0-9]{1,2})?$")
            .map_err(|e| SepaError::Pattern(e.to_string()))?;
        Ok(Self {
            options,
            amount,
            accounts: AccountRules::new()?,
        })
    }

    /// `row` — номер строки с единицы, попадает во все ошибки.
    pub fn parse<S: AsRef<str>>(&self, row: usize, fields: &[S]) -> Result<ParsedRow> {
        let layout = self.options.layout;
        if fields.len() != layout.columns() {
            return Err(SepaError::MalformedRow {
                row,
                expected: layout.columns(),
                found: fields.len(),
            });
        }

        let amount = self.parse_amount(row, fields[0].as_ref().trim())?;
        let creditor_account = self.parse_account(row, fields[1].as_ref())?;

        let name = fields[2].as_ref().trim();
        if name.is_empty() {
            return Err(SepaError::EmptyName { row });
        }

        let mut truncations = Vec::new();
        let creditor_name = self.fit(row, Field::CreditorName, name, &mut truncations)?;
        let remittance_info = self.fit(
            row,
            Field::RemittanceInfo,
            fields[layout.description_index()].as_ref().trim(),
            &mut truncations,
        )?;

        Ok(ParsedRow {
            transaction: Transaction {
                amount,
                creditor_account,
                creditor_name,
                remittance_info,
            },
            truncations,
        })
    }

    fn parse_amount(&self, row: usize, raw: &str) -> Result<Amount> {
        let malformed = |reason| SepaError::MalformedAmount {
            row,
            value: raw.to_string(),
            reason,
        };

        if !self.amount.is_match(raw) {
            return Err(malformed("expected digits with at most two decimals"));
        }
        let amount = Amount::from_str_exact(raw).ok_or_else(|| malformed("out of range"))?;
        if !amount.is_positive() {
            return Err(SepaError::NonPositiveAmount {
                row,
                value: raw.to_string(),
            });
        }
        if amount > Amount::max_instructed() {
            return Err(malformed("exceeds 999999999.99"));
        }
        Ok(amount)
    }

    fn parse_account(&self, row: usize, raw: &str) -> Result<String> {
        let account = AccountRules::normalize(raw);
        if account.is_empty() || !self.accounts.is_valid(&account, self.options.account_check) {
            return Err(SepaError::MalformedAccount {
                row,
                value: raw.trim().to_string(),
            });
        }
        Ok(account)
    }

    fn fit(
        &self,
        row: usize,
        field: Field,
        value: &str,
        truncations: &mut Vec<Truncation>,
    ) -> Result<String> {
        let max = field.max_len();
        let len = value.chars().count();
        if len <= max {
            return Ok(value.to_string());
        }
        match self.options.overlong {
            LengthPolicy::Reject => Err(SepaError::FieldTooLong { row, field, len, max }),
            LengthPolicy::Truncate => {
                truncations.push(Truncation {
                    row,
                    field,
                    original_len: len,
                });
                Ok(value.chars().take(max).collect::<String>().trim_end().to_string())
            }
        }
    }
}
