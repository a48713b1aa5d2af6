//! Параметры пакета, которые не выводятся из CSV: плательщик, префикс
//! идентификатора, дата исполнения, политика пустого пакета.

use crate::{
    account::{AccountCheck, AccountRules},
    error::{Result, SepaError},
    model::Debtor,
};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyBatchPolicy {
    /// Пустой пакет допустим: `NbOfTxs = 0`, `CtrlSum = 0.00`.
    #[default]
    Allow,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub id_prefix: String,
    /// Если пусто, берётся имя плательщика.
    pub initiating_party: String,
    /// Если не задана, используется дата создания документа.
    pub execution_date: Option<NaiveDate>,
    pub debtor: Debtor,
    pub empty_batch: EmptyBatchPolicy,
}

impl BatchConfig {
    pub fn new(debtor: Debtor) -> Self {
        Self {
            id_prefix: String::new(),
            initiating_party: String::new(),
            execution_date: None,
            debtor,
            empty_batch: EmptyBatchPolicy::default(),
        }
    }

    /// Проверяет и нормализует реквизиты плательщика (IBAN/BIC без пробелов, верхний регистр).
    pub fn validate(mut self) -> Result<Self> {
        let rules = AccountRules::new()?;

        self.debtor.name = self.debtor.name.trim().to_string();
        if self.debtor.name.is_empty() {
            return Err(SepaError::InvalidConfig("debtor name is empty".into()));
        }
        check_len("debtor name", &self.debtor.name)?;

        self.debtor.iban = AccountRules::normalize(&self.debtor.iban);
        if !rules.is_valid(&self.debtor.iban, AccountCheck::Iban) {
            return Err(SepaError::InvalidConfig(format!(
                "debtor IBAN '{}' is not IBAN-shaped",
                self.debtor.iban
            )));
        }

        self.debtor.bic = match self.debtor.bic.take() {
            Some(b) if !b.trim().is_empty() => {
                let bic = AccountRules::normalize(&b);
                if !rules.is_valid_bic(&bic) {
                    return Err(SepaError::InvalidConfig(format!("debtor BIC '{bic}' is malformed")));
                }
                Some(bic)
            }
            _ => None,
        };

        self.initiating_party = self.initiating_party.trim().to_string();
        check_len("initiating party", &self.initiating_party)?;

        if self.id_prefix.chars().any(|c| !c.is_ascii_alphanumeric()) {
            return Err(SepaError::InvalidConfig(format!(
                "id prefix '{}' must be alphanumeric",
                self.id_prefix
            )));
        }
        Ok(self)
    }

    pub fn initiating_party(&self) -> &str {
        if self.initiating_party.is_empty() {
            &self.debtor.name
        } else {
            &self.initiating_party
        }
    }
}

// Max70Text
const NAME_MAX: usize = 70;

fn check_len(what: &str, value: &str) -> Result<()> {
    if value.chars().count() > NAME_MAX {
        return Err(SepaError::InvalidConfig(format!("{what} exceeds {NAME_MAX} characters")));
    }
    Ok(())
}
