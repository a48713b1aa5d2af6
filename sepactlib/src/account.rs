//! Структурная проверка IBAN и BIC. Контрольная сумма IBAN не проверяется.

use crate::error::{Result, SepaError};
use regex::Regex;

/// Насколько строго проверять счёт получателя.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountCheck {
    /// Полный IBAN: код страны, 2 цифры, затем 11..=30 букв/цифр (всего 15..=34).
    #[default]
    Iban,
    /// Только префикс IBAN, длина тела 1..=30 (тестовые и сокращённые счета).
    Relaxed,
}

pub struct AccountRules {
    iban: Regex,
    relaxed: Regex,
    bic: Regex,
}

impl AccountRules {
    pub fn new() -> Result<Self> {
        let compile = |p: &str| Regex::new(p).map_err(|e| SepaError::Pattern(e.to_string()));
        Ok(Self {
            iban: compile(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{11,30}$")?,
            relaxed: compile(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{1,30}$")?,
            bic: compile(r"^[A-Z]{6}[A-Z0-9]{2}([A-Z0-9]{3})?$")?,
        })
    }

    /// Убирает пробелы (IBAN часто пишут группами по 4) и приводит к верхнему регистру.
    pub fn normalize(raw: &str) -> String {
        raw.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Ожидает уже нормализованный счёт.
    pub fn is_valid(&self, account: &str, check: AccountCheck) -> bool {
        match check {
            AccountCheck::Iban => self.iban.is_match(account),
            AccountCheck::Relaxed => self.relaxed.is_match(account),
        }
    }

    pub fn is_valid_bic(&self, bic: &str) -> bool {
        self.bic.is_match(bic)
    }
}
