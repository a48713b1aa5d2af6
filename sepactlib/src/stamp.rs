//! Источник времени и уникального суффикса для идентификаторов документа.
//!
//! Вынесен в трейт, чтобы тесты подставляли фиксированные значения
//! вместо системных часов.

use chrono::{Local, NaiveDateTime, Timelike};
use uuid::Uuid;

/// Длина суффикса `MsgId`: 5 + 1 + 14 + 1 + 7 = 28 символов, в пределах `Max35Text`.
pub const SUFFIX_LEN: usize = 7;

pub trait StampSource {
    /// Момент создания документа, с точностью до секунды.
    fn now(&self) -> NaiveDateTime;

    /// `SUFFIX_LEN` символов из `[a-z0-9]`.
    fn suffix(&self) -> String;
}

/// Системные часы и случайный суффикс из UUID v4.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemStamp;

impl StampSource for SystemStamp {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }

    fn suffix(&self) -> String {
        // simple-форма: 32 hex-цифры в нижнем регистре
        Uuid::new_v4().simple().to_string()[..SUFFIX_LEN].to_string()
    }
}

/// Фиксированные значения для тестов и воспроизводимых прогонов.
#[derive(Debug, Clone)]
pub struct FixedStamp {
    pub at: NaiveDateTime,
    pub suffix: String,
}

impl StampSource for FixedStamp {
    fn now(&self) -> NaiveDateTime {
        self.at
    }

    fn suffix(&self) -> String {
        self.suffix.clone()
    }
}
