//! sepactlib — конвертация банковской CSV-выгрузки (Xero) в платёжный файл
//! SEPA Credit Transfer (pain.001.001.03)

pub mod account;
pub mod amount;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod model;
pub mod row;
pub mod stamp;
pub mod traits;

pub mod formats {
    pub mod csv;
    pub mod pain001;
}
