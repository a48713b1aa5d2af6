//! Трэйты чтения строк и записи документа на основе std::io::{BufRead, Write}.

use crate::{document::PaymentInstructionDocument, error::Result, model::RowBatch, row::RowParser};
use std::io::{BufRead, Write};

pub trait ReadRows {
    /// Останавливается на первой ошибочной строке.
    fn read<R: BufRead>(r: R, parser: &RowParser) -> Result<RowBatch>;
}

pub trait WriteDocument {
    fn write<W: Write>(w: W, doc: &PaymentInstructionDocument) -> Result<()>;
}
