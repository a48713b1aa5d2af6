//! CSV без заголовка, колонки фиксированы (см. [`ColumnLayout`](crate::row::ColumnLayout)):
//! amount,account,name[,reference],description

use crate::{
    error::Result,
    model::RowBatch,
    row::RowParser,
    traits::ReadRows,
};
use csv::{Position, ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use std::io::{BufRead, Read};

pub struct Csv;

impl ReadRows for Csv {
    fn read<R: BufRead>(mut r: R, parser: &RowParser) -> Result<RowBatch> {
        // вход целиком в памяти: по нему восстанавливается номер строки файла
        let mut data = Vec::new();
        r.read_to_end(&mut data)?;

        // flexible: число полей проверяет RowParser, чтобы ошибка была MalformedRow с номером строки
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(data.as_slice());

        let mut batch = RowBatch::default();
        let mut record = StringRecord::new();
        let mut count = 0;

        while rdr.read_record(&mut record)? {
            count += 1;
            let row = record
                .position()
                .map_or(count, |pos| start_line(&data, pos));
            let fields: Vec<&str> = record.iter().collect();
            let parsed = parser.parse(row, &fields)?;

            for t in &parsed.truncations {
                warn!(
                    "row {}: {} truncated from {} to {} characters",
                    t.row,
                    t.field,
                    t.original_len,
                    t.field.max_len()
                );
            }
            debug!(
                "row {row}: {} -> {} ({})",
                parsed.transaction.amount(),
                parsed.transaction.creditor_account(),
                parsed.transaction.creditor_name()
            );

            batch.transactions.push(parsed.transaction);
            batch.truncations.extend(parsed.truncations);
        }
        Ok(batch)
    }
}

/// Строка файла, с которой начинается запись.
///
/// `csv` ставит позицию записи до пропуска пустых строк, поэтому они
/// досчитываются от этой позиции.
fn start_line(data: &[u8], pos: &Position) -> usize {
    let rest = usize::try_from(pos.byte())
        .ok()
        .and_then(|at| data.get(at..))
        .unwrap_or_default();
    let skipped = rest
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .filter(|&&b| b == b'\n')
        .count();
    pos.line() as usize + skipped
}
