//! Полный прогон CSV -> pain.001: конфигурация, строки, документ, XML.
//!
//! XML собирается в памяти и отдаётся в `w` только после успеха всех шагов,
//! так что при ошибке на выходе не остаётся частичного документа.

use crate::{
    amount::Amount,
    config::BatchConfig,
    document::DocumentBuilder,
    error::Result,
    formats::{csv::Csv, pain001::Pain001},
    model::Truncation,
    row::RowParser,
    stamp::StampSource,
    traits::{ReadRows, WriteDocument},
};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub message_id: String,
    pub number_of_transactions: usize,
    pub control_sum: Amount,
    pub truncations: Vec<Truncation>,
}

pub fn convert<R: BufRead, W: Write>(
    r: R,
    mut w: W,
    parser: &RowParser,
    config: BatchConfig,
    stamp: &dyn StampSource,
) -> Result<ConversionReport> {
    let config = config.validate()?;
    let batch = Csv::read(r, parser)?;
    let doc = DocumentBuilder::new(&config, stamp).build(batch.transactions)?;

    let mut buf = Vec::new();
    Pain001::write(&mut buf, &doc)?;
    w.write_all(&buf)?;
    w.flush()?;

    Ok(ConversionReport {
        message_id: doc.message_id().to_string(),
        number_of_transactions: doc.number_of_transactions(),
        control_sum: doc.control_sum(),
        truncations: batch.truncations,
    })
}
