use sepactlib::{
    config::BatchConfig,
    convert::convert,
    model::Debtor,
    row::{RowOptions, RowParser},
    stamp::SystemStamp,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: CSV (stdin) -> pain.001 (stdout) с демонстрационным плательщиком
    let parser = RowParser::new(RowOptions::default())?;
    let config = BatchConfig::new(Debtor {
        name: "Demo B.V.".into(),
        iban: "NL91ABNA0417164300".into(),
        bic: None,
    });
    let report = convert(
        std::io::BufReader::new(std::io::stdin()),
        std::io::stdout(),
        &parser,
        config,
        &SystemStamp,
    )?;
    eprintln!("{} transaction(s), {} EUR", report.number_of_transactions, report.control_sum);
    Ok(())
}
