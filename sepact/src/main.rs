use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use log::info;
use sepactlib::{
    account::AccountCheck,
    config::{BatchConfig, EmptyBatchPolicy},
    convert::convert,
    error::Result,
    model::Debtor,
    row::{ColumnLayout, LengthPolicy, RowOptions, RowParser},
    stamp::SystemStamp,
};
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Layout {
    /// amount,account,name,description
    Plain,
    /// amount,account,name,reference,description (выгрузка Xero)
    Xero,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Overlong {
    Truncate,
    Reject,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Accounts {
    Iban,
    Relaxed,
}

#[derive(Parser, Debug)]
#[command(name = "sepact", version, about = "CSV-выгрузка банка -> SEPA Credit Transfer (pain.001.001.03)")]
struct Cli {
    /// Входной CSV без заголовка
    input: PathBuf,

    /// Выходной XML ("-" — stdout)
    output: String,

    /// Префикс MsgId (до 5 символов)
    #[arg(long = "id-prefix", env = "SEPACT_ID_PREFIX", default_value = "")]
    id_prefix: String,

    /// Имя инициатора (по умолчанию имя плательщика)
    #[arg(long = "initiating-party", env = "SEPACT_INITIATING_PARTY", default_value = "")]
    initiating_party: String,

    /// Дата исполнения yyyy-mm-dd (по умолчанию сегодня)
    #[arg(long = "execution-date", env = "SEPACT_EXECUTION_DATE")]
    execution_date: Option<NaiveDate>,

    /// Имя плательщика
    #[arg(long = "debtor-name", env = "SEPACT_DEBTOR_NAME")]
    debtor_name: String,

    /// IBAN плательщика
    #[arg(long = "debtor-iban", env = "SEPACT_DEBTOR_IBAN")]
    debtor_iban: String,

    /// BIC банка плательщика
    #[arg(long = "debtor-bic", env = "SEPACT_DEBTOR_BIC")]
    debtor_bic: Option<String>,

    /// Набор колонок входа
    #[arg(long, value_enum, default_value_t = Layout::Plain)]
    layout: Layout,

    /// Что делать со слишком длинными именем/назначением
    #[arg(long, value_enum, default_value_t = Overlong::Truncate)]
    overlong: Overlong,

    /// Проверка счёта получателя
    #[arg(long, value_enum, default_value_t = Accounts::Iban)]
    accounts: Accounts,

    /// Считать пустой входной файл ошибкой
    #[arg(long = "reject-empty")]
    reject_empty: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let parser = RowParser::new(RowOptions {
        layout: match cli.layout {
            Layout::Plain => ColumnLayout::Plain,
            Layout::Xero => ColumnLayout::Xero,
        },
        account_check: match cli.accounts {
            Accounts::Iban => AccountCheck::Iban,
            Accounts::Relaxed => AccountCheck::Relaxed,
        },
        overlong: match cli.overlong {
            Overlong::Truncate => LengthPolicy::Truncate,
            Overlong::Reject => LengthPolicy::Reject,
        },
    })?;

    let config = BatchConfig {
        id_prefix: cli.id_prefix,
        initiating_party: cli.initiating_party,
        execution_date: cli.execution_date,
        debtor: Debtor {
            name: cli.debtor_name,
            iban: cli.debtor_iban,
            bic: cli.debtor_bic,
        },
        empty_batch: if cli.reject_empty {
            EmptyBatchPolicy::Reject
        } else {
            EmptyBatchPolicy::Allow
        },
    };

    let input = BufReader::new(File::open(&cli.input)?);

    // файл создаётся только после успешной конвертации
    let mut xml = Vec::new();
    let report = convert(input, &mut xml, &parser, config, &SystemStamp)?;

    if cli.output == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&xml)?;
        stdout.flush()?;
    } else {
        fs::write(&cli.output, &xml)?;
    }

    info!(
        "{}: {} transaction(s), control sum {} EUR, {} field(s) truncated",
        report.message_id,
        report.number_of_transactions,
        report.control_sum,
        report.truncations.len()
    );
    Ok(())
}
