use chrono::NaiveDate;
use quick_xml::{events::Event, Reader};
use sepactlib::{
    config::BatchConfig,
    document::{DocumentBuilder, PaymentInstructionDocument},
    formats::pain001::{Pain001, NAMESPACE},
    model::Debtor,
    row::{RowOptions, RowParser},
    stamp::FixedStamp,
    traits::WriteDocument,
};

const GRP: &str = "Document/CstmrCdtTrfInitn/GrpHdr";
const PMT: &str = "Document/CstmrCdtTrfInitn/PmtInf";

fn build(rows: &[[&str; 4]], bic: Option<&str>) -> PaymentInstructionDocument {
    let p = RowParser::new(RowOptions::default()).unwrap();
    let txs = rows
        .iter()
        .enumerate()
        .map(|(i, r)| p.parse(i + 1, r).unwrap().transaction)
        .collect();
    let mut cfg = BatchConfig::new(Debtor {
        name: "Acme B.V.".into(),
        iban: "NL91ABNA0417164300".into(),
        bic: bic.map(String::from),
    });
    cfg.id_prefix = "ACMEX".into();
    cfg.execution_date = NaiveDate::from_ymd_opt(2024, 3, 4);
    let stamp = FixedStamp {
        at: NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap(),
        suffix: "abc1234".into(),
    };
    DocumentBuilder::new(&cfg, &stamp).build(txs).unwrap()
}

fn write(doc: &PaymentInstructionDocument) -> String {
    let mut out = Vec::new();
    Pain001::write(&mut out, doc).expect("write pain.001");
    String::from_utf8(out).unwrap()
}

/// Плоский список (путь, текст) всех элементов в порядке документа.
fn elements(xml: &str) -> Vec<(String, String)> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<String> = Vec::new();
    let mut out: Vec<(String, String)> = Vec::new();
    loop {
        match reader.read_event().expect("well-formed xml") {
            Event::Start(e) => {
                stack.push(String::from_utf8(e.local_name().as_ref().to_vec()).unwrap());
                out.push((stack.join("/"), String::new()));
            }
            Event::Text(t) => {
                let text = t.unescape().unwrap().trim().to_string();
                if !text.is_empty() {
                    if let Some(last) = out.last_mut() {
                        last.1 = text;
                    }
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    out
}

fn value<'a>(els: &'a [(String, String)], path: &str) -> Vec<&'a str> {
    els.iter()
        .filter(|(p, _)| p == path)
        .map(|(_, v)| v.as_str())
        .collect()
}

/// Имена прямых потомков `parent` в порядке появления.
fn children(els: &[(String, String)], parent: &str) -> Vec<String> {
    let prefix = format!("{parent}/");
    let mut seen = Vec::new();
    for (p, _) in els {
        if let Some(rest) = p.strip_prefix(&prefix) {
            if !rest.contains('/') {
                seen.push(rest.to_string());
            }
        }
    }
    seen
}

#[test]
fn single_row_document() {
    let doc = build(
        &[["300.00", "NL23RABO0123456789", "A. de Vries", "Wages1 Feb - 28 Feb"]],
        Some("ABNANL2A"),
    );
    let xml = write(&doc);
    let els = elements(&xml);

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains(&format!("xmlns=\"{NAMESPACE}\"")));

    assert_eq!(value(&els, &format!("{GRP}/MsgId")), ["ACMEX-20240301090507-abc1234"]);
    assert_eq!(value(&els, &format!("{GRP}/CreDtTm")), ["2024-03-01T09:05:07"]);
    assert_eq!(value(&els, &format!("{GRP}/NbOfTxs")), ["1"]);
    assert_eq!(value(&els, &format!("{GRP}/CtrlSum")), ["300.00"]);
    assert_eq!(value(&els, &format!("{GRP}/InitgPty/Nm")), ["Acme B.V."]);

    assert_eq!(value(&els, &format!("{PMT}/PmtInfId")), ["ACMEX-20240301090507-abc1234-1"]);
    assert_eq!(value(&els, &format!("{PMT}/ReqdExctnDt")), ["2024-03-04"]);
    assert_eq!(value(&els, &format!("{PMT}/DbtrAcct/Id/IBAN")), ["NL91ABNA0417164300"]);
    assert_eq!(value(&els, &format!("{PMT}/DbtrAgt/FinInstnId/BIC")), ["ABNANL2A"]);

    let tx = format!("{PMT}/CdtTrfTxInf");
    assert_eq!(
        value(&els, &format!("{tx}/PmtId/EndToEndId")),
        ["ACMEX-20240301090507-abc1234-1-0000"]
    );
    assert_eq!(value(&els, &format!("{tx}/Amt/InstdAmt")), ["300.00"]);
    assert_eq!(value(&els, &format!("{tx}/Cdtr/Nm")), ["A. de Vries"]);
    assert_eq!(value(&els, &format!("{tx}/CdtrAcct/Id/IBAN")), ["NL23RABO0123456789"]);
    assert_eq!(value(&els, &format!("{tx}/RmtInf/Ustrd")), ["Wages1 Feb - 28 Feb"]);
    assert!(xml.contains("<InstdAmt Ccy=\"EUR\">300.00</InstdAmt>"));
}

#[test]
fn elements_follow_schema_order() {
    let doc = build(&[["1.00", "NL23RABO0123456789", "A", "x"]], Some("ABNANL2A"));
    let els = elements(&write(&doc));

    assert_eq!(children(&els, "Document"), ["CstmrCdtTrfInitn"]);
    assert_eq!(children(&els, "Document/CstmrCdtTrfInitn"), ["GrpHdr", "PmtInf"]);
    assert_eq!(children(&els, GRP), ["MsgId", "CreDtTm", "NbOfTxs", "CtrlSum", "InitgPty"]);
    assert_eq!(
        children(&els, PMT),
        [
            "PmtInfId", "PmtMtd", "BtchBookg", "NbOfTxs", "CtrlSum", "PmtTpInf", "ReqdExctnDt",
            "Dbtr", "DbtrAcct", "DbtrAgt", "ChrgBr", "CdtTrfTxInf",
        ]
    );
    assert_eq!(
        children(&els, &format!("{PMT}/CdtTrfTxInf")),
        ["PmtId", "Amt", "Cdtr", "CdtrAcct", "RmtInf"]
    );
    assert_eq!(value(&els, &format!("{PMT}/PmtMtd")), ["TRF"]);
    assert_eq!(value(&els, &format!("{PMT}/PmtTpInf/SvcLvl/Cd")), ["SEPA"]);
    assert_eq!(value(&els, &format!("{PMT}/ChrgBr")), ["SLEV"]);
}

#[test]
fn transactions_keep_input_order() {
    let doc = build(
        &[
            ["100.00", "NL23RABO0123456789", "First", "a"],
            ["50.50", "DE89370400440532013000", "Second", "b"],
            ["0.01", "NL23RABO0123456789", "Third", "c"],
        ],
        None,
    );
    let els = elements(&write(&doc));
    let tx = format!("{PMT}/CdtTrfTxInf");

    assert_eq!(value(&els, &format!("{tx}/Cdtr/Nm")), ["First", "Second", "Third"]);
    assert_eq!(value(&els, &format!("{tx}/Amt/InstdAmt")), ["100.00", "50.50", "0.01"]);
    let ids = value(&els, &format!("{tx}/PmtId/EndToEndId"));
    assert!(ids[0].ends_with("-1-0000"));
    assert!(ids[2].ends_with("-1-0002"));
    assert_eq!(value(&els, &format!("{GRP}/CtrlSum")), ["150.51"]);
    assert_eq!(value(&els, &format!("{PMT}/CtrlSum")), ["150.51"]);
    assert_eq!(value(&els, &format!("{PMT}/NbOfTxs")), ["3"]);
}

#[test]
fn missing_bic_writes_notprovided() {
    let doc = build(&[["1.00", "NL23RABO0123456789", "A", "x"]], None);
    let els = elements(&write(&doc));
    assert!(value(&els, &format!("{PMT}/DbtrAgt/FinInstnId/BIC")).is_empty());
    assert_eq!(
        value(&els, &format!("{PMT}/DbtrAgt/FinInstnId/Othr/Id")),
        ["NOTPROVIDED"]
    );
}

#[test]
fn empty_description_omits_remittance() {
    let doc = build(&[["1.00", "NL23RABO0123456789", "A", ""]], None);
    let els = elements(&write(&doc));
    assert_eq!(
        children(&els, &format!("{PMT}/CdtTrfTxInf")),
        ["PmtId", "Amt", "Cdtr", "CdtrAcct"]
    );
}

#[test]
fn special_characters_are_escaped() {
    let doc = build(&[["1.00", "NL23RABO0123456789", "Smith & <Sons>", "\"Q1\" 'fee'"]], None);
    let xml = write(&doc);
    assert!(xml.contains("Smith &amp; &lt;Sons&gt;"));
    let els = elements(&xml);
    let tx = format!("{PMT}/CdtTrfTxInf");
    assert_eq!(value(&els, &format!("{tx}/Cdtr/Nm")), ["Smith & <Sons>"]);
    assert_eq!(value(&els, &format!("{tx}/RmtInf/Ustrd")), ["\"Q1\" 'fee'"]);
}

#[test]
fn empty_batch_writes_header_without_transactions() {
    let doc = build(&[], None);
    let els = elements(&write(&doc));
    assert_eq!(value(&els, &format!("{GRP}/NbOfTxs")), ["0"]);
    assert_eq!(value(&els, &format!("{GRP}/CtrlSum")), ["0.00"]);
    assert!(!children(&els, PMT).contains(&"CdtTrfTxInf".to_string()));
}
