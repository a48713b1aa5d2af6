//! SEPA Credit Transfer Initiation, pain.001.001.03.
//!
//! Порядок элементов фиксирован схемой: банк валидирует файл по XSD,
//! поэтому каждый блок пишется отдельной функцией строго в порядке sequence.

use crate::{
    document::PaymentInstructionDocument,
    error::{Result, SepaError},
    model::Transaction,
    traits::WriteDocument,
};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::io::Write;

pub const NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:pain.001.001.03";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const CURRENCY: &str = "EUR";

pub struct Pain001;

impl WriteDocument for Pain001 {
    fn write<W: Write>(w: W, doc: &PaymentInstructionDocument) -> Result<()> {
        let mut out = XmlOut {
            wr: Writer::new_with_indent(w, b' ', 2),
        };

        out.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("Document");
        root.push_attribute(("xmlns", NAMESPACE));
        root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
        out.event(Event::Start(root))?;
        out.start("CstmrCdtTrfInitn")?;

        write_group_header(&mut out, doc)?;
        write_payment_info(&mut out, doc)?;

        out.end("CstmrCdtTrfInitn")?;
        out.end("Document")?;
        Ok(())
    }
}

// <GrpHdr>: MsgId, CreDtTm, NbOfTxs, CtrlSum, InitgPty
fn write_group_header<W: Write>(out: &mut XmlOut<W>, doc: &PaymentInstructionDocument) -> Result<()> {
    out.start("GrpHdr")?;
    out.text("MsgId", doc.message_id())?;
    out.text(
        "CreDtTm",
        &doc.creation_date_time().format("%Y-%m-%dT%H:%M:%S").to_string(),
    )?;
    out.text("NbOfTxs", &doc.number_of_transactions().to_string())?;
    out.text("CtrlSum", &doc.control_sum().to_string())?;
    out.start("InitgPty")?;
    out.text("Nm", doc.initiating_party())?;
    out.end("InitgPty")?;
    out.end("GrpHdr")
}

fn write_payment_info<W: Write>(out: &mut XmlOut<W>, doc: &PaymentInstructionDocument) -> Result<()> {
    let debtor = doc.debtor();

    out.start("PmtInf")?;
    out.text("PmtInfId", doc.payment_info_id())?;
    out.text("PmtMtd", "TRF")?;
    out.text("BtchBookg", "true")?;
    out.text("NbOfTxs", &doc.number_of_transactions().to_string())?;
    out.text("CtrlSum", &doc.control_sum().to_string())?;

    out.start("PmtTpInf")?;
    out.start("SvcLvl")?;
    out.text("Cd", "SEPA")?;
    out.end("SvcLvl")?;
    out.end("PmtTpInf")?;

    out.text(
        "ReqdExctnDt",
        &doc.requested_execution_date().format("%Y-%m-%d").to_string(),
    )?;

    out.start("Dbtr")?;
    out.text("Nm", &debtor.name)?;
    out.end("Dbtr")?;

    out.start("DbtrAcct")?;
    out.start("Id")?;
    out.text("IBAN", &debtor.iban)?;
    out.end("Id")?;
    out.end("DbtrAcct")?;

    // <DbtrAgt><FinInstnId>: BIC либо Othr/Id=NOTPROVIDED
    out.start("DbtrAgt")?;
    out.start("FinInstnId")?;
    match &debtor.bic {
        Some(bic) => out.text("BIC", bic)?,
        None => {
            out.start("Othr")?;
            out.text("Id", "NOTPROVIDED")?;
            out.end("Othr")?;
        }
    }
    out.end("FinInstnId")?;
    out.end("DbtrAgt")?;

    out.text("ChrgBr", "SLEV")?;

    for (index, tx) in doc.transactions().iter().enumerate() {
        write_transaction(out, &doc.end_to_end_id(index), tx)?;
    }

    out.end("PmtInf")
}

// <CdtTrfTxInf>: PmtId, Amt, Cdtr, CdtrAcct, RmtInf
fn write_transaction<W: Write>(out: &mut XmlOut<W>, end_to_end_id: &str, tx: &Transaction) -> Result<()> {
    out.start("CdtTrfTxInf")?;

    out.start("PmtId")?;
    out.text("EndToEndId", end_to_end_id)?;
    out.end("PmtId")?;

    out.start("Amt")?;
    out.event(Event::Start(
        BytesStart::new("InstdAmt").with_attributes([("Ccy", CURRENCY)]),
    ))?;
    out.event(Event::Text(BytesText::new(&tx.amount().to_string())))?;
    out.end("InstdAmt")?;
    out.end("Amt")?;

    out.start("Cdtr")?;
    out.text("Nm", tx.creditor_name())?;
    out.end("Cdtr")?;

    out.start("CdtrAcct")?;
    out.start("Id")?;
    out.text("IBAN", tx.creditor_account())?;
    out.end("Id")?;
    out.end("CdtrAcct")?;

    // Ustrd — Max140Text с minLength 1, пустое назначение не пишем
    if !tx.remittance_info().is_empty() {
        out.start("RmtInf")?;
        out.text("Ustrd", tx.remittance_info())?;
        out.end("RmtInf")?;
    }

    out.end("CdtTrfTxInf")
}

/// Тонкая обёртка над `quick_xml::Writer`: ошибки сразу в `SepaError`.
struct XmlOut<W: Write> {
    wr: Writer<W>,
}

impl<W: Write> XmlOut<W> {
    fn event(&mut self, ev: Event<'_>) -> Result<()> {
        self.wr.write_event(ev).map_err(xml)
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// `<name>value</name>`; текст экранируется quick-xml.
    fn text(&mut self, name: &str, value: &str) -> Result<()> {
        self.start(name)?;
        self.event(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }
}

fn xml<E: std::fmt::Display>(e: E) -> SepaError {
    SepaError::Xml(e.to_string())
}
