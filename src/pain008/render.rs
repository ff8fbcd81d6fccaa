use super::document::{BatchDocument, DirectDebitTransaction};
use super::xml_utils::{XmlResult, XmlWriter, format_amount};
use super::*;
use crate::core::SepaError;

/// Render a batch as pain.008.003.02 XML.
///
/// Element order follows the schema exactly; every text value passes through
/// the XML writer's escaping.
pub fn to_pain008_xml(doc: &BatchDocument) -> XmlResult {
    let mut w = XmlWriter::new()?;
    let tx_count = doc.number_of_transactions().to_string();
    let control_sum = format_amount("CtrlSum", doc.control_sum())?;

    w.start_element_with_attrs(
        "Document",
        &[
            ("xmlns", PAIN008_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", PAIN008_SCHEMA_LOCATION),
        ],
    )?;
    w.start_element("CstmrDrctDbtInitn")?;

    // --- GrpHdr ---
    w.element("GrpHdr", |w| {
        w.text_element("MsgId", doc.message_id())?;
        w.text_element("CreDtTm", &sepa_date_time(doc.created_at()))?;
        w.text_element("NbOfTxs", &tx_count)?;
        w.text_element("CtrlSum", &control_sum)?;
        w.nested_text(&["InitgPty"], "Nm", doc.initiating_party())?;
        Ok(())
    })?;

    // --- PmtInf ---
    w.start_element("PmtInf")?;
    w.text_element("PmtInfId", doc.payment_info_id())?;
    w.text_element("PmtMtd", PAYMENT_METHOD_DIRECT_DEBIT)?;
    w.text_element("BtchBookg", "true")?;
    w.text_element("NbOfTxs", &tx_count)?;
    w.text_element("CtrlSum", &control_sum)?;
    w.element("PmtTpInf", |w| {
        w.nested_text(&["SvcLvl"], "Cd", SERVICE_LEVEL)?;
        w.nested_text(&["LclInstrm"], "Cd", LOCAL_INSTRUMENT)?;
        w.text_element("SeqTp", doc.sequence_type().code())?;
        Ok(())
    })?;
    w.text_element("ReqdColltnDt", &sepa_date(doc.collection_date()))?;
    w.nested_text(&["Cdtr"], "Nm", doc.creditor_name())?;
    w.nested_text(&["CdtrAcct", "Id"], "IBAN", doc.creditor_iban())?;
    w.nested_text(&["CdtrAgt", "FinInstnId"], "BIC", doc.creditor_bic())?;
    w.text_element("ChrgBr", CHARGE_BEARER)?;
    w.element("CdtrSchmeId", |w| {
        w.element("Id", |w| {
            w.element("PrvtId", |w| {
                w.element("Othr", |w| {
                    w.text_element("Id", doc.creditor_scheme_id())?;
                    w.nested_text(&["SchmeNm"], "Prtry", SCHEME_NAME)?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })?;

    for tx in doc.transactions() {
        write_transaction(&mut w, tx)?;
    }

    w.end_element("PmtInf")?;
    w.end_element("CstmrDrctDbtInitn")?;
    w.end_element("Document")?;

    w.into_string()
}

fn write_transaction(w: &mut XmlWriter, tx: &DirectDebitTransaction) -> Result<(), SepaError> {
    w.element("DrctDbtTxInf", |w| {
        w.nested_text(&["PmtId"], "EndToEndId", &tx.end_to_end_id)?;
        w.amount_element("InstdAmt", tx.amount, CURRENCY)?;
        w.element("DrctDbtTx", |w| {
            w.element("MndtRltdInf", |w| {
                w.text_element("MndtId", &tx.mandate_id)?;
                w.text_element("DtOfSgntr", &sepa_date(tx.mandate_signed))?;
                w.text_element("AmdmntInd", if tx.mandate_amended { "true" } else { "false" })?;
                Ok(())
            })?;
            Ok(())
        })?;
        w.nested_text(&["DbtrAgt", "FinInstnId"], "BIC", &tx.debtor_bic)?;
        w.nested_text(&["Dbtr"], "Nm", &tx.debtor_name)?;
        w.nested_text(&["DbtrAcct", "Id"], "IBAN", &tx.debtor_iban)?;
        w.nested_text(&["RmtInf"], "Ustrd", &tx.remittance)?;
        Ok(())
    })?;
    Ok(())
}
