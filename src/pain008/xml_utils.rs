use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::core::{MAX_AMOUNT_SCALE, SepaError};

pub type XmlResult = Result<String, SepaError>;

fn xml_io(e: std::io::Error) -> SepaError {
    SepaError::Xml(format!("XML write error: {e}"))
}

/// Indenting XML writer. Text and attribute values are escaped by quick-xml.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, SepaError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, SepaError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| SepaError::Xml(format!("XML UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, SepaError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, SepaError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, SepaError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    /// Write `<name>` ... `</name>` around whatever `body` writes.
    pub fn element<F>(&mut self, name: &str, body: F) -> Result<&mut Self, SepaError>
    where
        F: FnOnce(&mut Self) -> Result<(), SepaError>,
    {
        self.start_element(name)?;
        body(&mut *self)?;
        self.end_element(name)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, SepaError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    pub fn text_element_with_attrs(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, SepaError> {
        self.start_element_with_attrs(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Write a text element nested inside `path`, e.g.
    /// `nested_text(&["CdtrAcct", "Id"], "IBAN", iban)`.
    pub fn nested_text(
        &mut self,
        path: &[&str],
        name: &str,
        text: &str,
    ) -> Result<&mut Self, SepaError> {
        for parent in path {
            self.start_element(parent)?;
        }
        self.text_element(name, text)?;
        for parent in path.iter().rev() {
            self.end_element(parent)?;
        }
        Ok(self)
    }

    /// Write a euro amount with a `Ccy` attribute. `name` doubles as the
    /// field reported on excess precision.
    pub fn amount_element(
        &mut self,
        name: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<&mut Self, SepaError> {
        let text = format_amount(name, amount)?;
        self.text_element_with_attrs(name, &text, &[("Ccy", currency)])
    }
}

/// `ActiveOrHistoricCurrencyAndAmount` text: always exactly two decimals.
///
/// Amounts with fractional cents are refused rather than rounded, so
/// `InstdAmt` and `CtrlSum` can never disagree.
pub fn format_amount(field: &str, amount: Decimal) -> Result<String, SepaError> {
    if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(SepaError::ExcessPrecision {
            field: field.to_string(),
            amount,
        });
    }
    let mut cents = amount.round_dp(MAX_AMOUNT_SCALE);
    cents.rescale(MAX_AMOUNT_SCALE);
    Ok(cents.to_string())
}
