use chrono::NaiveDate;

use super::types::*;

/// Builder for [`Payer`].
///
/// ```
/// use lastschrift::core::*;
/// use chrono::NaiveDate;
///
/// let payer = PayerBuilder::new("M-001", "Anna", "Huber")
///     .iban("DE89370400440532013000")
///     .bic("COBADEFFXXX")
///     .mandate_signed(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap())
///     .build();
/// assert_eq!(payer.debtor_name(), "Huber, Anna");
/// ```
pub struct PayerBuilder {
    payer_id: String,
    name: PersonName,
    account_holder: PersonName,
    iban: String,
    bic: String,
    mandate_signed: Option<NaiveDate>,
    mandate_amended: bool,
}

impl PayerBuilder {
    pub fn new(
        payer_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            payer_id: payer_id.into(),
            name: PersonName::new(first_name, last_name),
            account_holder: PersonName::default(),
            iban: String::new(),
            bic: String::new(),
            mandate_signed: None,
            mandate_amended: false,
        }
    }

    /// Account holder differing from the payer (e.g. a parent paying for a child).
    pub fn account_holder(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.account_holder = PersonName::new(first_name, last_name);
        self
    }

    pub fn iban(mut self, iban: impl Into<String>) -> Self {
        self.iban = iban.into();
        self
    }

    pub fn bic(mut self, bic: impl Into<String>) -> Self {
        self.bic = bic.into();
        self
    }

    pub fn mandate_signed(mut self, date: NaiveDate) -> Self {
        self.mandate_signed = Some(date);
        self
    }

    pub fn mandate_amended(mut self, amended: bool) -> Self {
        self.mandate_amended = amended;
        self
    }

    pub fn build(self) -> Payer {
        Payer {
            payer_id: self.payer_id,
            name: self.name,
            account_holder: self.account_holder,
            iban: self.iban,
            bic: self.bic,
            mandate_signed: self.mandate_signed,
            mandate_amended: self.mandate_amended,
        }
    }
}

/// Builder for [`Originator`].
///
/// Name fields default to the creator; identifiers default to empty.
pub struct OriginatorBuilder {
    creator: String,
    creditor: Option<String>,
    iban: String,
    bic: String,
    creditor_id: String,
    message_id: String,
    payment_info_id: String,
    collection_date: NaiveDate,
    purpose: String,
}

impl OriginatorBuilder {
    pub fn new(creator: impl Into<String>, collection_date: NaiveDate) -> Self {
        Self {
            creator: creator.into(),
            creditor: None,
            iban: String::new(),
            bic: String::new(),
            creditor_id: String::new(),
            message_id: String::new(),
            payment_info_id: String::new(),
            collection_date,
            purpose: String::new(),
        }
    }

    pub fn creditor(mut self, name: impl Into<String>) -> Self {
        self.creditor = Some(name.into());
        self
    }

    pub fn account(mut self, iban: impl Into<String>, bic: impl Into<String>) -> Self {
        self.iban = iban.into();
        self.bic = bic.into();
        self
    }

    pub fn creditor_id(mut self, id: impl Into<String>) -> Self {
        self.creditor_id = id.into();
        self
    }

    pub fn message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = id.into();
        self
    }

    pub fn payment_info_id(mut self, id: impl Into<String>) -> Self {
        self.payment_info_id = id.into();
        self
    }

    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    pub fn build(self) -> Originator {
        let creditor = self.creditor.unwrap_or_else(|| self.creator.clone());
        Originator {
            creator: self.creator,
            creditor,
            iban: self.iban,
            bic: self.bic,
            creditor_id: self.creditor_id,
            message_id: self.message_id,
            payment_info_id: self.payment_info_id,
            collection_date: self.collection_date,
            purpose: self.purpose,
        }
    }
}
