//! Inbound payloads and outbound projections of the enrollment service.
//!
//! Inbound types convert into the `db` crate's upsert params; outbound types
//! are built from `db` rows with the bookkeeping columns left behind.

use chrono::{DateTime, Utc};
use db::models::{AddressParams, AddressRow, EnrollmentParams, EnrollmentWithAddresses};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// Enrollment fields plus the address to attach to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnrollment {
    pub name: String,
    pub cpf: String,
    pub birthday: DateTime<Utc>,
    pub phone: String,
    pub address: NewAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub cep: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub number: String,
    pub neighborhood: String,
    #[serde(default)]
    pub address_detail: Option<String>,
}

impl NewEnrollment {
    /// Split into the two upsert payloads.
    pub fn into_params(self) -> (EnrollmentParams, AddressParams) {
        let enrollment = EnrollmentParams {
            name: self.name,
            cpf: self.cpf,
            birthday: self.birthday,
            phone: self.phone,
        };
        (enrollment, self.address.into())
    }
}

impl From<NewAddress> for AddressParams {
    fn from(a: NewAddress) -> Self {
        Self {
            cep: a.cep,
            street: a.street,
            city: a.city,
            state: a.state,
            number: a.number,
            neighborhood: a.neighborhood,
            // blank detail is stored as NULL
            address_detail: a.address_detail.filter(|d| !d.trim().is_empty()),
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// An enrollment as returned to callers: no `user_id`, no timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentView {
    pub id: Uuid,
    pub name: String,
    pub cpf: String,
    pub birthday: DateTime<Utc>,
    pub phone: String,
    /// First address of the enrollment, omitted entirely when there is none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressView>,
}

/// An address as returned to callers: no `enrollment_id`, no timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressView {
    pub id: Uuid,
    pub cep: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub number: String,
    pub neighborhood: String,
    pub address_detail: Option<String>,
}

impl From<AddressRow> for AddressView {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            cep: row.cep,
            street: row.street,
            city: row.city,
            state: row.state,
            number: row.number,
            neighborhood: row.neighborhood,
            address_detail: row.address_detail,
        }
    }
}

impl From<EnrollmentWithAddresses> for EnrollmentView {
    fn from(joined: EnrollmentWithAddresses) -> Self {
        let EnrollmentWithAddresses { enrollment, addresses } = joined;
        Self {
            id: enrollment.id,
            name: enrollment.name,
            cpf: enrollment.cpf,
            birthday: enrollment.birthday,
            phone: enrollment.phone,
            address: addresses.into_iter().next().map(AddressView::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn address(detail: Option<&str>) -> NewAddress {
        NewAddress {
            cep: "01001000".into(),
            street: "Praça da Sé".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
            number: "100".into(),
            neighborhood: "Sé".into(),
            address_detail: detail.map(str::to_owned),
        }
    }

    #[test]
    fn blank_address_detail_is_dropped() {
        assert_eq!(AddressParams::from(address(Some("  "))).address_detail, None);
        assert_eq!(AddressParams::from(address(None)).address_detail, None);
        assert_eq!(
            AddressParams::from(address(Some("apto 12"))).address_detail.as_deref(),
            Some("apto 12")
        );
    }

    #[test]
    fn view_without_address_omits_the_key() {
        let view = EnrollmentView {
            id: Uuid::new_v4(),
            name: "Maria".into(),
            cpf: "12345678909".into(),
            birthday: Utc.with_ymd_and_hms(1990, 5, 17, 0, 0, 0).unwrap(),
            phone: "(11) 91234-5678".into(),
            address: None,
        };

        let json = serde_json::to_value(&view).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("address"));
        assert!(!obj.contains_key("userId"));
        assert!(!obj.contains_key("createdAt"));
    }

    #[test]
    fn inbound_payload_accepts_camel_case() {
        let payload: NewEnrollment = serde_json::from_value(serde_json::json!({
            "name": "Maria",
            "cpf": "12345678909",
            "birthday": "1990-05-17T00:00:00Z",
            "phone": "(11) 91234-5678",
            "address": {
                "cep": "01001000",
                "street": "Praça da Sé",
                "city": "São Paulo",
                "state": "SP",
                "number": "100",
                "neighborhood": "Sé",
                "addressDetail": "fundos"
            }
        }))
        .unwrap();

        let (enrollment, address) = payload.into_params();
        assert_eq!(enrollment.name, "Maria");
        assert_eq!(address.address_detail.as_deref(), Some("fundos"));
    }
}
