//! Provider response shapes and the internal address representation.

use serde::{Deserialize, Serialize};

/// Address as returned by ViaCEP (`GET /ws/{cep}/json/`).
///
/// Field names are the provider's; everything but `cep` may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViaCepAddress {
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub complemento: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
}

/// Raw outcome of a lookup request.
///
/// `body` is `None` when the provider answered with an empty body, a
/// non-success status, or its `erro` marker for unknown postal codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Option<ViaCepAddress>,
}

/// Provider-independent address resolved from a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressByCep {
    pub street: String,
    pub detail: String,
    pub neighborhood: String,
    pub city: String,
    /// Two-letter state abbreviation (UF).
    pub state: String,
}

impl From<ViaCepAddress> for AddressByCep {
    fn from(v: ViaCepAddress) -> Self {
        Self {
            street: v.logradouro,
            detail: v.complemento,
            neighborhood: v.bairro,
            city: v.localidade,
            state: v.uf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_fields_map_to_internal_names() {
        let raw: ViaCepAddress = serde_json::from_str(
            r#"{
                "cep": "01001-000",
                "logradouro": "Praça da Sé",
                "complemento": "lado ímpar",
                "bairro": "Sé",
                "localidade": "São Paulo",
                "uf": "SP",
                "ibge": "3550308"
            }"#,
        )
        .expect("valid viacep json");

        let mapped = AddressByCep::from(raw);
        assert_eq!(mapped.street, "Praça da Sé");
        assert_eq!(mapped.detail, "lado ímpar");
        assert_eq!(mapped.neighborhood, "Sé");
        assert_eq!(mapped.city, "São Paulo");
        assert_eq!(mapped.state, "SP");
    }

    #[test]
    fn missing_provider_fields_default_to_blank() {
        let raw: ViaCepAddress =
            serde_json::from_str(r#"{ "cep": "69900-000", "localidade": "Rio Branco", "uf": "AC" }"#)
                .expect("valid viacep json");

        let mapped = AddressByCep::from(raw);
        assert_eq!(mapped.street, "");
        assert_eq!(mapped.city, "Rio Branco");
    }
}
