use serde::{Deserialize, Serialize};

use crate::addresses::repo_types::{Address, AddressFields};
use crate::validation::{not_null, Validate, ValidationErrors, Validator};

/// `contact_id` comes from the path.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateAddressRequest {
    #[serde(default)]
    pub contact_id: i64,
    pub street: String,
    #[serde(default, deserialize_with = "not_null")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "not_null")]
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl CreateAddressRequest {
    pub fn fields(&self) -> AddressFields<'_> {
        AddressFields {
            street: &self.street,
            city: self.city.as_deref(),
            province: self.province.as_deref(),
            country: &self.country,
            postal_code: &self.postal_code,
        }
    }
}

impl Validate for CreateAddressRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("contact_id", self.contact_id);
        validate_fields(&mut v, self.fields());
        v.finish()
    }
}

/// `id` and `contact_id` come from the path.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateAddressRequest {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub contact_id: i64,
    pub street: String,
    #[serde(default, deserialize_with = "not_null")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "not_null")]
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl UpdateAddressRequest {
    pub fn fields(&self) -> AddressFields<'_> {
        AddressFields {
            street: &self.street,
            city: self.city.as_deref(),
            province: self.province.as_deref(),
            country: &self.country,
            postal_code: &self.postal_code,
        }
    }
}

impl Validate for UpdateAddressRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("id", self.id).positive("contact_id", self.contact_id);
        validate_fields(&mut v, self.fields());
        v.finish()
    }
}

fn validate_fields(v: &mut Validator, f: AddressFields<'_>) {
    v.text("street", f.street, 3, 255)
        .optional_text("city", f.city, 3, 100)
        .optional_text("province", f.province, 3, 100)
        .text("country", f.country, 3, 100)
        .text("postal_code", f.postal_code, 3, 10);
}

/// Addresses are addressed by the pair, never by address id alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetAddressRequest {
    pub contact_id: i64,
    pub address_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: i64,
    pub street: String,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl From<Address> for AddressResponse {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            street: a.street,
            city: a.city,
            province: a.province,
            country: a.country,
            postal_code: a.postal_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateAddressRequest {
        CreateAddressRequest {
            contact_id: 1,
            street: "Jalan Test".into(),
            city: Some("Jakarta".into()),
            province: None,
            country: "Indonesia".into(),
            postal_code: "11111".into(),
        }
    }

    #[test]
    fn create_accepts_complete_payload() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn create_rejects_missing_contact_and_long_postal_code() {
        let req = CreateAddressRequest {
            contact_id: 0,
            postal_code: "12345678901".into(),
            ..create_request()
        };
        let fields: Vec<String> = req
            .validate()
            .unwrap_err()
            .errors()
            .iter()
            .map(|e| e.field.clone())
            .collect();
        assert_eq!(fields, vec!["contact_id", "postal_code"]);
    }

    #[test]
    fn update_requires_both_ids() {
        let req = UpdateAddressRequest {
            id: 0,
            contact_id: 0,
            street: "Jalan Test".into(),
            city: None,
            province: None,
            country: "Indonesia".into(),
            postal_code: "11111".into(),
        };
        assert_eq!(req.validate().unwrap_err().errors().len(), 2);
    }

    #[test]
    fn body_without_contact_id_deserializes() {
        let req: CreateAddressRequest = serde_json::from_value(serde_json::json!({
            "street": "test",
            "country": "test",
            "postal_code": "test"
        }))
        .unwrap();
        assert_eq!(req.contact_id, 0);
        assert!(req.city.is_none());
    }

    #[test]
    fn explicit_null_city_is_rejected() {
        let res = serde_json::from_value::<UpdateAddressRequest>(serde_json::json!({
            "street": "test",
            "city": null,
            "country": "test",
            "postal_code": "test"
        }));
        assert!(res.is_err());
    }
}
