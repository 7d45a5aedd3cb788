//! Shipping information collected on the first checkout step.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Country preselected on the shipping form.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Where the order ships and who to contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    /// Optional contact number.
    #[serde(default)]
    pub phone: Option<String>,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            phone: None,
        }
    }
}

impl ShippingInfo {
    /// Names of required fields that are blank or malformed.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let required = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip code", &self.zip_code),
            ("country", &self.country),
        ];

        let mut missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !self.email.trim().is_empty() && !looks_like_email(&self.email) {
            missing.push("valid email");
        }
        missing
    }

    /// Fail with [`CommerceError::CheckoutIncomplete`] naming every missing field.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::CheckoutIncomplete(missing.join(", ")))
        }
    }

    /// Check every required field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Address formatted as on the payment confirmation.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.full_name(),
            self.address.clone(),
            format!("{}, {} {}", self.city, self.state, self.zip_code),
            self.country.clone(),
        ]
    }
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ShippingInfo {
        ShippingInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            address: "12 St James's Square".into(),
            city: "London".into(),
            state: "LDN".into(),
            zip_code: "SW1Y 4JH".into(),
            ..ShippingInfo::default()
        }
    }

    #[test]
    fn test_default_country() {
        assert_eq!(ShippingInfo::default().country, "United States");
    }

    #[test]
    fn test_complete_form() {
        assert!(complete().is_complete());
    }

    #[test]
    fn test_missing_fields_listed() {
        let info = ShippingInfo {
            city: "  ".into(),
            ..complete()
        };
        assert_eq!(info.missing_fields(), vec!["city"]);

        let empty = ShippingInfo::default();
        assert_eq!(empty.missing_fields().len(), 7);
    }

    #[test]
    fn test_email_shape() {
        let info = ShippingInfo {
            email: "not-an-email".into(),
            ..complete()
        };
        assert_eq!(info.missing_fields(), vec!["valid email"]);
    }

    #[test]
    fn test_validate_names_fields() {
        let info = ShippingInfo {
            first_name: String::new(),
            zip_code: String::new(),
            ..complete()
        };
        match info.validate() {
            Err(CommerceError::CheckoutIncomplete(fields)) => {
                assert_eq!(fields, "first name, zip code")
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_phone_optional() {
        let info = ShippingInfo {
            phone: None,
            ..complete()
        };
        assert!(info.is_complete());
    }

    #[test]
    fn test_lines() {
        let lines = complete().lines();
        assert_eq!(lines[0], "Ada Lovelace");
        assert_eq!(lines[2], "London, LDN SW1Y 4JH");
    }
}
