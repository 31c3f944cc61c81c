//! Wholesale-code gate.
//!
//! Wholesale shoppers type a code that is checked against the coupon list
//! published by the backend. A match with status "Activo" unlocks the
//! wholesale catalog and routes checkout to the wholesale order form.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::CartError;

/// Status value marking a usable coupon.
pub const ACTIVE_STATUS: &str = "Activo";

/// A coupon record from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "estado")]
    pub status: String,
}

impl Coupon {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

/// Proof that a session passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WholesaleAccess {
    code: String,
}

impl WholesaleAccess {
    /// The code that was accepted.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Validates wholesale codes against a coupon list.
#[derive(Debug, Clone, Default)]
pub struct WholesaleGate {
    coupons: Vec<Coupon>,
}

impl WholesaleGate {
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// Build a gate from the coupon endpoint's JSON body.
    pub fn from_json(body: &str) -> Result<Self, CartError> {
        Ok(Self::new(serde_json::from_str(body)?))
    }

    /// Check a typed code. Matching is exact; only the surrounding input is
    /// checked for blankness.
    pub fn validate(&self, code: &str) -> Result<WholesaleAccess, CartError> {
        if code.trim().is_empty() {
            return Err(CartError::EmptyCode);
        }

        if self.coupons.iter().any(|c| c.code == code && c.is_active()) {
            info!("wholesale code accepted");
            Ok(WholesaleAccess {
                code: code.to_string(),
            })
        } else {
            warn!("wholesale code rejected");
            Err(CartError::InvalidCode(code.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> WholesaleGate {
        WholesaleGate::from_json(
            r#"[
                {"codigo": "MAYOR2024", "estado": "Activo"},
                {"codigo": "VIEJO", "estado": "Inactivo"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_active_code_accepted() {
        let access = gate().validate("MAYOR2024").unwrap();
        assert_eq!(access.code(), "MAYOR2024");
    }

    #[test]
    fn test_inactive_or_unknown_rejected() {
        assert_eq!(
            gate().validate("VIEJO"),
            Err(CartError::InvalidCode("VIEJO".to_string()))
        );
        assert!(gate().validate("mayor2024").is_err());
    }

    #[test]
    fn test_blank_code() {
        assert_eq!(gate().validate("   "), Err(CartError::EmptyCode));
    }

    #[test]
    fn test_malformed_coupon_body() {
        assert!(matches!(
            WholesaleGate::from_json("{not json"),
            Err(CartError::Serialization(_))
        ));
    }
}
