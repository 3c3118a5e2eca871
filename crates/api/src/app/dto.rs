use serde::Deserialize;

use gemforge_auth::Account;
use gemforge_catalog::{Gem, GemFilter, GemProperties, GemType};
use gemforge_core::DomainError;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub password2: String,
    pub email: String,
    #[serde(default)]
    pub is_seller: bool,
}

impl RegisterRequest {
    /// Validate the registration input (password policy, confirmation,
    /// email shape). Uniqueness is the storage layer's job.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.username.trim().is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        if self.password.len() < 6 || self.password.len() > 256 {
            return Err(DomainError::validation(
                "password must be between 6 and 256 characters",
            ));
        }
        if self.password != self.password2 {
            return Err(DomainError::validation("passwords don't match"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateGemRequest {
    pub gem_type: GemType,
    #[serde(default = "default_available")]
    pub available: bool,
    pub properties: GemProperties,
}

/// Full replacement (PUT). Unlike create, the price is taken as given.
#[derive(Debug, Deserialize)]
pub struct UpdateGemRequest {
    pub price: f64,
    pub available: bool,
    pub gem_type: GemType,
    pub properties: GemProperties,
}

/// Partial update (PATCH): absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct PatchGemRequest {
    pub price: Option<f64>,
    pub available: Option<bool>,
    pub gem_type: Option<GemType>,
}

fn default_available() -> bool {
    true
}

/// Listing query: `?lte=` / `?gte=` price bounds plus a comma-separated
/// `?type=DIAMOND,RUBY` kind filter.
#[derive(Debug, Default, Deserialize)]
pub struct GemListQuery {
    pub lte: Option<f64>,
    pub gte: Option<f64>,
    #[serde(rename = "type")]
    pub kinds: Option<String>,
}

impl GemListQuery {
    pub fn into_filter(self) -> Result<GemFilter, DomainError> {
        let kinds = match self.kinds {
            None => Vec::new(),
            Some(raw) => raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().parse::<GemType>())
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(GemFilter {
            price_lte: self.lte,
            price_gte: self.gte,
            kinds,
        })
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Public view of an account. Never exposes the password hash.
pub fn account_to_json(account: &Account) -> serde_json::Value {
    serde_json::json!({
        "id": account.id.to_string(),
        "username": account.username,
        "email": account.email,
        "is_seller": account.is_seller,
        "created_at": account.created_at.to_rfc3339(),
    })
}

pub fn gem_to_json(gem: &Gem) -> serde_json::Value {
    serde_json::json!({
        "id": gem.id.to_string(),
        "price": gem.price,
        "available": gem.available,
        "gem_type": gem.kind.as_str(),
        "seller_id": gem.seller_id.to_string(),
        "properties": {
            "size": gem.properties.size,
            "clarity": gem.properties.clarity.grade(),
            "color": gem.properties.color.map(|c| c.as_str()),
        },
    })
}
