//! Domain DTOs for the Box Panel API.
//!
//! # Design
//! Entities are decoded straight from server JSON and never mutated by the
//! client. Status and visibility stay as plain strings/booleans since the
//! server's set of values is open.
//!
//! Creation parameters serialize to form fields. Empty strings are skipped
//! entirely so an unset optional never reaches the wire as `key=`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// A provisioned virtual compute instance.
///
/// Missing or `null` fields decode to their empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ips: Vec<BlockIp>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

impl Block {
    /// The block's addresses in server order.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.ips.iter().map(|ip| ip.address.as_str())
    }
}

/// One address assigned to a block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockIp {
    pub address: String,
}

impl BlockIp {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
        }
    }
}

/// Form payload for creating a block.
///
/// `product` and `template` are required, and exactly one of `password` and
/// `ssh_public_key` must be set.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BlockParams {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub template: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ssh_public_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
}

impl BlockParams {
    pub fn with_password(product: &str, template: &str, password: &str) -> Self {
        Self {
            product: product.to_string(),
            template: template.to_string(),
            password: password.to_string(),
            ..Self::default()
        }
    }

    pub fn with_ssh_key(product: &str, template: &str, ssh_public_key: &str) -> Self {
        Self {
            product: product.to_string(),
            template: template.to_string(),
            ssh_public_key: ssh_public_key.to_string(),
            ..Self::default()
        }
    }

    pub fn hostname(mut self, hostname: &str) -> Self {
        self.hostname = hostname.to_string();
        self
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    /// Checks required and mutually exclusive fields.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.product.is_empty() {
            return Err(ApiError::Validation(r#"Must specify "product""#.to_string()));
        }
        if self.template.is_empty() {
            return Err(ApiError::Validation(r#"Must specify "template""#.to_string()));
        }
        match (self.password.is_empty(), self.ssh_public_key.is_empty()) {
            (false, false) => Err(ApiError::Validation(
                r#"Only one of "password" and "ssh_public_key" may be specified"#.to_string(),
            )),
            (true, true) => Err(ApiError::Validation(
                r#"One of "password" and "ssh_public_key" must be specified"#.to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// URL-encoded form body.
    pub fn to_form(&self) -> Result<String, ApiError> {
        Ok(serde_urlencoded::to_string(self)?)
    }
}

/// A reusable machine image blocks can be created from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub public: bool,
    pub created: DateTime<FixedOffset>,
}

/// Form payload for snapshotting a block into a new template.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TemplateParams {
    #[serde(rename = "id", skip_serializing_if = "String::is_empty")]
    pub block_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl TemplateParams {
    pub fn new(block_id: &str) -> Self {
        Self {
            block_id: block_id.to_string(),
            description: String::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn to_form(&self) -> Result<String, ApiError> {
        Ok(serde_urlencoded::to_string(self)?)
    }
}

impl From<&str> for TemplateParams {
    fn from(block_id: &str) -> Self {
        Self::new(block_id)
    }
}

/// Queued-job record returned when template creation is accepted.
///
/// Template creation runs asynchronously on the server; this is not the
/// finished `Template`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateCreationStatus {
    pub status: String,
    pub text: String,
    #[serde(default)]
    pub error: i64,
}

impl TemplateCreationStatus {
    pub fn is_error(&self) -> bool {
        self.error != 0
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
