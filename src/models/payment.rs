//! Payments models.

use serde::Deserialize;

/// Response body of the wallet balance endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Wallet {
    pub balance: f64,
}
