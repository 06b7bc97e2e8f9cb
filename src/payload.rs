// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Inbound submission payload types.
//!
//! Every top-level field is defaulted so that a structurally valid JSON
//! object with fields missing still deserializes; presence and emptiness
//! are the validator's concern, not the parser's. Unknown `service` or
//! `budget` values and malformed quote objects do fail the parse.

use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer};

/// A contact form submission as posted by the site frontend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub company: Option<String>,

    /// Service line selected in the form; empty string means not selected.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub service: Option<ServiceCategory>,

    /// Budget band selected in the form; empty string means not selected.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub budget: Option<BudgetRange>,

    #[serde(default)]
    pub message: String,

    /// Pricing calculator state, present only for quote requests.
    #[serde(default)]
    pub quote: Option<QuoteSnapshot>,

    /// Hidden form field. Humans never see it; naive bots fill it in.
    #[serde(default, rename = "_honeypot")]
    pub honeypot: String,
}

/// Service line offered on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    WebDevelopment,
    SeoGeo,
    PaidAdvertising,
    Audit,
}

/// Budget band offered in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "pilot")]
    Pilot,
    #[serde(rename = "2k-5k")]
    TwoToFive,
    #[serde(rename = "5k-10k")]
    FiveToTen,
    #[serde(rename = "10k-15k")]
    TenToFifteen,
    #[serde(rename = "15k+")]
    FifteenPlus,
}

/// Pricing calculator state attached to a quote request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSnapshot {
    pub package: String,
    pub package_label: String,
    pub package_upfront: f64,
    pub package_monthly: f64,
    #[serde(default)]
    pub add_ons: Vec<QuoteAddOn>,
    pub total_upfront: f64,
    pub total_monthly: f64,
}

/// A single add-on line in a quote.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteAddOn {
    pub name: String,
    pub setup: f64,
    pub monthly: f64,
}

/// Deserialize an optional field where the frontend sends an empty string
/// for "not selected".
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => T::deserialize(s.into_deserializer()).map(Some),
    }
}
