//! Cloudflare-as-a-service records and requests

use crate::fields::{FieldSet, Fields};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A managed Cloudflare account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub cloudflare_account_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Fields for Account {
    const DEFAULT_COLUMNS: &'static [&'static str] = &["id", "name", "status"];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("id", &self.id)
            .add("name", &self.name)
            .add("status", &self.status)
            .add("cloudflare_account_id", &self.cloudflare_account_id)
            .add("created_at", self.created_at)
            .add("updated_at", self.updated_at);
        set
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountMemberRequest {
    pub email_address: String,
}

/// One-shot provisioning of an account, administrator and zone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOrchestrationRequest {
    pub zone_name: String,
    pub zone_subscription_id: String,
    pub account_name: String,
    pub administrator_email_address: String,
}

/// Committed monthly spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendPlan {
    pub id: String,
    pub amount: f64,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Fields for SpendPlan {
    const DEFAULT_COLUMNS: &'static [&'static str] = &["id", "amount", "started_at", "ended_at"];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("id", &self.id)
            .add_money("amount", self.amount)
            .add("started_at", self.started_at)
            .add("ended_at", self.ended_at)
            .add("created_at", self.created_at)
            .add("updated_at", self.updated_at);
        set
    }
}

/// A purchasable Cloudflare plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub subscription_type: String,
    pub price: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Fields for Subscription {
    const DEFAULT_COLUMNS: &'static [&'static str] = &["id", "name", "type", "price"];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("id", &self.id)
            .add("name", &self.name)
            .add("type", &self.subscription_type)
            .add_money("price", self.price)
            .add("created_at", self.created_at)
            .add("updated_at", self.updated_at);
        set
    }
}

/// Month-to-date spend against the active spend plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalSpend {
    pub spend_plan_amount: f64,
    pub total_spend: f64,
}

impl Fields for TotalSpend {
    const DEFAULT_COLUMNS: &'static [&'static str] = &["spend_plan_amount", "total_spend"];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add_money("spend_plan_amount", self.spend_plan_amount)
            .add_money("total_spend", self.total_spend);
        set
    }
}

/// A DNS zone under a managed account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub account_id: String,
    pub name: String,
    #[serde(default)]
    pub plan_subscription_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Fields for Zone {
    const DEFAULT_COLUMNS: &'static [&'static str] = &["id", "name", "plan_subscription_id"];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("id", &self.id)
            .add("account_id", &self.account_id)
            .add("name", &self.name)
            .add("plan_subscription_id", &self.plan_subscription_id)
            .add("description", &self.description)
            .add("created_at", self.created_at)
            .add("updated_at", self.updated_at);
        set
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateZoneRequest {
    pub account_id: String,
    pub name: String,
    pub subscription_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchZoneRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_subscription_id: Option<String>,
}
