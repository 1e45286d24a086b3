//! Disaster-recovery-as-a-service records and requests

use crate::fields::{FieldSet, Fields};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A DRaaS solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub iops_tier_id: String,
    #[serde(default)]
    pub billing_type_id: String,
}

impl Fields for Solution {
    const DEFAULT_COLUMNS: &'static [&'static str] = &["id", "name", "iops_tier_id"];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("id", &self.id)
            .add("name", &self.name)
            .add("iops_tier_id", &self.iops_tier_id)
            .add("billing_type_id", &self.billing_type_id);
        set
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchSolutionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops_tier_id: Option<String>,
}

/// Backup storage attached to a solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupResource {
    pub id: String,
    pub name: String,
    /// Quota in GiB
    pub quota: i64,
    /// Used quota in GiB
    #[serde(default)]
    pub used_quota: f64,
}

impl Fields for BackupResource {
    const DEFAULT_COLUMNS: &'static [&'static str] = &["id", "name", "quota", "used_quota"];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("id", &self.id)
            .add("name", &self.name)
            .add("quota", self.quota)
            .add("used_quota", self.used_quota);
        set
    }
}

/// Connection details of a solution's backup gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupService {
    pub service: String,
    pub account_name: String,
    pub gateway: String,
    pub port: i32,
}

impl Fields for BackupService {
    const DEFAULT_COLUMNS: &'static [&'static str] = &["service", "account_name", "gateway", "port"];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("service", &self.service)
            .add("account_name", &self.account_name)
            .add("gateway", &self.gateway)
            .add("port", self.port);
        set
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResetBackupServiceCredentialsRequest {
    pub password: String,
}

/// A failover plan and the VMs it moves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailoverPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub vms: Vec<FailoverPlanVm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailoverPlanVm {
    pub name: String,
}

impl Fields for FailoverPlan {
    const DEFAULT_COLUMNS: &'static [&'static str] = &["id", "name", "status"];

    fn fields(&self) -> FieldSet {
        let vms = self
            .vms
            .iter()
            .map(|vm| vm.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let mut set = FieldSet::new();
        set.add("id", &self.id)
            .add("name", &self.name)
            .add("description", &self.description)
            .add("status", &self.status)
            .add("vms", vms);
        set
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartFailoverPlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
}

/// Compute consumed by a solution's replicas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeResource {
    pub id: String,
    #[serde(default)]
    pub hardware_plan_id: String,
    pub memory: ComputeResourceMemory,
    pub cpu: ComputeResourceCpu,
    #[serde(default)]
    pub storage: Vec<ComputeResourceStorage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeResourceMemory {
    pub used_gb: f64,
    pub limit_gb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeResourceCpu {
    /// Percentage used
    pub used: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeResourceStorage {
    pub name: String,
    pub used_gb: i64,
    pub limit_gb: i64,
}

impl Fields for ComputeResource {
    const DEFAULT_COLUMNS: &'static [&'static str] = &[
        "id",
        "hardware_plan_id",
        "memory_used_gb",
        "memory_limit_gb",
        "cpu_used",
    ];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("id", &self.id)
            .add("hardware_plan_id", &self.hardware_plan_id)
            .add("memory_used_gb", self.memory.used_gb)
            .add("memory_limit_gb", self.memory.limit_gb)
            .add("cpu_used", self.cpu.used);
        set
    }
}

/// Resources reserved for failover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwarePlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub limits: HardwarePlanLimits,
    pub networks: HardwarePlanNetworks,
    #[serde(default)]
    pub storage: Vec<HardwarePlanStorage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwarePlanLimits {
    pub processor: i64,
    pub memory: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwarePlanNetworks {
    pub public: i64,
    pub private: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwarePlanStorage {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub storage_type: String,
    pub quota: i64,
}

impl Fields for HardwarePlan {
    const DEFAULT_COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "limits_processor",
        "limits_memory",
    ];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("id", &self.id)
            .add("name", &self.name)
            .add("description", &self.description)
            .add("limits_processor", self.limits.processor)
            .add("limits_memory", self.limits.memory);
        set
    }
}

/// A replicated VM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replica {
    pub id: String,
    #[serde(default)]
    pub platform: String,
    pub cpu: i64,
    pub ram: i64,
    pub disk: i64,
    pub iops: i64,
    pub power: bool,
}

impl Fields for Replica {
    const DEFAULT_COLUMNS: &'static [&'static str] =
        &["id", "platform", "cpu", "ram", "disk", "iops", "power"];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("id", &self.id)
            .add("platform", &self.platform)
            .add("cpu", self.cpu)
            .add("ram", self.ram)
            .add("disk", self.disk)
            .add("iops", self.iops)
            .add("power", self.power);
        set
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResetReplicaIopsRequest {
    pub iops_tier_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingType {
    pub id: String,
    #[serde(rename = "type")]
    pub billing_type: String,
}

impl Fields for BillingType {
    const DEFAULT_COLUMNS: &'static [&'static str] = &["id", "type"];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("id", &self.id).add("type", &self.billing_type);
        set
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IopsTier {
    pub id: String,
    pub iops_limit: i64,
}

impl Fields for IopsTier {
    const DEFAULT_COLUMNS: &'static [&'static str] = &["id", "iops_limit"];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("id", &self.id).add("iops_limit", self.iops_limit);
        set
    }
}
