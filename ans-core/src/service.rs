//! Service contracts
//!
//! One trait per API domain, one method per API operation. The CLI's command
//! handlers are generic over these traits so they can run against the HTTP
//! client or an in-memory double.

use crate::cloudflare::{
    Account, CreateAccountMemberRequest, CreateAccountRequest, CreateOrchestrationRequest,
    CreateZoneRequest, PatchAccountRequest, PatchZoneRequest, SpendPlan, Subscription,
    TotalSpend, Zone,
};
use crate::draas::{
    BackupResource, BackupService, BillingType, ComputeResource, FailoverPlan, HardwarePlan,
    IopsTier, PatchSolutionRequest, Replica, ResetBackupServiceCredentialsRequest,
    ResetReplicaIopsRequest, Solution, StartFailoverPlanRequest,
};
use crate::error::Result;
use crate::params::ParameterList;
use async_trait::async_trait;

/// Cloudflare-as-a-service API
#[async_trait]
pub trait CloudflareService: Send + Sync {
    async fn get_accounts(&self, params: &ParameterList) -> Result<Vec<Account>>;
    async fn get_account(&self, account_id: &str) -> Result<Account>;
    /// Returns the new account's identifier.
    async fn create_account(&self, req: &CreateAccountRequest) -> Result<String>;
    async fn patch_account(&self, account_id: &str, req: &PatchAccountRequest) -> Result<()>;
    async fn create_account_member(
        &self,
        account_id: &str,
        req: &CreateAccountMemberRequest,
    ) -> Result<()>;

    async fn create_orchestration(&self, req: &CreateOrchestrationRequest) -> Result<()>;

    async fn get_spend_plans(&self, params: &ParameterList) -> Result<Vec<SpendPlan>>;
    async fn get_subscriptions(&self, params: &ParameterList) -> Result<Vec<Subscription>>;
    async fn get_total_spend_month_to_date(&self) -> Result<TotalSpend>;

    async fn get_zones(&self, params: &ParameterList) -> Result<Vec<Zone>>;
    async fn get_zone(&self, zone_id: &str) -> Result<Zone>;
    /// Returns the new zone's identifier.
    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<String>;
    async fn patch_zone(&self, zone_id: &str, req: &PatchZoneRequest) -> Result<()>;
    async fn delete_zone(&self, zone_id: &str) -> Result<()>;
}

/// Disaster-recovery-as-a-service API
#[async_trait]
pub trait DraasService: Send + Sync {
    async fn get_solutions(&self, params: &ParameterList) -> Result<Vec<Solution>>;
    async fn get_solution(&self, solution_id: &str) -> Result<Solution>;
    async fn patch_solution(&self, solution_id: &str, req: &PatchSolutionRequest) -> Result<()>;

    async fn get_solution_backup_resources(
        &self,
        solution_id: &str,
        params: &ParameterList,
    ) -> Result<Vec<BackupResource>>;
    async fn get_solution_backup_service(&self, solution_id: &str) -> Result<BackupService>;
    async fn reset_solution_backup_service_credentials(
        &self,
        solution_id: &str,
        req: &ResetBackupServiceCredentialsRequest,
    ) -> Result<()>;

    async fn get_solution_failover_plans(
        &self,
        solution_id: &str,
        params: &ParameterList,
    ) -> Result<Vec<FailoverPlan>>;
    async fn get_solution_failover_plan(
        &self,
        solution_id: &str,
        plan_id: &str,
    ) -> Result<FailoverPlan>;
    async fn start_solution_failover_plan(
        &self,
        solution_id: &str,
        plan_id: &str,
        req: &StartFailoverPlanRequest,
    ) -> Result<()>;
    async fn stop_solution_failover_plan(&self, solution_id: &str, plan_id: &str) -> Result<()>;

    async fn get_solution_compute_resources(
        &self,
        solution_id: &str,
        params: &ParameterList,
    ) -> Result<Vec<ComputeResource>>;
    async fn get_solution_compute_resource(
        &self,
        solution_id: &str,
        resource_id: &str,
    ) -> Result<ComputeResource>;

    async fn get_solution_hardware_plans(
        &self,
        solution_id: &str,
        params: &ParameterList,
    ) -> Result<Vec<HardwarePlan>>;
    async fn get_solution_hardware_plan(
        &self,
        solution_id: &str,
        plan_id: &str,
    ) -> Result<HardwarePlan>;
    async fn get_solution_hardware_plan_replicas(
        &self,
        solution_id: &str,
        plan_id: &str,
        params: &ParameterList,
    ) -> Result<Vec<Replica>>;
    async fn reset_solution_replica_iops(
        &self,
        solution_id: &str,
        replica_id: &str,
        req: &ResetReplicaIopsRequest,
    ) -> Result<()>;

    async fn get_billing_types(&self, params: &ParameterList) -> Result<Vec<BillingType>>;
    async fn get_billing_type(&self, billing_type_id: &str) -> Result<BillingType>;

    async fn get_iops_tiers(&self, params: &ParameterList) -> Result<Vec<IopsTier>>;
    async fn get_iops_tier(&self, tier_id: &str) -> Result<IopsTier>;
}
