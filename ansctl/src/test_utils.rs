//! Test utilities for CLI testing
//!
//! Provides in-memory service doubles for handler tests and a mock HTTP API
//! server for client tests.

use ans_core::api::{ApiResponse, Pagination};
use ans_core::cloudflare::{
    Account, CreateAccountMemberRequest, CreateAccountRequest, CreateOrchestrationRequest,
    CreateZoneRequest, PatchAccountRequest, PatchZoneRequest, SpendPlan, Subscription,
    TotalSpend, Zone,
};
use ans_core::draas::{
    BackupResource, BackupService, BillingType, ComputeResource, ComputeResourceCpu,
    ComputeResourceMemory, ComputeResourceStorage, FailoverPlan, FailoverPlanVm, HardwarePlan,
    HardwarePlanLimits, HardwarePlanNetworks, HardwarePlanStorage, IopsTier,
    PatchSolutionRequest, Replica, ResetBackupServiceCredentialsRequest,
    ResetReplicaIopsRequest, Solution, StartFailoverPlanRequest,
};
use ans_core::{AnsError, CloudflareService, DraasService, ParameterList, Result};
use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

fn simulated_failure(id: &str) -> AnsError {
    AnsError::Api {
        status: 500,
        message: format!("simulated failure for {}", id),
    }
}

fn find<T: Clone>(items: &[T], id: &str, key: impl Fn(&T) -> &str, kind: &str) -> Result<T> {
    items
        .iter()
        .find(|item| key(item) == id)
        .cloned()
        .ok_or_else(|| AnsError::NotFound(format!("{} {} does not exist", kind, id)))
}

// ─── in-memory cloudflare ──────────────────────────────────

#[derive(Debug, Default)]
struct CloudflareState {
    accounts: Vec<Account>,
    zones: Vec<Zone>,
    spend_plans: Vec<SpendPlan>,
    subscriptions: Vec<Subscription>,
    members: Vec<(String, String)>,
    orchestrations: Vec<CreateOrchestrationRequest>,
    calls: Vec<String>,
    failing: HashSet<String>,
    created: usize,
}

/// In-memory [`CloudflareService`] that records every call
#[derive(Debug, Default)]
pub struct MockCloudflare {
    state: Mutex<CloudflareState>,
}

impl MockCloudflare {
    /// Seeded with two accounts, two zones, one spend plan and one subscription.
    pub fn new() -> Self {
        let account = |id: &str, name: &str| Account {
            id: id.to_string(),
            name: name.to_string(),
            status: "active".to_string(),
            cloudflare_account_id: format!("cf-{}", id),
            created_at: None,
            updated_at: None,
        };
        let zone = |id: &str, name: &str| Zone {
            id: id.to_string(),
            account_id: "acc1".to_string(),
            name: name.to_string(),
            plan_subscription_id: "sub1".to_string(),
            description: String::new(),
            created_at: None,
            updated_at: None,
        };

        let state = CloudflareState {
            accounts: vec![account("acc1", "Acme"), account("acc2", "Globex")],
            zones: vec![zone("z1", "alpha.example"), zone("z2", "beta.example")],
            spend_plans: vec![SpendPlan {
                id: "sp1".to_string(),
                amount: 250.0,
                started_at: None,
                ended_at: None,
                created_at: None,
                updated_at: None,
            }],
            subscriptions: vec![Subscription {
                id: "sub1".to_string(),
                name: "Pro".to_string(),
                subscription_type: "zone".to_string(),
                price: 20.0,
                created_at: None,
                updated_at: None,
            }],
            ..Default::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    /// Make every call touching `id` fail. For creates, `id` is matched
    /// against the requested name.
    pub fn fail_on(self, id: &str) -> Self {
        self.state.lock().unwrap().failing.insert(id.to_string());
        self
    }

    /// Calls made so far, in order, as `"<method> <id>"`.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn zone(&self, id: &str) -> Option<Zone> {
        let state = self.state.lock().unwrap();
        state.zones.iter().find(|z| z.id == id).cloned()
    }

    pub fn account(&self, id: &str) -> Option<Account> {
        let state = self.state.lock().unwrap();
        state.accounts.iter().find(|a| a.id == id).cloned()
    }

    pub fn members(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().members.clone()
    }

    pub fn orchestrations(&self) -> Vec<CreateOrchestrationRequest> {
        self.state.lock().unwrap().orchestrations.clone()
    }

    fn enter(&self, call: String, id: &str) -> Result<std::sync::MutexGuard<'_, CloudflareState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing.contains(id) {
            return Err(simulated_failure(id));
        }
        Ok(state)
    }
}

#[async_trait]
impl CloudflareService for MockCloudflare {
    async fn get_accounts(&self, _params: &ParameterList) -> Result<Vec<Account>> {
        Ok(self.enter("get_accounts".to_string(), "")?.accounts.clone())
    }

    async fn get_account(&self, account_id: &str) -> Result<Account> {
        let state = self.enter(format!("get_account {}", account_id), account_id)?;
        find(&state.accounts, account_id, |a| a.id.as_str(), "account")
    }

    async fn create_account(&self, req: &CreateAccountRequest) -> Result<String> {
        let mut state = self.enter("create_account".to_string(), &req.name)?;
        state.created += 1;
        let id = format!("acc-new-{}", state.created);
        state.accounts.push(Account {
            id: id.clone(),
            name: req.name.clone(),
            status: "pending".to_string(),
            cloudflare_account_id: String::new(),
            created_at: None,
            updated_at: None,
        });
        Ok(id)
    }

    async fn patch_account(&self, account_id: &str, req: &PatchAccountRequest) -> Result<()> {
        let mut state = self.enter(format!("patch_account {}", account_id), account_id)?;
        let account = state
            .accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| AnsError::NotFound(format!("account {} does not exist", account_id)))?;
        if let Some(name) = &req.name {
            account.name = name.clone();
        }
        Ok(())
    }

    async fn create_account_member(
        &self,
        account_id: &str,
        req: &CreateAccountMemberRequest,
    ) -> Result<()> {
        let mut state = self.enter(format!("create_account_member {}", account_id), account_id)?;
        find(&state.accounts, account_id, |a| a.id.as_str(), "account")?;
        state
            .members
            .push((account_id.to_string(), req.email_address.clone()));
        Ok(())
    }

    async fn create_orchestration(&self, req: &CreateOrchestrationRequest) -> Result<()> {
        let mut state = self.enter("create_orchestration".to_string(), &req.zone_name)?;
        state.orchestrations.push(req.clone());
        Ok(())
    }

    async fn get_spend_plans(&self, _params: &ParameterList) -> Result<Vec<SpendPlan>> {
        Ok(self.enter("get_spend_plans".to_string(), "")?.spend_plans.clone())
    }

    async fn get_subscriptions(&self, _params: &ParameterList) -> Result<Vec<Subscription>> {
        Ok(self
            .enter("get_subscriptions".to_string(), "")?
            .subscriptions
            .clone())
    }

    async fn get_total_spend_month_to_date(&self) -> Result<TotalSpend> {
        let _state = self.enter("get_total_spend_month_to_date".to_string(), "")?;
        Ok(TotalSpend {
            spend_plan_amount: 250.0,
            total_spend: 12.5,
        })
    }

    async fn get_zones(&self, _params: &ParameterList) -> Result<Vec<Zone>> {
        Ok(self.enter("get_zones".to_string(), "")?.zones.clone())
    }

    async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        let state = self.enter(format!("get_zone {}", zone_id), zone_id)?;
        find(&state.zones, zone_id, |z| z.id.as_str(), "zone")
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<String> {
        let mut state = self.enter("create_zone".to_string(), &req.name)?;
        state.created += 1;
        let id = format!("zone-new-{}", state.created);
        state.zones.push(Zone {
            id: id.clone(),
            account_id: req.account_id.clone(),
            name: req.name.clone(),
            plan_subscription_id: req.subscription_id.clone(),
            description: String::new(),
            created_at: None,
            updated_at: None,
        });
        Ok(id)
    }

    async fn patch_zone(&self, zone_id: &str, req: &PatchZoneRequest) -> Result<()> {
        let mut state = self.enter(format!("patch_zone {}", zone_id), zone_id)?;
        let zone = state
            .zones
            .iter_mut()
            .find(|z| z.id == zone_id)
            .ok_or_else(|| AnsError::NotFound(format!("zone {} does not exist", zone_id)))?;
        if let Some(plan) = &req.plan_subscription_id {
            zone.plan_subscription_id = plan.clone();
        }
        Ok(())
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<()> {
        let mut state = self.enter(format!("delete_zone {}", zone_id), zone_id)?;
        let before = state.zones.len();
        state.zones.retain(|z| z.id != zone_id);
        if state.zones.len() == before {
            return Err(AnsError::NotFound(format!("zone {} does not exist", zone_id)));
        }
        Ok(())
    }
}

// ─── in-memory draas ───────────────────────────────────────

#[derive(Debug, Default)]
struct DraasState {
    solutions: Vec<Solution>,
    backup_resources: Vec<BackupResource>,
    backup_password: String,
    failover_plans: Vec<FailoverPlan>,
    compute_resources: Vec<ComputeResource>,
    hardware_plans: Vec<HardwarePlan>,
    replicas: Vec<Replica>,
    billing_types: Vec<BillingType>,
    iops_tiers: Vec<IopsTier>,
    calls: Vec<String>,
    failing: HashSet<String>,
}

/// In-memory [`DraasService`] that records every call
///
/// Every seeded child resource belongs to solution `s1`; other solution ids
/// are not found.
#[derive(Debug, Default)]
pub struct MockDraas {
    state: Mutex<DraasState>,
}

impl MockDraas {
    pub fn new() -> Self {
        let solution = |id: &str, name: &str| Solution {
            id: id.to_string(),
            name: name.to_string(),
            iops_tier_id: "t1".to_string(),
            billing_type_id: "bt1".to_string(),
        };
        let plan = |id: &str, status: &str, vms: &[&str]| FailoverPlan {
            id: id.to_string(),
            name: format!("Plan {}", id),
            description: String::new(),
            status: status.to_string(),
            vms: vms
                .iter()
                .map(|name| FailoverPlanVm {
                    name: name.to_string(),
                })
                .collect(),
        };
        let replica = |id: &str| Replica {
            id: id.to_string(),
            platform: "VMware".to_string(),
            cpu: 2,
            ram: 4,
            disk: 80,
            iops: 300,
            power: true,
        };

        let state = DraasState {
            solutions: vec![solution("s1", "Primary DR"), solution("s2", "Secondary DR")],
            backup_resources: vec![BackupResource {
                id: "br1".to_string(),
                name: "Nightly".to_string(),
                quota: 500,
                used_quota: 123.5,
            }],
            failover_plans: vec![
                plan("fp1", "ready", &["web01", "db01"]),
                plan("fp2", "ready", &[]),
            ],
            compute_resources: vec![ComputeResource {
                id: "cr1".to_string(),
                hardware_plan_id: "hp1".to_string(),
                memory: ComputeResourceMemory {
                    used_gb: 6.5,
                    limit_gb: 16.0,
                },
                cpu: ComputeResourceCpu { used: 42 },
                storage: vec![
                    ComputeResourceStorage {
                        name: "datastore-a".to_string(),
                        used_gb: 120,
                        limit_gb: 500,
                    },
                    ComputeResourceStorage {
                        name: "datastore-b".to_string(),
                        used_gb: 10,
                        limit_gb: 250,
                    },
                ],
            }],
            hardware_plans: vec![HardwarePlan {
                id: "hp1".to_string(),
                name: "Standard".to_string(),
                description: "Standard failover capacity".to_string(),
                limits: HardwarePlanLimits {
                    processor: 8,
                    memory: 32,
                },
                networks: HardwarePlanNetworks {
                    public: 1,
                    private: 2,
                },
                storage: vec![HardwarePlanStorage {
                    id: "hs1".to_string(),
                    name: "ssd".to_string(),
                    storage_type: "SSD".to_string(),
                    quota: 1000,
                }],
            }],
            replicas: vec![replica("r1"), replica("r2")],
            billing_types: vec![BillingType {
                id: "bt1".to_string(),
                billing_type: "Fixed".to_string(),
            }],
            iops_tiers: vec![
                IopsTier {
                    id: "t1".to_string(),
                    iops_limit: 300,
                },
                IopsTier {
                    id: "t2".to_string(),
                    iops_limit: 600,
                },
            ],
            ..Default::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    /// Make every call touching `id` fail.
    pub fn fail_on(self, id: &str) -> Self {
        self.state.lock().unwrap().failing.insert(id.to_string());
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn solution(&self, id: &str) -> Option<Solution> {
        let state = self.state.lock().unwrap();
        state.solutions.iter().find(|s| s.id == id).cloned()
    }

    pub fn failover_plan(&self, id: &str) -> Option<FailoverPlan> {
        let state = self.state.lock().unwrap();
        state.failover_plans.iter().find(|p| p.id == id).cloned()
    }

    pub fn replica(&self, id: &str) -> Option<Replica> {
        let state = self.state.lock().unwrap();
        state.replicas.iter().find(|r| r.id == id).cloned()
    }

    pub fn backup_password(&self) -> String {
        self.state.lock().unwrap().backup_password.clone()
    }

    fn enter(&self, call: String, ids: &[&str]) -> Result<std::sync::MutexGuard<'_, DraasState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if let Some(id) = ids.iter().find(|id| state.failing.contains(**id)) {
            return Err(simulated_failure(id));
        }
        Ok(state)
    }

    /// Enter a call scoped to a solution, which must exist.
    fn enter_solution(
        &self,
        call: String,
        solution_id: &str,
        ids: &[&str],
    ) -> Result<std::sync::MutexGuard<'_, DraasState>> {
        let mut all = vec![solution_id];
        all.extend_from_slice(ids);
        let state = self.enter(call, &all)?;
        find(&state.solutions, solution_id, |s| s.id.as_str(), "solution")?;
        Ok(state)
    }
}

/// Child resources are only seeded under `s1`.
fn children<T: Clone>(solution_id: &str, items: &[T]) -> Vec<T> {
    if solution_id == "s1" {
        items.to_vec()
    } else {
        Vec::new()
    }
}

#[async_trait]
impl DraasService for MockDraas {
    async fn get_solutions(&self, _params: &ParameterList) -> Result<Vec<Solution>> {
        Ok(self.enter("get_solutions".to_string(), &[])?.solutions.clone())
    }

    async fn get_solution(&self, solution_id: &str) -> Result<Solution> {
        let state = self.enter(format!("get_solution {}", solution_id), &[solution_id])?;
        find(&state.solutions, solution_id, |s| s.id.as_str(), "solution")
    }

    async fn patch_solution(&self, solution_id: &str, req: &PatchSolutionRequest) -> Result<()> {
        let mut state = self.enter(format!("patch_solution {}", solution_id), &[solution_id])?;
        let solution = state
            .solutions
            .iter_mut()
            .find(|s| s.id == solution_id)
            .ok_or_else(|| AnsError::NotFound(format!("solution {} does not exist", solution_id)))?;
        if let Some(name) = &req.name {
            solution.name = name.clone();
        }
        if let Some(tier) = &req.iops_tier_id {
            solution.iops_tier_id = tier.clone();
        }
        Ok(())
    }

    async fn get_solution_backup_resources(
        &self,
        solution_id: &str,
        _params: &ParameterList,
    ) -> Result<Vec<BackupResource>> {
        let state = self.enter_solution(
            format!("get_solution_backup_resources {}", solution_id),
            solution_id,
            &[],
        )?;
        Ok(children(solution_id, &state.backup_resources))
    }

    async fn get_solution_backup_service(&self, solution_id: &str) -> Result<BackupService> {
        let _state = self.enter_solution(
            format!("get_solution_backup_service {}", solution_id),
            solution_id,
            &[],
        )?;
        Ok(BackupService {
            service: "Veeam Cloud Connect".to_string(),
            account_name: format!("{}-backup", solution_id),
            gateway: "gateway.example".to_string(),
            port: 6180,
        })
    }

    async fn reset_solution_backup_service_credentials(
        &self,
        solution_id: &str,
        req: &ResetBackupServiceCredentialsRequest,
    ) -> Result<()> {
        let mut state = self.enter_solution(
            format!("reset_solution_backup_service_credentials {}", solution_id),
            solution_id,
            &[],
        )?;
        state.backup_password = req.password.clone();
        Ok(())
    }

    async fn get_solution_failover_plans(
        &self,
        solution_id: &str,
        _params: &ParameterList,
    ) -> Result<Vec<FailoverPlan>> {
        let state = self.enter_solution(
            format!("get_solution_failover_plans {}", solution_id),
            solution_id,
            &[],
        )?;
        Ok(children(solution_id, &state.failover_plans))
    }

    async fn get_solution_failover_plan(
        &self,
        solution_id: &str,
        plan_id: &str,
    ) -> Result<FailoverPlan> {
        let state = self.enter_solution(
            format!("get_solution_failover_plan {} {}", solution_id, plan_id),
            solution_id,
            &[plan_id],
        )?;
        find(
            &children(solution_id, &state.failover_plans),
            plan_id,
            |p| p.id.as_str(),
            "failover plan",
        )
    }

    async fn start_solution_failover_plan(
        &self,
        solution_id: &str,
        plan_id: &str,
        req: &StartFailoverPlanRequest,
    ) -> Result<()> {
        let call = match req.start_date {
            Some(start) => format!(
                "start_solution_failover_plan {} {} {}",
                solution_id,
                plan_id,
                start.to_rfc3339()
            ),
            None => format!("start_solution_failover_plan {} {}", solution_id, plan_id),
        };
        let mut state = self.enter_solution(call, solution_id, &[plan_id])?;
        set_plan_status(&mut state, solution_id, plan_id, "started")
    }

    async fn stop_solution_failover_plan(&self, solution_id: &str, plan_id: &str) -> Result<()> {
        let mut state = self.enter_solution(
            format!("stop_solution_failover_plan {} {}", solution_id, plan_id),
            solution_id,
            &[plan_id],
        )?;
        set_plan_status(&mut state, solution_id, plan_id, "stopped")
    }

    async fn get_solution_compute_resources(
        &self,
        solution_id: &str,
        _params: &ParameterList,
    ) -> Result<Vec<ComputeResource>> {
        let state = self.enter_solution(
            format!("get_solution_compute_resources {}", solution_id),
            solution_id,
            &[],
        )?;
        Ok(children(solution_id, &state.compute_resources))
    }

    async fn get_solution_compute_resource(
        &self,
        solution_id: &str,
        resource_id: &str,
    ) -> Result<ComputeResource> {
        let state = self.enter_solution(
            format!("get_solution_compute_resource {} {}", solution_id, resource_id),
            solution_id,
            &[resource_id],
        )?;
        find(
            &children(solution_id, &state.compute_resources),
            resource_id,
            |r| r.id.as_str(),
            "compute resource",
        )
    }

    async fn get_solution_hardware_plans(
        &self,
        solution_id: &str,
        _params: &ParameterList,
    ) -> Result<Vec<HardwarePlan>> {
        let state = self.enter_solution(
            format!("get_solution_hardware_plans {}", solution_id),
            solution_id,
            &[],
        )?;
        Ok(children(solution_id, &state.hardware_plans))
    }

    async fn get_solution_hardware_plan(
        &self,
        solution_id: &str,
        plan_id: &str,
    ) -> Result<HardwarePlan> {
        let state = self.enter_solution(
            format!("get_solution_hardware_plan {} {}", solution_id, plan_id),
            solution_id,
            &[plan_id],
        )?;
        find(
            &children(solution_id, &state.hardware_plans),
            plan_id,
            |p| p.id.as_str(),
            "hardware plan",
        )
    }

    async fn get_solution_hardware_plan_replicas(
        &self,
        solution_id: &str,
        plan_id: &str,
        _params: &ParameterList,
    ) -> Result<Vec<Replica>> {
        let state = self.enter_solution(
            format!("get_solution_hardware_plan_replicas {} {}", solution_id, plan_id),
            solution_id,
            &[plan_id],
        )?;
        find(
            &children(solution_id, &state.hardware_plans),
            plan_id,
            |p| p.id.as_str(),
            "hardware plan",
        )?;
        Ok(state.replicas.clone())
    }

    async fn reset_solution_replica_iops(
        &self,
        solution_id: &str,
        replica_id: &str,
        req: &ResetReplicaIopsRequest,
    ) -> Result<()> {
        let mut state = self.enter_solution(
            format!("reset_solution_replica_iops {} {}", solution_id, replica_id),
            solution_id,
            &[replica_id],
        )?;
        let limit = find(&state.iops_tiers, &req.iops_tier_id, |t| t.id.as_str(), "IOPS tier")?.iops_limit;
        let replica = state
            .replicas
            .iter_mut()
            .find(|r| r.id == replica_id)
            .ok_or_else(|| AnsError::NotFound(format!("replica {} does not exist", replica_id)))?;
        replica.iops = limit;
        Ok(())
    }

    async fn get_billing_types(&self, _params: &ParameterList) -> Result<Vec<BillingType>> {
        Ok(self
            .enter("get_billing_types".to_string(), &[])?
            .billing_types
            .clone())
    }

    async fn get_billing_type(&self, billing_type_id: &str) -> Result<BillingType> {
        let state = self.enter(
            format!("get_billing_type {}", billing_type_id),
            &[billing_type_id],
        )?;
        find(&state.billing_types, billing_type_id, |b| b.id.as_str(), "billing type")
    }

    async fn get_iops_tiers(&self, _params: &ParameterList) -> Result<Vec<IopsTier>> {
        Ok(self.enter("get_iops_tiers".to_string(), &[])?.iops_tiers.clone())
    }

    async fn get_iops_tier(&self, tier_id: &str) -> Result<IopsTier> {
        let state = self.enter(format!("get_iops_tier {}", tier_id), &[tier_id])?;
        find(&state.iops_tiers, tier_id, |t| t.id.as_str(), "IOPS tier")
    }
}

fn set_plan_status(state: &mut DraasState, solution_id: &str, plan_id: &str, status: &str) -> Result<()> {
    let plan = state
        .failover_plans
        .iter_mut()
        .find(|p| p.id == plan_id && solution_id == "s1")
        .ok_or_else(|| AnsError::NotFound(format!("failover plan {} does not exist", plan_id)))?;
    plan.status = status.to_string();
    Ok(())
}

// ─── mock HTTP API ─────────────────────────────────────────

/// Mock API server state
#[derive(Debug, Clone)]
pub struct MockApiState {
    zones: Arc<Mutex<Vec<Zone>>>,
    next_zone: Arc<AtomicUsize>,
    requests: Arc<AtomicUsize>,
    last_api_key: Arc<Mutex<Option<String>>>,
}

impl Default for MockApiState {
    fn default() -> Self {
        let zones = [("z1", "alpha.example"), ("z2", "beta.example"), ("z3", "gamma.example")]
            .iter()
            .map(|(id, name)| Zone {
                id: id.to_string(),
                account_id: "acc1".to_string(),
                name: name.to_string(),
                plan_subscription_id: "sub1".to_string(),
                description: String::new(),
                created_at: None,
                updated_at: None,
            })
            .collect();

        Self {
            zones: Arc::new(Mutex::new(zones)),
            next_zone: Arc::new(AtomicUsize::new(4)),
            requests: Arc::new(AtomicUsize::new(0)),
            last_api_key: Arc::new(Mutex::new(None)),
        }
    }
}

impl MockApiState {
    /// Number of requests received
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Authorization header of the most recent authenticated request
    pub fn last_api_key(&self) -> Option<String> {
        self.last_api_key.lock().unwrap().clone()
    }

    pub fn zone_count(&self) -> usize {
        self.zones.lock().unwrap().len()
    }
}

/// Mock API server implementation
///
/// Serves the Cloudflare zone endpoints, one zone per page.
#[derive(Debug)]
pub struct MockApiServer {
    state: MockApiState,
    port: u16,
}

impl Default for MockApiServer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApiServer {
    pub fn new() -> Self {
        Self {
            state: MockApiState::default(),
            port: 0,
        }
    }

    /// Start the mock server and return the address
    pub async fn start(mut self) -> anyhow::Result<(Self, String)> {
        let app = self.create_router();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        self.port = listener.local_addr()?.port();
        let server_url = format!("http://127.0.0.1:{}", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        for _ in 0..20 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Ok((self, server_url))
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &MockApiState {
        &self.state
    }

    fn create_router(&self) -> Router {
        Router::new()
            .route("/cloudflare/v1/zones", get(list_zones).post(create_zone))
            .route("/cloudflare/v1/zones/:id", get(get_zone).delete(delete_zone))
            .with_state(self.state.clone())
    }
}

type Reply = (StatusCode, Json<Value>);

fn error_reply(status: StatusCode, title: &str, detail: &str) -> Reply {
    (
        status,
        Json(json!({
            "errors": [{ "title": title, "detail": detail, "status": status.as_u16() }]
        })),
    )
}

fn authorize(state: &MockApiState, headers: &HeaderMap) -> std::result::Result<(), Reply> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(key) => {
            *state.last_api_key.lock().unwrap() = Some(key.to_string());
            Ok(())
        }
        None => Err(error_reply(
            StatusCode::UNAUTHORIZED,
            "Unauthorised",
            "Missing API key",
        )),
    }
}

async fn list_zones(
    State(state): State<MockApiState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> std::result::Result<Reply, Reply> {
    authorize(&state, &headers)?;

    let zones = state.zones.lock().unwrap();
    let matching: Vec<&Zone> = zones
        .iter()
        .filter(|z| query.get("name:eq").map_or(true, |name| &z.name == name))
        .collect();
    let page: usize = query
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .max(1);
    let data: Vec<Zone> = matching
        .get(page - 1)
        .map(|z| vec![(*z).clone()])
        .unwrap_or_default();

    let pagination = Pagination {
        total: matching.len() as u32,
        count: data.len() as u32,
        per_page: 1,
        current_page: page as u32,
        total_pages: matching.len().max(1) as u32,
    };
    Ok((
        StatusCode::OK,
        Json(json!(ApiResponse::paginated(data, pagination))),
    ))
}

async fn get_zone(
    State(state): State<MockApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> std::result::Result<Reply, Reply> {
    authorize(&state, &headers)?;

    let zones = state.zones.lock().unwrap();
    match zones.iter().find(|z| z.id == id) {
        Some(zone) => Ok((StatusCode::OK, Json(json!(ApiResponse::new(zone.clone()))))),
        None => Err(error_reply(StatusCode::NOT_FOUND, "Not Found", "Zone not found")),
    }
}

async fn create_zone(
    State(state): State<MockApiState>,
    headers: HeaderMap,
    Json(req): Json<CreateZoneRequest>,
) -> std::result::Result<Reply, Reply> {
    authorize(&state, &headers)?;

    if req.name.is_empty() {
        return Err(error_reply(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Validation Error",
            "name is required",
        ));
    }

    let id = format!("z{}", state.next_zone.fetch_add(1, Ordering::SeqCst));
    state.zones.lock().unwrap().push(Zone {
        id: id.clone(),
        account_id: req.account_id,
        name: req.name,
        plan_subscription_id: req.subscription_id,
        description: String::new(),
        created_at: None,
        updated_at: None,
    });

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "data": { "id": id },
            "meta": { "location": format!("/cloudflare/v1/zones/{}", id) }
        })),
    ))
}

async fn delete_zone(
    State(state): State<MockApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> std::result::Result<Reply, Reply> {
    authorize(&state, &headers)?;

    let mut zones = state.zones.lock().unwrap();
    let before = zones.len();
    zones.retain(|z| z.id != id);
    if zones.len() == before {
        return Err(error_reply(StatusCode::NOT_FOUND, "Not Found", "Zone not found"));
    }
    Ok((StatusCode::NO_CONTENT, Json(Value::Null)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_startup() {
        let (server, url) = MockApiServer::new().start().await.unwrap();
        assert!(server.port() > 0);
        assert!(url.starts_with("http://127.0.0.1:"));
        assert_eq!(server.state().zone_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_cloudflare_records_calls() {
        let mock = MockCloudflare::new().fail_on("z2");
        assert!(mock.get_zone("z1").await.is_ok());
        assert!(mock.get_zone("z2").await.is_err());
        assert!(matches!(
            mock.get_zone("z9").await,
            Err(AnsError::NotFound(_))
        ));
        assert_eq!(mock.calls(), vec!["get_zone z1", "get_zone z2", "get_zone z9"]);
    }

    #[tokio::test]
    async fn test_mock_draas_scopes_children_to_solution() {
        let mock = MockDraas::new();
        let plans = mock
            .get_solution_failover_plans("s1", &ParameterList::new())
            .await
            .unwrap();
        assert_eq!(plans.len(), 2);

        let plans = mock
            .get_solution_failover_plans("s2", &ParameterList::new())
            .await
            .unwrap();
        assert!(plans.is_empty());

        assert!(mock
            .get_solution_failover_plans("nope", &ParameterList::new())
            .await
            .is_err());
    }
}
