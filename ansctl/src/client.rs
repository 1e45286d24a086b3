//! HTTP client for the ANS APIs.
//!
//! [`AnsClient`] implements every service trait from `ans-core` over the REST
//! API. Each call is a single attempt; list calls walk the pages in order.

use anyhow::{Context, Result};
use ans_core::api::{ApiResponse, CreatedResource, ErrorResponse};
use ans_core::cloudflare::{
    Account, CreateAccountMemberRequest, CreateAccountRequest, CreateOrchestrationRequest,
    CreateZoneRequest, PatchAccountRequest, PatchZoneRequest, SpendPlan, Subscription,
    TotalSpend, Zone,
};
use ans_core::draas::{
    BackupResource, BackupService, BillingType, ComputeResource, FailoverPlan, HardwarePlan,
    IopsTier, PatchSolutionRequest, Replica, ResetBackupServiceCredentialsRequest,
    ResetReplicaIopsRequest, Solution, StartFailoverPlanRequest,
};
use ans_core::{AnsError, CloudflareService, DraasService, ParameterList};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const CLOUDFLARE_BASE: &str = "/cloudflare/v1";
const DRAAS_BASE: &str = "/draas/v1";

/// Items requested per page on list calls
const PAGE_SIZE: u32 = 100;

/// Normalize an API URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Percent-encode an identifier for use as a path segment.
fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// HTTP client for the ANS REST APIs.
///
/// # Examples
///
/// ```no_run
/// use ans_core::{CloudflareService, ParameterList};
/// use ansctl::client::AnsClient;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = AnsClient::new("https://api.ukfast.io", "my-api-key", 30)?;
/// let zones = client.get_zones(&ParameterList::new()).await?;
/// println!("{} zones", zones.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AnsClient {
    client: Client,
    base_url: String,
}

impl AnsClient {
    /// Create a client sending `api_key` with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn new(api_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if !api_key.is_empty() {
            let mut value =
                HeaderValue::from_str(api_key).context("API key is not a valid header value")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("ansctl/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: normalize_url(api_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a response into its body text, mapping failure statuses to errors.
    async fn handle_response(response: Response, endpoint: &str) -> ans_core::Result<String> {
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AnsError::Http(format!("Failed to read response body from {}: {}", endpoint, e))
        })?;

        if status.is_success() {
            return Ok(text);
        }

        let detail = serde_json::from_str::<ErrorResponse>(&text)
            .map(|body| body.describe())
            .ok()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| text.trim().to_string());

        Err(match status {
            StatusCode::NOT_FOUND => AnsError::NotFound(if detail.is_empty() {
                endpoint.to_string()
            } else {
                detail
            }),
            StatusCode::UNAUTHORIZED => AnsError::Api {
                status: status.as_u16(),
                message: format!("Unauthorized access to {}, check the API key", endpoint),
            },
            _ => AnsError::Api {
                status: status.as_u16(),
                message: if detail.is_empty() {
                    format!("HTTP {} at {}", status, endpoint)
                } else {
                    detail
                },
            },
        })
    }

    async fn send<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> ans_core::Result<String>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(method = %method, url = %url, "sending request");

        let mut request = self.client.request(method, &url).query(query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AnsError::Http(format!("Failed to reach {}: {}", endpoint, e)))?;
        Self::handle_response(response, endpoint).await
    }

    fn parse<T: DeserializeOwned>(text: &str, endpoint: &str) -> ans_core::Result<ApiResponse<T>> {
        serde_json::from_str(text).map_err(|e| {
            AnsError::Serialization(format!(
                "Failed to parse JSON response from {}: {}",
                endpoint, e
            ))
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ans_core::Result<T> {
        let text = self.send::<()>(Method::GET, endpoint, &[], None).await?;
        Ok(Self::parse::<T>(&text, endpoint)?.data)
    }

    /// Fetch every page of a list endpoint.
    async fn get_all<T: DeserializeOwned + Send>(
        &self,
        endpoint: &str,
        params: &ParameterList,
    ) -> ans_core::Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1u32;
        loop {
            let mut query = params.query_pairs();
            query.push(("page".to_string(), page.to_string()));
            query.push(("per_page".to_string(), PAGE_SIZE.to_string()));

            let text = self.send::<()>(Method::GET, endpoint, &query, None).await?;
            let response = Self::parse::<Vec<T>>(&text, endpoint)?;
            let fetched = response.data.len();
            items.extend(response.data);

            match response.meta.pagination {
                Some(pagination) if !pagination.is_last_page() && fetched > 0 => page += 1,
                _ => break,
            }
        }
        Ok(items)
    }

    async fn create<B: Serialize + Sync>(&self, endpoint: &str, body: &B) -> ans_core::Result<String> {
        let text = self.send(Method::POST, endpoint, &[], Some(body)).await?;
        Ok(Self::parse::<CreatedResource>(&text, endpoint)?.data.id)
    }

    async fn post<B: Serialize + Sync>(&self, endpoint: &str, body: Option<&B>) -> ans_core::Result<()> {
        self.send(Method::POST, endpoint, &[], body).await.map(|_| ())
    }

    async fn patch<B: Serialize + Sync>(&self, endpoint: &str, body: &B) -> ans_core::Result<()> {
        self.send(Method::PATCH, endpoint, &[], Some(body))
            .await
            .map(|_| ())
    }

    async fn delete(&self, endpoint: &str) -> ans_core::Result<()> {
        self.send::<()>(Method::DELETE, endpoint, &[], None)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl CloudflareService for AnsClient {
    async fn get_accounts(&self, params: &ParameterList) -> ans_core::Result<Vec<Account>> {
        self.get_all(&format!("{}/accounts", CLOUDFLARE_BASE), params)
            .await
    }

    async fn get_account(&self, account_id: &str) -> ans_core::Result<Account> {
        self.get(&format!("{}/accounts/{}", CLOUDFLARE_BASE, segment(account_id)))
            .await
    }

    async fn create_account(&self, req: &CreateAccountRequest) -> ans_core::Result<String> {
        self.create(&format!("{}/accounts", CLOUDFLARE_BASE), req)
            .await
    }

    async fn patch_account(
        &self,
        account_id: &str,
        req: &PatchAccountRequest,
    ) -> ans_core::Result<()> {
        self.patch(
            &format!("{}/accounts/{}", CLOUDFLARE_BASE, segment(account_id)),
            req,
        )
        .await
    }

    async fn create_account_member(
        &self,
        account_id: &str,
        req: &CreateAccountMemberRequest,
    ) -> ans_core::Result<()> {
        self.post(
            &format!("{}/accounts/{}/members", CLOUDFLARE_BASE, segment(account_id)),
            Some(req),
        )
        .await
    }

    async fn create_orchestration(&self, req: &CreateOrchestrationRequest) -> ans_core::Result<()> {
        self.post(&format!("{}/orchestrator", CLOUDFLARE_BASE), Some(req))
            .await
    }

    async fn get_spend_plans(&self, params: &ParameterList) -> ans_core::Result<Vec<SpendPlan>> {
        self.get_all(&format!("{}/spend-plans", CLOUDFLARE_BASE), params)
            .await
    }

    async fn get_subscriptions(
        &self,
        params: &ParameterList,
    ) -> ans_core::Result<Vec<Subscription>> {
        self.get_all(&format!("{}/subscriptions", CLOUDFLARE_BASE), params)
            .await
    }

    async fn get_total_spend_month_to_date(&self) -> ans_core::Result<TotalSpend> {
        self.get(&format!("{}/total-spend/month-to-date", CLOUDFLARE_BASE))
            .await
    }

    async fn get_zones(&self, params: &ParameterList) -> ans_core::Result<Vec<Zone>> {
        self.get_all(&format!("{}/zones", CLOUDFLARE_BASE), params)
            .await
    }

    async fn get_zone(&self, zone_id: &str) -> ans_core::Result<Zone> {
        self.get(&format!("{}/zones/{}", CLOUDFLARE_BASE, segment(zone_id)))
            .await
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> ans_core::Result<String> {
        self.create(&format!("{}/zones", CLOUDFLARE_BASE), req).await
    }

    async fn patch_zone(&self, zone_id: &str, req: &PatchZoneRequest) -> ans_core::Result<()> {
        self.patch(&format!("{}/zones/{}", CLOUDFLARE_BASE, segment(zone_id)), req)
            .await
    }

    async fn delete_zone(&self, zone_id: &str) -> ans_core::Result<()> {
        self.delete(&format!("{}/zones/{}", CLOUDFLARE_BASE, segment(zone_id)))
            .await
    }
}

#[async_trait]
impl DraasService for AnsClient {
    async fn get_solutions(&self, params: &ParameterList) -> ans_core::Result<Vec<Solution>> {
        self.get_all(&format!("{}/solutions", DRAAS_BASE), params)
            .await
    }

    async fn get_solution(&self, solution_id: &str) -> ans_core::Result<Solution> {
        self.get(&format!("{}/solutions/{}", DRAAS_BASE, segment(solution_id)))
            .await
    }

    async fn patch_solution(
        &self,
        solution_id: &str,
        req: &PatchSolutionRequest,
    ) -> ans_core::Result<()> {
        self.patch(
            &format!("{}/solutions/{}", DRAAS_BASE, segment(solution_id)),
            req,
        )
        .await
    }

    async fn get_solution_backup_resources(
        &self,
        solution_id: &str,
        params: &ParameterList,
    ) -> ans_core::Result<Vec<BackupResource>> {
        self.get_all(
            &format!(
                "{}/solutions/{}/backup-resources",
                DRAAS_BASE,
                segment(solution_id)
            ),
            params,
        )
        .await
    }

    async fn get_solution_backup_service(
        &self,
        solution_id: &str,
    ) -> ans_core::Result<BackupService> {
        self.get(&format!(
            "{}/solutions/{}/backup-service",
            DRAAS_BASE,
            segment(solution_id)
        ))
        .await
    }

    async fn reset_solution_backup_service_credentials(
        &self,
        solution_id: &str,
        req: &ResetBackupServiceCredentialsRequest,
    ) -> ans_core::Result<()> {
        self.post(
            &format!(
                "{}/solutions/{}/backup-service/reset-credentials",
                DRAAS_BASE,
                segment(solution_id)
            ),
            Some(req),
        )
        .await
    }

    async fn get_solution_failover_plans(
        &self,
        solution_id: &str,
        params: &ParameterList,
    ) -> ans_core::Result<Vec<FailoverPlan>> {
        self.get_all(
            &format!(
                "{}/solutions/{}/failover-plans",
                DRAAS_BASE,
                segment(solution_id)
            ),
            params,
        )
        .await
    }

    async fn get_solution_failover_plan(
        &self,
        solution_id: &str,
        plan_id: &str,
    ) -> ans_core::Result<FailoverPlan> {
        self.get(&format!(
            "{}/solutions/{}/failover-plans/{}",
            DRAAS_BASE,
            segment(solution_id),
            segment(plan_id)
        ))
        .await
    }

    async fn start_solution_failover_plan(
        &self,
        solution_id: &str,
        plan_id: &str,
        req: &StartFailoverPlanRequest,
    ) -> ans_core::Result<()> {
        self.post(
            &format!(
                "{}/solutions/{}/failover-plans/{}/start",
                DRAAS_BASE,
                segment(solution_id),
                segment(plan_id)
            ),
            Some(req),
        )
        .await
    }

    async fn stop_solution_failover_plan(
        &self,
        solution_id: &str,
        plan_id: &str,
    ) -> ans_core::Result<()> {
        self.post::<()>(
            &format!(
                "{}/solutions/{}/failover-plans/{}/stop",
                DRAAS_BASE,
                segment(solution_id),
                segment(plan_id)
            ),
            None,
        )
        .await
    }

    async fn get_solution_compute_resources(
        &self,
        solution_id: &str,
        params: &ParameterList,
    ) -> ans_core::Result<Vec<ComputeResource>> {
        self.get_all(
            &format!(
                "{}/solutions/{}/compute-resources",
                DRAAS_BASE,
                segment(solution_id)
            ),
            params,
        )
        .await
    }

    async fn get_solution_compute_resource(
        &self,
        solution_id: &str,
        resource_id: &str,
    ) -> ans_core::Result<ComputeResource> {
        self.get(&format!(
            "{}/solutions/{}/compute-resources/{}",
            DRAAS_BASE,
            segment(solution_id),
            segment(resource_id)
        ))
        .await
    }

    async fn get_solution_hardware_plans(
        &self,
        solution_id: &str,
        params: &ParameterList,
    ) -> ans_core::Result<Vec<HardwarePlan>> {
        self.get_all(
            &format!(
                "{}/solutions/{}/hardware-plans",
                DRAAS_BASE,
                segment(solution_id)
            ),
            params,
        )
        .await
    }

    async fn get_solution_hardware_plan(
        &self,
        solution_id: &str,
        plan_id: &str,
    ) -> ans_core::Result<HardwarePlan> {
        self.get(&format!(
            "{}/solutions/{}/hardware-plans/{}",
            DRAAS_BASE,
            segment(solution_id),
            segment(plan_id)
        ))
        .await
    }

    async fn get_solution_hardware_plan_replicas(
        &self,
        solution_id: &str,
        plan_id: &str,
        params: &ParameterList,
    ) -> ans_core::Result<Vec<Replica>> {
        self.get_all(
            &format!(
                "{}/solutions/{}/hardware-plans/{}/replicas",
                DRAAS_BASE,
                segment(solution_id),
                segment(plan_id)
            ),
            params,
        )
        .await
    }

    async fn reset_solution_replica_iops(
        &self,
        solution_id: &str,
        replica_id: &str,
        req: &ResetReplicaIopsRequest,
    ) -> ans_core::Result<()> {
        self.post(
            &format!(
                "{}/solutions/{}/replicas/{}/reset-iops",
                DRAAS_BASE,
                segment(solution_id),
                segment(replica_id)
            ),
            Some(req),
        )
        .await
    }

    async fn get_billing_types(&self, params: &ParameterList) -> ans_core::Result<Vec<BillingType>> {
        self.get_all(&format!("{}/billing-types", DRAAS_BASE), params)
            .await
    }

    async fn get_billing_type(&self, billing_type_id: &str) -> ans_core::Result<BillingType> {
        self.get(&format!(
            "{}/billing-types/{}",
            DRAAS_BASE,
            segment(billing_type_id)
        ))
        .await
    }

    async fn get_iops_tiers(&self, params: &ParameterList) -> ans_core::Result<Vec<IopsTier>> {
        self.get_all(&format!("{}/iops-tiers", DRAAS_BASE), params)
            .await
    }

    async fn get_iops_tier(&self, tier_id: &str) -> ans_core::Result<IopsTier> {
        self.get(&format!("{}/iops-tiers/{}", DRAAS_BASE, segment(tier_id)))
            .await
    }
}
