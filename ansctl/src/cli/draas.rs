//! DRaaS command handlers

use anyhow::{Context, Result};
use ans_core::draas::{
    ComputeResource, HardwarePlan, PatchSolutionRequest, ResetBackupServiceCredentialsRequest,
    ResetReplicaIopsRequest, StartFailoverPlanRequest,
};
use ans_core::{AnsError, DraasService, Fields};
use chrono::{DateTime, Utc};

use super::batch::{apply_each, fetch_each};
use super::commands::*;
use crate::format::{Output, Provider};

/// Dispatch a `draas` subcommand
pub async fn handle_draas<S>(
    service: &S,
    command: DraasCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: DraasService + ?Sized,
{
    match command {
        DraasCommands::Solution { command } => handle_solution(service, command, output).await,
        DraasCommands::BillingType { command } => {
            handle_billing_type(service, command, output).await
        }
        DraasCommands::IopsTier { command } => handle_iops_tier(service, command, output).await,
    }
}

/// Compute resources with their storage entries flattened into
/// `storage_<n>_name`, `storage_<n>_used_gb` and `storage_<n>_limit_gb`.
pub fn compute_resource_provider(resources: Vec<ComputeResource>) -> Provider<ComputeResource> {
    Provider::new(resources).with_extractor(|resource| {
        let mut set = resource.fields();
        set.mark_defaults(ComputeResource::DEFAULT_COLUMNS);
        for (index, storage) in resource.storage.iter().enumerate() {
            let prefix = format!("storage_{}", index + 1);
            set.add_default(format!("{}_name", prefix), &storage.name)
                .add_default(format!("{}_used_gb", prefix), storage.used_gb)
                .add_default(format!("{}_limit_gb", prefix), storage.limit_gb);
        }
        set
    })
}

/// Hardware plans with networks and storage flattened into columns.
pub fn hardware_plan_provider(plans: Vec<HardwarePlan>) -> Provider<HardwarePlan> {
    Provider::new(plans).with_extractor(|plan| {
        let mut set = plan.fields();
        set.mark_defaults(HardwarePlan::DEFAULT_COLUMNS);
        set.add_default("networks_public", plan.networks.public)
            .add_default("networks_private", plan.networks.private);
        for (index, storage) in plan.storage.iter().enumerate() {
            let prefix = format!("storage_{}", index + 1);
            set.add(format!("{}_id", prefix), &storage.id)
                .add_default(format!("{}_name", prefix), &storage.name)
                .add(format!("{}_type", prefix), &storage.storage_type)
                .add_default(format!("{}_quota", prefix), storage.quota);
        }
        set
    })
}

fn parse_start_date(value: Option<&str>) -> ans_core::Result<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|date| date.with_timezone(&Utc))
                .map_err(|e| {
                    AnsError::invalid_flag(
                        "start-date",
                        format!("expected an RFC 3339 timestamp, got '{}': {}", raw, e),
                    )
                })
        })
        .transpose()
}

async fn handle_solution<S>(
    service: &S,
    command: SolutionCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: DraasService + ?Sized,
{
    match command {
        SolutionCommands::List(list) => {
            let params = list.parameters()?;
            let solutions = service
                .get_solutions(&params)
                .await
                .context("Error retrieving solutions")?;
            output.render(&Provider::new(solutions))?;
        }
        SolutionCommands::Show { solution_ids } => {
            let solutions = fetch_each(output, "solution", &solution_ids, |id| async move {
                service.get_solution(&id).await
            })
            .await;
            output.render(&Provider::new(solutions))?;
        }
        SolutionCommands::Update {
            solution_ids,
            name,
            iops_tier_id,
        } => {
            let req = &PatchSolutionRequest { name, iops_tier_id };
            let updated = apply_each(output, "updating solution", &solution_ids, |id| async move {
                service.patch_solution(&id, req).await
            })
            .await;
            let solutions = fetch_each(output, "updated solution", &updated, |id| async move {
                service.get_solution(&id).await
            })
            .await;
            output.render(&Provider::new(solutions))?;
        }
        SolutionCommands::BackupResource { command } => {
            handle_backup_resource(service, command, output).await?
        }
        SolutionCommands::BackupService { command } => {
            handle_backup_service(service, command, output).await?
        }
        SolutionCommands::FailoverPlan { command } => {
            handle_failover_plan(service, command, output).await?
        }
        SolutionCommands::ComputeResource { command } => {
            handle_compute_resource(service, command, output).await?
        }
        SolutionCommands::HardwarePlan { command } => {
            handle_hardware_plan(service, command, output).await?
        }
        SolutionCommands::Replica { command } => handle_replica(service, command, output).await?,
    }

    Ok(())
}

async fn handle_backup_resource<S>(
    service: &S,
    command: BackupResourceCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: DraasService + ?Sized,
{
    match command {
        BackupResourceCommands::List { solution_id, list } => {
            let params = list.parameters()?;
            let resources = service
                .get_solution_backup_resources(&solution_id, &params)
                .await
                .context("Error retrieving solution backup resources")?;
            output.render(&Provider::new(resources))?;
        }
    }

    Ok(())
}

async fn handle_backup_service<S>(
    service: &S,
    command: BackupServiceCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: DraasService + ?Sized,
{
    match command {
        BackupServiceCommands::Show { solution_id } => {
            let backup = service
                .get_solution_backup_service(&solution_id)
                .await
                .context("Error retrieving solution backup service")?;
            output.render(&Provider::single(backup))?;
        }
        BackupServiceCommands::ResetCredentials {
            solution_id,
            password,
        } => {
            service
                .reset_solution_backup_service_credentials(
                    &solution_id,
                    &ResetBackupServiceCredentialsRequest { password },
                )
                .await
                .context("Error resetting solution backup service credentials")?;
            output.success(&format!(
                "Reset backup service credentials for solution {}",
                solution_id
            ))?;
        }
    }

    Ok(())
}

async fn handle_failover_plan<S>(
    service: &S,
    command: FailoverPlanCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: DraasService + ?Sized,
{
    match command {
        FailoverPlanCommands::List { solution_id, list } => {
            let params = list.parameters()?;
            let plans = service
                .get_solution_failover_plans(&solution_id, &params)
                .await
                .context("Error retrieving solution failover plans")?;
            output.render(&Provider::new(plans))?;
        }
        FailoverPlanCommands::Show {
            solution_id,
            plan_ids,
        } => {
            let solution_id = solution_id.as_str();
            let plans = fetch_each(output, "failover plan", &plan_ids, |id| async move {
                service.get_solution_failover_plan(solution_id, &id).await
            })
            .await;
            output.render(&Provider::new(plans))?;
        }
        FailoverPlanCommands::Start {
            solution_id,
            plan_ids,
            start_date,
        } => {
            let req = &StartFailoverPlanRequest {
                start_date: parse_start_date(start_date.as_deref())?,
            };
            let solution_id = solution_id.as_str();
            let started = apply_each(output, "starting failover plan", &plan_ids, |id| async move {
                service
                    .start_solution_failover_plan(solution_id, &id, req)
                    .await
            })
            .await;
            for id in started {
                output.success(&format!("Started failover plan {}", id))?;
            }
        }
        FailoverPlanCommands::Stop {
            solution_id,
            plan_ids,
        } => {
            let solution_id = solution_id.as_str();
            let stopped = apply_each(output, "stopping failover plan", &plan_ids, |id| async move {
                service.stop_solution_failover_plan(solution_id, &id).await
            })
            .await;
            for id in stopped {
                output.success(&format!("Stopped failover plan {}", id))?;
            }
        }
    }

    Ok(())
}

async fn handle_compute_resource<S>(
    service: &S,
    command: ComputeResourceCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: DraasService + ?Sized,
{
    match command {
        ComputeResourceCommands::List { solution_id, list } => {
            let params = list.parameters()?;
            let resources = service
                .get_solution_compute_resources(&solution_id, &params)
                .await
                .context("Error retrieving solution compute resources")?;
            output.render(&compute_resource_provider(resources))?;
        }
        ComputeResourceCommands::Show {
            solution_id,
            resource_ids,
        } => {
            let solution_id = solution_id.as_str();
            let resources =
                fetch_each(output, "compute resource", &resource_ids, |id| async move {
                    service
                        .get_solution_compute_resource(solution_id, &id)
                        .await
                })
                .await;
            output.render(&compute_resource_provider(resources))?;
        }
    }

    Ok(())
}

async fn handle_hardware_plan<S>(
    service: &S,
    command: HardwarePlanCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: DraasService + ?Sized,
{
    match command {
        HardwarePlanCommands::List { solution_id, list } => {
            let params = list.parameters()?;
            let plans = service
                .get_solution_hardware_plans(&solution_id, &params)
                .await
                .context("Error retrieving solution hardware plans")?;
            output.render(&hardware_plan_provider(plans))?;
        }
        HardwarePlanCommands::Show {
            solution_id,
            plan_ids,
        } => {
            let solution_id = solution_id.as_str();
            let plans = fetch_each(output, "hardware plan", &plan_ids, |id| async move {
                service.get_solution_hardware_plan(solution_id, &id).await
            })
            .await;
            output.render(&hardware_plan_provider(plans))?;
        }
    }

    Ok(())
}

async fn handle_replica<S>(
    service: &S,
    command: ReplicaCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: DraasService + ?Sized,
{
    match command {
        ReplicaCommands::List {
            solution_id,
            hardware_plan_id,
            list,
        } => {
            let params = list.parameters()?;
            let replicas = service
                .get_solution_hardware_plan_replicas(&solution_id, &hardware_plan_id, &params)
                .await
                .context("Error retrieving solution hardware plan replicas")?;
            output.render(&Provider::new(replicas))?;
        }
        ReplicaCommands::ResetIops {
            solution_id,
            replica_ids,
            iops_tier_id,
        } => {
            let req = &ResetReplicaIopsRequest { iops_tier_id };
            let solution_id = solution_id.as_str();
            let reset = apply_each(output, "resetting replica IOPS", &replica_ids, |id| async move {
                service
                    .reset_solution_replica_iops(solution_id, &id, req)
                    .await
            })
            .await;
            for id in reset {
                output.success(&format!("Reset IOPS for replica {}", id))?;
            }
        }
    }

    Ok(())
}

async fn handle_billing_type<S>(
    service: &S,
    command: BillingTypeCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: DraasService + ?Sized,
{
    match command {
        BillingTypeCommands::List(list) => {
            let params = list.parameters()?;
            let types = service
                .get_billing_types(&params)
                .await
                .context("Error retrieving billing types")?;
            output.render(&Provider::new(types))?;
        }
        BillingTypeCommands::Show { billing_type_ids } => {
            let types = fetch_each(output, "billing type", &billing_type_ids, |id| async move {
                service.get_billing_type(&id).await
            })
            .await;
            output.render(&Provider::new(types))?;
        }
    }

    Ok(())
}

async fn handle_iops_tier<S>(
    service: &S,
    command: IopsTierCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: DraasService + ?Sized,
{
    match command {
        IopsTierCommands::List(list) => {
            let params = list.parameters()?;
            let tiers = service
                .get_iops_tiers(&params)
                .await
                .context("Error retrieving IOPS tiers")?;
            output.render(&Provider::new(tiers))?;
        }
        IopsTierCommands::Show { tier_ids } => {
            let tiers = fetch_each(output, "IOPS tier", &tier_ids, |id| async move {
                service.get_iops_tier(&id).await
            })
            .await;
            output.render(&Provider::new(tiers))?;
        }
    }

    Ok(())
}
