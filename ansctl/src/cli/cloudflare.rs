//! Cloudflare command handlers

use anyhow::{Context, Result};
use ans_core::cloudflare::{
    CreateAccountMemberRequest, CreateAccountRequest, CreateOrchestrationRequest,
    CreateZoneRequest, PatchAccountRequest, PatchZoneRequest,
};
use ans_core::CloudflareService;

use super::batch::{apply_each, fetch_each};
use super::commands::*;
use crate::format::{Output, Provider};

/// Dispatch a `cloudflare` subcommand
pub async fn handle_cloudflare<S>(
    service: &S,
    command: CloudflareCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: CloudflareService + ?Sized,
{
    match command {
        CloudflareCommands::Account { command } => handle_account(service, command, output).await,
        CloudflareCommands::Orchestration { command } => {
            handle_orchestration(service, command, output).await
        }
        CloudflareCommands::SpendPlan { command } => {
            handle_spend_plan(service, command, output).await
        }
        CloudflareCommands::Subscription { command } => {
            handle_subscription(service, command, output).await
        }
        CloudflareCommands::TotalSpend { command } => {
            handle_total_spend(service, command, output).await
        }
        CloudflareCommands::Zone { command } => handle_zone(service, command, output).await,
    }
}

async fn handle_account<S>(
    service: &S,
    command: AccountCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: CloudflareService + ?Sized,
{
    match command {
        AccountCommands::List(list) => {
            let params = list.parameters()?;
            let accounts = service
                .get_accounts(&params)
                .await
                .context("Error retrieving accounts")?;
            output.render(&Provider::new(accounts))?;
        }
        AccountCommands::Show { account_ids } => {
            let accounts = fetch_each(output, "account", &account_ids, |id| async move {
                service.get_account(&id).await
            })
            .await;
            output.render(&Provider::new(accounts))?;
        }
        AccountCommands::Create { name } => {
            let id = service
                .create_account(&CreateAccountRequest { name })
                .await
                .context("Error creating account")?;
            let account = service
                .get_account(&id)
                .await
                .with_context(|| format!("Error retrieving new account [{}]", id))?;
            output.render(&Provider::single(account))?;
        }
        AccountCommands::Update { account_ids, name } => {
            let req = &PatchAccountRequest { name };
            let updated = apply_each(output, "updating account", &account_ids, |id| async move {
                service.patch_account(&id, req).await
            })
            .await;
            let accounts = fetch_each(output, "updated account", &updated, |id| async move {
                service.get_account(&id).await
            })
            .await;
            output.render(&Provider::new(accounts))?;
        }
        AccountCommands::Member {
            command:
                AccountMemberCommands::Create {
                    account_id,
                    email_address,
                },
        } => {
            let req = CreateAccountMemberRequest {
                email_address: email_address.clone(),
            };
            service
                .create_account_member(&account_id, &req)
                .await
                .context("Error creating account member")?;
            output.success(&format!(
                "Added member {} to account {}",
                email_address, account_id
            ))?;
        }
    }

    Ok(())
}

async fn handle_orchestration<S>(
    service: &S,
    command: OrchestrationCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: CloudflareService + ?Sized,
{
    match command {
        OrchestrationCommands::Create {
            zone_name,
            zone_subscription_id,
            account_name,
            administrator_email_address,
        } => {
            let req = CreateOrchestrationRequest {
                zone_name,
                zone_subscription_id,
                account_name,
                administrator_email_address,
            };
            service
                .create_orchestration(&req)
                .await
                .context("Error creating orchestration")?;
            output.success(&format!("Orchestration started for zone {}", req.zone_name))?;
        }
    }

    Ok(())
}

async fn handle_spend_plan<S>(
    service: &S,
    command: SpendPlanCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: CloudflareService + ?Sized,
{
    match command {
        SpendPlanCommands::List(list) => {
            let params = list.parameters()?;
            let plans = service
                .get_spend_plans(&params)
                .await
                .context("Error retrieving spend plans")?;
            output.render(&Provider::new(plans))?;
        }
    }

    Ok(())
}

async fn handle_subscription<S>(
    service: &S,
    command: SubscriptionCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: CloudflareService + ?Sized,
{
    match command {
        SubscriptionCommands::List(list) => {
            let params = list.parameters()?;
            let subscriptions = service
                .get_subscriptions(&params)
                .await
                .context("Error retrieving subscriptions")?;
            output.render(&Provider::new(subscriptions))?;
        }
    }

    Ok(())
}

async fn handle_total_spend<S>(
    service: &S,
    command: TotalSpendCommands,
    output: &mut Output<'_>,
) -> Result<()>
where
    S: CloudflareService + ?Sized,
{
    match command {
        TotalSpendCommands::Show => {
            let spend = service
                .get_total_spend_month_to_date()
                .await
                .context("Error retrieving total spend")?;
            output.render(&Provider::single(spend))?;
        }
    }

    Ok(())
}

async fn handle_zone<S>(service: &S, command: ZoneCommands, output: &mut Output<'_>) -> Result<()>
where
    S: CloudflareService + ?Sized,
{
    match command {
        ZoneCommands::List(list) => {
            let params = list.parameters()?;
            let zones = service
                .get_zones(&params)
                .await
                .context("Error retrieving zones")?;
            output.render(&Provider::new(zones))?;
        }
        ZoneCommands::Show { zone_ids } => {
            let zones = fetch_each(output, "zone", &zone_ids, |id| async move {
                service.get_zone(&id).await
            })
            .await;
            output.render(&Provider::new(zones))?;
        }
        ZoneCommands::Create {
            account_id,
            name,
            subscription_id,
        } => {
            let req = CreateZoneRequest {
                account_id,
                name,
                subscription_id,
            };
            let id = service
                .create_zone(&req)
                .await
                .context("Error creating zone")?;
            let zone = service
                .get_zone(&id)
                .await
                .with_context(|| format!("Error retrieving new zone [{}]", id))?;
            output.render(&Provider::single(zone))?;
        }
        ZoneCommands::Update {
            zone_ids,
            plan_subscription_id,
        } => {
            let req = &PatchZoneRequest {
                plan_subscription_id,
            };
            let updated = apply_each(output, "updating zone", &zone_ids, |id| async move {
                service.patch_zone(&id, req).await
            })
            .await;
            let zones = fetch_each(output, "updated zone", &updated, |id| async move {
                service.get_zone(&id).await
            })
            .await;
            output.render(&Provider::new(zones))?;
        }
        ZoneCommands::Delete { zone_ids } => {
            let deleted = apply_each(output, "removing zone", &zone_ids, |id| async move {
                service.delete_zone(&id).await
            })
            .await;
            for id in deleted {
                output.success(&format!("Deleted zone {}", id))?;
            }
        }
    }

    Ok(())
}
