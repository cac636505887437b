//! `jobsuite estimates` — cached estimate reads.

use std::time::Duration;

use jobsuite_cache::EntityKind;
use jobsuite_core::Estimate;

use crate::cli::EstimatesAction;
use crate::commands::print_json;
use crate::context::AppContext;

pub async fn handle(action: &EstimatesAction, ctx: AppContext) -> anyhow::Result<()> {
    let store = ctx.cache_store();
    let ttl = Duration::from_secs(ctx.config.cache.expiration_secs);

    match action {
        EstimatesAction::List { status, client_id } => {
            if store.is_stale(EntityKind::Estimates, ttl) {
                let engine = ctx.refresh_engine(store.clone()).await?;
                engine.refresh_now(EntityKind::Estimates).await?;
            }
            let estimates: Vec<Estimate> = store
                .estimates(EntityKind::Estimates)
                .into_iter()
                .filter(|e| status.as_deref().is_none_or(|s| e.status.as_str() == s))
                .filter(|e| {
                    client_id
                        .as_deref()
                        .is_none_or(|c| e.client_id.as_deref() == Some(c))
                })
                .collect();
            print_json(&estimates)
        }
        EstimatesAction::Get { id } => {
            if let Some(estimate) = store.estimate_by_id(EntityKind::Estimates, id) {
                return print_json(&estimate);
            }
            // Cache miss: fetch directly and keep the record for next time.
            let token = ctx.token()?;
            let contractor_id = ctx.contractor_id(&token).await?;
            let value = ctx.backend.get_estimate(&token, &contractor_id, id).await?;
            if let Ok(estimate) = serde_json::from_value::<Estimate>(value.0.clone()) {
                store.upsert_estimate(EntityKind::Estimates, estimate);
            }
            print_json(&value.0)
        }
    }
}
