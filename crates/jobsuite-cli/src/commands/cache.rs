//! `jobsuite cache` — snapshot inspection and control.

use std::time::Duration;

use jobsuite_cache::EntityKind;
use serde::Serialize;

use crate::cli::CacheAction;
use crate::commands::print_json;
use crate::context::AppContext;

#[derive(Serialize)]
struct KindReport {
    kind: &'static str,
    entries: usize,
    last_fetched: Option<String>,
    stale: bool,
}

pub async fn handle(action: &CacheAction, ctx: AppContext) -> anyhow::Result<()> {
    let store = ctx.cache_store();
    match action {
        CacheAction::Show => {
            let ttl = Duration::from_secs(ctx.config.cache.expiration_secs);
            let report: Vec<KindReport> = EntityKind::ALL
                .into_iter()
                .map(|kind| KindReport {
                    kind: kind.as_str(),
                    entries: store.len(kind),
                    last_fetched: store.last_fetched(kind).map(|at| at.to_rfc3339()),
                    stale: store.is_stale(kind, ttl),
                })
                .collect();
            print_json(&report)
        }
        CacheAction::Clear => {
            store.clear()?;
            print_json(&serde_json::json!({ "cleared": true }))
        }
        CacheAction::Refresh { kind } => {
            let engine = ctx.refresh_engine(store).await?;
            match kind.as_deref() {
                Some(name) => {
                    let kind: EntityKind =
                        name.parse().map_err(|e: String| anyhow::anyhow!(e))?;
                    engine.refresh_now(kind).await?;
                }
                None => engine.refresh_all().await?,
            }
            let ttl = Duration::from_secs(ctx.config.cache.expiration_secs);
            let store = engine.store();
            let report: Vec<KindReport> = EntityKind::ALL
                .into_iter()
                .map(|kind| KindReport {
                    kind: kind.as_str(),
                    entries: store.len(kind),
                    last_fetched: store.last_fetched(kind).map(|at| at.to_rfc3339()),
                    stale: store.is_stale(kind, ttl),
                })
                .collect();
            print_json(&report)
        }
    }
}
