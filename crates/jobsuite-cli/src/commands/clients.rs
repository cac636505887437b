//! `jobsuite clients` — cached client reads.

use std::time::Duration;

use jobsuite_cache::EntityKind;

use crate::cli::ClientsAction;
use crate::commands::print_json;
use crate::context::AppContext;

pub async fn handle(action: &ClientsAction, ctx: AppContext) -> anyhow::Result<()> {
    match action {
        ClientsAction::List { search: Some(term) } => {
            // Search hits the upstream; the cache has no text index.
            let token = ctx.token()?;
            let contractor_id = ctx.contractor_id(&token).await?;
            let body = ctx
                .backend
                .list_clients(&token, &contractor_id, Some(term.as_str()))
                .await?;
            print_json(&body)
        }
        ClientsAction::List { search: None } => {
            let store = ctx.cache_store();
            let ttl = Duration::from_secs(ctx.config.cache.expiration_secs);
            if store.is_stale(EntityKind::Clients, ttl) {
                let engine = ctx.refresh_engine(store.clone()).await?;
                engine.refresh_now(EntityKind::Clients).await?;
            }
            print_json(&store.clients())
        }
    }
}
