//! `jobsuite serve` — run the gateway.

use std::sync::Arc;
use std::time::Duration;

use jobsuite_gateway::AppState;

use crate::cli::ServeArgs;
use crate::context::AppContext;

pub async fn handle(args: &ServeArgs, ctx: AppContext) -> anyhow::Result<()> {
    // Stale slices refetch in the background for as long as the gateway
    // runs. The loops need stored credentials; without them the gateway
    // still serves, it just proxies everything live.
    let mut background = Vec::new();
    match ctx.refresh_engine(ctx.cache_store()).await {
        Ok(engine) => {
            engine.activity().set_foreground(true);
            background = engine.spawn();
            let activity = Arc::clone(engine.activity());
            // A served session counts as continuously active.
            background.push(tokio::spawn(async move {
                let mut tick = tokio::time::interval(Duration::from_secs(60));
                loop {
                    tick.tick().await;
                    activity.touch();
                }
            }));
        }
        Err(error) => {
            tracing::warn!(%error, "background cache refresh disabled");
        }
    }

    let mut config = ctx.config;
    if let Some(host) = &args.host {
        config.gateway.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.gateway.port = port;
    }

    let state = AppState::from_config(config);
    let served = jobsuite_gateway::serve(Arc::new(state)).await;

    for handle in background {
        handle.abort();
    }
    served?;
    Ok(())
}
