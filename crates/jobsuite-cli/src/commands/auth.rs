//! `jobsuite auth` — credential management.

use anyhow::Context as _;
use jobsuite_auth::{ServiceLogin, TokenClaims, token_store};
use serde::Serialize;

use crate::cli::AuthAction;
use crate::commands::print_json;
use crate::context::AppContext;

#[derive(Serialize)]
struct LoginReport {
    authenticated: bool,
    token_source: Option<String>,
    expires_at: Option<String>,
}

#[derive(Serialize)]
struct StatusReport {
    authenticated: bool,
    token_source: Option<String>,
    subject: Option<String>,
    expires_at: Option<String>,
    expired: bool,
}

pub async fn handle(action: &AuthAction, ctx: AppContext) -> anyhow::Result<()> {
    match action {
        AuthAction::Login { email, password } => login(email.as_deref(), password.as_deref(), &ctx).await,
        AuthAction::Logout => {
            jobsuite_auth::logout()?;
            print_json(&serde_json::json!({ "logged_out": true }))
        }
        AuthAction::Status => status(),
    }
}

async fn login(
    email: Option<&str>,
    password: Option<&str>,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    let email = email
        .map(ToString::to_string)
        .or_else(|| (!ctx.config.auth.email.is_empty()).then(|| ctx.config.auth.email.clone()))
        .context("no email: pass --email or set auth.email in config")?;
    let password = password
        .map(ToString::to_string)
        .or_else(|| {
            (!ctx.config.auth.password.is_empty()).then(|| ctx.config.auth.password.clone())
        })
        .context("no password: pass --password or set auth.password in config")?;

    let login = ServiceLogin::new(
        ctx.http.clone(),
        ctx.config.backend.resolved_base_url(),
        email,
        password,
    );
    let token = login.login().await?;
    token_store::save(&token)?;

    let expires_at = TokenClaims::decode_unverified(&token)
        .ok()
        .and_then(|claims| claims.expires_at())
        .map(|at| at.to_rfc3339());
    print_json(&LoginReport {
        authenticated: true,
        token_source: token_store::detect_source().map(|source| source.to_string()),
        expires_at,
    })
}

fn status() -> anyhow::Result<()> {
    let Some(token) = token_store::load() else {
        return print_json(&StatusReport {
            authenticated: false,
            token_source: None,
            subject: None,
            expires_at: None,
            expired: false,
        });
    };

    let claims = TokenClaims::decode_unverified(&token).ok();
    print_json(&StatusReport {
        authenticated: true,
        token_source: token_store::detect_source().map(|source| source.to_string()),
        subject: claims.as_ref().and_then(|c| c.sub.clone()),
        expires_at: claims
            .as_ref()
            .and_then(TokenClaims::expires_at)
            .map(|at| at.to_rfc3339()),
        expired: claims.as_ref().is_some_and(|c| c.is_expired(0)),
    })
}
