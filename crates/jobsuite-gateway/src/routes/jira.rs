//! Jira ticket creation for jobs that moved into a project phase.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use jobsuite_render::adf;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::auth::{bearer_token, contractor_id};
use crate::error::ApiError;
use crate::routes::estimates::MISSING_CONTRACTOR;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct CreateTicketBody {
    pub job: Option<Value>,
    pub client: Option<Value>,
}

pub async fn create_ticket(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<CreateTicketBody>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let (Some(job), Some(client)) = (body.job, body.client) else {
        return Err(ApiError::error(
            StatusCode::BAD_REQUEST,
            "Job and client data are required",
        ));
    };

    let Some(jira) = state.jira() else {
        return Err(ApiError::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Jira integration is not configured",
        ));
    };

    let fields = ticket_fields(
        &state.config.jira.project_key,
        &state.config.jira.issue_type,
        &job,
        &client,
    );
    let url = jira.create_issue(&fields).await.map_err(|e| {
        ApiError::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    // Record the ticket on the estimate. Losing the link is not worth
    // failing a created ticket over.
    if let Some(estimate_id) = job.get("id").and_then(Value::as_str) {
        match contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await {
            Ok(cid) => {
                if let Err(error) = state
                    .backend
                    .update_estimate(&token, &cid, estimate_id, &json!({ "jira_link": url }))
                    .await
                {
                    warn!(%error, estimate_id, "failed to store jira link on estimate");
                }
            }
            Err(error) => {
                warn!(?error, estimate_id, "failed to resolve contractor for jira link");
            }
        }
    }

    Ok(Json(json!({ "jiraTicketUrl": url })))
}

/// Assemble the issue `fields` object: summary from the client name and bid
/// date, ADF description from the job link, optional video card, and the
/// transcription summary Markdown.
fn ticket_fields(project_key: &str, issue_type: &str, job: &Value, client: &Value) -> Value {
    let client_name = client
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| job.get("client_name").and_then(Value::as_str))
        .unwrap_or("Unknown client");
    let bid_date = job
        .get("created_at")
        .and_then(Value::as_str)
        .map_or("", |d| d.split('T').next().unwrap_or(d));
    let summary = format!("{client_name} bid on {bid_date}");

    let job_id = job.get("id").and_then(Value::as_str).unwrap_or_default();
    let job_link = format!("https://app.jobsuite.app/jobs/{job_id}");

    let mut content = vec![
        adf::heading(2, vec![adf::text("Job Link")]),
        adf::paragraph(vec![adf::link_text("Job Link", &job_link, "Job Link")]),
    ];
    if let Some(video_url) = job.get("video_url").and_then(Value::as_str) {
        content.push(adf::heading(2, vec![adf::text("Job Video")]));
        content.push(adf::paragraph(vec![
            adf::text(
                "You can download the video at this link, or go to the job link and watch it there.\n",
            ),
            adf::inline_card(video_url),
        ]));
    }
    if let Some(summary_md) = job.get("transcription_summary").and_then(Value::as_str) {
        content.extend(adf::to_adf_content(summary_md));
    }

    json!({
        "project": {"key": project_key},
        "summary": summary,
        "description": adf::document(content),
        "issuetype": {"name": issue_type},
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fields_carry_summary_and_description() {
        let job = json!({
            "id": "e-1",
            "created_at": "2026-08-04T15:30:00Z",
            "video_url": "https://videos.example.com/e-1/walkthrough.mp4",
            "transcription_summary": "Paint the **deck**",
        });
        let client = json!({"name": "Acme Painting"});

        let fields = ticket_fields("JOB", "Task", &job, &client);
        assert_eq!(fields["summary"], "Acme Painting bid on 2026-08-04");
        assert_eq!(fields["project"]["key"], "JOB");
        assert_eq!(fields["issuetype"]["name"], "Task");
        assert_eq!(fields["description"]["type"], "doc");

        let content = fields["description"]["content"].as_array().expect("content");
        assert_eq!(content[0]["content"][0]["text"], "Job Link");
        assert_eq!(
            content[1]["content"][0]["marks"][0]["attrs"]["href"],
            "https://app.jobsuite.app/jobs/e-1"
        );
        assert!(content.iter().any(|n| n["type"] == "heading"
            && n["content"][0]["text"] == "Job Video"));
    }

    #[test]
    fn video_section_is_skipped_without_a_url() {
        let job = json!({"id": "e-1", "created_at": "2026-08-04"});
        let fields = ticket_fields("JOB", "Task", &job, &json!({"name": "Acme"}));
        let content = fields["description"]["content"].as_array().expect("content");
        assert!(!content.iter().any(|n| n["content"][0]["text"] == "Job Video"));
    }
}
