use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use carelead_contact::{ContactSubmission, ListParams, ListQuery, Status, SubmitContactInput};
use serde::Serialize;

use crate::{
    email::EmailService,
    error::AppError,
    routes::AppState,
    upstream::{PAGE_HEADER, PAGE_SIZE_HEADER, TOTAL_COUNT_HEADER},
};

pub const DATA_SOURCE_HEADER: &str = "x-data-source";

/// POST /api/contact
///
/// Records the submission first; the notification email only decides the
/// `sent`/`received` tag of the response. The body is parsed as JSON whatever
/// `Content-Type` the browser sent.
pub async fn create(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<ContactSubmission>, AppError> {
    let input = serde_json::from_slice::<SubmitContactInput>(&body)?;

    let submission = carelead_contact::submit(app_state.store.as_ref(), input).await?;
    let status = deliver(&app_state.email, &submission).await;

    Ok(Json(submission.tagged(status)))
}

async fn deliver(email: &EmailService, submission: &ContactSubmission) -> Status {
    if !email.is_enabled() {
        return Status::Received;
    }

    match email.send_contact_notification(submission).await {
        Ok(()) => Status::Sent,
        Err(e) => {
            tracing::warn!(
                error = %e,
                contact_number = %submission.contact_number,
                "Failed to send contact notification"
            );
            Status::Received
        }
    }
}

/// GET /api/contact
///
/// Tries the upstream API first and falls back to the local store on any
/// failure. `X-Data-Source` tells which one answered.
pub async fn list(
    State(app_state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let query = ListQuery::from(params);

    if app_state.upstream.is_configured() {
        match app_state.upstream.list_contacts(&query).await {
            Ok(page) => {
                return Ok(paged(page.body, page.total, page.page, page.page_size, "upstream"));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Upstream contact list unavailable, serving local store");
            }
        }
    }

    let page = carelead_contact::list(app_state.store.as_ref(), &query).await?;

    Ok(paged(page.items, page.total, page.page, page.page_size, "local"))
}

fn paged(
    body: impl Serialize,
    total: usize,
    page: usize,
    page_size: usize,
    source: &'static str,
) -> Response {
    (
        [
            (TOTAL_COUNT_HEADER, total.to_string()),
            (PAGE_HEADER, page.to_string()),
            (PAGE_SIZE_HEADER, page_size.to_string()),
            (DATA_SOURCE_HEADER, source.to_string()),
        ],
        Json(body),
    )
        .into_response()
}
