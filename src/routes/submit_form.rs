use std::fmt::{self, Debug};

use actix_web::{
    http::{Method, StatusCode},
    middleware::DefaultHeaders,
    web, HttpMessage, HttpRequest, HttpResponse, ResponseError,
};

use crate::{
    cms_client::{CmsClient, CmsError, CmsItemPayload},
    domain::{BodyParseError, FormSubmission, SubmissionFormData, SubmissionResponse},
    settings::WebflowSettings,
};

const FALLBACK_ERROR: &str = "Failed to process form submission";

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[derive(thiserror::Error)]
pub enum SubmitFormError {
    #[error("Method not allowed. Use POST.")]
    MethodNotAllowed,
    #[error("Invalid request body: {0}")]
    MalformedBody(#[from] BodyParseError),
    #[error("Missing Webflow API configuration")]
    Configuration,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Cms(#[from] CmsError),
}

impl Debug for SubmitFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

// Failures are reported in the body; the status stays 200.
impl ResponseError for SubmitFormError {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        tracing::warn!(error = ?self, "Form submission rejected");

        let message = match self.to_string() {
            message if message.is_empty() => FALLBACK_ERROR.to_string(),
            message => message,
        };

        HttpResponse::build(self.status_code()).json(SubmissionResponse::rejected(message))
    }
}

/// Mounts `/api/submit-form`, with permissive CORS headers on every response.
pub fn submit_form_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/submit-form")
            .route(web::post().to(submit_form))
            .route(web::method(Method::OPTIONS).to(preflight))
            .default_service(web::to(method_not_allowed))
            .wrap(
                DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
                    .add(("Access-Control-Allow-Headers", "Content-Type")),
            ),
    );
}

pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({}))
}

#[tracing::instrument(name = "Rejecting a non-POST form request", skip_all)]
pub async fn method_not_allowed() -> Result<HttpResponse, SubmitFormError> {
    Err(SubmitFormError::MethodNotAllowed)
}

#[tracing::instrument(
    name = "Processing a form submission",
    skip(request, body, webflow, cms_client),
    fields(
        submitter_name = tracing::field::Empty,
        submitter_email = tracing::field::Empty
    )
)]
pub async fn submit_form(
    request: HttpRequest,
    body: web::Bytes,
    webflow: web::Data<WebflowSettings>,
    cms_client: web::Data<dyn CmsClient>,
) -> Result<HttpResponse, SubmitFormError> {
    let form = SubmissionFormData::parse(request.content_type(), &body)?;
    let target = webflow.target().ok_or(SubmitFormError::Configuration)?;
    let submission: FormSubmission = form.try_into().map_err(SubmitFormError::Validation)?;

    let span = tracing::Span::current();
    span.record("submitter_name", &tracing::field::display(&submission.name));
    span.record("submitter_email", &tracing::field::display(&submission.email));

    let item = CmsItemPayload::from(submission);
    let created = cms_client.create_item(&target, &item).await?;

    Ok(HttpResponse::Ok().json(SubmissionResponse::accepted(created.id)))
}
