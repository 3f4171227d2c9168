//! AI writing assistant and word explanation
//!
//! Generated text is not checked for content, only that something longer
//! than a trivial placeholder came back.

use super::fixtures::{assist_body, explain_body, MIN_AI_TEXT_CHARS};
use super::{response_detail, Step};
use crate::client::{ApiClient, ApiRequest, ApiResponse};
use crate::outcome::Outcome;
use crate::session::Session;

pub(super) fn assist(client: &ApiClient, session: &Session) -> Outcome {
    let request = ApiRequest::post("ai/assist").json(assist_body()).authorized();
    let response = client.execute(&request, session.token());
    text_outcome(Step::AiAssist, &response, "suggestion")
}

pub(super) fn explain(client: &ApiClient) -> Outcome {
    let request = ApiRequest::post("ai/explain").json(explain_body());
    let response = client.execute(&request, None);
    text_outcome(Step::AiExplain, &response, "explanation")
}

fn text_outcome(step: Step, response: &ApiResponse, field: &str) -> Outcome {
    let chars = response
        .str_field(field)
        .map(|text| text.chars().count())
        .filter(|count| response.success && *count > MIN_AI_TEXT_CHARS);

    match chars {
        Some(count) => Outcome::passed(step.name(), format!("- Got {field} ({count} chars)")),
        None => Outcome::failed(step.name(), response_detail(response)),
    }
}
