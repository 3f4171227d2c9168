//! Comments and likes on the review created by this run

use super::fixtures::comment_body;
use super::reviews::list_outcome;
use super::{response_detail, Step};
use crate::client::{ApiClient, ApiRequest, ApiResponse};
use crate::outcome::Outcome;
use crate::session::{id_from_value, Requirement, Session};

pub(super) fn create_comment(client: &ApiClient, session: &mut Session) -> Outcome {
    let step = Step::CreateComment;
    let Some(review_id) = session.review_id.clone() else {
        return step.precondition_failed(&[Requirement::ReviewId]);
    };

    let request = ApiRequest::post(format!("reviews/{review_id}/comments"))
        .json(comment_body())
        .authorized();
    let response = client.execute(&request, session.token());

    match response
        .field("id")
        .and_then(id_from_value)
        .filter(|_| response.success)
    {
        Some(comment_id) => {
            let detail = format!("- Comment ID: {comment_id}");
            session.comment_id = Some(comment_id);
            Outcome::passed(step.name(), detail)
        }
        None => Outcome::failed(step.name(), response_detail(&response)),
    }
}

pub(super) fn list_comments(client: &ApiClient, session: &Session) -> Outcome {
    let step = Step::ListComments;
    let Some(review_id) = session.review_id.as_deref() else {
        return step.precondition_failed(&[Requirement::ReviewId]);
    };

    let request = ApiRequest::get(format!("reviews/{review_id}/comments"));
    let response = client.execute(&request, None);
    list_outcome(step, &response, "comments")
}

/// Toggle the like on the review; the response reports the new state
pub(super) fn like(client: &ApiClient, session: &Session) -> Outcome {
    let step = Step::LikeReview;
    let Some(review_id) = session.review_id.as_deref() else {
        return step.precondition_failed(&[Requirement::ReviewId]);
    };

    let request = ApiRequest::post(format!("reviews/{review_id}/like")).authorized();
    let response = client.execute(&request, session.token());
    liked_outcome(step, &response)
}

pub(super) fn liked_status(client: &ApiClient, session: &Session) -> Outcome {
    let step = Step::LikedStatus;
    let Some(review_id) = session.review_id.as_deref() else {
        return step.precondition_failed(&[Requirement::ReviewId]);
    };

    let request = ApiRequest::get(format!("reviews/{review_id}/liked")).authorized();
    let response = client.execute(&request, session.token());
    liked_outcome(step, &response)
}

fn liked_outcome(step: Step, response: &ApiResponse) -> Outcome {
    match response.bool_field("liked").filter(|_| response.success) {
        Some(liked) => Outcome::passed(step.name(), format!("- Liked: {liked}")),
        None => Outcome::failed(step.name(), response_detail(response)),
    }
}
