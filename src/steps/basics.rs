use serde_json::Value;

use super::fixtures::{KNOWN_CATEGORIES, REQUIRED_CATEGORY_COUNT};
use super::{response_detail, Step};
use crate::client::{ApiClient, ApiRequest};
use crate::outcome::Outcome;

pub(super) fn categories(client: &ApiClient) -> Outcome {
    let name = Step::Categories.name();
    let response = client.execute(&ApiRequest::get("categories"), None);

    let listed = response
        .field("categories")
        .and_then(Value::as_array)
        .filter(|_| response.success);

    match listed {
        Some(categories) => {
            let has_expected = KNOWN_CATEGORIES[..REQUIRED_CATEGORY_COUNT]
                .iter()
                .all(|expected| categories.iter().any(|c| c.as_str() == Some(*expected)));
            let detail = format!("- Found {} categories", categories.len());
            if has_expected {
                Outcome::passed(name, detail)
            } else {
                Outcome::failed(name, detail)
            }
        }
        None => Outcome::failed(name, response_detail(&response)),
    }
}
