use serde_json::Value;

use crate::api::ApiClient;
use crate::events::Group;

use super::BotError;

/// Resolves the community the access token acts for.
///
/// Older API versions answer with a bare array, newer ones with `{"groups": [...]}`.
pub(super) async fn fetch_identity(
    api: &dyn ApiClient,
    group_id: Option<i64>,
) -> Result<Group, BotError> {
    let mut params = Vec::new();
    if let Some(group_id) = group_id {
        params.push(("group_id", group_id.to_string()));
    }
    let response = api.request("groups.getById", &params).await?;
    let list = match response {
        Value::Object(mut object) => object.remove("groups").unwrap_or(Value::Null),
        other => other,
    };
    let mut groups: Vec<Group> = serde_json::from_value(list)?;
    if groups.len() != 1 {
        return Err(BotError::IdentityMismatch {
            returned: groups.len(),
        });
    }
    Ok(groups.remove(0))
}
