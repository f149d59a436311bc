//! Interpretation of GraphQL response envelopes.

use serde_json::Value;

use crate::error::ApiError;

/// Extracts the payload of mutation `field` from a response body.
///
/// # Errors
///
/// - [`ApiError::Graphql`] if the body has a non-empty top-level `errors` array.
/// - [`ApiError::MissingField`] if `data.<field>` is absent or `null`.
/// - [`ApiError::Mutation`] if the payload's own `errors` array is non-empty.
pub(super) fn mutation_payload(field: &str, mut body: Value) -> Result<Value, ApiError> {
    if let Some(errors) = non_empty_errors(&body) {
        return Err(ApiError::Graphql {
            operation: field.to_owned(),
            message: join_messages(errors),
        });
    }

    let payload = body
        .get_mut("data")
        .and_then(|data| data.get_mut(field))
        .map(Value::take)
        .filter(|payload| !payload.is_null())
        .ok_or_else(|| ApiError::MissingField {
            operation: field.to_owned(),
            field: format!("data.{field}"),
        })?;

    if let Some(errors) = non_empty_errors(&payload) {
        return Err(ApiError::Mutation {
            operation: field.to_owned(),
            message: join_messages(errors),
        });
    }

    Ok(payload)
}

/// Reads `<entity>.id` from a mutation payload.
///
/// # Errors
///
/// Returns [`ApiError::MissingField`] if the id is absent or not a string.
pub(super) fn entity_id(field: &str, payload: &Value, entity: &str) -> Result<String, ApiError> {
    payload
        .get(entity)
        .and_then(|e| e.get("id"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::MissingField {
            operation: field.to_owned(),
            field: format!("{entity}.id"),
        })
}

fn non_empty_errors(value: &Value) -> Option<&Vec<Value>> {
    value
        .get("errors")
        .and_then(Value::as_array)
        .filter(|errors| !errors.is_empty())
}

fn join_messages(errors: &[Value]) -> String {
    errors
        .iter()
        .map(|e| {
            let message = e
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            match e.get("field").and_then(Value::as_str) {
                Some(field) => format!("{field}: {message}"),
                None => message.to_owned(),
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
