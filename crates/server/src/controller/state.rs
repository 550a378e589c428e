use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use interactors::{GetStateExecutor, UpdateStateExecutor};
use serde::{de::Error as _, Serialize};
use serde_json::Value;
use shared::{domain::StateData, protocol::JSON_CONTENT_TYPE};

use crate::logging::Logger;

/// HTTP adapter for the get/update state use cases.
#[derive(Clone)]
pub struct StateController {
    update_state: Arc<dyn UpdateStateExecutor>,
    get_state: Arc<dyn GetStateExecutor>,
    logger: Arc<dyn Logger>,
}

impl StateController {
    pub fn new(
        update_state: Arc<dyn UpdateStateExecutor>,
        get_state: Arc<dyn GetStateExecutor>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            update_state,
            get_state,
            logger,
        }
    }

    pub async fn update(&self, body: &[u8]) -> Response {
        let state_data = match decode_state_data(body) {
            Ok(data) => data,
            Err(_) => {
                self.logger.error("Invalid request format");
                return StatusCode::UNPROCESSABLE_ENTITY.into_response();
            }
        };

        if self.update_state.execute(&state_data.state).await.is_err() {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }

        json_response(&state_data)
    }

    pub async fn get(&self) -> Response {
        let state = match self.get_state.execute().await {
            Ok(state) => state,
            Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        };

        json_response(&StateData::from(state))
    }
}

/// Reads the first JSON value in the body; trailing bytes are not inspected.
/// `null` and a missing or null `state` leave the value empty. Keys are matched
/// exactly first and then case-insensitively; a repeated key keeps its last value.
fn decode_state_data(body: &[u8]) -> Result<StateData, serde_json::Error> {
    let value = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
        .unwrap_or_else(|| Err(serde_json::Error::custom("empty request body")))?;

    let fields = match value {
        Value::Null => return Ok(StateData::default()),
        Value::Object(fields) => fields,
        other => {
            return Err(serde_json::Error::custom(format!(
                "expected an object, found {other}"
            )))
        }
    };

    let state = fields.get("state").or_else(|| {
        fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("state"))
            .map(|(_, value)| value)
    });
    match state {
        None | Some(Value::Null) => Ok(StateData::default()),
        Some(Value::String(state)) => Ok(StateData {
            state: state.clone(),
        }),
        Some(other) => Err(serde_json::Error::custom(format!(
            "expected a string state, found {other}"
        ))),
    }
}

fn json_response<T: Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => (
            StatusCode::OK,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(JSON_CONTENT_TYPE),
            )],
            body,
        )
            .into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
