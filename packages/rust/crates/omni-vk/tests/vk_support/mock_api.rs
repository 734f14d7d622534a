use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use omni_vk::{ApiClient, ApiError};
use serde_json::{Value, json};

type Responder = dyn Fn(&str, usize) -> Result<Value, ApiError> + Send + Sync;

/// Scripted method-call collaborator. The responder gets the method name and how many
/// times that method was called before.
pub(crate) struct MockVkApi {
    responder: Box<Responder>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    client: reqwest::Client,
}

impl MockVkApi {
    pub(crate) fn new(
        responder: impl Fn(&str, usize) -> Result<Value, ApiError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
            client: reqwest::Client::new(),
        })
    }

    /// Answers `groups.getById` with one community; every other method fails.
    pub(crate) fn with_group(group_id: i64) -> Arc<Self> {
        Self::new(move |method, _| match method {
            "groups.getById" => Ok(group_response(group_id)),
            other => Err(ApiError::Api {
                code: 3,
                message: format!("unknown method passed: {other}"),
            }),
        })
    }

    pub(crate) fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .filter(|(name, _)| name == method)
            .count()
    }

    pub(crate) fn params_of(&self, method: &str) -> Vec<Vec<(String, String)>> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .filter(|(name, _)| name == method)
            .map(|(_, params)| params.clone())
            .collect()
    }
}

#[async_trait]
impl ApiClient for MockVkApi {
    async fn request(&self, method: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let index = {
            let mut calls = self.calls.lock().expect("calls lock");
            let index = calls.iter().filter(|(name, _)| name == method).count();
            calls.push((
                method.to_string(),
                params
                    .iter()
                    .map(|(name, value)| ((*name).to_string(), value.clone()))
                    .collect(),
            ));
            index
        };
        (self.responder)(method, index)
    }

    fn http_client(&self) -> &reqwest::Client {
        &self.client
    }
}

pub(crate) fn group_response(group_id: i64) -> Value {
    json!([{
        "id": group_id,
        "name": "Test Community",
        "screen_name": format!("club{group_id}"),
        "is_closed": 0,
        "type": "group"
    }])
}
