#![allow(dead_code, missing_docs)]
use std::collections::BTreeMap;
use std::convert::Infallible;

use apidocs_core::{DriverOutput, DriverRequest, TestDriver};
use http::{Method, StatusCode};
use serde_json::json;
use tracing::debug;

/// In-memory users API answering like a small REST service.
#[derive(Debug, Default)]
pub struct UsersApp {
    users: BTreeMap<u64, String>,
    next_id: u64,
    pub calls: usize,
}

impl UsersApp {
    pub fn with_users<'a>(users: impl IntoIterator<Item = (u64, &'a str)>) -> Self {
        let users: BTreeMap<_, _> = users
            .into_iter()
            .map(|(id, name)| (id, name.to_string()))
            .collect();
        let next_id = users.keys().max().map_or(1, |id| id + 1);
        Self {
            users,
            next_id,
            calls: 0,
        }
    }

    pub fn rename(&mut self, id: u64, name: &str) {
        self.users.insert(id, name.to_string());
    }

    fn user(&self, id: u64) -> DriverOutput {
        match self.users.get(&id) {
            Some(name) => DriverOutput::new(StatusCode::OK, json!({"id": id, "name": name}).to_string()),
            None => DriverOutput::new(StatusCode::NOT_FOUND, json!({"error": "not found"}).to_string()),
        }
    }
}

impl TestDriver for UsersApp {
    type Error = Infallible;

    async fn dispatch(&mut self, request: DriverRequest) -> Result<DriverOutput, Self::Error> {
        debug!(?request, "users app received");
        self.calls += 1;

        let segments: Vec<&str> = request
            .path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        let id = segments.get(1).and_then(|segment| segment.parse::<u64>().ok());

        let output = match (&request.method, segments.first().copied(), id) {
            (&Method::GET, Some("users"), None) => {
                let users: Vec<_> = self
                    .users
                    .iter()
                    .map(|(id, name)| json!({"id": id, "name": name}))
                    .collect();
                DriverOutput::new(StatusCode::OK, json!(users).to_string())
            }
            (&Method::GET, Some("users"), Some(id)) => self.user(id),
            (&Method::POST, Some("users"), None) => {
                let name = request
                    .params
                    .as_mapping()
                    .and_then(|params| params.get("name"))
                    .and_then(|name| name.as_text())
                    .map(str::to_string);
                match name {
                    Some(name) => {
                        let id = self.next_id;
                        self.next_id += 1;
                        self.users.insert(id, name);
                        let mut output = self.user(id);
                        output.status = StatusCode::CREATED;
                        output
                    }
                    None => DriverOutput::new(
                        StatusCode::UNPROCESSABLE_ENTITY,
                        json!({"error": "name is required"}).to_string(),
                    ),
                }
            }
            (&Method::DELETE, Some("users"), Some(id)) => match self.users.remove(&id) {
                Some(_) => DriverOutput::new(StatusCode::NO_CONTENT, ""),
                None => self.user(id),
            },
            _ => DriverOutput::new(StatusCode::NOT_FOUND, ""),
        };

        Ok(output)
    }
}
