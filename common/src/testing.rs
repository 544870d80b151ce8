//! In-memory doubles for the transport and storage seams.

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::api::{ApiClient, ApiRequest, ApiResponse, HttpTransport};
use crate::config::ClientConfig;
use crate::error::{ApiError, StorageError};
use crate::storage::SessionStorage;

pub const BASE_URL: &str = "http://localhost:8000";

type Route = (String, String);

#[derive(Clone, Default)]
pub struct FakeTransport {
    routes: Rc<RefCell<HashMap<Route, VecDeque<ApiResponse>>>>,
    sent: Rc<RefCell<Vec<ApiRequest>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response. The last queued response for a route keeps answering.
    pub fn respond_bytes(&self, method: &str, path: &str, status: u16, body: &[u8]) {
        self.routes
            .borrow_mut()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(ApiResponse {
                status,
                body: body.to_vec(),
            });
    }

    pub fn respond_json(&self, method: &str, path: &str, status: u16, body: &str) {
        self.respond_bytes(method, path, status, body.as_bytes());
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let key = (request.method.to_string(), path);
        self.sent.borrow_mut().push(request);

        let mut routes = self.routes.borrow_mut();
        let queue = routes
            .get_mut(&key)
            .ok_or_else(|| ApiError::Transport(format!("connection refused: {} {}", key.0, key.1)))?;
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.ok_or_else(|| ApiError::Transport("no response queued".into()))
    }
}

#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

pub fn client(
    transport: &FakeTransport,
    storage: &MemoryStorage,
) -> ApiClient<FakeTransport, MemoryStorage> {
    let config = ClientConfig::new(BASE_URL).expect("valid test base url");
    ApiClient::new(transport.clone(), storage.clone(), config)
}
