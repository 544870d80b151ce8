use common::api::ApiClient;
use common::config::ClientConfig;

use crate::storage::LocalStorage;
use crate::transport::BrowserTransport;

pub type Api = ApiClient<BrowserTransport, LocalStorage>;

/// Client bound to the browser transport and `localStorage`.
pub fn api() -> Api {
    ApiClient::new(BrowserTransport, LocalStorage, ClientConfig::from_build_env())
}
