//! Browser HTTP transport over `gloo-net`.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};

use common::api::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, RequestBody};
use common::error::ApiError;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserTransport;

fn transport_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::Transport(err.to_string())
}

fn encode_form(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            let key = String::from(js_sys::encode_uri_component(key));
            let value = String::from(js_sys::encode_uri_component(value));
            format!("{key}={value}")
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn multipart(
    field: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Result<web_sys::FormData, ApiError> {
    let blob = gloo_file::Blob::new_with_options(bytes, Some(content_type));
    let form = web_sys::FormData::new().map_err(|_| transport_error("FormData is unavailable"))?;
    form.append_with_blob_and_filename(field, &web_sys::Blob::from(blob), file_name)
        .map_err(|_| transport_error("could not attach file"))?;
    Ok(form)
}

#[async_trait(?Send)]
impl HttpTransport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder: RequestBuilder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let outgoing = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(pairs) => builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(encode_form(pairs)),
            RequestBody::File {
                field,
                file_name,
                content_type,
                bytes,
            } => builder.body(multipart(field, file_name, content_type, bytes)?),
        }
        .map_err(transport_error)?;

        let response = outgoing.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.binary().await.map_err(transport_error)?;
        Ok(ApiResponse { status, body })
    }
}
