pub mod reqwest_client;
pub mod types;

use crate::error::Result;
use async_trait::async_trait;

pub use reqwest_client::ReqwestClient;
pub use types::{HttpRequest, HttpResponse};

/// Minimal GET capability the board API needs.
///
/// A non-2xx status is not an error at this level; callers inspect
/// `HttpResponse::status` themselves. Only transport failures return `Err`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, req: &HttpRequest) -> Result<HttpResponse>;
}
