//! Method-call surface: one `request(method, params)` capability plus its HTTP implementation.

mod client;
mod constants;
mod error;
mod traits;

pub use client::{HttpApiClient, HttpApiClientConfig};
pub use constants::{VK_API_DEFAULT_BASE_URL, VK_API_DEFAULT_VERSION};
pub use error::ApiError;
pub use traits::ApiClient;
