pub const VK_API_DEFAULT_BASE_URL: &str = "https://api.vk.com/method";
pub const VK_API_DEFAULT_VERSION: &str = "5.80";

pub(super) const VK_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
