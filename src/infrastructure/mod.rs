pub mod http_client_factory;
pub mod mock;

pub use http_client_factory::{HttpClientFactory, ReqwestTransport};
pub use mock::MockTransport;
