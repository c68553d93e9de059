// The clients defined here talk to the planner REST backend through reqwest.
pub mod cookies;
pub mod decode;
pub mod http;
pub mod refresh;
pub mod request;
pub mod retry;

pub use cookies::SessionCookies;
pub use http::{ApiClient, HttpSettings};
pub use request::{ApiRequest, RequestBody};
pub use retry::RetryPolicy;
