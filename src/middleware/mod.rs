pub mod auth;
pub mod request_trace;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use request_trace::{request_trace_middleware, TraceId, REQUEST_ID_HEADER};
pub use response::{ApiResponse, ApiResult};
