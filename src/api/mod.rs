//! Transit API Access
//!
//! Transport, failure classification, offline fallback and the typed
//! endpoint wrappers used by the UI.

mod data_access;
mod error;
mod path;
mod transit;
mod transport;


pub use data_access::{is_local_id, DataAccess, LocalIdGenerator, OFFLINE_READ_NOTICE, OFFLINE_WRITE_NOTICE};
pub use error::{error_detail, ApiError, ApiResult, ConnectivityCause, FailureClass};
pub use path::{encode, ResourcePath, Shape};
pub use transit::TransitApi;
pub use transport::{ApiRequest, FetchTransport, Method, Transport};
