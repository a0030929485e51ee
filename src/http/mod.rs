//! HTTP plumbing shared by the vendor adapters and the orchestrator.

pub mod headers;
pub mod transport;

pub use headers::HttpHeaderBuilder;
pub use transport::{
    HttpTransport, ReqwestTransport, VendorCallRequest, VendorCallResponse,
    classify_vendor_status,
};
