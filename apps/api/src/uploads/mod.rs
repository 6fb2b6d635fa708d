// Document uploads: raw bytes land in the configured upload directory under the client's filename.

pub mod handlers;
pub mod storage;
