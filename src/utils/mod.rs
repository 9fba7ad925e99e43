pub mod cors;
pub mod request;
