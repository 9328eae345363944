// Storage module for the S3 gateway

pub mod error;
pub mod gateway;
pub mod remote;
