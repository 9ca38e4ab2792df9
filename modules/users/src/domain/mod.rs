pub mod error;
pub mod mapper;
pub mod repo;
pub mod service;
pub mod validation;
