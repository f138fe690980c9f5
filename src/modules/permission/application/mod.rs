pub mod domain;
pub mod permission_use_cases;
pub mod ports;
pub mod service;
