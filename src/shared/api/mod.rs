mod json_config;
mod pagination;
mod response;

pub use json_config::{custom_json_config, custom_query_config};
pub use pagination::{PageMeta, PageQuery, PageRequest, PageResult};
pub use response::ApiResponse;
