pub mod analytics_query;

pub use analytics_query::{AnalyticsQuery, AnalyticsQueryError};
