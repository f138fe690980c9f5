pub mod analytics_query_postgres;

pub use analytics_query_postgres::AnalyticsQueryPostgres;
