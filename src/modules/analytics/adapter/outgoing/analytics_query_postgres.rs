use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, QueryResult, Statement, Value,
};
use std::sync::Arc;

use crate::analytics::application::domain::entities::{
    AnalyticsFilter, KeyCount, LoginSummary, NotificationSummary, OrderSummary, PaymentTotals,
    PermissionSummary, UserSummary,
};
use crate::analytics::application::ports::outgoing::{AnalyticsQuery, AnalyticsQueryError};

const TOP_FAILING_IPS: i64 = 5;
const TOP_PERMISSION_KEYS: i64 = 10;

/// Latest track per order, so an order is counted once.
const ORDERS_FROM: &str = r#"
    FROM orders o
    LEFT JOIN LATERAL (
        SELECT t.current_status
        FROM tracks t
        WHERE t.order_id = o.id
        ORDER BY t.updated_at DESC
        LIMIT 1
    ) t ON TRUE
"#;

// ============================================================================
// WHERE builder
// ============================================================================

/// AND-joined conditions with `$n` placeholders numbered in push order.
#[derive(Debug, Default)]
struct Conditions {
    clauses: Vec<String>,
    values: Vec<Value>,
}

impl Conditions {
    /// `template` uses `{}` where the placeholder goes.
    fn bind(mut self, template: &str, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        let placeholder = format!("${}", self.values.len());
        self.clauses.push(template.replace("{}", &placeholder));
        self
    }

    fn raw(mut self, clause: &str) -> Self {
        self.clauses.push(clause.to_string());
        self
    }

    /// Date range on `column` and role of the owning user via `user_column`.
    fn scoped(self, filter: &AnalyticsFilter, column: &str, user_column: &str) -> Self {
        let mut conditions = self;
        if let Some(from) = filter.from {
            conditions = conditions.bind(&format!("{} >= {{}}", column), from);
        }
        if let Some(to) = filter.to {
            conditions = conditions.bind(&format!("{} <= {{}}", column), to);
        }
        if let Some(role) = filter.role {
            conditions = conditions.bind(
                &format!("{} IN (SELECT id FROM users WHERE role = {{}})", user_column),
                role.as_str(),
            );
        }
        conditions
    }

    fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    fn statement(&self, select: &str, from: &str, tail: &str) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!("{} {} {} {}", select, from, self.where_sql(), tail),
            self.values.clone(),
        )
    }
}

// ============================================================================
// Query Implementation
// ============================================================================

#[derive(Clone)]
pub struct AnalyticsQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AnalyticsQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> AnalyticsQueryError {
        AnalyticsQueryError::DatabaseError(e.to_string())
    }

    async fn one(&self, stmt: Statement) -> Result<QueryResult, AnalyticsQueryError> {
        self.db
            .query_one(stmt)
            .await
            .map_err(Self::map_db_err)?
            .ok_or_else(|| AnalyticsQueryError::DatabaseError("aggregate returned no row".into()))
    }

    async fn key_counts(&self, stmt: Statement) -> Result<Vec<KeyCount>, AnalyticsQueryError> {
        let rows = self.db.query_all(stmt).await.map_err(Self::map_db_err)?;
        rows.iter()
            .map(|row| -> Result<KeyCount, AnalyticsQueryError> {
                Ok(KeyCount {
                    key: row.try_get("", "key").map_err(Self::map_db_err)?,
                    count: row.try_get("", "count").map_err(Self::map_db_err)?,
                })
            })
            .collect()
    }

    fn users_conditions(filter: &AnalyticsFilter) -> Conditions {
        let conditions = Conditions::default().scoped(filter, "u.created_at", "u.id");
        match filter.status.as_deref() {
            Some("active") => conditions.raw("u.is_active"),
            Some("inactive") => conditions.raw("NOT u.is_active"),
            _ => conditions,
        }
    }

    fn orders_conditions(filter: &AnalyticsFilter) -> Conditions {
        let conditions = Conditions::default().scoped(filter, "o.created_at", "o.created_by");
        match &filter.status {
            Some(status) => conditions.bind("t.current_status = {}", status.clone()),
            None => conditions,
        }
    }

    fn logins_conditions(filter: &AnalyticsFilter) -> Conditions {
        let conditions = Conditions::default()
            .raw("l.action = 'login'")
            .scoped(filter, "l.created_at", "l.user_id");
        match filter.status.as_deref() {
            Some("success") => conditions.raw("l.success"),
            Some("failed") => conditions.raw("NOT l.success"),
            _ => conditions,
        }
    }

    fn notifications_conditions(filter: &AnalyticsFilter) -> Conditions {
        let conditions = Conditions::default().scoped(filter, "n.created_at", "n.user_id");
        match filter.status.as_deref() {
            Some("read") => conditions.raw("n.is_read"),
            Some("unread") => conditions.raw("NOT n.is_read"),
            _ => conditions,
        }
    }

    fn permissions_conditions(filter: &AnalyticsFilter) -> Conditions {
        let conditions = Conditions::default().scoped(filter, "p.created_at", "p.user_id");
        match filter.status.as_deref() {
            Some("active") => conditions.raw("p.is_active"),
            Some("revoked") => conditions.raw("NOT p.is_active"),
            _ => conditions,
        }
    }
}

#[async_trait]
impl AnalyticsQuery for AnalyticsQueryPostgres {
    async fn users(&self, filter: &AnalyticsFilter) -> Result<UserSummary, AnalyticsQueryError> {
        let c = Self::users_conditions(filter);
        let from = "FROM users u";

        let (totals, by_role, signups_per_month) = futures::try_join!(
            self.one(c.statement(
                r#"SELECT
                    COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE u.is_active) AS active,
                    COUNT(*) FILTER (WHERE NOT u.is_active) AS inactive,
                    COUNT(*) FILTER (WHERE u.is_verified) AS verified,
                    COUNT(*) FILTER (WHERE NOT u.is_verified) AS unverified"#,
                from,
                "",
            )),
            self.key_counts(c.statement(
                "SELECT u.role AS key, COUNT(*) AS count",
                from,
                "GROUP BY u.role ORDER BY count DESC, key",
            )),
            self.key_counts(c.statement(
                "SELECT to_char(date_trunc('month', u.created_at), 'YYYY-MM') AS key, COUNT(*) AS count",
                from,
                "GROUP BY 1 ORDER BY 1",
            )),
        )?;

        Ok(UserSummary {
            total: totals.try_get("", "total").map_err(Self::map_db_err)?,
            active: totals.try_get("", "active").map_err(Self::map_db_err)?,
            inactive: totals.try_get("", "inactive").map_err(Self::map_db_err)?,
            verified: totals.try_get("", "verified").map_err(Self::map_db_err)?,
            unverified: totals.try_get("", "unverified").map_err(Self::map_db_err)?,
            by_role,
            signups_per_month,
        })
    }

    async fn orders(&self, filter: &AnalyticsFilter) -> Result<OrderSummary, AnalyticsQueryError> {
        let c = Self::orders_conditions(filter);

        let (totals, by_service, by_priority, by_status, per_day) = futures::try_join!(
            self.one(c.statement(
                r#"SELECT
                    COUNT(*) AS total,
                    COALESCE(SUM(o.p_amount), 0)::float8 AS requested,
                    COALESCE(SUM(o.p_received), 0)::float8 AS received,
                    COALESCE(SUM(o.p_refunded), 0)::float8 AS refunded,
                    COALESCE(SUM(o.p_discount + o.p_offer_discount), 0)::float8 AS discount"#,
                ORDERS_FROM,
                "",
            )),
            self.key_counts(c.statement(
                "SELECT COALESCE(o.parcel->>'service', 'unknown') AS key, COUNT(*) AS count",
                ORDERS_FROM,
                "GROUP BY 1 ORDER BY count DESC, key",
            )),
            self.key_counts(c.statement(
                "SELECT COALESCE(o.parcel->>'priority', 'unknown') AS key, COUNT(*) AS count",
                ORDERS_FROM,
                "GROUP BY 1 ORDER BY count DESC, key",
            )),
            self.key_counts(c.statement(
                "SELECT COALESCE(t.current_status, 'untracked') AS key, COUNT(*) AS count",
                ORDERS_FROM,
                "GROUP BY 1 ORDER BY count DESC, key",
            )),
            self.key_counts(c.statement(
                "SELECT to_char(date_trunc('day', o.created_at), 'YYYY-MM-DD') AS key, COUNT(*) AS count",
                ORDERS_FROM,
                "GROUP BY 1 ORDER BY 1",
            )),
        )?;

        Ok(OrderSummary {
            total: totals.try_get("", "total").map_err(Self::map_db_err)?,
            by_service,
            by_priority,
            by_status,
            payments: PaymentTotals {
                requested: totals.try_get("", "requested").map_err(Self::map_db_err)?,
                received: totals.try_get("", "received").map_err(Self::map_db_err)?,
                refunded: totals.try_get("", "refunded").map_err(Self::map_db_err)?,
                discount: totals.try_get("", "discount").map_err(Self::map_db_err)?,
            },
            per_day,
        })
    }

    async fn logins(&self, filter: &AnalyticsFilter) -> Result<LoginSummary, AnalyticsQueryError> {
        let c = Self::logins_conditions(filter);
        let failed = Self::logins_conditions(filter).raw("NOT l.success");
        let failed_with_ip = Self::logins_conditions(filter)
            .raw("NOT l.success")
            .raw("l.ip IS NOT NULL");
        let from = "FROM login_histories l";

        let (totals, failure_reasons, top_failing_ips) = futures::try_join!(
            self.one(c.statement(
                r#"SELECT
                    COUNT(*) AS attempts,
                    COUNT(*) FILTER (WHERE l.success) AS successes,
                    COUNT(*) FILTER (WHERE NOT l.success) AS failures"#,
                from,
                "",
            )),
            self.key_counts(failed.statement(
                "SELECT COALESCE(l.failure_reason, 'unknown') AS key, COUNT(*) AS count",
                from,
                "GROUP BY 1 ORDER BY count DESC, key",
            )),
            self.key_counts(failed_with_ip.statement(
                "SELECT l.ip AS key, COUNT(*) AS count",
                from,
                &format!("GROUP BY l.ip ORDER BY count DESC, key LIMIT {}", TOP_FAILING_IPS),
            )),
        )?;

        Ok(LoginSummary {
            attempts: totals.try_get("", "attempts").map_err(Self::map_db_err)?,
            successes: totals.try_get("", "successes").map_err(Self::map_db_err)?,
            failures: totals.try_get("", "failures").map_err(Self::map_db_err)?,
            failure_reasons,
            top_failing_ips,
        })
    }

    async fn notifications(
        &self,
        filter: &AnalyticsFilter,
    ) -> Result<NotificationSummary, AnalyticsQueryError> {
        let c = Self::notifications_conditions(filter);
        let from = "FROM notifications n";

        let (totals, by_kind) = futures::try_join!(
            self.one(c.statement(
                "SELECT COUNT(*) AS total, COUNT(*) FILTER (WHERE NOT n.is_read) AS unread",
                from,
                "",
            )),
            self.key_counts(c.statement(
                "SELECT n.kind AS key, COUNT(*) AS count",
                from,
                "GROUP BY n.kind ORDER BY count DESC, key",
            )),
        )?;

        Ok(NotificationSummary {
            total: totals.try_get("", "total").map_err(Self::map_db_err)?,
            unread: totals.try_get("", "unread").map_err(Self::map_db_err)?,
            by_kind,
        })
    }

    async fn permissions(
        &self,
        filter: &AnalyticsFilter,
    ) -> Result<PermissionSummary, AnalyticsQueryError> {
        let c = Self::permissions_conditions(filter);

        let (totals, top_keys) = futures::try_join!(
            self.one(c.statement(
                r#"SELECT
                    COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE p.is_active) AS active,
                    COUNT(*) FILTER (WHERE NOT p.is_active) AS revoked"#,
                "FROM user_permissions p",
                "",
            )),
            self.key_counts(c.statement(
                "SELECT k.key AS key, COUNT(*) AS count",
                "FROM user_permissions p CROSS JOIN LATERAL jsonb_array_elements_text(p.permissions) AS k(key)",
                &format!("GROUP BY k.key ORDER BY count DESC, key LIMIT {}", TOP_PERMISSION_KEYS),
            )),
        )?;

        Ok(PermissionSummary {
            total: totals.try_get("", "total").map_err(Self::map_db_err)?,
            active: totals.try_get("", "active").map_err(Self::map_db_err)?,
            revoked: totals.try_get("", "revoked").map_err(Self::map_db_err)?,
            top_keys,
        })
    }
}
