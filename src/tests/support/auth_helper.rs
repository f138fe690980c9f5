use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::domain::entities::Role;
use crate::auth::application::ports::outgoing::TokenProvider;

pub fn jwt_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        issuer: "courier-test".to_string(),
        secret_key: "test_secret_key_for_testing_only_32b".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 86400,
    })
}

pub fn token_for(user_id: Uuid, role: Role) -> String {
    jwt_service()
        .generate_access_token(user_id, role)
        .expect("access token")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
