use std::sync::Arc;

use crate::permission::application::ports::incoming::use_cases::{
    GetPermissionsUseCase, SetPermissionsUseCase,
};

#[derive(Clone)]
pub struct PermissionUseCases {
    pub get: Arc<dyn GetPermissionsUseCase + Send + Sync>,
    pub set: Arc<dyn SetPermissionsUseCase + Send + Sync>,
}
