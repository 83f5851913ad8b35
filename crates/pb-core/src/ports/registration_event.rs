use crate::registration::RegistrationSnapshot;

/// Presentation sink for wizard state.
#[async_trait::async_trait]
pub trait RegistrationEventPort: Send + Sync {
    async fn emit_registration_changed(&self, snapshot: RegistrationSnapshot);
}
