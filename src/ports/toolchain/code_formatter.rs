use async_trait::async_trait;

use crate::domain::{errors::ControllerResult, models::FormatResponse};

/// Port for the external source formatter.
///
/// A syntax error in the submitted source is a successful call whose
/// response carries a [`crate::domain::models::FormatError`]; `Err` is
/// reserved for failing to run the formatter at all.
#[async_trait]
pub trait CodeFormatter: Send + Sync + 'static {
    async fn format(&self, source: &str) -> ControllerResult<FormatResponse>;
}
