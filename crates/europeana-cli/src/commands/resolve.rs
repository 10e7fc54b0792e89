//! Resolve command implementation.

use super::retrieve::render_entity;
use crate::cli::ResolveArgs;
use crate::error::Result;
use crate::output::Formatter;
use europeana_sdk::{EntityApi, SdkError};
use tracing::info;

/// Execute the resolve command.
pub fn execute_resolve<A>(args: ResolveArgs, api: &A, formatter: &Formatter) -> Result<String>
where
    A: EntityApi<Error = SdkError>,
{
    let entity = api.resolve(&args.uri)?;
    info!("Resolved {} to {}", args.uri, entity.id().unwrap_or("(no id)"));
    render_entity(&entity, &args.field, formatter)
}
