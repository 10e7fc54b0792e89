//! Suggest command implementation.

use super::with_count;
use crate::cli::SuggestArgs;
use crate::error::Result;
use crate::output::Formatter;
use europeana_sdk::lookup::suggest_table;
use europeana_sdk::{EntityApi, SdkError};

/// Execute the suggest command.
pub fn execute_suggest<A>(args: SuggestArgs, api: &A, formatter: &Formatter) -> Result<String>
where
    A: EntityApi<Error = SdkError>,
{
    let (total, table) = suggest_table(
        api,
        &args.text,
        args.entity_type.into(),
        args.keep_illustrations,
    )?;

    let body = formatter.format_table(&table)?;
    Ok(with_count(formatter, total, table.len(), body))
}
