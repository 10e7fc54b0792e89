//! Agents command implementation.

use super::with_count;
use crate::cli::AgentsArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use europeana_domain::EntityType;
use europeana_sdk::lookup::{enrich_agents, suggest_table, EnrichOptions, OnMissing};
use europeana_sdk::{EntityApi, SdkError};
use tracing::info;

/// Execute the agents command.
pub fn execute_agents<A>(args: AgentsArgs, api: &A, formatter: &Formatter) -> Result<String>
where
    A: EntityApi<Error = SdkError>,
{
    let options = EnrichOptions {
        entity_type: EntityType::Agent,
        biography_language: Some(args.lang),
        places: !args.no_places,
        on_missing: if args.skip_missing {
            OnMissing::Blank
        } else {
            OnMissing::Fail
        },
    };

    let (total, mut table) = suggest_table(api, &args.text, EntityType::Agent, false)?;
    let summary = enrich_agents(&mut table, api, &options)?;
    info!(
        "Enriched {} row(s) with {} retrieve call(s)",
        summary.rows, summary.retrieved
    );

    let mut output = with_count(formatter, total, table.len(), formatter.format_table(&table)?);
    if summary.blanked > 0 && formatter.format() == OutputFormat::Table {
        output.push('\n');
        output.push_str(
            &formatter.warning(&format!("{} value(s) missing and left empty", summary.blanked)),
        );
    }
    Ok(output)
}
