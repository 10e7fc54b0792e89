//! Search command implementation.

use super::with_count;
use crate::cli::SearchArgs;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use europeana_domain::query::{all_of, quote_uri};
use europeana_domain::{SearchQuery, Table};
use europeana_sdk::{EntityApi, SdkError};

/// Columns shown in table mode when `--columns` is not given
pub const DEFAULT_COLUMNS: [&str; 5] = ["id", "title", "type", "year", "dataProvider"];

/// Build the Search API query from free text and entity URIs.
pub fn build_query(args: &SearchArgs) -> Result<SearchQuery> {
    let terms = args
        .query
        .iter()
        .cloned()
        .chain(args.entities.iter().map(|uri| quote_uri(uri)));
    let query = all_of(terms);
    if query.is_empty() {
        return Err(CliError::InvalidInput(
            "Provide a query or at least one --entity URI".to_string(),
        ));
    }

    let mut search = SearchQuery::new(query);
    if args.media {
        search = search.with_media(true);
    }
    if let Some(qf) = &args.qf {
        search = search.with_qf(qf.clone());
    }
    Ok(search)
}

/// Execute the search command.
pub fn execute_search<A>(args: SearchArgs, api: &A, formatter: &Formatter) -> Result<String>
where
    A: EntityApi<Error = SdkError>,
{
    let query = build_query(&args)?;
    let envelope = api.search(&query)?;

    let mut table = Table::flatten(&envelope);
    table.promote_identifier_columns();

    let table = if !args.columns.is_empty() {
        table.select_columns(&args.columns)
    } else if formatter.format() == OutputFormat::Table {
        let selected = table.select_columns(&DEFAULT_COLUMNS);
        if selected.columns().is_empty() {
            table
        } else {
            selected
        }
    } else {
        table
    };

    let body = formatter.format_table(&table)?;
    Ok(with_count(formatter, envelope.total, table.len(), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use europeana_sdk::MockEntityApi;
    use serde_json::json;

    const SIXTEENTH_CENTURY: &str = "http://data.europeana.eu/timespan/16";
    const PAINTING: &str = "http://data.europeana.eu/concept/base/47";

    fn args(query: Option<&str>, entities: &[&str]) -> SearchArgs {
        SearchArgs {
            query: query.map(str::to_string),
            entities: entities.iter().map(|e| e.to_string()).collect(),
            media: false,
            qf: None,
            columns: Vec::new(),
        }
    }

    fn mock() -> MockEntityApi {
        let api = MockEntityApi::new();
        api.add_search(
            format!("\"{}\" AND \"{}\"", SIXTEENTH_CENTURY, PAINTING),
            json!({
                "success": true,
                "totalResults": 5312,
                "items": [{
                    "id": "/9200579/example",
                    "title": ["Portrait of a Lady"],
                    "edmPreview": ["http://example.org/preview.jpg"],
                    "dataProvider": ["Rijksmuseum"]
                }]
            }),
        );
        api
    }

    #[test]
    fn test_build_query_combines_text_and_entities() {
        let mut search = args(Some("portrait"), &[SIXTEENTH_CENTURY]);
        search.media = true;
        search.qf = Some("TYPE:IMAGE".to_string());

        let query = build_query(&search).unwrap();
        assert_eq!(query.query, format!("portrait AND \"{}\"", SIXTEENTH_CENTURY));
        assert_eq!(query.media, Some(true));
        assert_eq!(query.qf.as_deref(), Some("TYPE:IMAGE"));
    }

    #[test]
    fn test_build_query_requires_terms() {
        assert!(matches!(
            build_query(&args(None, &[])),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_search_table_uses_default_columns() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let search = args(None, &[SIXTEENTH_CENTURY, PAINTING]);
        let output = execute_search(search, &mock(), &formatter).unwrap();

        assert!(output.starts_with("ℹ 5312 result(s), showing 1"));
        assert!(output.contains("Portrait of a Lady"));
        assert!(!output.contains("edmPreview"));
    }

    #[test]
    fn test_search_json_keeps_all_columns() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let search = args(None, &[SIXTEENTH_CENTURY, PAINTING]);
        let output = execute_search(search, &mock(), &formatter).unwrap();
        assert!(output.contains("edmPreview"));
    }

    #[test]
    fn test_search_explicit_columns() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let mut search = args(None, &[SIXTEENTH_CENTURY, PAINTING]);
        search.columns = vec!["title".to_string()];

        let output = execute_search(search, &mock(), &formatter).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, json!([{"title": ["Portrait of a Lady"]}]));
    }
}
