//! Retrieve command implementation.

use crate::cli::{FieldArgs, RetrieveArgs};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use europeana_domain::entity::fields;
use europeana_domain::table::cell_text;
use europeana_domain::{resolve_place, Entity, LifeEvent, Table, ValuePolicy};
use europeana_sdk::lookup::{follow_part_of, retrieve_uri};
use europeana_sdk::{EntityApi, SdkError};
use serde_json::{Map, Value};

/// Execute the retrieve command.
pub fn execute_retrieve<A>(args: RetrieveArgs, api: &A, formatter: &Formatter) -> Result<String>
where
    A: EntityApi<Error = SdkError>,
{
    let entity = retrieve_uri(api, args.entity_type.into(), &args.id)?;

    if !args.follow_part_of {
        return render_entity(&entity, &args.field, formatter);
    }

    let parent = follow_part_of(api, &entity)?;
    match formatter.format() {
        OutputFormat::Json => {
            let chain: Vec<&Entity> = std::iter::once(&entity).chain(parent.as_ref()).collect();
            formatter.format_json(&chain)
        }
        OutputFormat::Quiet | OutputFormat::Table => {
            let mut output = render_entity(&entity, &args.field, formatter)?;
            output.push('\n');
            match &parent {
                Some(parent) => {
                    if formatter.format() == OutputFormat::Table {
                        output.push('\n');
                        output.push_str(&formatter.heading("Part of:"));
                        output.push('\n');
                    }
                    output.push_str(&render_entity(parent, &args.field, formatter)?);
                }
                None if formatter.format() == OutputFormat::Table => {
                    output.push_str(&formatter.warning("No broader place recorded"));
                }
                None => {}
            }
            Ok(output)
        }
    }
}

/// Render one entity: summary plus the requested multilingual field.
///
/// JSON prints the entity document unchanged; quiet prints its URI.
pub fn render_entity(entity: &Entity, field: &FieldArgs, formatter: &Formatter) -> Result<String> {
    match formatter.format() {
        OutputFormat::Json => formatter.format_json(entity),
        OutputFormat::Quiet => Ok(entity.id().unwrap_or_default().to_string()),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&formatter.heading(entity.id().unwrap_or("(no id)")));
            output.push('\n');
            output.push_str(&formatter.format_table(&entity_summary(entity))?);
            output.push('\n');

            let values = entity.multilingual(&field.field)?;
            if values.is_absent() {
                output.push_str(&formatter.warning(&format!(
                    "Field '{}' not present for this entity",
                    field.field
                )));
            } else {
                let policy = if field.first {
                    ValuePolicy::First
                } else {
                    ValuePolicy::All
                };
                let table = Table::from_language_values(
                    &values.pairs(policy),
                    "language",
                    value_column(&field.field),
                );
                output.push_str(&formatter.format_table(&table)?);
            }
            Ok(output)
        }
    }
}

/// Column header for the values of a multilingual field
pub fn value_column(field: &str) -> &'static str {
    match field {
        fields::PREF_LABEL => "name",
        fields::BIOGRAPHICAL_INFORMATION => "biography",
        fields::NOTE => "note",
        _ => "value",
    }
}

/// Two-column field/value overview of the scalar facts of an entity
pub fn entity_summary(entity: &Entity) -> Table {
    let mut table = Table::with_columns(["field", "value"]);
    let mut push = |name: &str, value: String| {
        let mut row = Map::new();
        row.insert("field".to_string(), Value::String(name.to_string()));
        row.insert("value".to_string(), Value::String(value));
        table.push_row(row);
    };

    if let Some(entity_type) = entity.get(fields::TYPE) {
        push(fields::TYPE, cell_text(entity_type));
    }
    if let Some(coordinates) = entity.coordinates() {
        push("coordinates", format!("{}, {}", coordinates.lat, coordinates.long));
    }
    for event in [LifeEvent::Birth, LifeEvent::Death] {
        if let Some(place) = resolve_place(entity, event) {
            push(event.field(), place);
        }
    }
    for field in [fields::IS_PART_OF, fields::RELATED] {
        let references = entity.references(field);
        if !references.is_empty() {
            push(field, references.join(", "));
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::EntityTypeArg;
    use europeana_sdk::MockEntityApi;
    use serde_json::json;

    fn place(id: u64, label: &str, part_of: Option<u64>) -> Entity {
        let mut value = json!({
            "id": format!("http://data.europeana.eu/place/base/{}", id),
            "type": "Place",
            "prefLabel": {"en": label, "it": [label, "alt"]},
            "lat": 43.77,
            "long": 11.25
        });
        if let Some(parent) = part_of {
            value["isPartOf"] = json!([format!("http://data.europeana.eu/place/base/{}", parent)]);
        }
        Entity::from_value(value).unwrap()
    }

    fn mock() -> MockEntityApi {
        let api = MockEntityApi::new();
        api.add_entity(place(41488, "Florence", Some(216254)));
        api.add_entity(place(216254, "Tuscany", None));
        api
    }

    fn args(id: &str, follow_part_of: bool, first: bool) -> RetrieveArgs {
        RetrieveArgs {
            entity_type: EntityTypeArg::Place,
            id: id.to_string(),
            field: FieldArgs {
                field: "prefLabel".to_string(),
                first,
            },
            follow_part_of,
        }
    }

    #[test]
    fn test_retrieve_table_lists_labels() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = execute_retrieve(args("41488", false, false), &mock(), &formatter).unwrap();

        assert!(output.contains("http://data.europeana.eu/place/base/41488"));
        assert!(output.contains("43.77, 11.25"));
        assert!(output.contains("name"));
        assert!(output.contains("Florence"));
        assert!(output.contains("alt"));
    }

    #[test]
    fn test_retrieve_first_value_only() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = execute_retrieve(args("41488", false, true), &mock(), &formatter).unwrap();
        assert!(!output.contains("alt"));
    }

    #[test]
    fn test_retrieve_accepts_uri() {
        let api = mock();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = execute_retrieve(
            args("http://data.europeana.eu/place/base/41488", false, false),
            &api,
            &formatter,
        )
        .unwrap();
        assert_eq!(output, "http://data.europeana.eu/place/base/41488");
    }

    #[test]
    fn test_follow_part_of_json() {
        let api = mock();
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = execute_retrieve(args("41488", true, false), &api, &formatter).unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[1]["prefLabel"]["en"], "Tuscany");
        assert_eq!(api.calls_to("retrieve"), 2);
    }

    #[test]
    fn test_follow_part_of_without_parent() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = execute_retrieve(args("216254", true, false), &mock(), &formatter).unwrap();
        assert!(output.contains("No broader place recorded"));
    }

    #[test]
    fn test_missing_field_is_reported() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut missing = args("41488", false, false);
        missing.field.field = "note".to_string();
        let output = execute_retrieve(missing, &mock(), &formatter).unwrap();
        assert!(output.contains("Field 'note' not present for this entity"));
    }

    #[test]
    fn test_unknown_entity_is_error() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = execute_retrieve(args("1", false, false), &mock(), &formatter);
        assert!(matches!(
            result,
            Err(crate::error::CliError::Sdk(SdkError::NotFound(_)))
        ));
    }

    #[test]
    fn test_value_column_names() {
        assert_eq!(value_column("prefLabel"), "name");
        assert_eq!(value_column("biographicalInformation"), "biography");
        assert_eq!(value_column("altLabel"), "value");
    }
}
