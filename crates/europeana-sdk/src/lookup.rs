//! Chained lookups
//!
//! Helpers that feed the result of one call into the next: suggest results
//! become a table, table identifiers become `retrieve` calls, and selected
//! sub-fields of the retrieved entities become new table columns.
//!
//! Every helper is written against [`EntityApi`] and issues its calls
//! sequentially: one `retrieve` per table row, no batching, no caching of
//! repeated identifiers.

use europeana_domain::table::{cell_text, IDENTIFIER_COLUMN};
use europeana_domain::{
    resolve_place, DomainError, Entity, EntityApi, EntityRef, EntityType, LifeEvent, Table,
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Column receiving the biography text
pub const BIO_COLUMN: &str = "bio";

/// What to do when a requested value is missing for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnMissing {
    /// Stop and report which entity lacks the value
    #[default]
    Fail,
    /// Leave the cell `null` and carry on
    Blank,
}

/// Columns to add in [`enrich_agents`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichOptions {
    /// Type used for identifiers whose URI does not name one
    pub entity_type: EntityType,
    /// Add a `bio` column with the biography in this language
    pub biography_language: Option<String>,
    /// Add `placeOfBirth` and `placeOfDeath` columns
    pub places: bool,
    /// Missing-value policy
    pub on_missing: OnMissing,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            entity_type: EntityType::Agent,
            biography_language: Some("en".to_string()),
            places: true,
            on_missing: OnMissing::Fail,
        }
    }
}

/// Outcome of an enrichment pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnrichSummary {
    /// Rows in the table
    pub rows: usize,
    /// `retrieve` calls issued
    pub retrieved: usize,
    /// Cells left `null` under [`OnMissing::Blank`]
    pub blanked: usize,
}

/// Suggest, flatten, drop illustration columns, identifiers first.
///
/// Returns the reported total alongside the table.
pub fn suggest_table<A>(
    api: &A,
    text: &str,
    entity_type: EntityType,
    keep_illustrations: bool,
) -> Result<(Option<u64>, Table), A::Error>
where
    A: EntityApi,
{
    let envelope = api.suggest(text, entity_type)?;
    let mut table = Table::flatten(&envelope);
    if !keep_illustrations {
        table.drop_illustrations();
    }
    table.promote_identifier_columns();
    Ok((envelope.total, table))
}

/// Retrieve the entity behind a URI (or bare identifier).
///
/// The type named in the URI wins over `fallback`.
pub fn retrieve_uri<A>(api: &A, fallback: EntityType, uri: &str) -> Result<Entity, A::Error>
where
    A: EntityApi,
{
    let entity_ref = EntityRef::from_uri(uri);
    api.retrieve(entity_ref.type_or(fallback), &entity_ref.identifier)
}

/// Retrieve the first suggestion for `text`, if there is one
pub fn first_match<A>(
    api: &A,
    text: &str,
    entity_type: EntityType,
) -> Result<Option<Entity>, A::Error>
where
    A: EntityApi,
{
    let envelope = api.suggest(text, entity_type)?;
    match envelope.first_id() {
        Some(uri) => retrieve_uri(api, entity_type, uri).map(Some),
        None => Ok(None),
    }
}

/// Retrieve the first `isPartOf` parent of a place
pub fn follow_part_of<A>(api: &A, entity: &Entity) -> Result<Option<Entity>, A::Error>
where
    A: EntityApi,
{
    let parents = entity.references(europeana_domain::entity::fields::IS_PART_OF);
    match parents.first() {
        Some(uri) => retrieve_uri(api, EntityType::Place, uri).map(Some),
        None => Ok(None),
    }
}

/// Add biography and place columns to a table of suggestions.
///
/// Issues exactly one `retrieve` per row, using the row's `id` column. A
/// missing identifier, biography language, or biography field fails the whole
/// pass under [`OnMissing::Fail`] with an error naming the entity; under
/// [`OnMissing::Blank`] the affected cells stay `null`. Places are optional by
/// nature and never fail: an agent without a recorded place gets `null`.
///
/// On error the table is left exactly as it was.
pub fn enrich_agents<A>(
    table: &mut Table,
    api: &A,
    options: &EnrichOptions,
) -> Result<EnrichSummary, A::Error>
where
    A: EntityApi,
    A::Error: From<DomainError>,
{
    let mut summary = EnrichSummary {
        rows: table.len(),
        ..Default::default()
    };

    if table.is_empty() {
        return Ok(summary);
    }
    if !table.has_column(IDENTIFIER_COLUMN) {
        return Err(DomainError::missing(IDENTIFIER_COLUMN).into());
    }

    let mut bios = Vec::with_capacity(table.len());
    let mut births = Vec::with_capacity(table.len());
    let mut deaths = Vec::with_capacity(table.len());
    let added_per_row =
        usize::from(options.biography_language.is_some()) + if options.places { 2 } else { 0 };

    // New cells are collected first; an error leaves the table untouched
    for row in 0..table.len() {
        let uri = cell_text(table.cell(row, IDENTIFIER_COLUMN));
        if uri.is_empty() {
            let err = DomainError::missing(IDENTIFIER_COLUMN).for_entity(format!("row {}", row));
            match options.on_missing {
                OnMissing::Fail => return Err(err.into()),
                OnMissing::Blank => {
                    warn!("Skipping row {}: {}", row, err);
                    summary.blanked += added_per_row;
                    bios.push(Value::Null);
                    births.push(Value::Null);
                    deaths.push(Value::Null);
                    continue;
                }
            }
        }

        debug!("Retrieving row {} ({})", row, uri);
        let entity = retrieve_uri(api, options.entity_type, &uri)?;
        summary.retrieved += 1;

        let bio = match &options.biography_language {
            Some(language) => match entity.biography(language) {
                Ok(bio) => Value::String(bio),
                Err(e) => match options.on_missing {
                    OnMissing::Fail => return Err(e.for_entity(uri).into()),
                    OnMissing::Blank => {
                        warn!("{}: {}", uri, e);
                        summary.blanked += 1;
                        Value::Null
                    }
                },
            },
            None => Value::Null,
        };
        bios.push(bio);

        let place = |event| resolve_place(&entity, event).map_or(Value::Null, Value::String);
        births.push(place(LifeEvent::Birth));
        deaths.push(place(LifeEvent::Death));
    }

    if options.biography_language.is_some() {
        table.push_column(BIO_COLUMN, bios);
    }
    if options.places {
        table.push_column(LifeEvent::Birth.field(), births);
        table.push_column(LifeEvent::Death.field(), deaths);
    }

    info!(
        "Enriched {} rows with {} retrieve calls ({} blank cells)",
        summary.rows, summary.retrieved, summary.blanked
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockEntityApi;
    use crate::SdkError;
    use serde_json::json;

    fn agent(id: u64, name: &str, bio_en: Option<&str>) -> Entity {
        let mut value = json!({
            "id": format!("http://data.europeana.eu/agent/base/{}", id),
            "type": "Agent",
            "prefLabel": {"en": name},
            "placeOfBirth": [{"@resource": "http://dbpedia.org/resource/Vinci,_Tuscany"}],
            "placeOfDeath": [{"en": "Amboise"}]
        });
        if let Some(bio) = bio_en {
            value["biographicalInformation"] = json!([{"@language": "en", "@value": bio}]);
        }
        Entity::from_value(value).unwrap()
    }

    fn api_with_two_agents(second_bio: Option<&str>) -> MockEntityApi {
        let api = MockEntityApi::new();
        api.add_entity(agent(146741, "Leonardo da Vinci", Some("Italian polymath")));
        api.add_entity(agent(59981, "Leonardo Bistolfi", second_bio));
        api.add_suggestion(
            "leonardo",
            EntityType::Agent,
            json!({
                "total": 2,
                "items": [
                    {"id": "http://data.europeana.eu/agent/base/146741", "type": "Agent",
                     "isShownBy": {"id": "http://example.org/a.jpg"}},
                    {"id": "http://data.europeana.eu/agent/base/59981", "type": "Agent"}
                ]
            }),
        );
        api
    }

    #[test]
    fn test_suggest_table_drops_illustrations() {
        let api = api_with_two_agents(None);
        let (total, table) = suggest_table(&api, "leonardo", EntityType::Agent, false).unwrap();
        assert_eq!(total, Some(2));
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), &["id", "type"]);
    }

    #[test]
    fn test_enrich_one_retrieve_per_row() {
        let api = api_with_two_agents(Some("Italian sculptor"));
        let (_, mut table) = suggest_table(&api, "leonardo", EntityType::Agent, false).unwrap();

        let summary = enrich_agents(&mut table, &api, &EnrichOptions::default()).unwrap();

        assert_eq!(summary, EnrichSummary { rows: 2, retrieved: 2, blanked: 0 });
        assert_eq!(api.calls_to("retrieve"), 2);
        assert_eq!(table.cell(0, BIO_COLUMN), &json!("Italian polymath"));
        assert_eq!(table.cell(1, BIO_COLUMN), &json!("Italian sculptor"));
        assert_eq!(table.cell(0, "placeOfBirth"), &json!("Vinci, Tuscany"));
        assert_eq!(table.cell(1, "placeOfDeath"), &json!("Amboise"));
    }

    #[test]
    fn test_enrich_fails_naming_entity() {
        let api = api_with_two_agents(None);
        let (_, mut table) = suggest_table(&api, "leonardo", EntityType::Agent, false).unwrap();

        let err = enrich_agents(&mut table, &api, &EnrichOptions::default()).unwrap_err();
        match err {
            SdkError::Domain(domain) => {
                assert!(domain
                    .to_string()
                    .starts_with("http://data.europeana.eu/agent/base/59981"));
                assert_eq!(domain.root(), &DomainError::missing("biographicalInformation"));
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_enrich_blank_policy() {
        let api = api_with_two_agents(None);
        let (_, mut table) = suggest_table(&api, "leonardo", EntityType::Agent, false).unwrap();
        let options = EnrichOptions {
            biography_language: Some("en".to_string()),
            places: false,
            on_missing: OnMissing::Blank,
            ..Default::default()
        };

        let summary = enrich_agents(&mut table, &api, &options).unwrap();
        assert_eq!(summary.blanked, 1);
        assert_eq!(table.cell(1, BIO_COLUMN), &Value::Null);
        assert!(!table.has_column("placeOfBirth"));
    }

    #[test]
    fn test_enrich_failure_leaves_table_unchanged() {
        let api = api_with_two_agents(None);
        let (_, mut table) = suggest_table(&api, "leonardo", EntityType::Agent, false).unwrap();
        let before = table.clone();

        assert!(enrich_agents(&mut table, &api, &EnrichOptions::default()).is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_enrich_requires_identifier_column() {
        let api = MockEntityApi::new();
        let mut table = Table::from_items(&[json!({"name": "Leonardo"})]);

        let err = enrich_agents(&mut table, &api, &EnrichOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            SdkError::Domain(DomainError::FieldNotPresent { ref field }) if field == "id"
        ));
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn test_enrich_blank_identifier_row() {
        let api = api_with_two_agents(Some("Italian sculptor"));
        let mut table = Table::from_items(&[
            json!({"id": ""}),
            json!({"id": "http://data.europeana.eu/agent/base/59981"}),
        ]);
        let options = EnrichOptions {
            on_missing: OnMissing::Blank,
            ..Default::default()
        };

        let summary = enrich_agents(&mut table, &api, &options).unwrap();
        assert_eq!(summary, EnrichSummary { rows: 2, retrieved: 1, blanked: 3 });
        assert_eq!(table.cell(0, BIO_COLUMN), &Value::Null);
        assert_eq!(table.cell(0, "placeOfBirth"), &Value::Null);
        assert_eq!(table.cell(1, BIO_COLUMN), &json!("Italian sculptor"));

        let mut strict = Table::from_items(&[json!({"id": ""})]);
        assert!(enrich_agents(&mut strict, &api, &EnrichOptions::default()).is_err());
    }

    #[test]
    fn test_enrich_empty_table_makes_no_calls() {
        let api = MockEntityApi::new();
        let mut table = Table::default();
        let summary = enrich_agents(&mut table, &api, &EnrichOptions::default()).unwrap();
        assert_eq!(summary.retrieved, 0);
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn test_leonardo_first_match_has_english_label() {
        let api = api_with_two_agents(None);
        let leonardo = first_match(&api, "leonardo", EntityType::Agent).unwrap().unwrap();

        let labels = leonardo.pref_label().unwrap();
        assert!(labels.value_in("en").unwrap().contains("Leonardo"));
        assert_eq!(api.calls(), vec!["suggest agent leonardo", "retrieve agent 146741"]);
    }

    #[test]
    fn test_first_match_and_part_of() {
        let api = MockEntityApi::new();
        api.add_suggestion(
            "Amboise",
            EntityType::Place,
            json!({"total": 1, "items": [{"id": "http://data.europeana.eu/place/base/31193"}]}),
        );
        api.add_entity(
            Entity::from_value(json!({
                "id": "http://data.europeana.eu/place/base/31193",
                "type": "Place",
                "prefLabel": {"en": "Amboise"},
                "isPartOf": ["http://data.europeana.eu/place/base/60"]
            }))
            .unwrap(),
        );
        api.add_entity(
            Entity::from_value(json!({
                "id": "http://data.europeana.eu/place/base/60",
                "type": "Place",
                "prefLabel": {"en": "Centre-Val de Loire"},
                "lat": 47.5,
                "long": 1.75
            }))
            .unwrap(),
        );

        let place = first_match(&api, "Amboise", EntityType::Place).unwrap().unwrap();
        let parent = follow_part_of(&api, &place).unwrap().unwrap();
        assert_eq!(parent.identifier(), Some("60"));
        assert!(parent.coordinates().is_some());
        assert!(follow_part_of(&api, &parent).unwrap().is_none());
    }
}
