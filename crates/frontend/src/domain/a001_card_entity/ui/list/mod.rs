use contracts::domain::a001_card_entity::aggregate::CardEntity;
use leptos::prelude::*;
use std::rc::Rc;

use crate::domain::a001_card_entity::api::HttpCardEntityService;
use crate::shared::dialogs::BrowserDialogs;
use crate::shared::entity_table::{
    local_spawner, ColumnSpec, EntityTable, EntityTableConfig, EntityTableDeps, EntityTableView,
    FilterField, SortSpec, TableSettings,
};
use crate::shared::error_report::ConsoleReporter;
use crate::shared::event_bus::{EntityKind, EventBus};
use crate::shared::i18n::TableStrings;
use crate::system::auth::AuthState;

pub const CARD_ENTITY: EntityKind = EntityKind("card_entity");

fn render_name(entity: &CardEntity) -> String {
    entity.name_or_empty().to_string()
}

/// Only administrators see the name column
fn columns(privileged: bool) -> Vec<ColumnSpec<CardEntity>> {
    if privileged {
        vec![ColumnSpec::new(CardEntity::PROPERTY_NAME, "Name", render_name).sortable()]
    } else {
        Vec::new()
    }
}

pub fn card_entity_config() -> EntityTableConfig<CardEntity> {
    EntityTableConfig {
        kind: CARD_ENTITY,
        entity_title: "CardEntity".to_string(),
        columns,
        default_sort: SortSpec {
            property: CardEntity::PROPERTY_MODIFIED,
            ascending: false,
        },
        filter_fields: vec![FilterField::new(CardEntity::PROPERTY_NAME, "Name")],
        display_label: render_name,
        export: None,
    }
}

/// Card entity list page.
///
/// Built once per mount with the viewer's privilege at that time.
#[component]
pub fn CardEntityList(bus: EventBus, auth: AuthState) -> impl IntoView {
    let service = Rc::new(HttpCardEntityService::new(auth.access_token.clone()));
    let deps = EntityTableDeps {
        bus,
        data_source: service.clone(),
        delete_service: service,
        dialogs: Rc::new(BrowserDialogs),
        reporter: Rc::new(ConsoleReporter),
        spawner: local_spawner(),
        strings: TableStrings::default(),
        settings: TableSettings::default(),
    };
    let table = EntityTable::new(card_entity_config(), deps, &auth);

    view! { <EntityTableView table=table /> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_table::TableEntity;
    use chrono::Utc;
    use contracts::domain::a001_card_entity::aggregate::CardEntityId;
    use uuid::Uuid;

    fn card(name: Option<&str>) -> CardEntity {
        CardEntity {
            id: CardEntityId::new(Uuid::from_u128(7)),
            name: name.map(str::to_string),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }

    #[test]
    fn test_name_column_only_for_admin() {
        let config = card_entity_config();
        let admin = (config.columns)(true);
        assert_eq!(admin.len(), 1);
        assert_eq!(admin[0].property_name, "name");
        assert!(admin[0].sortable);
        assert!((config.columns)(false).is_empty());
    }

    #[test]
    fn test_missing_name_renders_empty() {
        let config = card_entity_config();
        let column = &(config.columns)(true)[0];
        assert_eq!(column.value(&card(Some("Alice"))), "Alice");
        assert_eq!(column.value(&card(None)), "");
        assert_eq!((config.display_label)(&card(None)), "");
    }

    #[test]
    fn test_default_sort_is_modified_descending() {
        let sort = card_entity_config().default_sort;
        assert_eq!(sort.property, "modified");
        assert!(!sort.ascending);
    }

    #[test]
    fn test_no_export() {
        assert!(card_entity_config().export.is_none());
    }

    #[test]
    fn test_id_string_matches_uuid() {
        let c = card(Some("x"));
        assert_eq!(c.id_string(), Uuid::from_u128(7).to_string());
    }
}
