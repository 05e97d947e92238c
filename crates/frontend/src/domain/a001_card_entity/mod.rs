pub mod api;
pub mod ui;

use crate::shared::entity_table::TableEntity;
use contracts::domain::a001_card_entity::aggregate::{CardEntity, CardEntityId};

impl TableEntity for CardEntity {
    type Id = CardEntityId;

    fn id(&self) -> CardEntityId {
        self.id
    }

    fn id_string(&self) -> String {
        self.to_string_id()
    }
}
