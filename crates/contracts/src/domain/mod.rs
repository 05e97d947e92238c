pub mod a001_card_entity;
pub mod common;
