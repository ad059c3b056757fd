//! Flutter bridge for the JustOne journal core.

pub mod api;
