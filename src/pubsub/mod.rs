//! Подсистема Publish–Subscribe (pub/sub).
//!
//! Этот модуль реализует типизированную систему pub/sub для внутрипроцессного
//! вещания значений по иерархическим топикам:
//!
//! - `registry`: реестр подписок — обход дерева, сопоставление типов и
//!   конкурентная доставка (fan-out).
//! - `node` (приватный): узел префиксного дерева топиков со списками точных
//!   и wildcard-подписчиков.
//! - `subscriber` (приватный): типизированная запись подписки с type-erased
//!   колбэком.
//! - `topic`: маркер wildcard и валидация топиков.
//! - `report`: итог одного широковещания — сколько совпало, сколько
//!   доставлено, какие доставки упали.
//! - `config`: настройки реестра (ширина fan-out).
//!
//! Публичный API переэкспортирует:
//! - `registry::*`
//! - `report::*`
//! - `config::*`
//! - `topic::WILDCARD`

pub mod config;
mod node;
pub mod registry;
pub mod report;
mod subscriber;
pub mod topic;

pub use config::*;
pub use registry::*;
pub use report::*;
pub use topic::WILDCARD;
