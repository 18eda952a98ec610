//! Infrastructure Capability Ports
//!
//! One port per provider category. Adapters implement these traits and are
//! selected by name through the factory registries in `bms-application`.

pub mod auth;
pub mod database;
pub mod email;
pub mod id;
pub mod payment;
pub mod storage;
pub mod translation;

pub use auth::{AuthIdentity, AuthProvider};
pub use database::DatabaseProvider;
pub use email::{EmailMessage, EmailProvider};
pub use id::IdProvider;
pub use payment::{ChargeReceipt, ChargeRequest, PaymentProvider};
pub use storage::{StorageProvider, StoredObject};
pub use translation::TranslationProvider;
