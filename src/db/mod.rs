pub mod db;
pub mod depositdb;
pub mod metadb;
pub mod notificationdb;
pub mod userdb;
pub mod withdrawaldb;
