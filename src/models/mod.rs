pub mod depositmodel;
pub mod notificationmodel;
pub mod usermodel;
pub mod withdrawalmodel;
