pub mod admindtos;
pub mod depositdtos;
pub mod userdtos;
pub mod withdrawaldtos;
