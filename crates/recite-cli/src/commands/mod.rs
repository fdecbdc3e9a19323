pub mod grade;
pub mod init;
pub mod quiz;
pub mod validate;
