pub mod mail;
pub mod notification;
pub mod object_storage;
pub mod pdf;
pub mod qr_code;
pub mod renderer;
