pub mod npk;
