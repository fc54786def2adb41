pub mod db_init;
pub mod registry;
