pub mod db;
pub mod locks;
