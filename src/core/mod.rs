pub mod db;
pub mod pagination;
pub mod sqlx_utils;
pub mod telemetry;
pub mod utils;
