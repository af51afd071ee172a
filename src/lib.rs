pub mod constants;
pub mod jpl_de;
pub mod orrery_errors;
