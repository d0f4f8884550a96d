pub mod export;
pub mod numeric;
