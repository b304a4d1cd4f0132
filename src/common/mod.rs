pub mod key_pair;
pub mod limits;
