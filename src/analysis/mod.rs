pub mod coach;
pub mod matrix;
pub mod pick;
pub mod policy;
pub mod priority;
pub mod scorer;
pub mod search;
