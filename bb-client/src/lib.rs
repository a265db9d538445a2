pub mod aggregate;
pub mod collection;
pub mod display;
pub mod search;
pub mod source;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utils;
