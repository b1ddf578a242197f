pub mod captures;
pub mod check;
pub mod rules;
pub mod run_common;
pub mod scopes;

#[cfg(test)]
mod listings_tests;
#[cfg(test)]
mod run_common_tests;
