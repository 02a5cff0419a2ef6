pub mod errors;
pub mod graphql;
pub mod logging;
pub mod messages;
pub mod processes;
pub mod storage;
#[cfg(test)]
pub mod testing_helper_methods;
pub mod user_info;
