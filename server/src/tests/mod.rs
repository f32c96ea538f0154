mod account_tests;
mod admin_tests;
